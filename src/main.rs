//! Prompt Desk - Prompt Runner Application
//!
//! A desktop application for sending prompts to a chat-completion API and
//! archiving the prompt/response pairs as Markdown files.

use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use promptdesk::app::App;

fn main() {
    // Initialize tracing subscriber for logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("promptdesk=info".parse().unwrap()))
        .init();

    info!("Starting Prompt Desk v{}", env!("CARGO_PKG_VERSION"));

    // Launch Dioxus desktop application
    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            Config::default().with_window(
                WindowBuilder::new()
                    .with_title("Prompt Desk")
                    .with_inner_size(LogicalSize::new(800.0, 600.0)),
            ),
        )
        .launch(App);
}
