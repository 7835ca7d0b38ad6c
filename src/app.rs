//! Root Dioxus application component
//!
//! This module contains the main App component that serves as the root of
//! the UI tree, and the application state shared across components.

use crate::api::RoundGate;
use crate::storage::secret;
use crate::storage::settings::{load_settings, save_settings, Settings};
use crate::ui::Layout;
use dioxus::desktop::tao::event::{Event, WindowEvent};
use dioxus::desktop::use_wry_event_handler;
use dioxus::prelude::*;

/// Which main view is visible
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum View {
    Run,
    Settings,
}

/// Global application state shared across components
#[derive(Clone)]
pub struct AppState {
    pub settings: Signal<Settings>,
    pub api_key: Signal<String>,
    pub gate: Signal<RoundGate>,
    pub view: Signal<View>,
}

impl AppState {
    pub fn new() -> Self {
        let settings = load_settings();
        let api_key = match secret::load_api_key() {
            Ok(Some(key)) => key,
            Ok(None) => String::new(),
            Err(e) => {
                tracing::warn!("Failed to read API key from secret store: {}", e);
                String::new()
            }
        };

        tracing::info!("AppState initialized");
        Self {
            settings: Signal::new(settings),
            api_key: Signal::new(api_key),
            gate: Signal::new(RoundGate::default()),
            view: Signal::new(View::Run),
        }
    }
}

#[component]
pub fn App() -> Element {
    let app_state = AppState::new();
    use_context_provider(|| app_state.clone());

    // Write settings back when the window is closed
    let settings = app_state.settings;
    use_wry_event_handler(move |event, _| {
        if let Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } = event
        {
            if let Err(e) = save_settings(&settings.peek()) {
                tracing::error!("Failed to save settings on shutdown: {}", e);
            }
        }
    });

    rsx! {
        Layout {}
    }
}
