//! UI components for Prompt Desk
//!
//! This module contains all user interface components built with Dioxus.

pub mod components;
pub mod run;
pub mod settings;

use crate::app::{AppState, View};
use crate::ui::run::RunView;
use crate::ui::settings::SettingsView;
use dioxus::prelude::*;

/// Main Application Layout
#[component]
pub fn Layout() -> Element {
    let app_state = use_context::<AppState>();
    let dark_mode = app_state.settings.read().dark_mode;
    let theme = if dark_mode { "dark" } else { "light" };
    let mut view = app_state.view;

    rsx! {
        // Theme wrapper
        div {
            "data-theme": "{theme}",
            class: "app-shell",

            link { rel: "stylesheet", href: "assets/styles.css" }

            // Header with view tabs
            header {
                class: "app-header",

                h1 { class: "app-title", "Prompt Desk" }

                nav {
                    class: "app-tabs",
                    TabButton {
                        active: view() == View::Run,
                        onclick: move |_| view.set(View::Run),
                        label: "Run",
                    }
                    TabButton {
                        active: view() == View::Settings,
                        onclick: move |_| view.set(View::Settings),
                        label: "Settings",
                    }
                }
            }

            // Main Content Area
            main {
                class: "app-main",
                match view() {
                    View::Run => rsx! { RunView {} },
                    View::Settings => rsx! { SettingsView {} },
                }
            }
        }
    }
}

#[component]
fn TabButton(active: bool, onclick: EventHandler<MouseEvent>, label: String) -> Element {
    let classes = if active { "tab tab-active" } else { "tab" };

    rsx! {
        button {
            class: "{classes}",
            onclick: onclick,
            "{label}"
        }
    }
}
