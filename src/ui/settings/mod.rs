//! Settings view
//!
//! Folder configuration, API key management (with a live validation call),
//! model selection, and the dark-mode toggle.

use std::path::PathBuf;

use dioxus::prelude::*;

use crate::api::CompletionClient;
use crate::app::AppState;
use crate::storage::secret;
use crate::storage::settings::{save_settings, AVAILABLE_MODELS, DEFAULT_MODEL};
use crate::ui::components::dialogs::{Notice, NoticeDialog};

#[component]
pub fn SettingsView() -> Element {
    let app_state = use_context::<AppState>();

    // Local edit buffers, committed on "Save Configuration"
    let initial = app_state.settings.read().clone();
    let initial_key = app_state.api_key.read().clone();

    let mut prompts_folder = {
        let value = initial.prompts_folder.display().to_string();
        use_signal(move || value)
    };
    let mut outputs_folder = {
        let value = initial.outputs_folder.display().to_string();
        use_signal(move || value)
    };
    let mut model_choice = {
        let value = initial.model.clone();
        use_signal(move || value)
    };
    let mut api_key_input = use_signal(move || initial_key);
    let mut show_key = use_signal(|| false);
    let mut notice = use_signal(|| None::<Notice>);

    let dark_mode = app_state.settings.read().dark_mode;
    let key_input_type = if show_key() { "text" } else { "password" };

    // Handler for the API key validation call
    let handle_test = move |_| {
        let key = api_key_input();
        spawn(async move {
            let client = CompletionClient::new(key);
            match client.verify_key().await {
                Ok(()) => {
                    notice.set(Some(Notice::new("API Key Test", "API key is valid!")));
                }
                Err(e) => {
                    tracing::warn!("API key validation failed: {}", e);
                    notice.set(Some(Notice::new(
                        "API Key Test",
                        format!("API key is invalid: {e}"),
                    )));
                }
            }
        });
    };

    // Handler for committing settings + credential
    let handle_save = {
        let app_state = app_state.clone();
        move |_| {
            let mut updated = app_state.settings.read().clone();
            updated.prompts_folder = PathBuf::from(prompts_folder());
            updated.outputs_folder = PathBuf::from(outputs_folder());
            updated.model = model_choice();
            updated.validate();

            let mut settings = app_state.settings;
            settings.set(updated.clone());
            let mut api_key = app_state.api_key;
            api_key.set(api_key_input());

            if let Err(e) = save_settings(&updated) {
                tracing::error!("Failed to save settings: {}", e);
                notice.set(Some(Notice::new(
                    "Error",
                    format!("Failed to save configuration: {e}"),
                )));
                return;
            }

            if let Err(e) = secret::save_api_key(&api_key_input()) {
                tracing::error!("Failed to save API key: {}", e);
                notice.set(Some(Notice::new(
                    "Error",
                    format!("Failed to save API key: {e}"),
                )));
                return;
            }

            notice.set(Some(Notice::new(
                "Configuration Saved",
                "Configuration has been saved successfully!",
            )));
        }
    };

    let handle_theme = {
        let app_state = app_state.clone();
        move |_| {
            let mut settings_signal = app_state.settings;
            let mut settings = settings_signal.write();
            settings.dark_mode = !settings.dark_mode;
            if let Err(error) = save_settings(&settings) {
                tracing::error!("Failed to save settings: {}", error);
            }
        }
    };

    // Clears the edit buffers and unchecks dark mode in memory; nothing is
    // written until Save
    let handle_reset = {
        let app_state = app_state.clone();
        move |_| {
            prompts_folder.set(String::new());
            outputs_folder.set(String::new());
            api_key_input.set(String::new());
            model_choice.set(DEFAULT_MODEL.to_string());
            show_key.set(false);
            let mut settings = app_state.settings;
            settings.write().dark_mode = false;
        }
    };

    rsx! {
        div {
            class: "settings-view",

            h2 { class: "section-title", "Settings" }

            // Folder Configuration
            div {
                class: "field-row",
                label { class: "field-label", "Prompts Folder:" }
                input {
                    class: "field-input",
                    r#type: "text",
                    placeholder: "Folder to store prompts",
                    value: "{prompts_folder}",
                    oninput: move |evt| prompts_folder.set(evt.value()),
                }
            }
            div {
                class: "field-row",
                label { class: "field-label", "Outputs Folder:" }
                input {
                    class: "field-input",
                    r#type: "text",
                    placeholder: "Folder to store outputs",
                    value: "{outputs_folder}",
                    oninput: move |evt| outputs_folder.set(evt.value()),
                }
            }

            // API Key Management
            div {
                class: "field-row",
                label { class: "field-label", "API Key:" }
                input {
                    class: "field-input",
                    r#type: "{key_input_type}",
                    value: "{api_key_input}",
                    oninput: move |evt| api_key_input.set(evt.value()),
                }
                label {
                    class: "checkbox-label",
                    input {
                        r#type: "checkbox",
                        checked: show_key(),
                        onchange: move |evt| show_key.set(evt.checked()),
                    }
                    "Show"
                }
                button {
                    class: "btn",
                    onclick: handle_test,
                    "Test API Key"
                }
            }

            // Model Selection
            div {
                class: "field-row",
                label { class: "field-label", "Model:" }
                select {
                    class: "field-input",
                    onchange: move |evt| model_choice.set(evt.value()),
                    for m in AVAILABLE_MODELS {
                        option { value: "{m}", selected: model_choice() == *m, "{m}" }
                    }
                }
            }

            // Dark Mode Toggle
            div {
                class: "field-row",
                label {
                    class: "checkbox-label",
                    input {
                        r#type: "checkbox",
                        checked: dark_mode,
                        onchange: handle_theme,
                    }
                    "Dark Mode"
                }
            }

            // Actions
            div {
                class: "run-row",
                button {
                    class: "btn btn-primary",
                    onclick: handle_save,
                    "Save Configuration"
                }
                button {
                    class: "btn",
                    onclick: handle_reset,
                    "Reset to Default"
                }
            }

            if let Some(current) = notice() {
                NoticeDialog {
                    notice: current,
                    on_dismiss: move |_| notice.set(None),
                }
            }
        }
    }
}
