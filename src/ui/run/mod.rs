//! Prompt run view
//!
//! Title and prompt entry, round execution, the output log, and the
//! save-on-completion flow with overwrite confirmation.

use std::sync::mpsc::TryRecvError;

use dioxus::prelude::*;

use crate::api::{start_round, validate_prompt, RoundEvent, RoundLog, RoundRequest};
use crate::app::AppState;
use crate::storage::archive::{round_files, RoundFiles};
use crate::ui::components::dialogs::{ConfirmDialog, Notice, NoticeDialog};
use crate::ui::components::loading::{ProgressBar, Spinner};

/// A finished round waiting on overwrite confirmation
#[derive(Debug, Clone, PartialEq)]
struct PendingSave {
    files: RoundFiles,
    prompt: String,
    output: String,
}

#[component]
pub fn RunView() -> Element {
    let app_state = use_context::<AppState>();

    let mut title = use_signal(String::new);
    let mut prompt = use_signal(String::new);
    let mut log = use_signal(RoundLog::default);
    let mut progress = use_signal(|| 0u8);
    let mut is_running = use_signal(|| false);
    let mut notice = use_signal(|| None::<Notice>);
    let mut pending_save = use_signal(|| None::<PendingSave>);

    let char_count = prompt().chars().count();
    let model = app_state.settings.read().model.clone();

    // Handler for running a round
    let handle_run = {
        let app_state = app_state.clone();
        move |_| {
            let prompt_text = prompt();
            if validate_prompt(&prompt_text).is_err() {
                notice.set(Some(Notice::new("Error", "Please enter a prompt.")));
                return;
            }

            // Explicit in-flight guard, on top of the disabled button
            let mut gate = app_state.gate;
            if gate.write().try_begin().is_err() {
                notice.set(Some(Notice::new(
                    "Busy",
                    "A round is already in flight. Wait for it to finish.",
                )));
                return;
            }

            log.write().clear();
            progress.set(0);
            is_running.set(true);

            let request = RoundRequest {
                prompt: prompt_text.clone(),
                api_key: app_state.api_key.read().clone(),
                model: app_state.settings.read().model.clone(),
            };
            tracing::info!("Starting round with model {}", request.model);
            let rx = start_round(request);

            let app_state = app_state.clone();
            let title_text = title();
            spawn(async move {
                loop {
                    match rx.try_recv() {
                        Ok(RoundEvent::Progress(value)) => progress.set(value),
                        Ok(RoundEvent::Done) => break,
                        Ok(event) => log.write().apply(&event),
                        Err(TryRecvError::Empty) => {
                            tokio::task::yield_now().await;
                        }
                        Err(TryRecvError::Disconnected) => break,
                    }
                }

                is_running.set(false);
                let mut gate = app_state.gate;
                gate.write().finish();

                // Round finished: persist the prompt/output pair
                let settings = app_state.settings.read().clone();
                let files = round_files(
                    &settings.prompts_folder,
                    &settings.outputs_folder,
                    &title_text,
                );
                let output_text = log.read().text();

                if files.any_exists() {
                    pending_save.set(Some(PendingSave {
                        files,
                        prompt: prompt_text,
                        output: output_text,
                    }));
                } else {
                    notice.set(Some(write_round(&files, &prompt_text, &output_text)));
                }
            });
        }
    };

    rsx! {
        div {
            class: "run-view",

            // Title Input
            div {
                class: "field-row",
                label { class: "field-label", "Title:" }
                input {
                    class: "field-input",
                    r#type: "text",
                    placeholder: "Enter a title for your prompt",
                    value: "{title}",
                    oninput: move |evt| title.set(evt.value()),
                }
            }

            // Prompt Input
            div {
                class: "field-column",
                label { class: "field-label", "Prompt:" }
                textarea {
                    class: "prompt-input",
                    placeholder: "Enter your prompt here...",
                    value: "{prompt}",
                    oninput: move |evt| prompt.set(evt.value()),
                    disabled: is_running(),
                }
                div { class: "char-count", "Characters: {char_count}" }
            }

            // Run row
            div {
                class: "run-row",
                button {
                    class: "btn btn-primary",
                    onclick: handle_run,
                    disabled: is_running(),
                    "Run Prompt"
                }
                span { class: "model-hint", "Model: {model}" }
                if is_running() {
                    Spinner { size: 18 }
                }
            }

            if is_running() {
                ProgressBar { value: progress() }
            }

            // Output view
            div {
                class: "output-view",
                if log.read().is_empty() {
                    p { class: "output-placeholder", "Responses will appear here." }
                } else {
                    for (idx, line) in log.read().lines().iter().enumerate() {
                        pre { key: "{idx}", class: "output-line", "{line}" }
                    }
                }
            }

            // Overwrite confirmation
            if pending_save().is_some() {
                ConfirmDialog {
                    title: "File Exists",
                    message: "Files with this title already exist. Overwrite?",
                    on_confirm: move |_| {
                        if let Some(pending) = pending_save() {
                            notice.set(Some(write_round(
                                &pending.files,
                                &pending.prompt,
                                &pending.output,
                            )));
                        }
                        pending_save.set(None);
                    },
                    // Declining aborts the save silently
                    on_cancel: move |_| pending_save.set(None),
                }
            }

            // Blocking notices
            if let Some(current) = notice() {
                NoticeDialog {
                    notice: current,
                    on_dismiss: move |_| notice.set(None),
                }
            }
        }
    }
}

/// Write the pair and describe the outcome to the user
fn write_round(files: &RoundFiles, prompt: &str, output: &str) -> Notice {
    match files.write(prompt, output) {
        Ok(()) => Notice::new(
            "Success",
            "Prompt and output saved successfully as markdown files!",
        ),
        Err(e) => {
            tracing::error!("Failed to save round: {}", e);
            Notice::new("Error", format!("Failed to save files: {e}"))
        }
    }
}
