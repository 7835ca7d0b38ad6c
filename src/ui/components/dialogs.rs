//! Modal dialogs
//!
//! Blocking notice and confirmation modals rendered over a backdrop.

use dioxus::prelude::*;

/// A blocking notice shown to the user
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

#[component]
pub fn NoticeDialog(notice: Notice, on_dismiss: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "dialog-backdrop",

            div {
                class: "dialog",

                div {
                    class: "dialog-header",
                    h2 { class: "dialog-title", "{notice.title}" }
                }

                div {
                    class: "dialog-body",
                    p { "{notice.message}" }
                }

                div {
                    class: "dialog-actions",
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| on_dismiss.call(()),
                        "OK"
                    }
                }
            }
        }
    }
}

#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            class: "dialog-backdrop",

            div {
                class: "dialog",

                div {
                    class: "dialog-header",
                    h2 { class: "dialog-title", "{title}" }
                }

                div {
                    class: "dialog-body",
                    p { "{message}" }
                }

                div {
                    class: "dialog-actions",
                    button {
                        class: "btn",
                        onclick: move |_| on_cancel.call(()),
                        "No"
                    }
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| on_confirm.call(()),
                        "Yes"
                    }
                }
            }
        }
    }
}
