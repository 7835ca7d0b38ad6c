//! Shared UI components
//!
//! Reusable components: progress indicators and modal dialogs.

pub mod dialogs;
pub mod loading;
