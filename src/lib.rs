//! Prompt Desk Library
//!
//! Core library for the Prompt Desk desktop application.

pub mod api;
pub mod app;
pub mod storage;
pub mod ui;
