//! Remote completion endpoint access
//!
//! This module handles all interaction with the chat-completion API and the
//! background worker that runs one request per round.

pub mod client;
pub mod worker;

// Re-export main types for convenience
pub use client::{ApiError, CompletionClient};
pub use worker::{
    start_round, validate_prompt, RoundError, RoundEvent, RoundGate, RoundLog, RoundRequest,
};
