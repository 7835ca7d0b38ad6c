//! Background round execution
//!
//! One round is one prompt submission through completion. Each round gets a
//! fresh worker thread that runs the completion call and reports back over a
//! channel; the UI thread only drains events and never blocks on the worker.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use thiserror::Error;

use crate::api::client::CompletionClient;

/// Errors raised by the shell before a worker is started
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("A round is already in flight")]
    Busy,

    #[error("Prompt is empty")]
    EmptyPrompt,
}

/// An event emitted by a round worker.
///
/// Ordering contract: events arrive in emission order and `Done` is always
/// the last event of a round, emitted exactly once whether the request
/// succeeded or failed.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundEvent {
    /// Completion progress, 0-100
    Progress(u8),
    /// A transient status line for the output view
    Status(String),
    /// The full response text
    Result(String),
    /// The request failed; carries a human-readable message
    Failure(String),
    /// Terminal signal; the round is over
    Done,
}

impl RoundEvent {
    /// Returns true if this is the terminal signal
    pub fn is_done(&self) -> bool {
        matches!(self, RoundEvent::Done)
    }

    /// Returns true if the round failed
    pub fn is_failure(&self) -> bool {
        matches!(self, RoundEvent::Failure(_))
    }

    /// Extracts the response text if this is a Result variant
    pub fn as_result(&self) -> Option<&str> {
        match self {
            RoundEvent::Result(text) => Some(text),
            _ => None,
        }
    }
}

/// Everything a worker needs to run one round
#[derive(Debug, Clone)]
pub struct RoundRequest {
    pub prompt: String,
    pub api_key: String,
    pub model: String,
}

/// Rejects a prompt that is empty or whitespace-only.
///
/// Must be called before starting a worker; a rejected prompt makes no
/// network call.
pub fn validate_prompt(prompt: &str) -> Result<(), RoundError> {
    if prompt.trim().is_empty() {
        return Err(RoundError::EmptyPrompt);
    }
    Ok(())
}

/// Explicit in-flight guard for the shell.
///
/// A second submission while a round is pending is rejected with
/// [`RoundError::Busy`] rather than relying on a disabled button alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundGate {
    busy: bool,
}

impl RoundGate {
    pub fn try_begin(&mut self) -> Result<(), RoundError> {
        if self.busy {
            return Err(RoundError::Busy);
        }
        self.busy = true;
        Ok(())
    }

    pub fn finish(&mut self) {
        self.busy = false;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }
}

/// Starts one round on a fresh worker thread.
///
/// The worker builds its own current-thread runtime for the single blocking
/// network call, so it is fully independent of the UI runtime. The returned
/// receiver yields the round's events; see [`RoundEvent`] for the ordering
/// contract.
pub fn start_round(request: RoundRequest) -> Receiver<RoundEvent> {
    spawn_worker(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| format!("Failed to start worker runtime: {e}"))?;

        let client = CompletionClient::new(request.api_key);
        runtime
            .block_on(client.complete(&request.model, &request.prompt))
            .map_err(|e| e.to_string())
    })
}

/// Spawns a worker around an arbitrary fetch function.
///
/// Split out from [`start_round`] so the event contract can be exercised
/// without a live endpoint.
fn spawn_worker<F>(fetch: F) -> Receiver<RoundEvent>
where
    F: FnOnce() -> Result<String, String> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || run_round(fetch, &tx));
    rx
}

/// Worker body: exactly one fetch, then the terminal signal.
fn run_round<F>(fetch: F, tx: &Sender<RoundEvent>)
where
    F: FnOnce() -> Result<String, String>,
{
    let _ = tx.send(RoundEvent::Status("Contacting model...".to_string()));

    match fetch() {
        Ok(text) => {
            let _ = tx.send(RoundEvent::Progress(100));
            let _ = tx.send(RoundEvent::Result(text));
        }
        Err(message) => {
            tracing::warn!("Round failed: {}", message);
            let _ = tx.send(RoundEvent::Failure(message));
        }
    }

    // Always last, exactly once, success or failure
    let _ = tx.send(RoundEvent::Done);
}

/// Fold of round events into the lines shown in the output view.
///
/// Status lines append, the final response replaces all prior status text,
/// and failures append a formatted error line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundLog {
    lines: Vec<String>,
}

impl RoundLog {
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn apply(&mut self, event: &RoundEvent) {
        match event {
            RoundEvent::Status(line) => self.lines.push(line.clone()),
            RoundEvent::Result(text) => {
                self.lines.clear();
                self.lines.push(text.clone());
            }
            RoundEvent::Failure(message) => self.lines.push(format!("Error: {message}")),
            RoundEvent::Progress(_) | RoundEvent::Done => {}
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The log as saved to the output file
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_events(rx: Receiver<RoundEvent>) -> Vec<RoundEvent> {
        rx.iter().collect()
    }

    #[test]
    fn test_successful_round_event_order() {
        let rx = spawn_worker(|| Ok("The answer is 42.".to_string()));
        let events = collect_events(rx);

        assert_eq!(events.first(), Some(&RoundEvent::Status("Contacting model...".to_string())));
        assert!(events.contains(&RoundEvent::Progress(100)));
        assert!(events.contains(&RoundEvent::Result("The answer is 42.".to_string())));
        assert_eq!(events.last(), Some(&RoundEvent::Done));
    }

    #[test]
    fn test_exactly_one_done_on_success() {
        let rx = spawn_worker(|| Ok("ok".to_string()));
        let done_count = collect_events(rx).iter().filter(|e| e.is_done()).count();
        assert_eq!(done_count, 1);
    }

    #[test]
    fn test_exactly_one_done_on_failure() {
        let rx = spawn_worker(|| Err("connection refused".to_string()));
        let events = collect_events(rx);

        let done_count = events.iter().filter(|e| e.is_done()).count();
        assert_eq!(done_count, 1);
        assert_eq!(events.last(), Some(&RoundEvent::Done));
        assert!(events.iter().any(|e| e.is_failure()));
    }

    #[test]
    fn test_failure_formats_as_error_line() {
        let rx = spawn_worker(|| Err("rate limit".to_string()));

        let mut log = RoundLog::default();
        let mut saw_done = false;
        for event in collect_events(rx) {
            if event.is_done() {
                saw_done = true;
            }
            log.apply(&event);
        }

        assert!(saw_done);
        assert!(log.lines().contains(&"Error: rate limit".to_string()));
    }

    #[test]
    fn test_result_replaces_status_lines() {
        let mut log = RoundLog::default();
        log.apply(&RoundEvent::Status("Contacting model...".to_string()));
        log.apply(&RoundEvent::Status("Still waiting".to_string()));
        log.apply(&RoundEvent::Result("Final answer".to_string()));

        assert_eq!(log.lines(), ["Final answer"]);
        assert_eq!(log.text(), "Final answer");
    }

    #[test]
    fn test_validate_prompt_rejects_empty() {
        assert_eq!(validate_prompt(""), Err(RoundError::EmptyPrompt));
        assert_eq!(validate_prompt("   \n\t "), Err(RoundError::EmptyPrompt));
        assert!(validate_prompt("hello").is_ok());
    }

    #[test]
    fn test_gate_rejects_overlapping_rounds() {
        let mut gate = RoundGate::default();
        assert!(gate.try_begin().is_ok());
        assert_eq!(gate.try_begin(), Err(RoundError::Busy));
        assert!(gate.is_busy());

        gate.finish();
        assert!(gate.try_begin().is_ok());
    }

    #[test]
    fn test_event_accessors() {
        let result = RoundEvent::Result("text".to_string());
        assert_eq!(result.as_result(), Some("text"));
        assert!(!result.is_done());

        assert!(RoundEvent::Done.is_done());
        assert!(RoundEvent::Failure("x".to_string()).is_failure());
    }
}
