//! Headless mode - one generation with JSON event output
//!
//! Runs a single generation without the TUI and reports progress as NDJSON
//! (newline-delimited JSON) on stdout, one event per line. Each event has an
//! "event" field naming its type. Scripts can run the agent and pick up the
//! exported markdown without parsing terminal output.
//!
//! # Example Output
//!
//! ```json
//! {"event":"generation_started","topic":"Async Rust","as_of":"2024-06-01","timestamp":1717200000000}
//! {"event":"generation_completed","file":"blogs/async_rust.md","title":"Async Rust","evidence_count":4,"task_count":5,"timestamp":1717200042000}
//! ```

pub mod runner;

use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;

use blogsmith_core::prelude::*;

/// Events emitted in headless mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// The request was accepted and sent to the backend
    GenerationStarted {
        topic: String,
        as_of: String,
        timestamp: i64,
    },

    /// The post was generated and written to `file`
    GenerationCompleted {
        file: String,
        title: Option<String>,
        evidence_count: usize,
        task_count: usize,
        timestamp: i64,
    },

    /// Validation, generation or export failed
    Error { message: String, timestamp: i64 },
}

impl HeadlessEvent {
    /// Serialize this event as a single JSON object
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Write this event as one JSON line and flush
    pub fn emit<W: Write>(&self, out: &mut W) {
        let json = match self.to_json() {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        if let Err(e) = writeln!(out, "{}", json) {
            error!("Failed to write headless event: {}", e);
            return;
        }

        // Flush to ensure immediate output
        if let Err(e) = out.flush() {
            error!("Failed to flush headless output: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    pub fn generation_started(topic: &str, as_of: &str) -> Self {
        Self::GenerationStarted {
            topic: topic.to_string(),
            as_of: as_of.to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn generation_completed(
        file: String,
        title: Option<String>,
        evidence_count: usize,
        task_count: usize,
    ) -> Self {
        Self::GenerationCompleted {
            file,
            title,
            evidence_count,
            task_count,
            timestamp: Self::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            timestamp: Self::now(),
        }
    }
}

/// Exit status reported when the run ended with an `error` event
pub const EXIT_FAILED: u8 = 1;

/// Exit status when the post was generated but could not be saved locally
pub const EXIT_EXPORT_FAILED: u8 = 2;

/// Map the outcome of a headless run to a process exit status.
///
/// Every failure except a fatal one has already been reported on stdout as
/// an `error` event. Fatal errors are returned for the caller to report.
pub fn exit_status(outcome: Result<PathBuf>) -> Result<u8> {
    match outcome {
        Ok(path) => {
            debug!("Headless run exported {}", path.display());
            Ok(0)
        }
        Err(e) if e.is_fatal() => Err(e),
        Err(e) if e.is_recoverable() => {
            info!("Headless run failed: {}", e);
            Ok(EXIT_FAILED)
        }
        Err(e) => {
            error!("Headless run failed: {}", e);
            Ok(EXIT_EXPORT_FAILED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn emitted(event: &HeadlessEvent) -> Value {
        let mut out = Vec::new();
        event.emit(&mut out);
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().count(), 1);
        serde_json::from_str(text.trim_end()).unwrap()
    }

    #[test]
    fn test_started_event_shape() {
        let json = emitted(&HeadlessEvent::generation_started("Async Rust", "2024-06-01"));
        assert_eq!(json["event"], "generation_started");
        assert_eq!(json["topic"], "Async Rust");
        assert_eq!(json["as_of"], "2024-06-01");
        assert!(json["timestamp"].as_i64().unwrap() > 0);
    }

    #[test]
    fn test_completed_event_shape() {
        let json = emitted(&HeadlessEvent::generation_completed(
            "out/async_rust.md".to_string(),
            Some("Async Rust".to_string()),
            4,
            5,
        ));
        assert_eq!(json["event"], "generation_completed");
        assert_eq!(json["file"], "out/async_rust.md");
        assert_eq!(json["title"], "Async Rust");
        assert_eq!(json["evidence_count"], 4);
        assert_eq!(json["task_count"], 5);
    }

    #[test]
    fn test_completed_without_title_is_null() {
        let json = emitted(&HeadlessEvent::generation_completed(
            "out/blog.md".to_string(),
            None,
            0,
            0,
        ));
        assert!(json["title"].is_null());
    }

    #[test]
    fn test_error_event_shape() {
        let json = emitted(&HeadlessEvent::error("Network error: refused"));
        assert_eq!(json["event"], "error");
        assert_eq!(json["message"], "Network error: refused");
    }

    #[test]
    fn test_to_json_has_no_newline() {
        let json = HeadlessEvent::error("multi\nline").to_json().unwrap();
        assert!(!json.contains('\n'));
        assert!(json.starts_with(r#"{"event":"error""#));
    }

    #[test]
    fn test_exit_status_success() {
        assert_eq!(exit_status(Ok(PathBuf::from("out/a.md"))).unwrap(), 0);
    }

    #[test]
    fn test_exit_status_for_reported_failures() {
        assert_eq!(
            exit_status(Err(Error::generation("model overloaded"))).unwrap(),
            EXIT_FAILED
        );
        assert_eq!(
            exit_status(Err(Error::validation("Please enter a topic"))).unwrap(),
            EXIT_FAILED
        );

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(exit_status(Err(io.into())).unwrap(), EXIT_EXPORT_FAILED);
    }

    #[test]
    fn test_exit_status_propagates_fatal_errors() {
        let err = exit_status(Err(Error::ChannelClosed)).unwrap_err();
        assert!(matches!(err, Error::ChannelClosed));
    }
}
