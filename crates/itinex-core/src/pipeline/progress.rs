//! Progress events and the sink abstraction.
//!
//! The orchestrator reports stages through a `ProgressSink`; the HTTP
//! streaming adapter and the buffering/null adapters all implement it, so
//! one orchestrator serves both external contracts.

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc;

use crate::models::plan::{ExtractedPlan, ExtractionSource};

/// Named pipeline stage, in strict emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Reading,
    Extracting,
    Analyzing,
    Structuring,
    Copying,
    Done,
    Error,
}

/// One progress event. Serialized as a single NDJSON line when streaming.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressEvent {
    pub stage: Stage,
    pub progress: u8,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<ExtractedPlan>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ExtractionSource>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProgressEvent {
    pub fn at(stage: Stage, progress: u8) -> Self {
        Self {
            stage,
            progress,
            label: None,
            plan: None,
            source: None,
            error: None,
        }
    }

    pub fn labeled(stage: Stage, progress: u8, label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::at(stage, progress)
        }
    }

    /// Terminal success event carrying the full plan and its source tag.
    pub fn done(plan: ExtractedPlan, source: ExtractionSource) -> Self {
        Self {
            plan: Some(plan),
            source: Some(source),
            ..Self::at(Stage::Done, 100)
        }
    }

    /// Terminal failure event.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::at(Stage::Error, 0)
        }
    }
}

/// Destination for progress events.
///
/// `emit` returns false once the other end is gone; the orchestrator must
/// then stop emitting and abandon the request.
#[async_trait]
pub trait ProgressSink: Send {
    async fn emit(&mut self, event: ProgressEvent) -> bool;

    /// Flush/teardown hook. Most sinks need none.
    async fn close(&mut self) {}
}

/// Sink that discards every event. Used by non-streaming callers.
pub struct NullSink;

#[async_trait]
impl ProgressSink for NullSink {
    async fn emit(&mut self, _event: ProgressEvent) -> bool {
        true
    }
}

/// Sink that buffers every event. Used by tests and the CLI progress bar.
#[derive(Default)]
pub struct VecSink {
    pub events: Vec<ProgressEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressSink for VecSink {
    async fn emit(&mut self, event: ProgressEvent) -> bool {
        self.events.push(event);
        true
    }
}

/// Sink that writes newline-delimited JSON to an mpsc channel, one line
/// per event. A failed send means the receiver (the HTTP response body)
/// was dropped; the sink latches closed and reports it.
pub struct ChannelSink {
    tx: mpsc::Sender<String>,
    closed: bool,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<String>) -> Self {
        Self { tx, closed: false }
    }
}

#[async_trait]
impl ProgressSink for ChannelSink {
    async fn emit(&mut self, event: ProgressEvent) -> bool {
        if self.closed {
            return false;
        }
        let Ok(mut line) = serde_json::to_string(&event) else {
            return !self.closed;
        };
        line.push('\n');
        if self.tx.send(line).await.is_err() {
            self.closed = true;
        }
        !self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_shapes() {
        let event = ProgressEvent::labeled(Stage::Reading, 5, "Revisando tu archivo...");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["stage"], "reading");
        assert_eq!(json["progress"], 5);
        assert_eq!(json["label"], "Revisando tu archivo...");
        assert!(json.get("plan").is_none());
        assert!(json.get("error").is_none());

        let done = ProgressEvent::done(ExtractedPlan::new(), ExtractionSource::Heuristic);
        let json = serde_json::to_value(&done).unwrap();
        assert_eq!(json["stage"], "done");
        assert_eq!(json["progress"], 100);
        assert_eq!(json["source"], "heuristic");
        assert!(json.get("plan").is_some());

        let error = ProgressEvent::error("sin texto");
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["stage"], "error");
        assert_eq!(json["progress"], 0);
        assert_eq!(json["error"], "sin texto");
    }

    #[tokio::test]
    async fn test_channel_sink_reports_closed_receiver() {
        let (tx, rx) = mpsc::channel(4);
        let mut sink = ChannelSink::new(tx);

        assert!(sink.emit(ProgressEvent::at(Stage::Reading, 5)).await);

        drop(rx);
        assert!(!sink.emit(ProgressEvent::at(Stage::Extracting, 15)).await);
        // latched: later emissions stay rejected
        assert!(!sink.emit(ProgressEvent::at(Stage::Copying, 95)).await);
    }

    #[tokio::test]
    async fn test_channel_sink_writes_ndjson_lines() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut sink = ChannelSink::new(tx);
        sink.emit(ProgressEvent::at(Stage::Reading, 5)).await;

        let line = rx.recv().await.unwrap();
        assert!(line.ends_with('\n'));
        let parsed: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(parsed["stage"], "reading");
    }
}
