//! Extraction orchestration and progress streaming.

mod orchestrator;
mod progress;

pub use orchestrator::{Orchestrator, PipelineOutcome};
pub use progress::{ChannelSink, NullSink, ProgressEvent, ProgressSink, Stage, VecSink};
