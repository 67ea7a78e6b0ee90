//! Core library for travel-plan extraction.
//!
//! This crate provides:
//! - Document text acquisition (PDF with a primary/secondary fallback
//!   chain, DOCX)
//! - A heuristic, rule-based parser for tour documents
//! - Optional AI-assisted structured extraction with mandatory
//!   normalization
//! - The extraction orchestrator with progress streaming

pub mod ai;
pub mod document;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod plan;

pub use ai::{backend_from_env, AiBackend, AiExtractor, DisabledBackend, OpenAiBackend};
pub use document::{extract_text, DocumentFormat};
pub use error::{DocumentError, ItinexError, PipelineError, Result};
pub use models::{
    ExtractedPlan, ExtractionSource, Hotel, ItinexConfig, ItineraryDay, PlanLineItem, PriceTier,
    Upgrade,
};
pub use pipeline::{
    ChannelSink, NullSink, Orchestrator, PipelineOutcome, ProgressEvent, ProgressSink, Stage,
    VecSink,
};
pub use plan::{normalize, normalize_category, parse_heuristic};
