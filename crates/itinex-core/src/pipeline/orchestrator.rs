//! Extraction orchestration: strategy selection, stage progression and
//! heartbeat emission.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::progress::{ProgressEvent, ProgressSink, Stage};
use crate::ai::AiExtractor;
use crate::document::{self, DocumentFormat};
use crate::error::{PipelineError, Result};
use crate::models::config::ItinexConfig;
use crate::models::plan::{ExtractedPlan, ExtractionSource};
use crate::plan::parse_heuristic;

/// Final result of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub plan: ExtractedPlan,
    pub source: ExtractionSource,
}

/// Drives one extraction request through its stages.
///
/// The AI and heuristic paths are mutually exclusive alternatives: the AI
/// path is attempted only when configured, and any AI failure silently
/// falls back to the heuristic parser. The caller always gets a plan
/// unless the document itself yields no text.
pub struct Orchestrator {
    config: ItinexConfig,
    ai: AiExtractor,
}

impl Orchestrator {
    pub fn new(config: ItinexConfig, ai: AiExtractor) -> Self {
        Self { config, ai }
    }

    /// Run the pipeline over one uploaded document.
    ///
    /// Progress is reported through `sink` in strictly increasing stage
    /// order with non-decreasing percentages. If the sink reports a
    /// closed transport the request is abandoned without further events.
    pub async fn run(
        &self,
        bytes: &[u8],
        format: DocumentFormat,
        advisor: Option<&str>,
        sink: &mut dyn ProgressSink,
    ) -> Result<PipelineOutcome> {
        let first_label = match advisor {
            Some(name) => format!("{}, estoy revisando tu archivo...", name),
            None => "Estoy revisando tu archivo...".to_string(),
        };
        self.emit(sink, ProgressEvent::labeled(Stage::Reading, 5, first_label))
            .await?;

        self.emit(
            sink,
            ProgressEvent::labeled(Stage::Extracting, 15, "Leyendo el documento..."),
        )
        .await?;

        let text = document::extract_text(bytes, format)?;
        if text.trim().is_empty() {
            return Err(PipelineError::NoText.into());
        }
        info!("extracted {} chars of text", text.len());

        self.emit(
            sink,
            ProgressEvent::labeled(Stage::Extracting, 28, "Texto extraído"),
        )
        .await?;

        let mut ai_plan = None;
        if self.ai.is_configured() {
            self.emit(
                sink,
                ProgressEvent::labeled(Stage::Analyzing, 45, "Estamos analizando tu documento..."),
            )
            .await?;
            ai_plan = self.analyze_with_heartbeat(&text, sink).await?;
        } else {
            debug!("AI path unavailable, going straight to heuristics");
        }

        let source = if ai_plan.is_some() {
            ExtractionSource::Ai
        } else {
            ExtractionSource::Heuristic
        };

        self.emit(
            sink,
            ProgressEvent::labeled(Stage::Structuring, 75, "Estructurando el plan..."),
        )
        .await?;

        let plan = match ai_plan {
            Some(plan) => plan,
            None => parse_heuristic(&text, &self.config),
        };

        self.emit(
            sink,
            ProgressEvent::labeled(Stage::Copying, 95, "Preparando el resultado..."),
        )
        .await?;

        self.emit(sink, ProgressEvent::done(plan.clone(), source)).await?;
        sink.close().await;

        Ok(PipelineOutcome { plan, source })
    }

    /// Await the AI call while emitting heartbeat events at the configured
    /// cadence, cycling the reassurance labels and capping progress. The
    /// ticker lives on this stack frame only, so it is dropped on every
    /// exit path; a closed sink abandons the in-flight call.
    async fn analyze_with_heartbeat(
        &self,
        text: &str,
        sink: &mut dyn ProgressSink,
    ) -> Result<Option<ExtractedPlan>> {
        let progress_cfg = &self.config.progress;
        let mut ticker =
            tokio::time::interval(Duration::from_secs(progress_cfg.heartbeat_secs.max(1)));
        // The first tick fires immediately; consume it so heartbeats start
        // one full interval after the call goes out.
        ticker.tick().await;

        let extraction = self.ai.extract(text);
        tokio::pin!(extraction);

        let mut progress = 45u8;
        let mut beat = 0usize;

        loop {
            tokio::select! {
                result = &mut extraction => {
                    if result.is_none() {
                        warn!("AI extraction failed, falling back to heuristics");
                    }
                    return Ok(result);
                }
                _ = ticker.tick() => {
                    progress = progress
                        .saturating_add(progress_cfg.heartbeat_step)
                        .min(progress_cfg.heartbeat_cap);
                    let labels = &progress_cfg.heartbeat_labels;
                    let event = match labels.is_empty() {
                        true => ProgressEvent::at(Stage::Analyzing, progress),
                        false => ProgressEvent::labeled(
                            Stage::Analyzing,
                            progress,
                            labels[beat % labels.len()].clone(),
                        ),
                    };
                    beat += 1;
                    if !sink.emit(event).await {
                        return Err(PipelineError::Cancelled.into());
                    }
                }
            }
        }
    }

    async fn emit(&self, sink: &mut dyn ProgressSink, event: ProgressEvent) -> Result<()> {
        if sink.emit(event).await {
            Ok(())
        } else {
            Err(PipelineError::Cancelled.into())
        }
    }
}
