//! Extract command - pull a structured plan out of a single document.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use itinex_core::{
    backend_from_env, AiExtractor, DisabledBackend, DocumentFormat, ExtractedPlan,
    ExtractionSource, ItinexConfig, Orchestrator, PipelineOutcome, ProgressEvent, ProgressSink,
};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF or DOCX)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Advisor name used to personalize progress labels
    #[arg(long)]
    advisor: Option<String>,

    /// Skip the AI path and use only heuristic extraction
    #[arg(long)]
    no_ai: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

/// Progress sink that drives the terminal progress bar.
struct ProgressBarSink {
    bar: ProgressBar,
}

#[async_trait]
impl ProgressSink for ProgressBarSink {
    async fn emit(&mut self, event: ProgressEvent) -> bool {
        self.bar.set_position(event.progress as u64);
        if let Some(label) = event.label {
            self.bar.set_message(label);
        }
        true
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        ItinexConfig::from_file(std::path::Path::new(path))?
    } else {
        ItinexConfig::default()
    };

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let extension = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    let Some(format) = DocumentFormat::from_extension(extension) else {
        anyhow::bail!("Unsupported file format: {}", extension);
    };

    info!("Processing file: {}", args.input.display());

    let backend = if args.no_ai {
        Arc::new(DisabledBackend) as Arc<dyn itinex_core::AiBackend>
    } else {
        backend_from_env(&config.ai)
    };
    debug!("AI path configured: {}", backend.is_configured());

    let ai = AiExtractor::new(backend, config.clone());
    let orchestrator = Orchestrator::new(config, ai);

    // Progress bar driven by the same sink abstraction the API uses
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );
    let mut sink = ProgressBarSink { bar: bar.clone() };

    let data = fs::read(&args.input)?;
    let outcome = orchestrator
        .run(&data, format, args.advisor.as_deref(), &mut sink)
        .await?;

    bar.finish_with_message("Done");

    // Format output
    let output = format_plan(&outcome, args.format)?;

    // Write output
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    let source = match outcome.source {
        ExtractionSource::Ai => "ai",
        ExtractionSource::Heuristic => "heuristic",
    };
    eprintln!(
        "{} Extracted via {} path in {:?}",
        style("ℹ").blue(),
        source,
        start.elapsed()
    );

    Ok(())
}

fn format_plan(outcome: &PipelineOutcome, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&outcome.plan)?),
        OutputFormat::Text => Ok(format_text(&outcome.plan)),
    }
}

fn format_text(plan: &ExtractedPlan) -> String {
    let mut output = String::new();

    output.push_str(&format!("Plan: {}\n", plan.name));
    output.push_str(&format!("Country: {}\n", plan.country));
    output.push_str(&format!(
        "Length: {} days / {} nights\n",
        plan.duration, plan.nights
    ));
    if !plan.base_price.is_empty() {
        output.push_str(&format!("Base price: {}\n", plan.base_price));
    }
    if !plan.description.is_empty() {
        output.push_str(&format!("\n{}\n", plan.description));
    }

    if !plan.itinerary.is_empty() {
        output.push_str("\nItinerary:\n");
        for day in &plan.itinerary {
            output.push_str(&format!("  Day {} - {}\n", day.day_number, day.title));
        }
    }

    if !plan.hotels.is_empty() {
        output.push_str("\nHotels:\n");
        for hotel in &plan.hotels {
            output.push_str(&format!("  {}", hotel.name));
            if let Some(category) = &hotel.category {
                output.push_str(&format!(" ({})", category));
            }
            if let Some(location) = &hotel.location {
                output.push_str(&format!(" - {}", location));
            }
            output.push('\n');
        }
    }

    if !plan.inclusions.is_empty() {
        output.push_str("\nIncludes:\n");
        for item in &plan.inclusions {
            output.push_str(&format!("  - {}\n", item.item));
        }
    }

    if !plan.exclusions.is_empty() {
        output.push_str("\nDoes not include:\n");
        for item in &plan.exclusions {
            output.push_str(&format!("  - {}\n", item.item));
        }
    }

    output
}
