//! Data models for extracted travel plans and pipeline configuration.

pub mod config;
pub mod plan;

pub use config::ItinexConfig;
pub use plan::{
    ExtractedPlan, ExtractionSource, Hotel, ItineraryDay, PlanLineItem, PriceTier, Upgrade,
};
