//! Data model for the extracted travel plan.
//!
//! This is the single output contract of the pipeline: both the heuristic
//! parser and the AI-assisted extractor produce this exact shape, so
//! downstream consumers cannot tell the paths apart except through the
//! explicit source tag.

use serde::{Deserialize, Serialize};

/// A normalized travel plan extracted from a supplier document.
///
/// Field names on the wire are camelCase to match the catalog contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractedPlan {
    /// Commercial title of the tour. Never a bare country name.
    pub name: String,

    /// Destination country/region.
    pub country: String,

    /// Total days (1-99). Defaults to 1 when undetectable.
    pub duration: u32,

    /// Total nights (0-99). Defaults to `duration - 1` when absent.
    pub nights: u32,

    /// Marketing summary of the plan.
    pub description: String,

    /// Base price as a digits-only string. Empty when undetectable,
    /// never null.
    pub base_price: String,

    /// Day-by-day itinerary, in document order.
    pub itinerary: Vec<ItineraryDay>,

    /// Hotels offered by the plan.
    pub hotels: Vec<Hotel>,

    /// What the price includes.
    pub inclusions: Vec<PlanLineItem>,

    /// What the price does not include.
    pub exclusions: Vec<PlanLineItem>,

    /// Departure-date price tiers.
    pub price_tiers: Vec<PriceTier>,

    /// Optional paid upgrades.
    pub upgrades: Vec<Upgrade>,
}

/// One day of the itinerary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItineraryDay {
    /// Day number (>= 1). Document order is preserved; values are not
    /// re-sorted and duplicates are kept.
    pub day_number: u32,

    /// Short location label, used for the compact route view.
    pub title: String,

    /// Full day narrative. When the source carries timestamped activity
    /// lines, this is exactly those lines, newline-joined.
    pub description: String,

    /// Explicit location, when the source labels one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Individual activities, one per entry ("HH:MM - text" when timed).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub activities: Vec<String>,

    /// Meals included on this day.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub meals: Vec<String>,

    /// Overnight accommodation, when the source labels one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<String>,
}

/// A hotel offered by the plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Hotel {
    /// Hotel name.
    pub name: String,

    /// Star category, normalized to the compact "<digit>*" form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// City/area of the hotel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Number of nights at this hotel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nights: Option<u32>,
}

/// A single inclusion or exclusion entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanLineItem {
    /// The entry text, non-empty after trimming.
    pub item: String,
}

impl PlanLineItem {
    pub fn new(item: impl Into<String>) -> Self {
        Self { item: item.into() }
    }
}

/// A departure-date price tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PriceTier {
    /// Tier start date (ISO), when the tier is a range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    /// Tier end date (ISO).
    pub end_date: String,

    /// Tier price as a numeric string.
    pub price: String,

    /// Whether this date is a flight departure day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_flight_day: Option<bool>,

    /// Label of the associated flight, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_label: Option<String>,
}

/// An optional paid upgrade.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Upgrade {
    /// Short upgrade code.
    pub code: String,

    /// Display name.
    pub name: String,

    /// Longer description, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Price delta. Coerced from any input shape; defaults to 0.
    pub price: f64,
}

/// Which extraction path produced the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionSource {
    /// AI-assisted structured extraction.
    Ai,
    /// Rule-based heuristic parsing.
    Heuristic,
}

impl ExtractedPlan {
    /// Create an empty plan with the schema's documented defaults.
    pub fn new() -> Self {
        Self {
            duration: 1,
            nights: 0,
            ..Self::default()
        }
    }

    /// Check the plan against its schema constraints and return any
    /// violations found. An empty result means the plan is well-formed.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.name.chars().count() > 120 {
            issues.push("name exceeds 120 characters".to_string());
        }
        if self.country.chars().count() > 80 {
            issues.push("country exceeds 80 characters".to_string());
        }
        if !(1..=99).contains(&self.duration) {
            issues.push(format!("duration {} outside 1-99", self.duration));
        }
        if self.nights > 99 {
            issues.push(format!("nights {} outside 0-99", self.nights));
        }
        if !self.base_price.is_empty() && !self.base_price.chars().all(|c| c.is_ascii_digit()) {
            issues.push("basePrice contains non-digit characters".to_string());
        }
        if self.base_price.len() > 10 {
            issues.push("basePrice exceeds 10 characters".to_string());
        }
        for (i, day) in self.itinerary.iter().enumerate() {
            if day.day_number == 0 {
                issues.push(format!("itinerary[{}] has dayNumber 0", i));
            }
        }
        for (i, entry) in self.inclusions.iter().chain(&self.exclusions).enumerate() {
            if entry.item.trim().is_empty() {
                issues.push(format!("line item {} is empty", i));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_plan_defaults() {
        let plan = ExtractedPlan::new();
        assert_eq!(plan.duration, 1);
        assert_eq!(plan.nights, 0);
        assert!(plan.itinerary.is_empty());
        assert_eq!(plan.base_price, "");
        assert!(plan.validate().is_empty());
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let mut plan = ExtractedPlan::new();
        plan.base_price = "1500".to_string();
        plan.price_tiers.push(PriceTier {
            end_date: "2026-10-01".to_string(),
            price: "1999".to_string(),
            is_flight_day: Some(true),
            ..PriceTier::default()
        });
        plan.itinerary.push(ItineraryDay {
            day_number: 1,
            title: "Lima".to_string(),
            ..ItineraryDay::default()
        });

        let json = serde_json::to_value(&plan).unwrap();
        assert!(json.get("basePrice").is_some());
        assert!(json.get("priceTiers").is_some());
        assert!(json["priceTiers"][0].get("isFlightDay").is_some());
        assert!(json["itinerary"][0].get("dayNumber").is_some());
    }

    #[test]
    fn test_absent_optionals_are_omitted() {
        let hotel = Hotel {
            name: "Hotel Plaza".to_string(),
            ..Hotel::default()
        };
        let json = serde_json::to_string(&hotel).unwrap();
        assert!(!json.contains("category"));
        assert!(!json.contains("undefined"));
    }

    #[test]
    fn test_validate_flags_violations() {
        let plan = ExtractedPlan {
            duration: 0,
            base_price: "12a".to_string(),
            ..ExtractedPlan::default()
        };
        let issues = plan.validate();
        assert!(issues.iter().any(|i| i.contains("duration")));
        assert!(issues.iter().any(|i| i.contains("basePrice")));
    }

    #[test]
    fn test_source_tag_serialization() {
        assert_eq!(serde_json::to_string(&ExtractionSource::Ai).unwrap(), "\"ai\"");
        assert_eq!(
            serde_json::to_string(&ExtractionSource::Heuristic).unwrap(),
            "\"heuristic\""
        );
    }
}
