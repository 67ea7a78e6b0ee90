//! Schema normalization for candidate plans.
//!
//! Everything that reaches a caller goes through this layer: the AI path
//! mandatorily, since its JSON is semi-trusted at best. Whatever shape
//! comes in, the output satisfies every field constraint of the plan
//! schema. Bad values are coerced or truncated, never errors.

use chrono::NaiveDate;
use serde_json::Value;

use super::rules::patterns::TIMED_LINE;
use super::rules::price::digits_only;
use crate::models::config::LimitsConfig;
use crate::models::plan::{
    ExtractedPlan, Hotel, ItineraryDay, PlanLineItem, PriceTier, Upgrade,
};

/// Coerce, clamp and truncate a candidate plan into the strict schema.
pub fn normalize(candidate: &Value, limits: &LimitsConfig) -> ExtractedPlan {
    let duration = get_u32(candidate, &["duration"])
        .unwrap_or(1)
        .clamp(1, limits.duration_max);
    let nights = get_u32(candidate, &["nights"])
        .unwrap_or_else(|| duration.saturating_sub(1))
        .min(limits.duration_max);

    ExtractedPlan {
        name: truncate_chars(&get_string(candidate, &["name"]), limits.name_max),
        country: truncate_chars(&get_string(candidate, &["country"]), limits.country_max),
        duration,
        nights,
        description: truncate_chars(
            &get_string(candidate, &["description"]),
            limits.ai_description_max,
        ),
        base_price: digits_only(
            &get_string(candidate, &["basePrice", "base_price"]),
            limits.base_price_max,
        ),
        itinerary: get_array(candidate, &["itinerary"])
            .iter()
            .enumerate()
            .map(|(i, day)| normalize_day(day, i, limits))
            .collect(),
        hotels: get_array(candidate, &["hotels"])
            .iter()
            .filter_map(|h| normalize_hotel(h, limits))
            .collect(),
        inclusions: normalize_line_items(&get_array(candidate, &["inclusions"]), limits),
        exclusions: normalize_line_items(&get_array(candidate, &["exclusions"]), limits),
        price_tiers: get_array(candidate, &["priceTiers", "price_tiers"])
            .iter()
            .filter_map(normalize_price_tier)
            .collect(),
        upgrades: get_array(candidate, &["upgrades"])
            .iter()
            .filter_map(|u| normalize_upgrade(u, limits))
            .collect(),
    }
}

fn normalize_day(day: &Value, index: usize, limits: &LimitsConfig) -> ItineraryDay {
    let activities: Vec<String> = get_array(day, &["activities"])
        .iter()
        .map(coerce_string)
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .collect();

    // Timestamped activities are authoritative for the day narrative;
    // otherwise the supplied description stands, with the activity join
    // as a last resort.
    let supplied = get_string(day, &["description"]);
    let description = if activities.iter().any(|a| TIMED_LINE.is_match(a)) {
        activities.join("\n")
    } else if supplied.trim().is_empty() {
        activities.join("\n")
    } else {
        supplied
    };

    ItineraryDay {
        day_number: get_u32(day, &["dayNumber", "day_number"])
            .filter(|n| *n >= 1)
            .unwrap_or(index as u32 + 1),
        title: truncate_chars(&get_string(day, &["title"]), limits.day_title_max),
        description: truncate_chars(&description, limits.day_description_max),
        location: non_empty(get_string(day, &["location"])),
        activities,
        meals: get_array(day, &["meals"])
            .iter()
            .map(coerce_string)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect(),
        accommodation: non_empty(get_string(day, &["accommodation"])),
    }
}

fn normalize_hotel(hotel: &Value, limits: &LimitsConfig) -> Option<Hotel> {
    let name = truncate_chars(&get_string(hotel, &["name"]), limits.hotel_name_max);
    if name.is_empty() {
        return None;
    }
    Some(Hotel {
        name,
        category: non_empty(get_string(hotel, &["category"]))
            .map(|c| normalize_category(&c, limits.category_max)),
        location: non_empty(get_string(hotel, &["location"])),
        nights: get_u32(hotel, &["nights"]),
    })
}

fn normalize_line_items(items: &[Value], limits: &LimitsConfig) -> Vec<PlanLineItem> {
    items
        .iter()
        .map(|entry| match entry {
            Value::Object(_) => get_string(entry, &["item"]),
            other => coerce_string(other),
        })
        .map(|item| truncate_chars(item.trim(), limits.line_item_max))
        .filter(|item| !item.is_empty())
        .map(PlanLineItem::new)
        .collect()
}

fn normalize_price_tier(tier: &Value) -> Option<PriceTier> {
    // A tier without a valid ISO end date is unusable downstream.
    let end_date = get_string(tier, &["endDate", "end_date"]).trim().to_string();
    end_date.parse::<NaiveDate>().ok()?;

    Some(PriceTier {
        start_date: non_empty(get_string(tier, &["startDate", "start_date"]))
            .filter(|d| d.parse::<NaiveDate>().is_ok()),
        end_date,
        price: digits_only(&get_string(tier, &["price"]), 10),
        is_flight_day: tier
            .get("isFlightDay")
            .or_else(|| tier.get("is_flight_day"))
            .and_then(coerce_bool),
        flight_label: non_empty(get_string(tier, &["flightLabel", "flight_label"])),
    })
}

fn normalize_upgrade(upgrade: &Value, limits: &LimitsConfig) -> Option<Upgrade> {
    let code = truncate_chars(
        get_string(upgrade, &["code"]).trim(),
        limits.upgrade_code_max,
    );
    let name = truncate_chars(
        get_string(upgrade, &["name"]).trim(),
        limits.upgrade_name_max,
    );
    if code.is_empty() && name.is_empty() {
        return None;
    }
    Some(Upgrade {
        code,
        name,
        description: non_empty(get_string(upgrade, &["description"])),
        price: upgrade.get("price").map(coerce_number).unwrap_or(0.0),
    })
}

/// Normalize a hotel star category to the compact "<digit>*" form.
///
/// Recognizes numeric ("4", "4*"), word ("cuatro", "four") and phrase
/// ("4 estrellas", "four stars") spellings in Spanish and English.
/// Unrecognized categories are preserved verbatim (truncated), not
/// dropped.
pub fn normalize_category(raw: &str, max: usize) -> String {
    let cleaned = raw.trim().to_lowercase();

    if let Some(digit) = cleaned.chars().find(|c| c.is_ascii_digit()) {
        return format!("{}*", digit);
    }

    let digit = match cleaned
        .split_whitespace()
        .next()
        .unwrap_or("")
        .trim_matches(|c: char| !c.is_alphabetic())
    {
        "una" | "uno" | "one" => Some('1'),
        "dos" | "two" => Some('2'),
        "tres" | "three" => Some('3'),
        "cuatro" | "four" => Some('4'),
        "cinco" | "five" => Some('5'),
        _ => None,
    };

    match digit {
        Some(d) => format!("{}*", d),
        None => truncate_chars(raw.trim(), max),
    }
}

/// Truncate to a maximum number of characters, respecting char
/// boundaries.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Fetch a field under any of the given keys and coerce it to a string.
fn get_string(value: &Value, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|k| value.get(k))
        .map(coerce_string)
        .unwrap_or_default()
}

/// Fetch a field under any of the given keys as an array, or empty.
fn get_array(value: &Value, keys: &[&str]) -> Vec<Value> {
    keys.iter()
        .find_map(|k| value.get(k))
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default()
}

fn get_u32(value: &Value, keys: &[&str]) -> Option<u32> {
    let field = keys.iter().find_map(|k| value.get(k))?;
    match field {
        Value::Number(n) => n
            .as_u64()
            .map(|n| n.min(u32::MAX as u64) as u32)
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u32)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s
            .trim()
            .trim_start_matches(['$', '€'])
            .replace(',', "")
            .parse()
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.to_lowercase().as_str() {
            "true" | "sí" | "si" | "yes" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn limits() -> LimitsConfig {
        LimitsConfig::default()
    }

    #[test]
    fn test_category_round_trip() {
        assert_eq!(normalize_category("three stars", 20), "3*");
        assert_eq!(normalize_category("3 estrellas", 20), "3*");
        assert_eq!(normalize_category("3*", 20), "3*");
        assert_eq!(normalize_category("tres estrellas", 20), "3*");
        assert_eq!(normalize_category("Cinco Estrellas", 20), "5*");
        assert_eq!(normalize_category("4", 20), "4*");
    }

    #[test]
    fn test_category_unrecognized_preserved_truncated() {
        assert_eq!(normalize_category("boutique", 20), "boutique");
        let long = "categoría boutique de lujo superior".to_string();
        assert_eq!(normalize_category(&long, 20).chars().count(), 20);
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let plan = normalize(&json!({}), &limits());
        assert_eq!(plan.name, "");
        assert_eq!(plan.duration, 1);
        assert_eq!(plan.nights, 0);
        assert_eq!(plan.base_price, "");
        assert!(plan.itinerary.is_empty());
        assert!(plan.validate().is_empty());
    }

    #[test]
    fn test_wrong_types_are_coerced() {
        let plan = normalize(
            &json!({
                "name": 42,
                "duration": "12",
                "nights": 200,
                "basePrice": "USD 1.299",
                "inclusions": ["vuelos", "", 7, {"item": "  hotel  "}],
            }),
            &limits(),
        );
        assert_eq!(plan.name, "42");
        assert_eq!(plan.duration, 12);
        assert_eq!(plan.nights, 99);
        assert_eq!(plan.base_price, "1299");
        let items: Vec<&str> = plan.inclusions.iter().map(|i| i.item.as_str()).collect();
        assert_eq!(items, vec!["vuelos", "7", "hotel"]);
    }

    #[test]
    fn test_oversized_strings_truncated_never_error() {
        let plan = normalize(
            &json!({
                "name": "N".repeat(500),
                "country": "C".repeat(500),
                "description": "D".repeat(5000),
            }),
            &limits(),
        );
        assert_eq!(plan.name.chars().count(), 120);
        assert_eq!(plan.country.chars().count(), 80);
        assert_eq!(plan.description.chars().count(), 1000);
        assert!(plan.validate().is_empty());
    }

    #[test]
    fn test_day_description_rederived_from_timed_activities() {
        let plan = normalize(
            &json!({
                "itinerary": [{
                    "dayNumber": 2,
                    "title": "Estambul",
                    "description": "resumen viejo",
                    "activities": ["09:00 - Visita al museo", "14:00 - Almuerzo típico"],
                }],
            }),
            &limits(),
        );
        assert_eq!(
            plan.itinerary[0].description,
            "09:00 - Visita al museo\n14:00 - Almuerzo típico"
        );
    }

    #[test]
    fn test_day_description_falls_back_to_activities() {
        let plan = normalize(
            &json!({
                "itinerary": [{
                    "title": "Ankara",
                    "activities": ["Paseo por la ciudadela", "Cena libre"],
                }],
            }),
            &limits(),
        );
        assert_eq!(plan.itinerary[0].day_number, 1);
        assert_eq!(
            plan.itinerary[0].description,
            "Paseo por la ciudadela\nCena libre"
        );
    }

    #[test]
    fn test_upgrade_price_coercion() {
        let plan = normalize(
            &json!({
                "upgrades": [
                    {"code": "UPG1", "name": "Suite", "price": "350"},
                    {"code": "UPG2", "name": "Globo", "price": {"amount": 120}},
                    {"code": "UPG3", "name": "Cena", "price": 80.5},
                ],
            }),
            &limits(),
        );
        assert_eq!(plan.upgrades[0].price, 350.0);
        assert_eq!(plan.upgrades[1].price, 0.0);
        assert_eq!(plan.upgrades[2].price, 80.5);
    }

    #[test]
    fn test_price_tier_without_valid_end_date_dropped() {
        let plan = normalize(
            &json!({
                "priceTiers": [
                    {"endDate": "2026-10-01", "price": "1999", "isFlightDay": true},
                    {"price": "1500"},
                    {"endDate": "pronto", "price": "1200"},
                ],
            }),
            &limits(),
        );
        assert_eq!(plan.price_tiers.len(), 1);
        assert_eq!(plan.price_tiers[0].end_date, "2026-10-01");
        assert_eq!(plan.price_tiers[0].is_flight_day, Some(true));
    }

    #[test]
    fn test_non_object_candidate_is_safe() {
        let plan = normalize(&json!("just a string"), &limits());
        assert_eq!(plan.duration, 1);
        assert!(plan.validate().is_empty());
    }
}
