//! Hotel line parsing.

use super::patterns::{HOTEL_LINE_CATEGORY, HOTEL_LINE_FULL};
use crate::models::plan::Hotel;
use crate::plan::normalize::{normalize_category, truncate_chars};

/// Try to parse a hotel section line into name, category, location and
/// nights. Partial matches keep whatever groups matched; a line that fits
/// no pattern is stored as a bare hotel name. Missing groups stay absent,
/// never a placeholder string.
pub fn parse_hotel_line(line: &str, name_max: usize, category_max: usize) -> Option<Hotel> {
    let line = line.trim();
    if line.len() <= 2 {
        return None;
    }

    if let Some(caps) = HOTEL_LINE_FULL.captures(line) {
        return Some(Hotel {
            name: truncate_chars(caps[1].trim(), name_max),
            category: Some(normalize_category(&format!("{}*", &caps[2]), category_max)),
            location: Some(caps[3].trim().to_string()),
            nights: caps.get(4).and_then(|m| m.as_str().parse().ok()),
        });
    }

    if let Some(caps) = HOTEL_LINE_CATEGORY.captures(line) {
        return Some(Hotel {
            name: truncate_chars(caps[1].trim(), name_max),
            category: Some(normalize_category(&format!("{}*", &caps[2]), category_max)),
            location: None,
            nights: None,
        });
    }

    Some(Hotel {
        name: truncate_chars(line, name_max),
        category: None,
        location: None,
        nights: None,
    })
}
