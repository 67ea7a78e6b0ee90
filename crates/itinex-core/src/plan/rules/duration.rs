//! Duration and nights detection.

use super::patterns::{DURATION_COMPACT, DURATION_DAYS, DURATION_NIGHTS};

/// Extracted duration in days and nights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripLength {
    pub duration: u32,
    pub nights: u32,
}

/// Detect the trip length from free text.
///
/// Tries the compact "ND/NN" notation first, then separate day/night
/// mentions. Nights default to `duration - 1` when only days are found;
/// days default to `nights + 1` when only nights are found. Undetectable
/// input yields the schema defaults (1 day, 0 nights).
pub fn extract_trip_length(text: &str, max: u32) -> TripLength {
    if let Some(caps) = DURATION_COMPACT.captures(text) {
        let duration: u32 = caps[1].parse().unwrap_or(1);
        let nights: u32 = caps[2].parse().unwrap_or(0);
        return clamp(duration, nights, max);
    }

    let duration = DURATION_DAYS
        .captures(text)
        .and_then(|caps| caps[1].parse::<u32>().ok());
    let nights = DURATION_NIGHTS
        .captures(text)
        .and_then(|caps| caps[1].parse::<u32>().ok());

    let (duration, nights) = match (duration, nights) {
        (Some(d), Some(n)) => (d, n),
        (Some(d), None) => (d, d.saturating_sub(1)),
        (None, Some(n)) => (n + 1, n),
        (None, None) => (1, 0),
    };

    clamp(duration, nights, max)
}

fn clamp(duration: u32, nights: u32, max: u32) -> TripLength {
    TripLength {
        duration: duration.clamp(1, max),
        nights: nights.min(max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_and_nights() {
        let len = extract_trip_length("Turquía Mágica: 10 días y 9 noches", 99);
        assert_eq!(len, TripLength { duration: 10, nights: 9 });
    }

    #[test]
    fn test_days_only_derives_nights() {
        let len = extract_trip_length("Programa de 7 días por Egipto", 99);
        assert_eq!(len, TripLength { duration: 7, nights: 6 });
    }

    #[test]
    fn test_nights_only_derives_days() {
        let len = extract_trip_length("5 noches en Cancún", 99);
        assert_eq!(len, TripLength { duration: 6, nights: 5 });
    }

    #[test]
    fn test_compact_notation_wins() {
        let len = extract_trip_length("8D/7N incluye 3 días libres", 99);
        assert_eq!(len, TripLength { duration: 8, nights: 7 });
    }

    #[test]
    fn test_undetectable_defaults() {
        let len = extract_trip_length("un viaje inolvidable", 99);
        assert_eq!(len, TripLength { duration: 1, nights: 0 });
    }

    #[test]
    fn test_clamped_to_range() {
        let len = extract_trip_length("0 días de viaje", 99);
        assert_eq!(len.duration, 1);
    }
}
