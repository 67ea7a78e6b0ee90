//! Per-line classification of document text.
//!
//! The heuristic parser works on a tagged line stream instead of testing
//! regexes against raw lines mid-assembly, so section-boundary policy can
//! be tested on its own.

use super::rules::patterns::{
    BULLET, DAY_HEADER, EXCLUSION_HEADER, HOTEL_HEADER, INCLUSION_HEADER, TIMED_LINE,
};

/// Classification of one line of document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineTag<'a> {
    /// Empty or whitespace-only line.
    Blank,
    /// Itinerary day header with its number and trailing title text.
    DayHeader { number: Option<u32>, rest: &'a str },
    /// "No incluye" / "Not included" section header.
    ExclusionHeader,
    /// "Incluye" / "Includes" section header.
    InclusionHeader,
    /// "Hoteles" / "Accommodation" section header.
    HotelHeader,
    /// Bulleted list entry, marker stripped.
    Bullet(&'a str),
    /// Activity line starting with a clock time.
    Timed { time: &'a str, text: &'a str },
    /// Anything else.
    Prose(&'a str),
}

/// Classify a single line. Exclusion headers are tested before inclusion
/// headers: "No incluye" must never read as an inclusions header.
pub fn classify_line(line: &str) -> LineTag<'_> {
    if line.trim().is_empty() {
        return LineTag::Blank;
    }

    if let Some(caps) = DAY_HEADER.captures(line) {
        let number = caps[1].parse().ok();
        let rest = caps.get(2).map_or("", |m| m.as_str()).trim();
        return LineTag::DayHeader { number, rest };
    }

    if EXCLUSION_HEADER.is_match(line) {
        return LineTag::ExclusionHeader;
    }
    if INCLUSION_HEADER.is_match(line) {
        return LineTag::InclusionHeader;
    }
    if HOTEL_HEADER.is_match(line) {
        return LineTag::HotelHeader;
    }

    if let Some(caps) = TIMED_LINE.captures(line) {
        let time = caps.get(1).map_or("", |m| m.as_str());
        let text = caps.get(2).map_or("", |m| m.as_str()).trim();
        return LineTag::Timed { time, text };
    }

    if let Some(caps) = BULLET.captures(line) {
        return LineTag::Bullet(caps.get(1).map_or("", |m| m.as_str()).trim());
    }

    LineTag::Prose(line.trim())
}

/// Classify every line of a text, preserving line order.
pub fn classify<'a>(lines: &[&'a str]) -> Vec<LineTag<'a>> {
    lines.iter().map(|line| classify_line(line)).collect()
}

impl LineTag<'_> {
    /// True for tags that start a new section (day, inclusion, exclusion
    /// or hotel) and therefore end whatever section came before.
    pub fn is_section_boundary(&self) -> bool {
        matches!(
            self,
            LineTag::DayHeader { .. }
                | LineTag::ExclusionHeader
                | LineTag::InclusionHeader
                | LineTag::HotelHeader
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_prose() {
        assert_eq!(classify_line("   "), LineTag::Blank);
        assert_eq!(
            classify_line("Un viaje inolvidable por Anatolia."),
            LineTag::Prose("Un viaje inolvidable por Anatolia.")
        );
    }

    #[test]
    fn test_day_header() {
        assert_eq!(
            classify_line("Día 3 - Capadocia"),
            LineTag::DayHeader { number: Some(3), rest: "Capadocia" }
        );
        assert_eq!(
            classify_line("Day 1: Arrival"),
            LineTag::DayHeader { number: Some(1), rest: "Arrival" }
        );
    }

    #[test]
    fn test_exclusion_beats_inclusion() {
        assert_eq!(classify_line("No incluye:"), LineTag::ExclusionHeader);
        assert_eq!(classify_line("El precio no incluye"), LineTag::ExclusionHeader);
        assert_eq!(classify_line("Incluye:"), LineTag::InclusionHeader);
        assert_eq!(classify_line("El precio incluye"), LineTag::InclusionHeader);
    }

    #[test]
    fn test_hotel_header() {
        assert_eq!(classify_line("Hoteles previstos:"), LineTag::HotelHeader);
        assert_eq!(classify_line("Accommodation"), LineTag::HotelHeader);
        // a hotel line with details is not a header
        assert!(matches!(
            classify_line("Hotel Plaza - 4 estrellas - Estambul"),
            LineTag::Prose(_)
        ));
    }

    #[test]
    fn test_timed_and_bullet() {
        assert_eq!(
            classify_line("09:00 - Visita al museo"),
            LineTag::Timed { time: "09:00", text: "Visita al museo" }
        );
        assert_eq!(
            classify_line("**10:30** Desayuno buffet"),
            LineTag::Timed { time: "10:30", text: "Desayuno buffet" }
        );
        assert_eq!(classify_line("- Traslados"), LineTag::Bullet("Traslados"));
        assert_eq!(classify_line("• Guía en español"), LineTag::Bullet("Guía en español"));
    }

    #[test]
    fn test_section_boundary() {
        assert!(classify_line("Día 2 - City Tour").is_section_boundary());
        assert!(classify_line("No incluye").is_section_boundary());
        assert!(!classify_line("texto cualquiera").is_section_boundary());
    }
}
