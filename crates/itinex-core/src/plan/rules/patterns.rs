//! Common regex patterns for travel-document extraction (Spanish/English).

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Day headers ("Día 3 - Capadocia", "Day 3: Cappadocia")
    pub static ref DAY_HEADER: Regex = Regex::new(
        r"(?i)^\s*(?:d[ií]a|day)\s+(\d{1,2})\s*[.:)\-–—]*\s*(.*)$"
    ).unwrap();

    // Labeled destination ("País: Turquía", "Destination: Turkey")
    pub static ref COUNTRY_LABEL: Regex = Regex::new(
        r"(?im)^\s*(?:pa[ií]s|destinos?|country|destination)\s*[:\-]\s*(.+)$"
    ).unwrap();

    // Labeled plan name ("Plan: Turquía Mágica", "Tour: Golden Triangle")
    pub static ref NAME_LABEL: Regex = Regex::new(
        r"(?im)^\s*(?:plan|tour|programa|paquete|t[ií]tulo|title)\s*[:\-]\s*(.+)$"
    ).unwrap();

    // Duration and nights ("10 días", "9 noches", "10 days / 9 nights")
    pub static ref DURATION_DAYS: Regex = Regex::new(
        r"(?i)\b(\d{1,2})\s*(?:d[ií]as?|days?)\b"
    ).unwrap();

    pub static ref DURATION_NIGHTS: Regex = Regex::new(
        r"(?i)\b(\d{1,2})\s*(?:noches?|nights?)\b"
    ).unwrap();

    // Compact notation ("10D/9N")
    pub static ref DURATION_COMPACT: Regex = Regex::new(
        r"(?i)\b(\d{1,2})\s*D\s*/\s*(\d{1,2})\s*N\b"
    ).unwrap();

    // Prices ("Precio: $1.299", "Desde USD 999", "From $2,450")
    pub static ref PRICE_LABELED: Regex = Regex::new(
        r"(?i)(?:precio|tarifa|price|desde|from)\s*[:\-]?\s*(?:USD|US\$|\$|€|EUR|S/\.?)?\s*(\d[\d.,]*)"
    ).unwrap();

    pub static ref PRICE_CURRENCY: Regex = Regex::new(
        r"(?i)(?:USD|US\$|\$|€|EUR)\s*(\d[\d.,]*)"
    ).unwrap();

    // Section headers. Exclusions are tested before inclusions so that
    // "No incluye" never reads as an inclusions header.
    pub static ref EXCLUSION_HEADER: Regex = Regex::new(
        r"(?i)^\s*(?:(?:el\s+)?(?:precio|plan|programa|paquete|tour)\s+)?(?:no\s+incluye|not\s+included|does\s+not\s+include|exclusiones|exclusions)\b"
    ).unwrap();

    pub static ref INCLUSION_HEADER: Regex = Regex::new(
        r"(?i)^\s*(?:(?:el\s+)?(?:precio|plan|programa|paquete|tour)\s+)?(?:incluye|includes?|inclusiones|inclusions)\b"
    ).unwrap();

    pub static ref HOTEL_HEADER: Regex = Regex::new(
        r"(?i)^\s*(?:hoteles?|hotels?|alojamientos?|accommodations?|hospedajes?)(?:\s+(?:previstos?|seleccionados?|incluidos?))?\s*[:\-]?\s*$"
    ).unwrap();

    // Bullet markers. A single marker char must be followed by whitespace
    // so bold markup ("**09:00**") is not mistaken for a bullet.
    pub static ref BULLET: Regex = Regex::new(
        r"^\s*[-•*·▪✓✔➤]\s+(.*)$"
    ).unwrap();

    // Timestamped activity lines ("09:00 - Visita al museo", "**10:30** Desayuno")
    pub static ref TIMED_LINE: Regex = Regex::new(
        r"^\s*[*_]{0,2}(\d{1,2}:\d{2})[*_]{0,2}\s*[-–—:]?\s*(.*)$"
    ).unwrap();

    // In-day labels
    pub static ref DAY_LOCATION_LABEL: Regex = Regex::new(
        r"(?i)^\s*(?:lugar|ubicaci[oó]n|location)\s*[:\-]\s*(.+)$"
    ).unwrap();

    pub static ref DAY_DESCRIPTION_LABEL: Regex = Regex::new(
        r"(?i)^\s*(?:descripci[oó]n|description)\s*[:\-]\s*(.+)$"
    ).unwrap();

    pub static ref DAY_MEALS_LABEL: Regex = Regex::new(
        r"(?i)^\s*(?:comidas?|alimentaci[oó]n|meals?)\s*[:\-]\s*(.+)$"
    ).unwrap();

    pub static ref DAY_ACCOMMODATION_LABEL: Regex = Regex::new(
        r"(?i)^\s*(?:alojamiento|accommodation|hospedaje)\s*[:\-]\s*(.+)$"
    ).unwrap();

    // Hotel lines ("Hotel Plaza - 4 estrellas - Estambul, 3 noches")
    pub static ref HOTEL_LINE_FULL: Regex = Regex::new(
        r"(?i)^(.{2,120}?)\s*[-–,]\s*(\d)\s*(?:\*|estrellas?|stars?)\s*[-–,]\s*([^,\n]+?)(?:\s*[,\-–]\s*(\d{1,2})\s*(?:noches?|nights?))?\s*$"
    ).unwrap();

    pub static ref HOTEL_LINE_CATEGORY: Regex = Regex::new(
        r"(?i)^(.{2,120}?)\s*[-–,(]\s*(\d)\s*(?:\*|estrellas?|stars?)\)?\s*$"
    ).unwrap();

    // Bold/emphasis markers stripped from day titles and activity lines
    pub static ref MARKUP: Regex = Regex::new(
        r"[*_]{1,3}"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_header_variants() {
        let caps = DAY_HEADER.captures("Día 1 - Llegada").unwrap();
        assert_eq!(&caps[1], "1");
        assert_eq!(&caps[2], "Llegada");

        let caps = DAY_HEADER.captures("Day 12: Cappadocia by balloon").unwrap();
        assert_eq!(&caps[1], "12");
        assert_eq!(&caps[2], "Cappadocia by balloon");

        assert!(DAY_HEADER.captures("Día a día del viaje").is_none());
    }

    #[test]
    fn test_exclusion_not_mistaken_for_inclusion() {
        assert!(EXCLUSION_HEADER.is_match("El precio no incluye"));
        assert!(EXCLUSION_HEADER.is_match("No incluye:"));
        assert!(!INCLUSION_HEADER.is_match("No incluye:"));
        assert!(INCLUSION_HEADER.is_match("Incluye:"));
        assert!(INCLUSION_HEADER.is_match("El precio incluye"));
        assert!(INCLUSION_HEADER.is_match("Includes"));
    }

    #[test]
    fn test_timed_line_strips_markup() {
        let caps = TIMED_LINE.captures("**09:00** - Visita al museo").unwrap();
        assert_eq!(&caps[1], "09:00");
        assert_eq!(&caps[2], "Visita al museo");

        let caps = TIMED_LINE.captures("14:00 Almuerzo típico").unwrap();
        assert_eq!(&caps[1], "14:00");
        assert_eq!(&caps[2], "Almuerzo típico");
    }

    #[test]
    fn test_bullet_requires_space_after_marker() {
        assert!(BULLET.is_match("- Traslados aeropuerto"));
        assert!(BULLET.is_match("• Guía en español"));
        assert!(!BULLET.is_match("**09:00** - Visita"));
    }

    #[test]
    fn test_hotel_line_full() {
        let caps = HOTEL_LINE_FULL
            .captures("Hotel Plaza - 4 estrellas - Estambul, 3 noches")
            .unwrap();
        assert_eq!(&caps[1], "Hotel Plaza");
        assert_eq!(&caps[2], "4");
        assert_eq!(&caps[3], "Estambul");
        assert_eq!(&caps[4], "3");
    }

    #[test]
    fn test_hotel_line_without_nights() {
        let caps = HOTEL_LINE_FULL
            .captures("Hotel Azure - 5* - Cancún")
            .unwrap();
        assert_eq!(&caps[1], "Hotel Azure");
        assert_eq!(&caps[2], "5");
        assert_eq!(&caps[3], "Cancún");
        assert!(caps.get(4).is_none());
    }

    #[test]
    fn test_duration_patterns() {
        assert_eq!(&DURATION_DAYS.captures("10 días / 9 noches").unwrap()[1], "10");
        assert_eq!(&DURATION_NIGHTS.captures("10 días / 9 noches").unwrap()[1], "9");
        let caps = DURATION_COMPACT.captures("Programa 8D/7N salidas diarias").unwrap();
        assert_eq!(&caps[1], "8");
        assert_eq!(&caps[2], "7");
    }

    #[test]
    fn test_price_patterns() {
        assert_eq!(&PRICE_LABELED.captures("Precio: $1.299 por persona").unwrap()[1], "1.299");
        assert_eq!(&PRICE_LABELED.captures("Desde USD 999").unwrap()[1], "999");
        assert_eq!(&PRICE_CURRENCY.captures("Tarifa regular US$ 2,450").unwrap()[1], "2,450");
    }
}
