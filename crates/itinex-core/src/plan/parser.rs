//! Heuristic structural parser: free-form tour text to a provisional plan.
//!
//! Pure and deterministic, no I/O. Several passes run over the same
//! classified line stream: title/country detection, trip length, price,
//! description, inclusions/exclusions, itinerary segmentation and the
//! hotel section.

use tracing::debug;

use super::classify::{classify, LineTag};
use super::normalize::truncate_chars;
use super::rules::countries::CountryTable;
use super::rules::hotels::parse_hotel_line;
use super::rules::patterns::{
    COUNTRY_LABEL, DAY_ACCOMMODATION_LABEL, DAY_DESCRIPTION_LABEL, DAY_LOCATION_LABEL,
    DAY_MEALS_LABEL, MARKUP, NAME_LABEL,
};
use super::rules::{extract_base_price, extract_trip_length};
use crate::models::config::ItinexConfig;
use crate::models::plan::{ExtractedPlan, Hotel, ItineraryDay, PlanLineItem};

/// Parse free-form tour text into a provisional structured plan.
pub fn parse_heuristic(text: &str, config: &ItinexConfig) -> ExtractedPlan {
    HeuristicParser::new(config).parse(text)
}

/// Rule-based plan parser configured with limits and the country table.
pub struct HeuristicParser<'c> {
    config: &'c ItinexConfig,
    countries: CountryTable,
}

impl<'c> HeuristicParser<'c> {
    pub fn new(config: &'c ItinexConfig) -> Self {
        Self {
            config,
            countries: CountryTable::from_config(&config.countries),
        }
    }

    pub fn parse(&self, text: &str) -> ExtractedPlan {
        let limits = &self.config.limits;
        let lines: Vec<&str> = text.lines().collect();
        let tags = classify(&lines);

        // Country first, so the name heuristic cannot misread the
        // destination as the plan title.
        let country = self.extract_country(text);
        let name = self.extract_name(&lines, &tags);

        let country = if country.is_empty() && !name.is_empty() {
            self.countries.find_in(&name).unwrap_or("").to_string()
        } else {
            country
        };

        let trip = extract_trip_length(text, limits.duration_max);
        let base_price = extract_base_price(text, limits.base_price_max);
        let description = self.extract_description(&tags, &name);
        let (inclusions, exclusions) = self.extract_line_item_sections(&tags);
        let itinerary = self.extract_itinerary(&lines, &tags);
        let hotels = self.extract_hotels(&lines, &tags);

        debug!(
            "heuristic parse: {} days, {} hotels, {} inclusions, {} exclusions",
            itinerary.len(),
            hotels.len(),
            inclusions.len(),
            exclusions.len()
        );

        ExtractedPlan {
            name: truncate_chars(&name, limits.name_max),
            country: truncate_chars(&country, limits.country_max),
            duration: trip.duration,
            nights: trip.nights,
            description,
            base_price,
            itinerary,
            hotels,
            inclusions,
            exclusions,
            price_tiers: Vec::new(),
            upgrades: Vec::new(),
        }
    }

    /// Explicit country/destination labels only; derivation from the plan
    /// name happens in `parse` once the name is known.
    fn extract_country(&self, text: &str) -> String {
        let Some(caps) = COUNTRY_LABEL.captures(text) else {
            return String::new();
        };
        let raw = caps[1].trim();
        self.countries
            .canonical_matching(raw)
            .unwrap_or(raw)
            .to_string()
    }

    /// Explicit plan/tour labels win; a candidate equal to a known country
    /// name is rejected. Falls back to a title-shaped first line.
    fn extract_name(&self, lines: &[&str], tags: &[LineTag<'_>]) -> String {
        for line in lines {
            if let Some(caps) = NAME_LABEL.captures(line) {
                let candidate = caps[1].trim();
                if !candidate.is_empty() && !self.countries.is_country(candidate) {
                    return candidate.to_string();
                }
            }
        }

        // First prose line shaped like a tour title. Label lines were
        // already considered above and are skipped here.
        for (line, tag) in lines.iter().zip(tags) {
            match tag {
                LineTag::Blank => continue,
                LineTag::Prose(_) => {
                    if NAME_LABEL.is_match(line) || COUNTRY_LABEL.is_match(line) {
                        continue;
                    }
                    let candidate = MARKUP.replace_all(line.trim(), "").to_string();
                    if self.looks_like_title(&candidate) {
                        return candidate;
                    }
                    break;
                }
                _ => break,
            }
        }

        String::new()
    }

    fn looks_like_title(&self, candidate: &str) -> bool {
        let len = candidate.chars().count();
        if !(5..=120).contains(&len) {
            return false;
        }
        if !candidate.chars().next().is_some_and(|c| c.is_uppercase()) {
            return false;
        }
        if self.countries.is_country(candidate) {
            return false;
        }
        let lowered = candidate.to_lowercase();
        self.config
            .countries
            .title_keywords
            .iter()
            .any(|k| lowered.contains(k.as_str()))
    }

    /// First paragraph before the inclusions marker that is not a day
    /// header and is longer than the configured minimum.
    fn extract_description(&self, tags: &[LineTag<'_>], name: &str) -> String {
        let limits = &self.config.limits;
        let qualifies = |p: &str| {
            let p = p.trim();
            p != name && p.chars().count() > limits.min_paragraph_len
        };
        let mut paragraph = String::new();

        for tag in tags {
            match tag {
                LineTag::InclusionHeader | LineTag::ExclusionHeader | LineTag::DayHeader { .. } => {
                    break
                }
                LineTag::Prose(text) => {
                    if !paragraph.is_empty() {
                        paragraph.push(' ');
                    }
                    paragraph.push_str(text);
                }
                _ => {
                    // Paragraph boundary: keep the first qualifying one.
                    if qualifies(&paragraph) {
                        break;
                    }
                    paragraph.clear();
                }
            }
        }

        if qualifies(&paragraph) {
            truncate_chars(paragraph.trim(), limits.heuristic_description_max)
        } else {
            String::new()
        }
    }

    /// Inclusion/exclusion capture. The first header of each kind wins;
    /// repeats of the same header are ignored until the opposite section
    /// begins. Entries of 2 characters or fewer, or longer than the cap,
    /// are dropped.
    fn extract_line_item_sections(
        &self,
        tags: &[LineTag<'_>],
    ) -> (Vec<PlanLineItem>, Vec<PlanLineItem>) {
        #[derive(PartialEq, Clone, Copy)]
        enum Section {
            None,
            Inclusions,
            Exclusions,
        }

        let limits = &self.config.limits;
        let mut section = Section::None;
        let mut inclusions = Vec::new();
        let mut exclusions = Vec::new();

        for tag in tags {
            match tag {
                LineTag::InclusionHeader => section = Section::Inclusions,
                LineTag::ExclusionHeader => section = Section::Exclusions,
                LineTag::DayHeader { .. } | LineTag::HotelHeader => section = Section::None,
                LineTag::Blank | LineTag::Timed { .. } => {}
                LineTag::Bullet(text) | LineTag::Prose(text) => {
                    let entry = text.trim();
                    let len = entry.chars().count();
                    if len <= 2 || len > limits.line_item_max {
                        continue;
                    }
                    match section {
                        Section::Inclusions => inclusions.push(PlanLineItem::new(entry)),
                        Section::Exclusions => exclusions.push(PlanLineItem::new(entry)),
                        Section::None => {}
                    }
                }
            }
        }

        (inclusions, exclusions)
    }

    /// Split the text at day headers and build one itinerary entry per
    /// block. Document order is preserved: day numbers are not re-sorted
    /// and duplicates are kept.
    fn extract_itinerary(&self, lines: &[&str], tags: &[LineTag<'_>]) -> Vec<ItineraryDay> {
        let limits = &self.config.limits;
        let mut days = Vec::new();

        // Collect (header index, number, title rest) for each day header.
        let headers: Vec<(usize, Option<u32>, &str)> = tags
            .iter()
            .enumerate()
            .filter_map(|(i, tag)| match tag {
                LineTag::DayHeader { number, rest } => Some((i, *number, *rest)),
                _ => None,
            })
            .collect();

        for (block_index, &(start, number, rest)) in headers.iter().enumerate() {
            let end = headers
                .get(block_index + 1)
                .map(|&(next, _, _)| next)
                .unwrap_or(lines.len());

            let day_number = number.unwrap_or(block_index as u32 + 1);
            let placeholder = format!("Día {}", day_number);
            let title = {
                let cleaned = MARKUP.replace_all(rest, "").trim().to_string();
                if cleaned.is_empty() {
                    placeholder.clone()
                } else {
                    truncate_chars(&cleaned, limits.day_title_max)
                }
            };

            let mut location = None;
            let mut labeled_description = None;
            let mut meals: Vec<String> = Vec::new();
            let mut accommodation = None;
            let mut timed_lines: Vec<String> = Vec::new();
            let mut prose_lines: Vec<String> = Vec::new();

            for (line, tag) in lines[start + 1..end].iter().zip(&tags[start + 1..end]) {
                // A later section header ends this day's body.
                if matches!(
                    tag,
                    LineTag::InclusionHeader | LineTag::ExclusionHeader | LineTag::HotelHeader
                ) {
                    break;
                }

                if let Some(caps) = DAY_LOCATION_LABEL.captures(line) {
                    location = Some(caps[1].trim().to_string());
                    continue;
                }
                if let Some(caps) = DAY_DESCRIPTION_LABEL.captures(line) {
                    labeled_description = Some(caps[1].trim().to_string());
                    continue;
                }
                if let Some(caps) = DAY_MEALS_LABEL.captures(line) {
                    meals = caps[1]
                        .split(',')
                        .map(|m| m.trim().to_string())
                        .filter(|m| !m.is_empty())
                        .collect();
                    continue;
                }
                if let Some(caps) = DAY_ACCOMMODATION_LABEL.captures(line) {
                    accommodation = Some(caps[1].trim().to_string());
                    continue;
                }

                match tag {
                    LineTag::Timed { time, text } => {
                        timed_lines.push(format!("{} - {}", time, MARKUP.replace_all(text, "")));
                    }
                    LineTag::Bullet(text) | LineTag::Prose(text) => {
                        prose_lines.push(text.to_string());
                    }
                    _ => {}
                }
            }

            // Timestamped sub-lines replace the block body outright.
            let description = if !timed_lines.is_empty() {
                timed_lines.join("\n")
            } else if let Some(labeled) = labeled_description {
                labeled
            } else {
                prose_lines.join("\n")
            };
            let description = truncate_chars(&description, limits.day_description_max);

            let body_len = description.chars().count();
            if body_len <= limits.min_day_body_len && title == placeholder {
                debug!("dropping empty day block {}", day_number);
                continue;
            }

            days.push(ItineraryDay {
                day_number,
                title,
                description,
                location,
                activities: timed_lines,
                meals,
                accommodation,
            });
        }

        days
    }

    /// Hotel section: every non-trivial line after the hotel header up to
    /// the next section header, pattern-matched with partial fallback.
    fn extract_hotels(&self, lines: &[&str], tags: &[LineTag<'_>]) -> Vec<Hotel> {
        let limits = &self.config.limits;
        let mut hotels = Vec::new();
        let mut in_section = false;

        for (line, tag) in lines.iter().zip(tags) {
            match tag {
                LineTag::HotelHeader => {
                    in_section = true;
                }
                LineTag::DayHeader { .. } | LineTag::InclusionHeader | LineTag::ExclusionHeader => {
                    if in_section {
                        break;
                    }
                }
                LineTag::Blank => {}
                LineTag::Bullet(text) => {
                    if in_section {
                        if let Some(hotel) =
                            parse_hotel_line(text, limits.hotel_name_max, limits.category_max)
                        {
                            hotels.push(hotel);
                        }
                    }
                }
                _ => {
                    if in_section {
                        if let Some(hotel) =
                            parse_hotel_line(line, limits.hotel_name_max, limits.category_max)
                        {
                            hotels.push(hotel);
                        }
                    }
                }
            }
        }

        hotels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> ItinexConfig {
        ItinexConfig::default()
    }

    #[test]
    fn test_two_day_scenario_with_timed_lines() {
        let text = "Día 1 - Llegada\nTraslado al hotel y descanso.\nDía 2 - City Tour\n09:00 - Visita al museo\n14:00 - Almuerzo típico";
        let plan = parse_heuristic(text, &config());

        assert_eq!(plan.itinerary.len(), 2);
        assert_eq!(plan.itinerary[0].day_number, 1);
        assert_eq!(plan.itinerary[0].title, "Llegada");
        assert_eq!(plan.itinerary[0].description, "Traslado al hotel y descanso.");
        assert_eq!(plan.itinerary[1].day_number, 2);
        assert_eq!(
            plan.itinerary[1].description,
            "09:00 - Visita al museo\n14:00 - Almuerzo típico"
        );
        assert_eq!(
            plan.itinerary[1].activities,
            vec!["09:00 - Visita al museo", "14:00 - Almuerzo típico"]
        );
    }

    #[test]
    fn test_unstructured_input_yields_defaults_never_panics() {
        let plan = parse_heuristic("texto suelto sin estructura alguna", &config());
        assert_eq!(plan.duration, 1);
        assert_eq!(plan.nights, 0);
        assert!(plan.itinerary.is_empty());
        assert_eq!(plan.base_price, "");
        assert!(plan.validate().is_empty());
    }

    #[test]
    fn test_day_order_preserved_not_sorted() {
        let text = "Día 1 - Salida internacional con traslado\nVuelo nocturno hacia el destino elegido.\nDía 3 - Excursión completa por la región\nJornada de visitas guiadas y tiempo libre.\nDía 2 - Ciudad colonial y sus alrededores\nRecorrido a pie por el centro histórico.";
        let plan = parse_heuristic(text, &config());
        let numbers: Vec<u32> = plan.itinerary.iter().map(|d| d.day_number).collect();
        assert_eq!(numbers, vec![1, 3, 2]);
    }

    #[test]
    fn test_labeled_name_and_country() {
        let text = "Plan: Turquía Mágica\nPaís: Turquía\n10 días y 9 noches\nPrecio: $2.499";
        let plan = parse_heuristic(text, &config());
        assert_eq!(plan.name, "Turquía Mágica");
        assert_eq!(plan.country, "Turquía");
        assert_eq!(plan.duration, 10);
        assert_eq!(plan.nights, 9);
        assert_eq!(plan.base_price, "2499");
    }

    #[test]
    fn test_name_candidate_equal_to_country_rejected() {
        let text = "Tour: Turquía\nTurquía Espectacular 8D/7N\nUna aventura inolvidable por Anatolia y la costa del Egeo.";
        let plan = parse_heuristic(text, &config());
        // the labeled candidate is a bare country name; the title-shaped
        // first line wins instead
        assert_eq!(plan.name, "Turquía Espectacular 8D/7N");
    }

    #[test]
    fn test_country_derived_from_name() {
        let text = "Egipto Dorado\nCrucero por el Nilo con visitas guiadas en español y pensión completa.";
        let plan = parse_heuristic(text, &config());
        assert_eq!(plan.name, "Egipto Dorado");
        assert_eq!(plan.country, "Egipto");
    }

    #[test]
    fn test_inclusions_and_exclusions_sections() {
        let text = "Incluye:\n- Traslados aeropuerto\n- Guía en español\n- ok\nNo incluye:\n- Propinas\n- Bebidas en las cenas";
        let plan = parse_heuristic(text, &config());

        let inc: Vec<&str> = plan.inclusions.iter().map(|i| i.item.as_str()).collect();
        let exc: Vec<&str> = plan.exclusions.iter().map(|i| i.item.as_str()).collect();
        // "ok" is dropped: entries of 2 chars or fewer are noise
        assert_eq!(inc, vec!["Traslados aeropuerto", "Guía en español"]);
        assert_eq!(exc, vec!["Propinas", "Bebidas en las cenas"]);
    }

    #[test]
    fn test_repeated_inclusion_header_ignored() {
        let text = "Incluye:\n- Vuelos\nIncluye:\n- Hotel\nNo incluye:\n- Propinas";
        let plan = parse_heuristic(text, &config());
        let inc: Vec<&str> = plan.inclusions.iter().map(|i| i.item.as_str()).collect();
        assert_eq!(inc, vec!["Vuelos", "Hotel"]);
        assert_eq!(plan.exclusions.len(), 1);
    }

    #[test]
    fn test_hotel_section() {
        let text = "Hoteles previstos:\nHotel Plaza - 4 estrellas - Estambul, 3 noches\n- Hotel Azure - 5* - Cancún\nSultanahmet Residence\nNo incluye:\n- Propinas";
        let plan = parse_heuristic(text, &config());

        assert_eq!(plan.hotels.len(), 3);
        assert_eq!(plan.hotels[0].name, "Hotel Plaza");
        assert_eq!(plan.hotels[0].category.as_deref(), Some("4*"));
        assert_eq!(plan.hotels[0].location.as_deref(), Some("Estambul"));
        assert_eq!(plan.hotels[0].nights, Some(3));
        assert_eq!(plan.hotels[1].name, "Hotel Azure");
        assert_eq!(plan.hotels[2].name, "Sultanahmet Residence");
        assert_eq!(plan.hotels[2].category, None);
        // the exclusions header ended the hotel section
        assert_eq!(plan.exclusions.len(), 1);
    }

    #[test]
    fn test_description_paragraph_before_inclusions() {
        let text = "Turquía Mágica Tour\n\nUn recorrido de diez días por los paisajes más sorprendentes de Anatolia, con guías locales.\n\nIncluye:\n- Vuelos";
        let plan = parse_heuristic(text, &config());
        assert!(plan.description.starts_with("Un recorrido de diez días"));
    }

    #[test]
    fn test_day_labels_inside_block() {
        let text = "Día 4 - Capadocia\nLugar: Göreme\nComidas: desayuno, cena\nAlojamiento: Hotel Cueva\nPaseo en globo al amanecer y visita al museo al aire libre.";
        let plan = parse_heuristic(text, &config());

        let day = &plan.itinerary[0];
        assert_eq!(day.location.as_deref(), Some("Göreme"));
        assert_eq!(day.meals, vec!["desayuno", "cena"]);
        assert_eq!(day.accommodation.as_deref(), Some("Hotel Cueva"));
        assert!(day.description.contains("Paseo en globo"));
    }

    #[test]
    fn test_idempotence() {
        let text = "Plan: Perú Esencial\n7 días\nDía 1 - Lima\nCity tour por el centro histórico.";
        let first = parse_heuristic(text, &config());
        let second = parse_heuristic(text, &config());
        assert_eq!(first, second);
    }
}
