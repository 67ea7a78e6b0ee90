//! Country recognition backed by the configurable alias table.

use crate::models::config::CountriesConfig;

/// Lookup table built once per parse from [`CountriesConfig`].
///
/// Holds every accepted spelling in lowercase next to its canonical name,
/// so both equality checks and in-text searches are cheap.
pub struct CountryTable {
    entries: Vec<CountryEntry>,
}

struct CountryEntry {
    canonical: String,
    spellings: Vec<String>,
}

impl CountryTable {
    pub fn from_config(config: &CountriesConfig) -> Self {
        let entries = config
            .table
            .iter()
            .map(|alias| {
                let mut spellings = vec![alias.canonical.to_lowercase()];
                spellings.extend(alias.aliases.iter().map(|a| a.to_lowercase()));
                CountryEntry {
                    canonical: alias.canonical.clone(),
                    spellings,
                }
            })
            .collect();

        Self { entries }
    }

    /// True when the trimmed input equals a known country spelling.
    pub fn is_country(&self, candidate: &str) -> bool {
        self.canonical_matching(candidate).is_some()
    }

    /// Canonical name for an input that *is* a country spelling.
    pub fn canonical_matching(&self, candidate: &str) -> Option<&str> {
        let needle = candidate.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|e| e.spellings.iter().any(|s| *s == needle))
            .map(|e| e.canonical.as_str())
    }

    /// Search for a country spelling inside free text, on word boundaries.
    /// Returns the canonical name of the first entry found.
    pub fn find_in(&self, text: &str) -> Option<&str> {
        let haystack = text.to_lowercase();
        self.entries
            .iter()
            .find(|e| e.spellings.iter().any(|s| contains_word(&haystack, s)))
            .map(|e| e.canonical.as_str())
    }
}

/// Substring search that only accepts matches delimited by non-alphabetic
/// characters, so "India" is not found inside "Indiana".
fn contains_word(haystack: &str, needle: &str) -> bool {
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(needle) {
        let start = from + pos;
        let end = start + needle.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphabetic());
        let after_ok = haystack[end..].chars().next().is_none_or(|c| !c.is_alphabetic());
        if before_ok && after_ok {
            return true;
        }
        from = end;
    }
    false
}
