//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the itinex pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItinexConfig {
    /// Field length caps and numeric ranges.
    pub limits: LimitsConfig,

    /// AI-assisted extraction configuration.
    pub ai: AiConfig,

    /// Country alias table used by the heuristic parser.
    pub countries: CountriesConfig,

    /// Progress streaming configuration.
    pub progress: ProgressConfig,
}

/// Length caps and numeric ranges applied to every extracted plan.
///
/// These are pragmatic caps carried over from the catalog contract; they
/// are configuration rather than constants so deployments can tune them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Plan name cap.
    pub name_max: usize,

    /// Country name cap.
    pub country_max: usize,

    /// Plan description cap on the heuristic path.
    pub heuristic_description_max: usize,

    /// Plan description cap on the AI path.
    pub ai_description_max: usize,

    /// Itinerary day title cap.
    pub day_title_max: usize,

    /// Itinerary day description cap.
    pub day_description_max: usize,

    /// Inclusion/exclusion entry cap.
    pub line_item_max: usize,

    /// Hotel name cap.
    pub hotel_name_max: usize,

    /// Hotel category cap.
    pub category_max: usize,

    /// Upgrade code cap.
    pub upgrade_code_max: usize,

    /// Upgrade name cap.
    pub upgrade_name_max: usize,

    /// Base price digit cap.
    pub base_price_max: usize,

    /// Upper bound for duration and nights.
    pub duration_max: u32,

    /// Minimum length for a paragraph to qualify as the plan description.
    pub min_paragraph_len: usize,

    /// Minimum body length for an itinerary day block to be retained.
    pub min_day_body_len: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            name_max: 120,
            country_max: 80,
            heuristic_description_max: 300,
            ai_description_max: 1000,
            day_title_max: 200,
            day_description_max: 3000,
            line_item_max: 300,
            hotel_name_max: 120,
            category_max: 20,
            upgrade_code_max: 30,
            upgrade_name_max: 100,
            base_price_max: 10,
            duration_max: 99,
            min_paragraph_len: 40,
            min_day_body_len: 20,
        }
    }
}

/// AI-assisted extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Master switch. When false the AI path is never attempted.
    pub enabled: bool,

    /// Base URL of an OpenAI-compatible completions service.
    pub base_url: String,

    /// Model identifier sent with each request.
    pub model: String,

    /// Environment variable holding the API key. The AI path counts as
    /// configured only when this variable is set and non-empty.
    pub api_key_env: String,

    /// Character budget for the document text sent in the prompt.
    pub prompt_budget_chars: usize,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            prompt_budget_chars: 28_000,
            request_timeout_secs: 60,
        }
    }
}

/// One canonical country with its accepted spellings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryAlias {
    /// Canonical name stored in the plan.
    pub canonical: String,

    /// Alternate spellings (other language, accents stripped, ...).
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl CountryAlias {
    pub fn new(canonical: &str, aliases: &[&str]) -> Self {
        Self {
            canonical: canonical.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Country alias table. The heuristic parser uses it both to recognize
/// destinations and to reject country names offered as plan titles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CountriesConfig {
    /// Known countries with their spellings.
    pub table: Vec<CountryAlias>,

    /// Keywords that mark a first line as a plausible tour title.
    pub title_keywords: Vec<String>,
}

impl Default for CountriesConfig {
    fn default() -> Self {
        let table = vec![
            CountryAlias::new("Perú", &["Peru"]),
            CountryAlias::new("México", &["Mexico"]),
            CountryAlias::new("Turquía", &["Turquia", "Turkey"]),
            CountryAlias::new("Egipto", &["Egypt"]),
            CountryAlias::new("España", &["Espana", "Spain"]),
            CountryAlias::new("Italia", &["Italy"]),
            CountryAlias::new("Grecia", &["Greece"]),
            CountryAlias::new("Japón", &["Japon", "Japan"]),
            CountryAlias::new("Tailandia", &["Thailand"]),
            CountryAlias::new("Marruecos", &["Morocco"]),
            CountryAlias::new("Jordania", &["Jordan"]),
            CountryAlias::new("India", &[]),
            CountryAlias::new("Vietnam", &[]),
            CountryAlias::new("Colombia", &[]),
            CountryAlias::new("Argentina", &[]),
            CountryAlias::new("Brasil", &["Brazil"]),
            CountryAlias::new("Chile", &[]),
            CountryAlias::new("Francia", &["France"]),
            CountryAlias::new("Portugal", &[]),
            CountryAlias::new("Croacia", &["Croatia"]),
            CountryAlias::new(
                "Emiratos Árabes Unidos",
                &["Emiratos Arabes Unidos", "United Arab Emirates", "Dubái", "Dubai"],
            ),
            CountryAlias::new("China", &[]),
            CountryAlias::new("Indonesia", &["Bali"]),
            CountryAlias::new("Cuba", &[]),
            CountryAlias::new("Costa Rica", &[]),
        ];

        let title_keywords = [
            "mágico",
            "magico",
            "maravilloso",
            "espectacular",
            "fantástico",
            "fantastico",
            "dorado",
            "imperial",
            "clásico",
            "clasico",
            "esencial",
            "completo",
            "total",
            "express",
            "expreso",
            "premium",
            "deluxe",
            "aventura",
            "tour",
            "soñado",
            "sonado",
            "classic",
            "golden",
            "essential",
            "adventure",
            "highlights",
        ]
        .iter()
        .map(|k| k.to_string())
        .collect();

        Self { table, title_keywords }
    }
}

/// Progress streaming configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Seconds between heartbeat events while the AI call is in flight.
    pub heartbeat_secs: u64,

    /// Progress percentage added per heartbeat.
    pub heartbeat_step: u8,

    /// Progress percentage heartbeats never exceed.
    pub heartbeat_cap: u8,

    /// Reassurance labels cycled through by heartbeat events.
    pub heartbeat_labels: Vec<String>,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            heartbeat_secs: 3,
            heartbeat_step: 3,
            heartbeat_cap: 72,
            heartbeat_labels: [
                "Analizando el itinerario...",
                "Identificando hoteles y servicios...",
                "Organizando los días del viaje...",
                "Casi listo, dando los últimos toques...",
            ]
            .iter()
            .map(|l| l.to_string())
            .collect(),
        }
    }
}

impl ItinexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
