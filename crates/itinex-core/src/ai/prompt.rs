//! System prompt for the structured-completion service.

use crate::models::config::LimitsConfig;
use crate::plan::normalize::truncate_chars;

/// Build the system instruction that fixes the output schema and the
/// extraction rules. The service is constrained to answer with a single
/// JSON object in exactly this shape; everything it returns still passes
/// through the normalization layer afterwards.
pub fn build_system_prompt(limits: &LimitsConfig) -> String {
    format!(
        r#"Eres un asistente que extrae planes turísticos de documentos de agencias de viajes.
Devuelve UN ÚNICO objeto JSON, sin texto adicional, con exactamente esta forma:

{{
  "name": string,            // título comercial del tour, máx {name_max} caracteres
  "country": string,         // país/región de destino, máx {country_max} caracteres
  "duration": number,        // días totales, entero 1-{duration_max}
  "nights": number,          // noches totales, entero 0-{duration_max}
  "description": string,     // máx {description_max} caracteres
  "basePrice": string,       // solo dígitos, máx {base_price_max}; "" si no se detecta
  "itinerary": [{{ "dayNumber": number, "title": string, "description": string,
                  "location": string?, "activities": [string], "meals": [string],
                  "accommodation": string? }}],
  "hotels": [{{ "name": string, "category": string?, "location": string?, "nights": number? }}],
  "inclusions": [{{ "item": string }}],
  "exclusions": [{{ "item": string }}],
  "priceTiers": [{{ "startDate": string?, "endDate": string, "price": string,
                   "isFlightDay": boolean?, "flightLabel": string? }}],
  "upgrades": [{{ "code": string, "name": string, "description": string?, "price": number }}]
}}

Reglas de extracción:
- "name" es el título comercial del tour, NUNCA el nombre de un país a secas; "country" es el destino.
- "description" NO se copia del documento: redáctala tú, máximo 3 líneas, evocadora y persuasiva.
- En cada día del itinerario, "title" es una etiqueta corta de lugar (vista de ruta compacta)
  y "description" es la narrativa completa del día (vista de itinerario detallado). Si el
  documento separa una ruta resumida de una narrativa detallada, respeta esa separación.
- Si las actividades traen hora, emite una actividad por línea como "HH:MM - texto" y une esas
  mismas líneas con saltos de línea en "description" para que ambos campos coincidan.
- "category" de cada hotel se normaliza a la forma compacta "<dígito>*" sin importar cómo lo
  exprese el documento ("tres estrellas", "three stars" -> "3*").
- Campos no detectables: string vacío, lista vacía o null. Nunca inventes datos."#,
        name_max = limits.name_max,
        country_max = limits.country_max,
        duration_max = limits.duration_max,
        description_max = limits.ai_description_max,
        base_price_max = limits.base_price_max,
    )
}

/// Truncate the raw document text to the configured character budget so
/// the request stays inside service size limits.
pub fn bounded_text(text: &str, budget_chars: usize) -> String {
    truncate_chars(text, budget_chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_carries_limits() {
        let prompt = build_system_prompt(&LimitsConfig::default());
        assert!(prompt.contains("máx 120"));
        assert!(prompt.contains("\"basePrice\""));
        assert!(prompt.contains("<dígito>*"));
    }

    #[test]
    fn test_bounded_text_truncates() {
        let text = "x".repeat(100);
        assert_eq!(bounded_text(&text, 10).len(), 10);
        assert_eq!(bounded_text("corto", 28_000), "corto");
    }
}
