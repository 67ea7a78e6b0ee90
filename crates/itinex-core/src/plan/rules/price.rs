//! Base price detection.

use super::patterns::{PRICE_CURRENCY, PRICE_LABELED};

/// Detect the base price and return it as a digits-only string.
///
/// Labeled prices ("Precio:", "Desde") win over bare currency-prefixed
/// tokens. Thousands separators are stripped; a trailing two-digit cents
/// group is dropped. Undetectable prices yield the empty string, never
/// null. Results longer than `max_len` digits are truncated.
pub fn extract_base_price(text: &str, max_len: usize) -> String {
    let token = PRICE_LABELED
        .captures(text)
        .or_else(|| PRICE_CURRENCY.captures(text))
        .map(|caps| caps[1].to_string());

    match token {
        Some(token) => digits_only(&token, max_len),
        None => String::new(),
    }
}

/// Collapse a numeric token ("1.299", "2,450.00") to its integer digits.
pub fn digits_only(token: &str, max_len: usize) -> String {
    let mut groups: Vec<&str> = token
        .split(|c| c == '.' || c == ',')
        .filter(|g| !g.is_empty())
        .collect();

    // A final two-digit group after a separator is a cents fraction.
    if groups.len() > 1 && groups.last().is_some_and(|g| g.len() == 2) {
        groups.pop();
    }

    let digits: String = groups
        .concat()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();

    digits.chars().take(max_len).collect()
}
