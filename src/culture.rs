//! Culture handles for number parsing and formatting.
//!
//! A [`Culture`] carries only the symbols the scalar-conversion step needs:
//! the decimal separator and the digit-group separator. Which culture a
//! conversion uses is in scope here; full locale tables are not. When no
//! culture is supplied, conversions resolve to the process-wide default.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_CULTURE: Lazy<Culture> = Lazy::new(Culture::invariant);

/// The process-wide default culture used when a conversion supplies none.
pub fn default_culture() -> &'static Culture {
    &DEFAULT_CULTURE
}

/// Numeric formatting symbols under a named culture.
///
/// # Example
///
/// ```rust
/// use value_mapping_sdk::culture::Culture;
///
/// let german = Culture::new("de-DE", ',', '.');
/// assert_eq!(german.parse_float("1.234,5"), Some(1234.5));
/// assert_eq!(german.format_float(3.25), "3,25");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Culture {
    /// Culture name (e.g., "de-DE"); empty for the invariant culture
    pub name: String,
    /// Symbol separating the integral and fractional digits
    pub decimal_separator: char,
    /// Symbol separating digit groups in the integral part
    pub group_separator: char,
}

impl Culture {
    /// Create a culture from its name and separators.
    pub fn new(name: impl Into<String>, decimal_separator: char, group_separator: char) -> Self {
        Culture {
            name: name.into(),
            decimal_separator,
            group_separator,
        }
    }

    /// The culture-independent default: `.` decimal point, `,` grouping.
    pub fn invariant() -> Self {
        Culture::new("", '.', ',')
    }

    /// Parse an integer literal, accepting grouped digits (`1,234,567`).
    pub fn parse_int(&self, text: &str) -> Option<i64> {
        let (sign, digits) = split_sign(text.trim());
        let digits = strip_groups(digits, self.group_separator)?;
        format!("{}{}", sign, digits).parse::<i64>().ok()
    }

    /// Parse a float literal under this culture's separators.
    ///
    /// Group separators are only accepted in the integral part, in groups
    /// of three; anything else is rejected rather than silently re-read as
    /// a different number.
    pub fn parse_float(&self, text: &str) -> Option<f64> {
        let (sign, rest) = split_sign(text.trim());
        let normalized = match rest.split_once(self.decimal_separator) {
            Some((integral, fraction)) => {
                if fraction.is_empty() || !fraction.chars().all(|c| c.is_ascii_digit()) {
                    return None;
                }
                format!("{}.{}", strip_groups(integral, self.group_separator)?, fraction)
            }
            None => strip_groups(rest, self.group_separator)?,
        };
        format!("{}{}", sign, normalized).parse::<f64>().ok()
    }

    /// Parse a boolean word; case-insensitive, culture-independent.
    pub fn parse_bool(&self, text: &str) -> Option<bool> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("true") {
            Some(true)
        } else if text.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }

    /// Format a float using this culture's decimal separator.
    pub fn format_float(&self, value: f64) -> String {
        let plain = value.to_string();
        if self.decimal_separator == '.' {
            plain
        } else {
            plain.replace('.', &self.decimal_separator.to_string())
        }
    }
}

impl Default for Culture {
    fn default() -> Self {
        Culture::invariant()
    }
}

fn split_sign(text: &str) -> (&str, &str) {
    match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.strip_prefix('+').unwrap_or(text)),
    }
}

/// Remove group separators from an integral digit run, requiring the
/// conventional leading group of 1-3 digits followed by groups of exactly 3.
/// Returns None when the grouping (or any character) is not digit-shaped.
fn strip_groups(integral: &str, group: char) -> Option<String> {
    if !integral.contains(group) {
        return integral
            .chars()
            .all(|c| c.is_ascii_digit())
            .then(|| integral.to_string());
    }
    let groups: Vec<&str> = integral.split(group).collect();
    let first = groups.first()?;
    if first.is_empty() || first.len() > 3 || !first.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    for chunk in &groups[1..] {
        if chunk.len() != 3 || !chunk.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
    }
    Some(groups.concat())
}
