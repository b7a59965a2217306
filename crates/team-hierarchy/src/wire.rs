//! Lenient field decoding for backend payloads
//!
//! The team endpoints are loose about types: amounts arrive as numbers or
//! numeric strings, identifiers as numbers or strings, and any field may be
//! `null` or missing. Each helper substitutes a default instead of failing.

use rust_decimal::Decimal;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    Other(IgnoredAny),
}

/// Parse a decimal from text, accepting plain and scientific notation
#[must_use]
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(Decimal::ZERO);
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Amount that may be a number, a numeric string, null or absent
pub(crate) fn decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Loose>::deserialize(deserializer)?;
    Ok(match value {
        Some(Loose::Number(n)) => parse_decimal(&n.to_string()),
        Some(Loose::Text(s)) => parse_decimal(&s),
        _ => None,
    }
    .unwrap_or(Decimal::ZERO))
}

/// Identifier that may be a string or a number
pub(crate) fn opt_identifier<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Loose>::deserialize(deserializer)?;
    Ok(match value {
        Some(Loose::Number(n)) => Some(n.to_string()),
        Some(Loose::Text(s)) if !s.is_empty() => Some(s),
        _ => None,
    })
}

/// Optional text; empty strings collapse to `None`
pub(crate) fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Loose>::deserialize(deserializer)?;
    Ok(match value {
        Some(Loose::Text(s)) if !s.trim().is_empty() => Some(s),
        Some(Loose::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Required text that defaults to empty
pub(crate) fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    opt_text(deserializer).map(Option::unwrap_or_default)
}

/// Subscription flag: booleans, 0/1 and "true"/"active" strings
pub(crate) fn flag_or_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Loose>::deserialize(deserializer)?;
    Ok(match value {
        Some(Loose::Bool(b)) => b,
        Some(Loose::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Loose::Text(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "active" | "yes"
        ),
        _ => false,
    })
}

/// Non-negative depth; anything else is zero
pub(crate) fn level_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Loose>::deserialize(deserializer)?;
    Ok(match value {
        Some(Loose::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(Loose::Text(s)) => s.trim().parse().ok(),
        _ => None,
    }
    .unwrap_or(0))
}

/// Sequence that may be `null` or absent
pub(crate) fn vec_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
