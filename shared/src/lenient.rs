//! Tolerant field decoders for rows coming from the backend.
//!
//! The ledger endpoints emit numbers as strings, booleans as `0`/`1` and pay
//! types the client may not know yet. A single odd field must not fail the
//! whole page, so these decoders accept every shape seen in practice and fall
//! back to the field's default otherwise.

use crate::PayKind;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberLike {
    Number(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagLike {
    Bool(bool),
    Number(i64),
    Text(String),
}

/// Parse "100.50", "1 200,5" and friends
fn parse_amount(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned.parse().ok()
}

/// Number or numeric string; null and unparseable text become `0.0`
pub fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Option::<NumberLike>::deserialize(deserializer)?;
    Ok(match value {
        None => 0.0,
        Some(NumberLike::Number(n)) => n,
        Some(NumberLike::Text(text)) => parse_amount(&text).unwrap_or_else(|| {
            log::warn!("Unparseable amount {:?}, using 0", text);
            0.0
        }),
    })
}

/// `true`/`false`, `0`/`1`, or their string forms; null is `false`
pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Option::<FlagLike>::deserialize(deserializer)?;
    Ok(match value {
        None => false,
        Some(FlagLike::Bool(b)) => b,
        Some(FlagLike::Number(n)) => n != 0,
        Some(FlagLike::Text(text)) => matches!(text.trim(), "1" | "true" | "TRUE" | "True"),
    })
}

/// Known pay type code as number or string; anything else is `None`
pub fn pay_kind<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<PayKind>, D::Error> {
    let value = Option::<NumberLike>::deserialize(deserializer)?;
    let code = match value {
        None => return Ok(None),
        Some(NumberLike::Number(n)) => n,
        Some(NumberLike::Text(text)) => match text.trim().parse::<f64>() {
            Ok(n) => n,
            Err(_) => {
                log::debug!("Ignoring pay type {:?}", text);
                return Ok(None);
            }
        },
    };

    if code.fract() != 0.0 || !(0.0..=f64::from(u8::MAX)).contains(&code) {
        log::debug!("Ignoring pay type {}", code);
        return Ok(None);
    }
    match PayKind::try_from(code as u8) {
        Ok(kind) => Ok(Some(kind)),
        Err(e) => {
            log::debug!("{}", e);
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_accepts_local_formats() {
        assert_eq!(parse_amount("100.50"), Some(100.5));
        assert_eq!(parse_amount("1 200,5"), Some(1200.5));
        assert_eq!(parse_amount("-15"), Some(-15.0));
        assert_eq!(parse_amount("n/a"), None);
    }
}
