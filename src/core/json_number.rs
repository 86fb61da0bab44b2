//! Serde adapters writing [`Decimal`] as a plain JSON number.
//!
//! The number token is the normalized decimal text itself, so `999.00` is
//! written as `999` and no value is routed through `f64` on the way out.
//! [`deserialize_exact`] reads the token back digit for digit; the lenient
//! [`deserialize`] accepts any JSON number and is used for caller input.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;
use serde_json::value::RawValue;

pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    RawValue::from_string(value.normalize().to_string())
        .map_err(S::Error::custom)?
        .serialize(serializer)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let number = Number::deserialize(deserializer)?;
    parse_token(&number.to_string()).map_err(D::Error::custom)
}

/// Read the number token verbatim. Only works with `serde_json`'s text
/// deserializers (`from_str`, `from_slice`, `from_reader`).
pub fn deserialize_exact<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let raw = Box::<RawValue>::deserialize(deserializer)?;
    parse_token(raw.get()).map_err(D::Error::custom)
}

fn parse_token(text: &str) -> Result<Decimal, String> {
    let text = text.trim();
    if !text.starts_with(|c: char| c == '-' || c.is_ascii_digit()) {
        return Err(format!("expected a JSON number, found {text}"));
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|e| format!("{text} is not a representable decimal: {e}"))
}

/// Same encoding for `Option<Decimal>`.
pub mod option {
    use rust_decimal::Decimal;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Number;

    use super::parse_token;

    pub fn serialize<S: Serializer>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => super::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Decimal>, D::Error> {
        Option::<Number>::deserialize(deserializer)?
            .map(|number| parse_token(&number.to_string()).map_err(D::Error::custom))
            .transpose()
    }
}
