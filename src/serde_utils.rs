/// Serde utility functions for common patterns
use serde::{Deserialize, Deserializer};

/// Wire forms a recommended flag may take.
#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
    Str(String),
    Null,
}

impl Flag {
    /// `None` for an explicit null.
    fn into_bool<E: serde::de::Error>(self) -> Result<Option<bool>, E> {
        match self {
            Flag::Bool(b) => Ok(Some(b)),
            Flag::Int(0) => Ok(Some(false)),
            Flag::Int(1) => Ok(Some(true)),
            Flag::Int(other) => Err(E::custom(format!(
                "expected a boolean or 0/1, got {}",
                other
            ))),
            Flag::Str(s) => match s.as_str() {
                "true" | "1" => Ok(Some(true)),
                "false" | "0" => Ok(Some(false)),
                other => Err(E::custom(format!(
                    "expected true/false or 0/1, got '{}'",
                    other
                ))),
            },
            Flag::Null => Ok(None),
        }
    }
}

/// Deserialize a flag given either as a JSON boolean or as the integers `0`/`1`.
///
/// The recommended flag is stored as an integer, and older clients send it
/// that way. `null` reads as `false`. Any other integer is rejected.
///
/// Usage:
/// ```ignore
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Example {
///     #[serde(default, deserialize_with = "crate::serde_utils::bool_or_int")]
///     is_recommended: bool,
/// }
/// ```
pub fn bool_or_int<'de, D>(de: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Flag::deserialize(de)?
        .into_bool::<D::Error>()?
        .unwrap_or(false))
}

/// Deserialize an optional filter flag from a query string or JSON.
///
/// Query strings carry every value as text, so `"true"`, `"false"`, `"1"`
/// and `"0"` are all accepted alongside real booleans and integers. Use with
/// `#[serde(default)]` so a missing parameter stays `None`.
pub fn opt_bool_or_int<'de, D>(de: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Flag::deserialize(de)?.into_bool()
}
