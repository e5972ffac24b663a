//! Field-level decoding helpers for loosely typed backend JSON.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode `null` or an absent field as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a field that may arrive with the wrong JSON type.
///
/// Numbers sent as strings (`"10"`) and strings sent as numbers are
/// converted. Anything else unusable becomes the type's default, so a single
/// bad field never fails the enclosing record.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(coerce).unwrap_or_default())
}

fn coerce<T: Default + DeserializeOwned>(value: Value) -> T {
    if let Ok(v) = T::deserialize(&value) {
        return v;
    }
    let converted = match &value {
        Value::String(s) => serde_json::from_str(s.trim()).ok(),
        Value::Number(n) => T::deserialize(Value::String(n.to_string())).ok(),
        _ => None,
    };
    converted.unwrap_or_default()
}
