//! Response envelope handling.
//!
//! The backend sometimes nests its real payload one level down under an
//! `"example"` key, for any endpoint and either itinerary version. Every
//! payload goes through [`unwrap_envelope`] before typed decoding.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::error::BackendError;

/// Key the backend wraps payloads under.
pub const ENVELOPE_KEY: &str = "example";

/// How much of a bad body to keep for error reports.
const BODY_SNIPPET_CHARS: usize = 500;

/// Replace an enveloped payload with its contents; pass anything else through.
pub fn unwrap_envelope(payload: Value) -> Value {
    match payload {
        Value::Object(mut map) => match map.remove(ENVELOPE_KEY) {
            Some(inner) => {
                debug!("unwrapped enveloped payload");
                inner
            }
            None => Value::Object(map),
        },
        other => other,
    }
}

/// Parse a response body, unwrap any envelope, and decode it as `T`.
///
/// Syntax errors are [`BackendError::Decode`]; well-formed JSON of the wrong
/// shape is [`BackendError::DataShape`].
pub fn decode_payload<T: DeserializeOwned>(body: &str) -> Result<T, BackendError> {
    let value: Value = serde_json::from_str(body).map_err(|e| BackendError::Decode {
        message: e.to_string(),
        body: Some(body.chars().take(BODY_SNIPPET_CHARS).collect()),
    })?;

    serde_json::from_value(unwrap_envelope(value))
        .map_err(|e| BackendError::DataShape(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        count: u32,
    }

    #[test]
    fn unwraps_object_envelope() {
        let wrapped = json!({"example": {"count": 2, "lines": []}});
        assert_eq!(unwrap_envelope(wrapped), json!({"count": 2, "lines": []}));
    }

    #[test]
    fn unwraps_array_envelope() {
        let wrapped = json!({"example": [{"id": 1}]});
        assert_eq!(unwrap_envelope(wrapped), json!([{"id": 1}]));
    }

    #[test]
    fn passes_through_bare_payloads() {
        let bare = json!({"count": 0, "lines": []});
        assert_eq!(unwrap_envelope(bare.clone()), bare);

        let list = json!([1, 2, 3]);
        assert_eq!(unwrap_envelope(list.clone()), list);
    }

    #[test]
    fn unwraps_only_one_level() {
        let nested = json!({"example": {"example": {"count": 1}}});
        assert_eq!(unwrap_envelope(nested), json!({"example": {"count": 1}}));
    }

    #[test]
    fn decode_payload_handles_both_forms() {
        let bare: Payload = decode_payload(r#"{"count": 3}"#).unwrap();
        let wrapped: Payload = decode_payload(r#"{"example": {"count": 3}}"#).unwrap();
        assert_eq!(bare, wrapped);
    }

    #[test]
    fn syntax_error_is_decode_error() {
        let err = decode_payload::<Payload>("<html>502</html>").unwrap_err();
        match err {
            BackendError::Decode { body, .. } => assert_eq!(body.as_deref(), Some("<html>502</html>")),
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn wrong_shape_is_data_shape_error() {
        let err = decode_payload::<Payload>(r#"{"lines": []}"#).unwrap_err();
        assert!(matches!(err, BackendError::DataShape(_)));
        assert!(err.to_string().contains("count"));
    }
}
