//! Typed webhook event envelope.
//!
//! Only the envelope is interpreted here: `id`, `type` and the event object.
//! The object stays opaque JSON until a type-specific handler asks for its
//! own view of it via [`TypedEvent::deserialize_object`].

use serde::{Deserialize, Serialize};

use super::errors::ParseError;
use super::signature::VerifiedEvent;

/// A verified, parsed webhook event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypedEvent {
    /// Unique identifier for the event (evt_xxx format).
    pub id: String,

    /// Dot-delimited event type (e.g. "payment_intent.succeeded").
    #[serde(rename = "type")]
    pub event_type: String,

    /// The object the event is about (polymorphic based on event type).
    pub object: serde_json::Value,

    /// Time at which the event was created (Unix timestamp), when sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,

    /// Whether this is a live mode event, when sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub livemode: Option<bool>,

    /// API version used to render this event, when sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
}

/// Wire shape of the envelope; every field optional so absence can be
/// reported by name instead of as a serde message.
#[derive(Debug, Deserialize)]
struct RawEnvelope {
    id: Option<String>,
    #[serde(rename = "type")]
    event_type: Option<String>,
    object: Option<serde_json::Value>,
    data: Option<RawEventData>,
    // Metadata is best-effort: a mistyped value is dropped, not rejected.
    created: Option<serde_json::Value>,
    livemode: Option<serde_json::Value>,
    api_version: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawEventData {
    object: Option<serde_json::Value>,
}

/// Parses a verified payload into a [`TypedEvent`].
///
/// The event object is read from `data.object` (processor envelope) and falls
/// back to a top-level `object` member when there is no `data` member.
///
/// # Errors
///
/// - `InvalidPayload` - not JSON, or not a JSON object
/// - `MissingField` - `id`, `type` or the object is absent
/// - `EmptyField` - `id` or `type` is an empty string
pub fn parse(event: &VerifiedEvent) -> Result<TypedEvent, ParseError> {
    let value: serde_json::Value = serde_json::from_slice(event.payload())
        .map_err(|e| ParseError::InvalidPayload(e.to_string()))?;
    if !value.is_object() {
        return Err(ParseError::InvalidPayload(
            "expected a JSON object".to_string(),
        ));
    }

    let raw: RawEnvelope =
        serde_json::from_value(value).map_err(|e| ParseError::InvalidPayload(e.to_string()))?;

    let id = required_text(raw.id, "id")?;
    let event_type = required_text(raw.event_type, "type")?;
    let object = match raw.data {
        Some(data) => data.object,
        None => raw.object,
    }
    .ok_or(ParseError::MissingField("object"))?;

    Ok(TypedEvent {
        id,
        event_type,
        object,
        created: raw.created.as_ref().and_then(serde_json::Value::as_i64),
        livemode: raw.livemode.as_ref().and_then(serde_json::Value::as_bool),
        api_version: raw
            .api_version
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .map(str::to_string),
    })
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, ParseError> {
    match value {
        None => Err(ParseError::MissingField(field)),
        Some(text) if text.is_empty() => Err(ParseError::EmptyField(field)),
        Some(text) => Ok(text),
    }
}

impl TypedEvent {
    /// Attempts to deserialize the event object as the specified type.
    pub fn deserialize_object<T: serde::de::DeserializeOwned>(
        &self,
    ) -> Result<T, serde_json::Error> {
        T::deserialize(&self.object)
    }

    /// Returns true only when the processor marked the event as live mode.
    pub fn is_live(&self) -> bool {
        self.livemode.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse_str(payload: &str) -> Result<TypedEvent, ParseError> {
        parse(&VerifiedEvent::for_test(payload.as_bytes().to_vec()))
    }

    // ══════════════════════════════════════════════════════════════
    // Envelope Parsing Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn parse_flat_envelope() {
        let event = parse_str(
            r#"{"id":"evt_1","type":"payment_intent.succeeded","object":{"id":"pi_1"}}"#,
        )
        .unwrap();

        assert_eq!(event.id, "evt_1");
        assert_eq!(event.event_type, "payment_intent.succeeded");
        assert_eq!(event.object, json!({"id": "pi_1"}));
        assert!(event.created.is_none());
    }

    #[test]
    fn parse_processor_envelope_reads_data_object() {
        let event = parse_str(
            r#"{
                "id": "evt_1234567890",
                "object": "event",
                "type": "payment_intent.succeeded",
                "created": 1704067200,
                "data": {"object": {"id": "pi_123", "amount": 5999}},
                "livemode": true,
                "api_version": "2023-10-16"
            }"#,
        )
        .unwrap();

        assert_eq!(event.object["id"], "pi_123");
        assert_eq!(event.created, Some(1704067200));
        assert_eq!(event.api_version.as_deref(), Some("2023-10-16"));
        assert!(event.is_live());
    }

    #[test]
    fn parse_keeps_unknown_fields_out_of_the_way() {
        let event = parse_str(
            r#"{"id":"evt_1","type":"charge.refunded","object":{},"pending_webhooks":2}"#,
        )
        .unwrap();

        assert_eq!(event.event_type, "charge.refunded");
        assert!(!event.is_live());
    }

    #[test]
    fn parse_drops_mistyped_metadata() {
        let event = parse_str(
            r#"{
                "id": "evt_1",
                "type": "payment_intent.succeeded",
                "data": {"object": {"id": "pi_1"}},
                "created": "2024-01-01T00:00:00Z",
                "livemode": "yes",
                "api_version": 20231016
            }"#,
        )
        .unwrap();

        assert_eq!(event.object["id"], "pi_1");
        assert_eq!(event.created, None);
        assert_eq!(event.livemode, None);
        assert_eq!(event.api_version, None);
        assert!(!event.is_live());
    }

    // ══════════════════════════════════════════════════════════════
    // Rejection Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn parse_rejects_invalid_json() {
        assert!(matches!(
            parse_str("not valid json"),
            Err(ParseError::InvalidPayload(_))
        ));
    }

    #[test]
    fn parse_rejects_non_object_json() {
        assert!(matches!(
            parse_str(r#"["evt_1"]"#),
            Err(ParseError::InvalidPayload(_))
        ));
    }

    #[test]
    fn parse_rejects_wrongly_typed_id() {
        assert!(matches!(
            parse_str(r#"{"id":42,"type":"x.y","object":{}}"#),
            Err(ParseError::InvalidPayload(_))
        ));
    }

    #[test]
    fn parse_rejects_missing_id() {
        assert_eq!(
            parse_str(r#"{"type":"payment_intent.succeeded","object":{}}"#),
            Err(ParseError::MissingField("id"))
        );
    }

    #[test]
    fn parse_rejects_missing_type() {
        assert_eq!(
            parse_str(r#"{"id":"evt_1","object":{}}"#),
            Err(ParseError::MissingField("type"))
        );
    }

    #[test]
    fn parse_rejects_missing_object() {
        assert_eq!(
            parse_str(r#"{"id":"evt_1","type":"payment_intent.succeeded"}"#),
            Err(ParseError::MissingField("object"))
        );
    }

    #[test]
    fn parse_rejects_data_without_object() {
        assert_eq!(
            parse_str(r#"{"id":"evt_1","type":"x.y","object":"event","data":{}}"#),
            Err(ParseError::MissingField("object"))
        );
    }

    #[test]
    fn parse_rejects_empty_id_and_type() {
        assert_eq!(
            parse_str(r#"{"id":"","type":"x.y","object":{}}"#),
            Err(ParseError::EmptyField("id"))
        );
        assert_eq!(
            parse_str(r#"{"id":"evt_1","type":"","object":{}}"#),
            Err(ParseError::EmptyField("type"))
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Object Access Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn deserialize_object_to_custom_type() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Intent {
            id: String,
            amount: i64,
        }

        let event =
            parse_str(r#"{"id":"evt_1","type":"x.y","object":{"id":"pi_1","amount":5999}}"#)
                .unwrap();

        let intent: Intent = event.deserialize_object().unwrap();
        assert_eq!(
            intent,
            Intent {
                id: "pi_1".to_string(),
                amount: 5999
            }
        );
    }

    #[test]
    fn deserialize_object_fails_for_wrong_type() {
        #[derive(Debug, Deserialize)]
        struct Invoice {
            #[allow(dead_code)]
            amount_due: i64,
        }

        let event = parse_str(r#"{"id":"evt_1","type":"x.y","object":{"id":"pi_1"}}"#).unwrap();

        let result: Result<Invoice, _> = event.deserialize_object();
        assert!(result.is_err());
    }
}
