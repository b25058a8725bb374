use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::schema::{RecordSchema, SchemaError};

/// One deserialized charging event. Every field is nullable on the wire, so
/// every field is optional here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargingEvent {
    pub session_id: Option<String>,
    pub session_number: Option<i32>,
    pub station_id: Option<String>,
    pub ev_id: Option<String>,
    pub event_type: Option<String>,
    pub payload: Option<HashMap<String, String>>,
}

#[derive(Debug, Error)]
pub enum EventDecodeError {
    #[error("payload failed schema validation: {0}")]
    Schema(#[from] SchemaError),
    #[error("payload failed to deserialize: {0}")]
    Deserialize(#[from] serde_json::Error),
}

impl ChargingEvent {
    /// Validates a raw payload against the schema, then deserializes it.
    pub fn from_value(schema: &RecordSchema, payload: &Value) -> Result<Self, EventDecodeError> {
        schema.validate(payload)?;
        let event = serde_json::from_value(payload.clone())?;
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::domain::schema::RecordSchema;

    use super::{ChargingEvent, EventDecodeError};

    #[test]
    fn decodes_fully_populated_event() {
        let schema = RecordSchema::charging_event_record();
        let payload = json!({
            "session_id": "s-1042",
            "session_number": 1042,
            "station_id": "station-07",
            "ev_id": "ev-3321",
            "event_type": "charging_started",
            "payload": {"soc": "41"},
        });

        let event = ChargingEvent::from_value(&schema, &payload).expect("event must decode");

        assert_eq!(event.session_id.as_deref(), Some("s-1042"));
        assert_eq!(event.session_number, Some(1042));
        assert_eq!(event.event_type.as_deref(), Some("charging_started"));
        assert_eq!(
            event
                .payload
                .as_ref()
                .and_then(|payload| payload.get("soc"))
                .map(String::as_str),
            Some("41")
        );
    }

    #[test]
    fn decodes_sparse_event_with_nulls() {
        let schema = RecordSchema::charging_event_record();
        let payload = json!({"event_type": "heartbeat", "station_id": null});

        let event = ChargingEvent::from_value(&schema, &payload).expect("event must decode");

        assert_eq!(event.event_type.as_deref(), Some("heartbeat"));
        assert_eq!(event.station_id, None);
        assert_eq!(event.session_number, None);
    }

    #[test]
    fn rejects_payload_that_fails_validation() {
        let schema = RecordSchema::charging_event_record();
        let payload = json!({"session_number": "not-a-number"});

        let result = ChargingEvent::from_value(&schema, &payload);

        assert!(matches!(result, Err(EventDecodeError::Schema(_))));
    }
}
