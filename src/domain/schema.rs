use serde_json::Value;
use thiserror::Error;

/// Declared type of a schema field. `Integer` is 32-bit, matching the wire
/// contract of the upstream producers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
    Map {
        key: Box<FieldType>,
        value: Box<FieldType>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub field_type: FieldType,
    pub nullable: bool,
}

/// Ordered record schema used to validate incoming charging-event payloads
/// before they are handed to the ingestion job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    fields: Vec<Field>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("payload must be a JSON object")]
    InvalidPayloadType,
    #[error("field {0} is not nullable")]
    NullNotAllowed(&'static str),
    #[error("field {field} does not match declared type {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },
}

impl RecordSchema {
    /// The Charging Event Record: six fields, all nullable, in wire order.
    pub fn charging_event_record() -> Self {
        Self {
            fields: vec![
                Field {
                    name: "session_id",
                    field_type: FieldType::String,
                    nullable: true,
                },
                Field {
                    name: "session_number",
                    field_type: FieldType::Integer,
                    nullable: true,
                },
                Field {
                    name: "station_id",
                    field_type: FieldType::String,
                    nullable: true,
                },
                Field {
                    name: "ev_id",
                    field_type: FieldType::String,
                    nullable: true,
                },
                Field {
                    name: "event_type",
                    field_type: FieldType::String,
                    nullable: true,
                },
                Field {
                    name: "payload",
                    field_type: FieldType::Map {
                        key: Box::new(FieldType::String),
                        value: Box::new(FieldType::String),
                    },
                    nullable: true,
                },
            ],
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Checks a raw payload against the schema. Fields not declared in the
    /// schema are ignored, the way a streaming deserializer treats them.
    pub fn validate(&self, payload: &Value) -> Result<(), SchemaError> {
        let object = payload.as_object().ok_or(SchemaError::InvalidPayloadType)?;

        for field in &self.fields {
            match object.get(field.name) {
                None | Some(Value::Null) => {
                    if !field.nullable {
                        return Err(SchemaError::NullNotAllowed(field.name));
                    }
                }
                Some(value) => {
                    if !conforms(value, &field.field_type) {
                        return Err(SchemaError::TypeMismatch {
                            field: field.name,
                            expected: type_name(&field.field_type),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

fn conforms(value: &Value, field_type: &FieldType) -> bool {
    match field_type {
        FieldType::String => value.is_string(),
        FieldType::Integer => value
            .as_i64()
            .is_some_and(|number| i32::try_from(number).is_ok()),
        FieldType::Map { key, value: entry } => {
            // JSON object keys are always strings; non-string key types can
            // never be satisfied.
            if **key != FieldType::String {
                return false;
            }
            value
                .as_object()
                .is_some_and(|map| map.values().all(|entry_value| conforms(entry_value, entry)))
        }
    }
}

fn type_name(field_type: &FieldType) -> &'static str {
    match field_type {
        FieldType::String => "string",
        FieldType::Integer => "integer",
        FieldType::Map { .. } => "map",
    }
}
