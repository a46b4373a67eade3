use crate::domain::{DomainError, DomainResult, FieldSet, TimestampUnit};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// One item sold in association with a metric event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoldItem {
    #[serde(rename = "itemID", default)]
    pub item_id: Uuid,
    #[serde(default)]
    pub barcode: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub lot: String,
    #[serde(default)]
    pub sku: String,
}

/// Sensor/device reading batch at a point in time.
///
/// Decoded from a JSON payload. Identifiers missing from the payload decode
/// to the nil UUID so that they fail validation rather than decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    #[serde(rename = "metricID", default, skip_serializing_if = "Option::is_none")]
    pub metric_id: Option<Uuid>,
    #[serde(rename = "itemID", default)]
    pub item_id: Uuid,
    #[serde(rename = "deviceID", default)]
    pub device_id: Uuid,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sku: String,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub temp_in: f64,
    #[serde(default)]
    pub humidity: f64,
    #[serde(default)]
    pub ethylene: f64,
    #[serde(default)]
    pub carbon_dioxide: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<SoldItem>,
}

impl Metric {
    /// Decode a JSON payload into a Metric, keeping only the fields the
    /// given schema version carries.
    ///
    /// The payload must be a JSON object, and so must every sold item.
    /// Fields the version does not carry are removed before the typed decode,
    /// so their contents are never checked.
    pub fn decode(payload: &[u8], fields: &FieldSet) -> DomainResult<Self> {
        let value: Value = serde_json::from_slice(payload)
            .map_err(|e| DomainError::DecodeError(e.to_string()))?;
        let mut object = match value {
            Value::Object(object) => object,
            other => {
                return Err(DomainError::DecodeError(format!(
                    "expected a JSON object, found {}",
                    kind(&other)
                )))
            }
        };

        if !fields.metric_id {
            object.remove("metricID");
        }
        if !fields.sold_items {
            object.remove("items");
        }
        if !fields.sku_required {
            object.remove("sku");
        }

        if let Some(Value::Array(items)) = object.get("items") {
            if let Some(item) = items.iter().find(|item| !item.is_object()) {
                return Err(DomainError::DecodeError(format!(
                    "expected sold item to be a JSON object, found {}",
                    kind(item)
                )));
            }
        }

        serde_json::from_value(Value::Object(object))
            .map_err(|e| DomainError::DecodeError(e.to_string()))
    }

    /// Timestamp as a UTC datetime, or None when it is out of range.
    pub fn recorded_at(&self, unit: TimestampUnit) -> Option<DateTime<Utc>> {
        match unit {
            TimestampUnit::Seconds => DateTime::from_timestamp(self.timestamp, 0),
            TimestampUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(self.timestamp)),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
