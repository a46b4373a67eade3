use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain event as dequeued from the event log.
///
/// The payload travels as base64 in the JSON envelope and is opaque until
/// the handler for `action` decodes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub action: String,
    #[serde(rename = "correlationID")]
    pub correlation_id: Uuid,
    #[serde(rename = "aggregateID")]
    pub aggregate_id: i8,
    #[serde(with = "base64_bytes", default)]
    pub data: Vec<u8>,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "userUUID")]
    pub user_uuid: Uuid,
    #[serde(rename = "uuid")]
    pub time_uuid: Uuid,
    pub version: i64,
    pub year_bucket: i16,
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_payload_is_base64() {
        let event = EventRecord {
            action: "insert".to_string(),
            correlation_id: Uuid::new_v4(),
            aggregate_id: 1,
            data: br#"{"itemID":"x"}"#.to_vec(),
            timestamp: Utc::now(),
            user_uuid: Uuid::new_v4(),
            time_uuid: Uuid::new_v4(),
            version: 3,
            year_bucket: 2018,
        };

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["data"], json!("eyJpdGVtSUQiOiJ4In0="));
        assert_eq!(value["yearBucket"], json!(2018));

        let decoded: EventRecord = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn test_missing_data_decodes_to_empty_payload() {
        let value = json!({
            "action": "insert",
            "correlationID": Uuid::new_v4(),
            "aggregateID": 1,
            "timestamp": "2018-10-18T12:00:00Z",
            "userUUID": Uuid::new_v4(),
            "uuid": Uuid::new_v4(),
            "version": 3,
            "yearBucket": 2018
        });

        let event: EventRecord = serde_json::from_value(value).unwrap();
        assert!(event.data.is_empty());
    }

    #[test]
    fn test_invalid_base64_is_rejected() {
        let value = json!({
            "action": "insert",
            "correlationID": Uuid::new_v4(),
            "aggregateID": 1,
            "data": "%%%",
            "timestamp": "2018-10-18T12:00:00Z",
            "userUUID": Uuid::new_v4(),
            "uuid": Uuid::new_v4(),
            "version": 3,
            "yearBucket": 2018
        });

        assert!(serde_json::from_value::<EventRecord>(value).is_err());
    }
}
