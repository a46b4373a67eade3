use crate::domain::{DomainError, DomainResult, EventRecord};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Numeric error codes carried on an acknowledgment. Success is `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum ErrorCode {
    /// Payload could not be decoded or failed required-field checks
    Internal = 2,
    /// The event asked for something this service does not do
    User = 3,
}

impl ErrorCode {
    pub fn code(self) -> i16 {
        self as i16
    }
}

/// Response to a single event, routed back to the requester by its
/// correlation identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgment {
    #[serde(rename = "aggregateID")]
    pub aggregate_id: i8,
    #[serde(rename = "correlationID")]
    pub correlation_id: Uuid,
    pub error: String,
    pub error_code: i16,
    pub uuid: Uuid,
}

impl Acknowledgment {
    pub fn success(event: &EventRecord) -> Self {
        Self {
            aggregate_id: event.aggregate_id,
            correlation_id: event.correlation_id,
            error: String::new(),
            error_code: 0,
            uuid: event.time_uuid,
        }
    }

    pub fn failure(event: &EventRecord, error: &DomainError, code: ErrorCode) -> Self {
        Self {
            error: error.to_string(),
            error_code: code.code(),
            ..Self::success(event)
        }
    }

    pub fn is_success(&self) -> bool {
        self.error_code == 0 && self.error.is_empty()
    }
}

/// Trait for handing acknowledgments to whatever transmits them
///
/// Implementations should:
/// - Serialize the acknowledgment for the response channel
/// - Return TransportError if it cannot be delivered
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AcknowledgmentPublisher: Send + Sync {
    async fn publish(&self, acknowledgment: &Acknowledgment) -> DomainResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn event() -> EventRecord {
        EventRecord {
            action: "insert".to_string(),
            correlation_id: Uuid::new_v4(),
            aggregate_id: 1,
            data: Vec::new(),
            timestamp: Utc::now(),
            user_uuid: Uuid::new_v4(),
            time_uuid: Uuid::new_v4(),
            version: 3,
            year_bucket: 2018,
        }
    }

    #[test]
    fn test_success_copies_identifiers() {
        let event = event();
        let ack = Acknowledgment::success(&event);

        assert_eq!(ack.aggregate_id, event.aggregate_id);
        assert_eq!(ack.correlation_id, event.correlation_id);
        assert_eq!(ack.uuid, event.time_uuid);
        assert!(ack.is_success());
    }

    #[test]
    fn test_failure_carries_message_and_code() {
        let event = event();
        let error = DomainError::ValidationError("DeviceID cannot be empty".to_string());

        let ack = Acknowledgment::failure(&event, &error, ErrorCode::Internal);

        assert_eq!(ack.error, "DeviceID cannot be empty");
        assert_eq!(ack.error_code, 2);
        assert_eq!(ack.correlation_id, event.correlation_id);
        assert_eq!(ack.uuid, event.time_uuid);
        assert!(!ack.is_success());
    }

    #[test]
    fn test_serialized_field_names() {
        let ack = Acknowledgment::success(&event());
        let value = serde_json::to_value(&ack).unwrap();

        for key in ["aggregateID", "correlationID", "error", "errorCode", "uuid"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }
}
