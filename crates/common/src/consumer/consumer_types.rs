use bytes::Bytes;

/// A single message handed over by the transport.
///
/// Owns its data so it can move through Tower layers without lifetime
/// concerns.
#[derive(Debug, Clone)]
pub struct ConsumeRequest {
    /// Channel the message arrived on
    pub subject: String,
    pub payload: Bytes,
}

impl ConsumeRequest {
    pub fn new(subject: impl Into<String>, payload: Bytes) -> Self {
        Self {
            subject: subject.into(),
            payload,
        }
    }
}

/// Whether the transport should acknowledge or reject the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsumeResponse {
    Ack,
    /// Rejected for redelivery, with an optional reason
    Nak(Option<String>),
}

impl ConsumeResponse {
    pub fn ack() -> Self {
        Self::Ack
    }

    pub fn nak(reason: impl Into<String>) -> Self {
        Self::Nak(Some(reason.into()))
    }

    pub fn is_ack(&self) -> bool {
        matches!(self, Self::Ack)
    }

    pub fn is_nak(&self) -> bool {
        matches!(self, Self::Nak(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_request_new() {
        let req = ConsumeRequest::new("metrics.insert", Bytes::from("payload"));

        assert_eq!(req.subject, "metrics.insert");
        assert_eq!(req.payload, Bytes::from("payload"));
    }

    #[test]
    fn test_consume_response_nak_reason() {
        let resp = ConsumeResponse::nak("bad envelope");
        assert!(resp.is_nak());
        assert!(!resp.is_ack());
        assert_eq!(resp, ConsumeResponse::Nak(Some("bad envelope".to_string())));
    }

    #[test]
    fn test_consume_response_ack() {
        assert!(ConsumeResponse::ack().is_ack());
    }
}
