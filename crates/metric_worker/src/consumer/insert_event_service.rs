use crate::domain::MetricAggregate;
use common::consumer::{ConsumeRequest, ConsumeResponse};
use common::domain::{AcknowledgmentPublisher, EventRecord};
use futures::future::BoxFuture;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::Service;
use tracing::{debug, error, warn};

/// Tower service for processing individual metric event messages.
///
/// This service:
/// 1. Decodes the JSON event envelope
/// 2. Hands the event to the MetricAggregate
/// 3. Publishes the resulting acknowledgment
/// 4. Returns Ack/Nak for the transport
///
/// Events that fail validation are still Ack'd: the failure travels to the
/// requester on the acknowledgment, and redelivery would not change it.
#[derive(Clone)]
pub struct InsertEventService {
    aggregate: Arc<MetricAggregate>,
    publisher: Arc<dyn AcknowledgmentPublisher>,
}

impl InsertEventService {
    pub fn new(
        aggregate: Arc<MetricAggregate>,
        publisher: Arc<dyn AcknowledgmentPublisher>,
    ) -> Self {
        Self {
            aggregate,
            publisher,
        }
    }
}

impl Service<ConsumeRequest> for InsertEventService {
    type Response = ConsumeResponse;
    type Error = anyhow::Error;
    type Future = BoxFuture<'static, Result<ConsumeResponse, anyhow::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ConsumeRequest) -> Self::Future {
        let aggregate = Arc::clone(&self.aggregate);
        let publisher = Arc::clone(&self.publisher);

        Box::pin(async move {
            let event: EventRecord = match serde_json::from_slice(&req.payload) {
                Ok(event) => event,
                Err(e) => {
                    error!(
                        error = %e,
                        subject = %req.subject,
                        "failed to decode event envelope"
                    );
                    return Ok(ConsumeResponse::nak(format!("Decode error: {}", e)));
                }
            };

            let acknowledgment = aggregate.handle(None, &event);

            match publisher.publish(&acknowledgment).await {
                Ok(()) => {
                    debug!(
                        correlation_id = %acknowledgment.correlation_id,
                        error_code = acknowledgment.error_code,
                        "published acknowledgment"
                    );
                    Ok(ConsumeResponse::ack())
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        correlation_id = %acknowledgment.correlation_id,
                        "failed to publish acknowledgment"
                    );
                    Ok(ConsumeResponse::nak(e.to_string()))
                }
            }
        })
    }
}
