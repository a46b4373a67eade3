use crate::domain::InsertValidator;
use common::domain::{Acknowledgment, DomainError, ErrorCode, EventRecord};
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Routes metric events to the handler for their action.
pub struct MetricAggregate {
    insert_action: String,
    insert_validator: InsertValidator,
}

impl MetricAggregate {
    pub fn new(insert_action: impl Into<String>, insert_validator: InsertValidator) -> Self {
        Self {
            insert_action: insert_action.into(),
            insert_validator,
        }
    }

    /// Handle one event. Always yields exactly one acknowledgment.
    pub fn handle(&self, ctx: Option<&CancellationToken>, event: &EventRecord) -> Acknowledgment {
        if event.action == self.insert_action {
            return self.insert_validator.insert(ctx, event);
        }

        warn!(
            action = %event.action,
            correlation_id = %event.correlation_id,
            "no handler for event action"
        );
        Acknowledgment::failure(
            event,
            &DomainError::UnsupportedAction(event.action.clone()),
            ErrorCode::User,
        )
    }
}
