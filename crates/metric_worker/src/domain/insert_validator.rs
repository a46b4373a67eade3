use common::domain::{
    Acknowledgment, DomainError, DomainResult, ErrorCode, EventRecord, FieldSet, Metric,
    SchemaVersion,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

/// A field that must be present on every inserted metric.
#[derive(Clone, Copy)]
struct RequiredField {
    name: &'static str,
    is_empty: fn(&Metric) -> bool,
}

impl RequiredField {
    fn message(&self) -> String {
        format!("{} cannot be empty", self.name)
    }
}

const ITEM_ID: RequiredField = RequiredField {
    name: "ItemID",
    is_empty: item_id_is_nil,
};

const DEVICE_ID: RequiredField = RequiredField {
    name: "DeviceID",
    is_empty: device_id_is_nil,
};

const SKU: RequiredField = RequiredField {
    name: "SKU",
    is_empty: sku_is_empty,
};

fn item_id_is_nil(metric: &Metric) -> bool {
    metric.item_id.is_nil()
}

fn device_id_is_nil(metric: &Metric) -> bool {
    metric.device_id.is_nil()
}

fn sku_is_empty(metric: &Metric) -> bool {
    metric.sku.is_empty()
}

/// Validates "insert" events against one version of the Metric schema
///
/// Flow:
/// 1. Decode the event payload into a Metric
/// 2. Check required fields in order, stopping at the first empty one
/// 3. Build the acknowledgment, copying the event's routing identifiers
pub struct InsertValidator {
    version: SchemaVersion,
    fields: FieldSet,
    rules: Vec<RequiredField>,
}

impl InsertValidator {
    pub fn new(version: SchemaVersion) -> Self {
        let fields = version.fields();

        let mut rules = vec![ITEM_ID, DEVICE_ID];
        if fields.sku_required {
            rules.push(SKU);
        }

        Self {
            version,
            fields,
            rules,
        }
    }

    /// Validate an insert event and acknowledge it.
    ///
    /// `_ctx` belongs to the persistence step that follows a successful
    /// validation; validation never looks at it.
    #[instrument(
        skip(self, _ctx, event),
        fields(correlation_id = %event.correlation_id, uuid = %event.time_uuid)
    )]
    pub fn insert(&self, _ctx: Option<&CancellationToken>, event: &EventRecord) -> Acknowledgment {
        match self.validate(&event.data) {
            Ok(metric) => {
                debug!(
                    item_id = %metric.item_id,
                    device_id = %metric.device_id,
                    schema_version = %self.version,
                    recorded_at = ?metric.recorded_at(self.fields.timestamp_unit),
                    sold_items = metric.items.len(),
                    "metric passed validation"
                );
                Acknowledgment::success(event)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    schema_version = %self.version,
                    payload_size = event.data.len(),
                    "rejecting metric insert"
                );
                Acknowledgment::failure(event, &e, ErrorCode::Internal)
            }
        }
    }

    /// Decode the payload and run the required-field checks
    pub fn validate(&self, payload: &[u8]) -> DomainResult<Metric> {
        let metric = Metric::decode(payload, &self.fields)?;

        if let Some(rule) = self.rules.iter().find(|rule| (rule.is_empty)(&metric)) {
            return Err(DomainError::ValidationError(rule.message()));
        }

        Ok(metric)
    }
}
