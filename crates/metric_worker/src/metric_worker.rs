use crate::consumer::InsertEventService;
use crate::domain::{InsertValidator, MetricAggregate};
use bytes::Bytes;
use common::consumer::{ConsumeRequest, ConsumeResponse};
use common::domain::{AcknowledgmentPublisher, SchemaVersion};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;
use tower::{Service, ServiceExt};
use tracing::{info, warn};

pub struct MetricWorkerConfig {
    pub schema_version: SchemaVersion,
    pub insert_action: String,
    pub subject: String,
}

/// Counts of messages handled during one run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub acked: usize,
    pub rejected: usize,
}

/// Feeds newline-delimited event envelopes through the insert service.
pub struct MetricWorker {
    service: InsertEventService,
    subject: String,
}

impl MetricWorker {
    pub fn new(config: MetricWorkerConfig, publisher: Arc<dyn AcknowledgmentPublisher>) -> Self {
        info!(
            schema_version = %config.schema_version,
            insert_action = %config.insert_action,
            "Initializing metric worker"
        );

        let aggregate = MetricAggregate::new(
            config.insert_action,
            InsertValidator::new(config.schema_version),
        );

        Self {
            service: InsertEventService::new(Arc::new(aggregate), publisher),
            subject: config.subject,
        }
    }

    /// Consume lines until EOF or cancellation. Blank lines are skipped.
    ///
    /// Lines are passed on as raw bytes; a line that is not UTF-8 fails the
    /// envelope decode like any other malformed message.
    pub async fn run<R>(mut self, reader: R, ctx: CancellationToken) -> anyhow::Result<RunSummary>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut segments = reader.split(b'\n');
        let mut summary = RunSummary::default();

        loop {
            let segment = tokio::select! {
                biased;
                _ = ctx.cancelled() => {
                    info!("metric worker received shutdown signal");
                    break;
                }
                segment = segments.next_segment() => segment?,
            };

            let Some(mut line) = segment else {
                break;
            };
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let request = ConsumeRequest::new(self.subject.clone(), Bytes::from(line));
            let service = ServiceExt::<ConsumeRequest>::ready(&mut self.service).await?;
            match service.call(request).await? {
                ConsumeResponse::Ack => summary.acked += 1,
                ConsumeResponse::Nak(reason) => {
                    warn!(reason = ?reason, "message rejected");
                    summary.rejected += 1;
                }
            }
        }

        info!(
            acked = summary.acked,
            rejected = summary.rejected,
            "metric worker stopped"
        );

        Ok(summary)
    }
}
