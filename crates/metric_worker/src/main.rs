use common::garde::validate_config;
use common::telemetry::{init_telemetry, TelemetryConfig};
use metric_worker::config::ServiceConfig;
use metric_worker::{MetricWorker, MetricWorkerConfig, StdoutAcknowledgmentPublisher};
use std::sync::Arc;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    let config = match ServiceConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = validate_config(&config) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = init_telemetry(&TelemetryConfig {
        service_name: config.service_name.clone(),
        log_level: config.log_level.clone(),
    }) {
        eprintln!("Failed to initialize telemetry: {}", e);
        std::process::exit(1);
    }

    info!("Starting metric-worker");
    debug!("Configuration: {:?}", config);

    let schema_version = match config.schema_version() {
        Ok(version) => version,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let worker = MetricWorker::new(
        MetricWorkerConfig {
            schema_version,
            insert_action: config.insert_action.clone(),
            subject: config.subject.clone(),
        },
        Arc::new(StdoutAcknowledgmentPublisher::stdout()),
    );

    let shutdown_token = CancellationToken::new();
    tokio::spawn({
        let token = shutdown_token.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        }
    });

    let stdin = BufReader::new(tokio::io::stdin());
    if let Err(e) = worker.run(stdin, shutdown_token).await {
        error!("Metric worker failed: {}", e);
        std::process::exit(1);
    }
}
