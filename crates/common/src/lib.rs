pub mod consumer;
pub mod domain;
pub mod garde;
pub mod telemetry;

pub use consumer::*;
pub use domain::*;

// Re-export mocks when testing feature is enabled
#[cfg(any(test, feature = "testing"))]
pub use domain::MockAcknowledgmentPublisher;
