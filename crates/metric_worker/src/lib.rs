pub mod config;
pub mod consumer;
pub mod domain;
pub mod metric_worker;
pub mod publisher;

pub use consumer::*;
pub use domain::*;
pub use metric_worker::*;
pub use publisher::*;
