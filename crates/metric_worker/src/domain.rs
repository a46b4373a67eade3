mod insert_validator;
mod metric_aggregate;

pub use insert_validator::*;
pub use metric_aggregate::*;
