mod acknowledgment;
mod event;
mod metric;
mod result;
mod schema;

pub use acknowledgment::*;
pub use event::*;
pub use metric::*;
pub use result::*;
pub use schema::*;
