mod insert_event_service;

pub use insert_event_service::*;
