mod json_lines_publisher;

pub use json_lines_publisher::*;
