//! Tracing setup shared by every shopadmin binary.

/// Subscriber configuration (format, filters).
pub mod subscriber;

pub use subscriber::{LogFormat, ParseLogFormatError, init, init_with};
