//! Leveled logging facade over `tracing` with session correlation,
//! caller tagging and production email relay of failures.

pub mod backend;
pub mod context;
pub mod failure;
pub mod log_level;
pub mod logger;
pub mod structured_logger;
pub mod telemetry_setup;

pub use backend::{LogBackend, LogRecord, MemoryBackend, TracingBackend};
pub use context::{LogContext, NO_SESSION};
pub use failure::render_failure;
pub use log_level::LogLevel;
pub use logger::{Logger, DEFAULT_LOGGER_NAME};
pub use structured_logger::{LogFormat, LoggingConfig};
pub use telemetry_setup::{init_logging, init_logging_from_env};
