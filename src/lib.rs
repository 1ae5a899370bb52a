//! baseproject: properties loading, a leveled logging facade with
//! production email relay, and small random/hash/mail helpers.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use baseproject::{init_logging, Logger, LoggingConfig, ProjectProperties};
//!
//! init_logging(LoggingConfig::from_env())?;
//! let props = Arc::new(ProjectProperties::load("project.properties")?);
//! let logger = Logger::from_properties(props);
//! logger.set_session_id("request-42");
//! logger.info_fmt(format_args!("{} rows imported", 17));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub use baseproject_core::{
    bytes_to_hex, digest_hex, generate_random_string, keys, sha_hash, DeliveryStatus,
    EmailMessage, HashAlgorithm, MailDispatcher, MailSession, MailTransport, ProjectError,
    ProjectProperties, ProjectResult, PropertiesLoader, PropertyMap, RandomStringSpec,
};
pub use baseproject_observability::{
    init_logging, render_failure, LogBackend, LogContext, LogFormat, LogLevel, LogRecord,
    Logger, LoggingConfig, MemoryBackend, TracingBackend,
};
