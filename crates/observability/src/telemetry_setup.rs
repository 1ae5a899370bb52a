use anyhow::{anyhow, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::structured_logger::{LogFormat, LoggingConfig};

/// 安装全局 `tracing` subscriber
///
/// 设置了 `RUST_LOG` 时优先于 `config.level`。已有全局 subscriber 时返回错误。
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let directive = config.filter_directive();
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| directive.clone().into());

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match config.format {
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_thread_ids(config.include_thread_id);

            registry.with(fmt_layer).try_init()
        }
        LogFormat::Pretty => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .pretty()
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_thread_ids(config.include_thread_id);

            registry.with(fmt_layer).try_init()
        }
        LogFormat::Compact => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .compact()
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_thread_ids(config.include_thread_id);

            registry.with(fmt_layer).try_init()
        }
    };
    installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))?;

    info!(
        logging.format = ?config.format,
        logging.level = directive,
        logging.location = config.include_location,
        "Logging initialized"
    );

    Ok(())
}

/// 使用 [`LoggingConfig::from_env`] 调用 [`init_logging`]
pub fn init_logging_from_env() -> Result<()> {
    init_logging(LoggingConfig::from_env())
}
