use anyhow::{Context, Result};
use env_logger::{Builder, WriteStyle};
use serde_json::json;
use std::io::Write;

use crate::config::{LogConfig, LogFormat};

/// Logger builder honouring the resolved log settings.
pub fn builder(log: &LogConfig) -> Builder {
    let mut builder = Builder::new();
    builder.filter_level(log.level.to_level_filter());
    builder.write_style(if log.no_color {
        WriteStyle::Never
    } else {
        WriteStyle::Auto
    });
    if log.format == LogFormat::Json {
        builder.format(|buf, record| {
            let time = buf.timestamp().to_string();
            let line = json!({
                "time": time,
                "level": record.level().as_str().to_lowercase(),
                "target": record.target(),
                "message": record.args().to_string(),
            });
            writeln!(buf, "{}", line)
        });
    }
    builder
}

/// Installs the global logger. Fails if one is already installed.
pub fn init(log: &LogConfig) -> Result<()> {
    builder(log)
        .try_init()
        .context("Failed to initialize logger")
}
