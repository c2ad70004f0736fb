use crate::error::{CliError, Result as CliResult};

use std::path::PathBuf;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::info;
use till_config::LogLevel;

/// Initialize the fern logger.
///
/// Logs go to the file when one is given (always plain), otherwise to
/// stdout, colored when requested.
pub fn initialize(level: LogLevel, log_file: Option<PathBuf>, colored: bool) -> CliResult<()> {
    let colors = (colored && log_file.is_none()).then(|| {
        ColoredLevelConfig::new()
            .trace(Color::Magenta)
            .debug(Color::Blue)
            .info(Color::Green)
            .warn(Color::Yellow)
            .error(Color::Red)
    });

    let dispatch = Dispatch::new()
        .level(level.filter())
        .format(move |out, message, record| {
            let level = match &colors {
                Some(colors) => colors.color(record.level()).to_string(),
                None => record.level().to_string(),
            };
            out.finish(format_args!(
                "[{date} - {level}] {message} [{file}:{line}]",
                date = humantime::format_rfc3339(SystemTime::now()),
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0),
            ))
        });

    let dispatch = match &log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    CliError::logger(format!("cannot open log file {}: {e}", path.display()))
                })?;
            dispatch.chain(file)
        }
        None => dispatch.chain(std::io::stdout()),
    };

    dispatch
        .apply()
        .map_err(|e| CliError::logger(e.to_string()))?;

    match log_file {
        Some(path) => info!("Logger initialized: level={:?}, file={}", level.filter(), path.display()),
        None => info!("Logger initialized: level={:?}, stdout", level.filter()),
    }

    Ok(())
}
