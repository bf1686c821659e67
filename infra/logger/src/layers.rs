use crate::builder::Settings;
use crate::error::LoggerError;
use std::fs;
use std::path::Path;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt};

const LOG_FILE_SUFFIX: &str = "log";

pub(crate) type Sink<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Explicit directives win; otherwise `RUST_LOG`, falling back to the configured level.
pub(crate) fn filter(settings: &Settings) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(settings.level.into());
    let Some(directives) = &settings.directives else {
        return Ok(builder.from_env_lossy());
    };

    builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("Invalid env filter '{directives}': {e}").into(),
        context: None,
    })
}

pub(crate) fn console<S>(json: bool) -> Sink<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = fmt::layer().with_writer(std::io::stderr);
    if json { layer.json().boxed() } else { layer.compact().boxed() }
}

/// Rolling `<name>.<date>.log` files written by a background worker.
pub(crate) fn rolling_file<S>(
    name: &str,
    directory: &Path,
    settings: &Settings,
) -> Result<(Sink<S>, WorkerGuard), LoggerError>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fs::create_dir_all(directory).map_err(|e| LoggerError::Internal {
        message: e.to_string().into(),
        context: Some(format!("Failed to create path: {}", directory.display()).into()),
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(settings.rotation.clone())
        .filename_prefix(name)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(settings.max_files)
        .build(directory)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer().with_writer(writer).with_ansi(false);
    let sink = if settings.json { layer.json().boxed() } else { layer.boxed() };
    Ok((sink, guard))
}
