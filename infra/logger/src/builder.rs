use crate::Logger;
use crate::error::LoggerError;
use crate::layers;
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_MAX_FILES: usize = 10;

/// Everything the layers need; collected by [`LoggerBuilder`].
#[derive(Debug)]
pub(crate) struct Settings {
    pub(crate) console: bool,
    pub(crate) json: bool,
    pub(crate) level: LevelFilter,
    pub(crate) directives: Option<String>,
    pub(crate) directory: Option<PathBuf>,
    pub(crate) rotation: Rotation,
    pub(crate) max_files: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            console: true,
            json: false,
            level: LevelFilter::INFO,
            directives: None,
            directory: None,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);
#[derive(Debug)]
pub struct NoFile;
#[derive(Debug)]
pub struct WithFile;

/// Typestate builder: a name is mandatory, file-only knobs need a directory first.
#[derive(Debug)]
pub struct LoggerBuilder<N = NoName, F = NoFile> {
    settings: Settings,
    name: N,
    file: PhantomData<F>,
}

impl LoggerBuilder {
    pub(crate) fn new() -> Self {
        Self { settings: Settings::default(), name: NoName, file: PhantomData }
    }
}

impl<F> LoggerBuilder<NoName, F> {
    /// Sets the logger name; also the prefix of rolling log files.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName, F> {
        LoggerBuilder { settings: self.settings, name: WithName(name.into()), file: PhantomData }
    }
}

impl LoggerBuilder<WithName, WithFile> {
    #[must_use]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.settings.max_files = max;
        self
    }

    #[must_use]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.settings.rotation = rotation;
        self
    }
}

impl<F> LoggerBuilder<WithName, F> {
    #[must_use]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.settings.level = level;
        self
    }

    /// Parses a level name (`"debug"`, `"warn"`, ...) into the minimum level.
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] for unknown level names.
    pub fn level_str(self, level: &str) -> Result<Self, LoggerError> {
        match level.parse::<LevelFilter>() {
            Ok(parsed) => Ok(self.level(parsed)),
            Err(e) => Err(LoggerError::InvalidConfiguration {
                message: format!("Unknown log level '{level}': {e}").into(),
                context: None,
            }),
        }
    }

    /// Explicit filter directives (e.g., `studio_commerce=debug`); replaces `RUST_LOG`.
    #[must_use]
    pub fn env_filter(mut self, directives: impl Into<String>) -> Self {
        self.settings.directives = Some(directives.into());
        self
    }

    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.settings.console = enabled;
        self
    }

    /// Emits JSON lines instead of the compact text format.
    #[must_use]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.settings.json = enabled;
        self
    }

    /// Adds a rolling file sink below `directory`.
    pub fn path(self, directory: impl Into<PathBuf>) -> LoggerBuilder<WithName, WithFile> {
        let mut settings = self.settings;
        settings.directory = Some(directory.into());
        LoggerBuilder { settings, name: self.name, file: PhantomData }
    }

    /// Installs the global subscriber.
    ///
    /// # Errors
    /// [`LoggerError::InvalidConfiguration`] for an empty name, zero `max_files`, bad filter
    /// directives or no enabled sink; [`LoggerError::Subscriber`] if a global subscriber
    /// already exists.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let Self { settings, name: WithName(name), .. } = self;
        validate(&settings, &name)?;

        let filter = layers::filter(&settings)?;
        let mut sinks = Vec::new();
        if settings.console {
            sinks.push(layers::console(settings.json));
        }
        let guard = match &settings.directory {
            Some(directory) => {
                let (sink, guard) = layers::rolling_file(&name, directory, &settings)?;
                sinks.push(sink);
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry().with(filter).with(sinks).try_init()?;
        Ok(Logger { guard })
    }
}

fn validate(settings: &Settings, name: &str) -> Result<(), LoggerError> {
    let problem = if name.trim().is_empty() {
        Some("Logger name cannot be empty")
    } else if settings.max_files == 0 {
        Some("max_files must be greater than zero")
    } else if !settings.console && settings.directory.is_none() {
        Some("No logging layers enabled. Enable console or file output.")
    } else {
        None
    };

    problem.map_or(Ok(()), |message| {
        Err(LoggerError::InvalidConfiguration { message: message.into(), context: None })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let builder = Logger::builder().name("studio").env_filter("studio_commerce=debug");
        assert!(builder.settings.console);
        assert!(!builder.settings.json);
        assert_eq!(builder.settings.level, LevelFilter::INFO);
        assert_eq!(builder.settings.directives.as_deref(), Some("studio_commerce=debug"));
        assert!(builder.settings.directory.is_none());
    }

    #[test]
    fn file_options_are_recorded() {
        let builder = Logger::builder()
            .name("studio")
            .json(true)
            .path("logs")
            .max_files(3)
            .rotation(Rotation::HOURLY);
        assert!(builder.settings.json);
        assert_eq!(builder.settings.max_files, 3);
        assert_eq!(builder.settings.directory.as_deref(), Some(std::path::Path::new("logs")));
    }

    #[test]
    fn level_names_are_parsed() {
        let builder = Logger::builder().name("studio").level_str("warn").unwrap();
        assert_eq!(builder.settings.level, LevelFilter::WARN);

        let err = Logger::builder().name("studio").level_str("chatty").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let err = validate(&Settings::default(), "  ").unwrap_err();
        assert_eq!(err.kind(), "InvalidConfiguration");

        let silent = Settings { console: false, ..Settings::default() };
        assert!(validate(&silent, "studio").is_err());

        let err = Logger::builder().name("studio").console(false).init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn bad_directives_fail_before_install() {
        let err = Logger::builder().name("studio").env_filter("studio=chatty").init().unwrap_err();
        assert_eq!(err.kind(), "InvalidConfiguration");
    }
}
