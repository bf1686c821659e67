use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Base name of the optional configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "studio";
/// Prefix of environment overrides, e.g. `STUDIO__STORAGE__DATA_DIR`.
pub const ENV_PREFIX: &str = "STUDIO";

#[studio_derive::studio_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from a file layered with environment overrides.
///
/// 1. **Base file**: `path` if given (it must exist), otherwise `studio.{toml,json,yaml}` in
///    the working directory when present.
/// 2. **Environment**: variables prefixed with `STUDIO__`; nesting uses double underscores
///    (`STUDIO__LOGGING__LEVEL` maps to `logging.level`).
///
/// Missing keys fall back to `T`'s serde defaults.
///
/// # Errors
/// Returns [`ConfigError::Config`] if an explicit file is missing, a source is malformed,
/// or the merged values do not deserialize into `T`.
///
/// # Example
/// ```rust
/// use studio_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// #[serde(default)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(None::<&str>).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let file = match &path {
        Some(p) => {
            info!(path = %p.as_ref().display(), "Loading config");
            File::from(p.as_ref()).required(true)
        },
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    Config::builder()
        .add_source(file)
        .add_source(Environment::with_prefix(ENV_PREFIX).prefix_separator("__").separator("__"))
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}
