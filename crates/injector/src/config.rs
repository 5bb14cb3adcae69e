//! # Injector configuration
//!
//! [`InjectorConfig`] controls how strictly modules are assembled. It can be built in
//! code or loaded with a [`ConfigLoader`] from an optional file layered with
//! `BINDERY__` environment overrides.

use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Errors raised while loading configuration.
#[bindery_derive::bindery_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// When singletons are built.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Singletons are built on first use, unless declared eager.
    #[default]
    Development,
    /// Every singleton is built while the injector is assembled.
    Production,
}

/// Assembly options for [`Injector`](crate::Injector).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectorConfig {
    pub stage: Stage,
    /// Replace duplicate bindings in the same environment instead of failing.
    pub allow_overrides: bool,
}

impl Default for InjectorConfig {
    fn default() -> Self {
        Self { stage: Stage::Development, allow_overrides: false }
    }
}

/// File stem looked up in the working directory when no file is given.
pub const DEFAULT_FILE: &str = "bindery";

/// Prefix of environment overrides; nested keys are joined with `__`.
pub const ENV_PREFIX: &str = "BINDERY";

/// Layers injector settings: serde defaults, then a file, then `BINDERY__` variables.
///
/// An explicitly chosen file must exist. Without one, a `bindery.*` file in the working
/// directory is read when present, so environment variables alone are enough to
/// configure an injector.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    env: Option<config::Map<String, String>>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `path`; the format follows its extension.
    #[must_use]
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Reads overrides from `vars` instead of the process environment.
    #[must_use]
    pub fn env_vars<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// Merges every layer into `T`.
    ///
    /// # Errors
    /// Returns [`ConfigError::Config`] when an explicit file is missing or the merged
    /// values do not deserialize into `T`.
    pub fn load<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        let file = match &self.file {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::with_name(DEFAULT_FILE).required(false),
        };
        let env = Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .convert_case(config::Case::Snake)
            .source(self.env.clone());

        let file_name = self.file.as_deref().map_or(Cow::Borrowed(DEFAULT_FILE), |p| p.to_string_lossy());
        info!(file = %file_name, "Loading injector config");

        Config::builder()
            .add_source(file)
            .add_source(env)
            .build()
            .context("Failed to merge config sources")?
            .try_deserialize::<T>()
            .context("Config does not match the expected shape")
    }
}

/// Loads `T` with a [`ConfigLoader`] reading `path`, or the optional default file.
///
/// `T` is usually [`InjectorConfig`] or an application struct embedding it; with an
/// `injector` field, `BINDERY__INJECTOR__STAGE=production` selects the production stage.
///
/// # Errors
/// See [`ConfigLoader::load`].
///
/// # Example
/// ```rust,no_run
/// use bindery_injector::config::{InjectorConfig, load_config};
///
/// let config: InjectorConfig = load_config(Some("config/injector.toml")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let loader = ConfigLoader::new();
    match path {
        Some(path) => loader.file(path),
        None => loader,
    }
    .load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_lenient_development() {
        let config = InjectorConfig::default();
        assert_eq!(config.stage, Stage::Development);
        assert!(!config.allow_overrides);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: InjectorConfig = serde_json::from_str(r#"{ "stage": "production" }"#).unwrap();
        assert_eq!(config, InjectorConfig { stage: Stage::Production, allow_overrides: false });
    }
}
