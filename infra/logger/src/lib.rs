//! # Logger
//!
//! Installs the global `tracing` subscriber for binaries and tests using bindery.
//! The bindery crates only emit events: `trace` for every enqueued or applied
//! declaration, `debug` for module builds and installs, `info` when an injector is
//! created and `warn` when a binding is overridden. This crate decides where they go.
//!
//! * Output is written to stderr, either compact text or JSON lines.
//! * [`LoggerBuilder::env_filter`] sets programmatic directives; without one, `RUST_LOG`
//!   is read and [`LoggerBuilder::level`] is the fallback.
//! * [`LoggerBuilder::diagnostics`] turns on the installation trace of the bindery
//!   crates regardless of the global level.
//!
//! ## Example
//!
//! ```rust
//! # use bindery_logger::{Logger, LevelFilter};
//!
//! let _logger = Logger::builder()
//!     .name("my-app")
//!     .level(LevelFilter::DEBUG)
//!     .diagnostics(true)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;

use private::Sealed;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Directives enabling the installation trace of the bindery crates.
const DIAGNOSTIC_DIRECTIVES: &[&str] = &["bindery_core=trace", "bindery_injector=trace"];

#[derive(Debug)]
pub struct LoggerConfig {
    json: bool,
    level: LevelFilter,
    env_filter: Option<String>,
    diagnostics: bool,
    targets: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            json: false,
            level: LevelFilter::INFO,
            env_filter: None,
            diagnostics: false,
            targets: true,
        }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}

/// A builder for configuring and initializing the global tracing subscriber.
///
/// A name must be set before [`LoggerBuilder::init`] becomes available.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName> {
    config: LoggerConfig,
    name: N,
}

impl LoggerBuilder<NoName> {
    /// Sets the name reported when the logger starts.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName> {
        LoggerBuilder { config: self.config, name: WithName(name.into()) }
    }
}

impl LoggerBuilder<WithName> {
    /// Configures the minimum log level to be emitted.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Adds an explicit env filter (e.g., `myapp=debug,bindery_injector=info`).
    ///
    /// Invalid filters will cause [`LoggerBuilder::init`] to return an error.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.env_filter = Some(filter.into());
        self
    }

    /// Writes JSON lines instead of compact text.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.config.json = enabled;
        self
    }

    /// Includes event targets (module paths) in the output.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn targets(mut self, enabled: bool) -> Self {
        self.config.targets = enabled;
        self
    }

    /// Traces every declaration enqueued, applied and resolved by the bindery crates.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn diagnostics(mut self, enabled: bool) -> Self {
        self.config.diagnostics = enabled;
        self
    }

    /// Consumes the builder and initializes the global tracing subscriber.
    ///
    /// # Errors
    /// Returns [`LoggerError::Subscriber`] if a global subscriber has already been set.
    /// Returns [`LoggerError::InvalidConfiguration`] for invalid builder settings.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let WithName(name) = self.name;
        validate_name(&name)?;

        let env_filter = build_env_filter(&self.config)?;

        let stderr = layer().with_writer(std::io::stderr).with_target(self.config.targets);
        let output = if self.config.json {
            stderr.json().boxed()
        } else {
            stderr.compact().with_ansi(true).boxed()
        };

        tracing_subscriber::registry().with(env_filter).with(output).try_init()?;
        tracing::info!(logger = %name, "Logging initialized");

        Ok(Logger { name })
    }
}

/// A handle to the initialized logging system.
#[derive(Debug)]
pub struct Logger {
    name: String,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`] to configure the global tracing subscriber.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bindery_logger::{LevelFilter, Logger};
    ///
    /// let logger = Logger::builder()
    ///     .name("my-app")
    ///     .json(true)
    ///     .level(LevelFilter::WARN)
    ///     .init()
    ///     .unwrap();
    /// assert_eq!(logger.name(), "my-app");
    /// ```
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { config: LoggerConfig::default(), name: NoName }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

fn validate_name(name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }
    Ok(())
}

fn build_env_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(config.level.into());
    let mut filter = config.env_filter.as_ref().map_or_else(
        || Ok(builder.from_env_lossy()),
        |filter| {
            builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Invalid env filter '{filter}': {e}").into(),
                context: None,
            })
        },
    )?;

    if config.diagnostics {
        for directive in DIAGNOSTIC_DIRECTIVES {
            let directive: Directive = directive.parse().map_err(|e| LoggerError::Internal {
                message: format!("Invalid diagnostic directive '{directive}': {e}").into(),
                context: None,
            })?;
            filter = filter.add_directive(directive);
        }
    }

    Ok(filter)
}
