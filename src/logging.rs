//! Subscriber setup for the crate's `tracing` events
//!
//! All events are emitted under the `autowire` target. Registration and
//! construction log at DEBUG; cache hits, property writes and constructor
//! invocations log at TRACE.
//!
//! - `logging` - emit events (default)
//! - `logging-json` - install a JSON subscriber via [`init`]
//! - `logging-pretty` - install a human-readable subscriber via [`init`]
//!
//! ```rust,ignore
//! use autowire::logging;
//!
//! logging::init();
//!
//! logging::builder()
//!     .trace()
//!     .autowire_only()
//!     .compact()
//!     .init();
//! ```

use tracing::Level;

/// Target every event of this crate is emitted under
pub const TARGET: &str = "autowire";

/// Output format of the installed subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event
    #[default]
    Json,
    /// Multi-line, colored
    Pretty,
    /// Single line per event
    Compact,
}

/// Builder for the global subscriber
#[derive(Debug, Clone)]
#[cfg_attr(
    not(any(feature = "logging-json", feature = "logging-pretty")),
    allow(dead_code)
)]
pub struct LoggingBuilder {
    level: Level,
    format: LogFormat,
    target: Option<&'static str>,
    with_file: bool,
    with_line_number: bool,
}

impl Default for LoggingBuilder {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
            format: LogFormat::Json,
            target: None,
            with_file: false,
            with_line_number: false,
        }
    }
}

impl LoggingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn trace(self) -> Self {
        self.with_level(Level::TRACE)
    }

    pub fn debug(self) -> Self {
        self.with_level(Level::DEBUG)
    }

    pub fn info(self) -> Self {
        self.with_level(Level::INFO)
    }

    /// Only keep events from `target`
    pub fn with_target_filter(mut self, target: &'static str) -> Self {
        self.target = Some(target);
        self
    }

    /// Only keep this crate's events
    pub fn autowire_only(self) -> Self {
        self.with_target_filter(TARGET)
    }

    pub fn with_file(mut self) -> Self {
        self.with_file = true;
        self
    }

    pub fn with_line_number(mut self) -> Self {
        self.with_line_number = true;
        self
    }

    pub fn json(mut self) -> Self {
        self.format = LogFormat::Json;
        self
    }

    pub fn pretty(mut self) -> Self {
        self.format = LogFormat::Pretty;
        self
    }

    pub fn compact(mut self) -> Self {
        self.format = LogFormat::Compact;
        self
    }

    /// Directive string handed to `EnvFilter`
    #[cfg_attr(
        not(any(feature = "logging-json", feature = "logging-pretty")),
        allow(dead_code)
    )]
    fn filter_directive(&self) -> String {
        match self.target {
            Some(target) => format!("{}={}", target, self.level),
            None => self.level.to_string(),
        }
    }

    /// Install the configured subscriber as the global default.
    ///
    /// Does nothing if a global subscriber is already set.
    #[cfg(any(feature = "logging-json", feature = "logging-pretty"))]
    pub fn init(self) {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        let filter = EnvFilter::new(self.filter_directive());
        let layer = fmt::layer()
            .with_file(self.with_file)
            .with_line_number(self.with_line_number)
            .with_target(true);

        let registry = tracing_subscriber::registry().with(filter);
        let _ = match self.format {
            #[cfg(feature = "logging-json")]
            LogFormat::Json => registry.with(layer.json()).try_init(),
            // without the json feature, JSON falls back to the default format
            #[cfg(not(feature = "logging-json"))]
            LogFormat::Json => registry.with(layer).try_init(),
            LogFormat::Pretty => registry.with(layer.pretty()).try_init(),
            LogFormat::Compact => registry.with(layer.compact()).try_init(),
        };
    }

    /// No subscriber available without `logging-json` or `logging-pretty`.
    #[cfg(not(any(feature = "logging-json", feature = "logging-pretty")))]
    pub fn init(self) {}
}

/// Create a new logging builder
pub fn builder() -> LoggingBuilder {
    LoggingBuilder::new()
}

/// Install a subscriber with the default settings: JSON when `logging-json`
/// is enabled, pretty otherwise.
pub fn init() {
    if cfg!(feature = "logging-json") {
        init_json();
    } else {
        init_pretty();
    }
}

pub fn init_json() {
    builder().json().debug().init();
}

pub fn init_pretty() {
    builder().pretty().debug().init();
}

/// Install a subscriber that drops events from other crates.
pub fn init_autowire_only() {
    builder().autowire_only().debug().init();
}
