//! Runtime configuration.
//!
//! Loaded from TOML, then overridden from command-line flags.
//!
//! ```toml
//! parallelism = 4
//! batch_timeout_secs = 60
//! cursor_history = 4
//! pretty = true
//! sections = ["header", "regions"]
//!
//! [trace]
//! enabled = true
//! json = false
//! buffer_size = 2000
//! events = ["region-parsed", "merge-region-added"]
//! ```

use std::path::Path;
use std::thread;

use serde::{Deserialize, Serialize};
use turnreport_debug::TracerConfig;
use turnreport_foundation::{Error, ErrorContext, Result};
use turnreport_parser::{ReportParser, SectionSet};

/// Default batch deadline.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default cursor history.
pub const DEFAULT_CURSOR_HISTORY: usize = 4;

// =============================================================================
// Trace Settings
// =============================================================================

/// The `[trace]` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TraceSettings {
    /// Record trace events and print them to stderr.
    pub enabled: bool,
    /// Print records as JSON lines.
    pub json: bool,
    /// Records kept in the ring buffer.
    pub buffer_size: usize,
    /// Only these event types (empty means all).
    pub events: Vec<String>,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            json: false,
            buffer_size: 10_000,
            events: Vec::new(),
        }
    }
}

impl TraceSettings {
    /// The tracer configuration these settings describe.
    #[must_use]
    pub fn tracer_config(&self) -> TracerConfig {
        let mut config = TracerConfig::new().with_buffer_size(self.buffer_size);
        if self.enabled {
            config = config.enabled().to_stderr();
        }
        if self.json {
            config = config.json();
        }
        if !self.events.is_empty() {
            config = config.filter_events(self.events.clone());
        }
        config
    }
}

// =============================================================================
// Advisor Configuration
// =============================================================================

/// Everything the command line and the batch runner need.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdvisorConfig {
    /// Reports parsed at the same time.
    pub parallelism: usize,
    /// Deadline for a whole batch, parse and merge.
    pub batch_timeout_secs: u64,
    /// Blocks the cursor keeps for stepping back.
    pub cursor_history: usize,
    /// Pretty-print JSON output.
    pub pretty: bool,
    /// Tracing.
    pub trace: TraceSettings,
    /// Section names to parse; absent means every section.
    pub sections: Option<Vec<String>>,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            parallelism: thread::available_parallelism().map_or(1, usize::from),
            batch_timeout_secs: DEFAULT_TIMEOUT_SECS,
            cursor_history: DEFAULT_CURSOR_HISTORY,
            pretty: false,
            trace: TraceSettings::default(),
            sections: None,
        }
    }
}

impl AdvisorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    /// Returns a configuration error for malformed TOML, unknown keys or
    /// invalid values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML file.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be read, otherwise see
    /// [`AdvisorConfig::from_toml_str`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("failed to read '{}': {e}", path.display())))?;
        Self::from_toml_str(&text)
            .map_err(|e| e.with_context(ErrorContext::new().with_source(path.display().to_string())))
    }

    /// Sets the number of reports parsed at once.
    #[must_use]
    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Sets the batch deadline.
    #[must_use]
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.batch_timeout_secs = seconds;
        self
    }

    /// Sets the cursor history.
    #[must_use]
    pub fn with_cursor_history(mut self, history: usize) -> Self {
        self.cursor_history = history;
        self
    }

    /// Enables pretty-printed output.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Enables tracing to stderr.
    #[must_use]
    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.trace.enabled = enabled;
        self
    }

    /// Restricts parsing to the named sections.
    #[must_use]
    pub fn with_sections(mut self, sections: Vec<String>) -> Self {
        self.sections = Some(sections);
        self
    }

    /// Checks every value.
    ///
    /// # Errors
    /// Returns a configuration error naming the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if self.parallelism == 0 {
            return Err(Error::config("parallelism must be at least 1"));
        }
        if self.batch_timeout_secs == 0 {
            return Err(Error::config("batch_timeout_secs must be at least 1"));
        }
        if self.cursor_history == 0 {
            return Err(Error::config("cursor_history must be at least 1"));
        }
        if self.trace.buffer_size == 0 {
            return Err(Error::config("trace.buffer_size must be at least 1"));
        }
        self.section_set().map(|_| ())
    }

    /// The enabled sections.
    ///
    /// # Errors
    /// Returns a configuration error for an unknown or empty section list.
    pub fn section_set(&self) -> Result<SectionSet> {
        let Some(names) = &self.sections else {
            return Ok(SectionSet::all());
        };
        let set = SectionSet::parse_list(&names.join(","))?;
        if set.is_empty() {
            return Err(Error::config("sections must name at least one section"));
        }
        Ok(set)
    }

    /// A parser configured from these settings.
    ///
    /// # Errors
    /// See [`AdvisorConfig::section_set`].
    pub fn parser(&self) -> Result<ReportParser> {
        Ok(ReportParser::new()
            .with_sections(self.section_set()?)
            .with_history(self.cursor_history))
    }
}
