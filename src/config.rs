//! Configuration for the timeline controller.
//!
//! Also re-exports the temporal data types from the `timeline-types` crate
//! for convenience.
use crate::error::{Result, TimelineError};
use serde::de::Error;
use std::path::Path;

pub use timeline_types::extent::TimeExtent;
pub use timeline_types::instant::{MILLIS_PER_DAY, SpanWidth, Timestamp};
pub use timeline_types::object::{DataObject, Dataset, ObjectId, TimeTag};

/// Controller configuration
///
/// # Example
///
/// ```rust
/// use fuzzy_timeline::Config;
///
/// let json = r#"{
///     "highlight_events": false,
///     "initial_bucket_count": 60
/// }"#;
/// let config = Config::from_json(json).unwrap();
/// assert!(!config.highlight_events);
/// assert!(config.selection_events);
/// assert_eq!(config.initial_bucket_count, 60);
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Forward highlight events to listeners
    #[serde(default = "Config::default_events_enabled")]
    pub highlight_events: bool,

    /// Forward selection events to listeners
    #[serde(default = "Config::default_events_enabled")]
    pub selection_events: bool,

    /// Number of bins the full extent is split into when a collection is loaded
    #[serde(default = "Config::default_initial_bucket_count")]
    pub initial_bucket_count: usize,

    /// Bin width used when the loaded extent has zero length
    #[serde(default = "Config::default_fallback_span_width_ms")]
    pub fallback_span_width_ms: f64,
}

impl Config {
    const fn default_events_enabled() -> bool {
        true
    }

    const fn default_initial_bucket_count() -> usize {
        100
    }

    const fn default_fallback_span_width_ms() -> f64 {
        MILLIS_PER_DAY as f64
    }

    pub fn with_highlight_events(mut self, enabled: bool) -> Self {
        self.highlight_events = enabled;
        self
    }

    pub fn with_selection_events(mut self, enabled: bool) -> Self {
        self.selection_events = enabled;
        self
    }

    pub fn with_initial_bucket_count(mut self, count: usize) -> Self {
        assert!(count > 0, "Initial bucket count must be greater than zero");
        self.initial_bucket_count = count;
        self
    }

    pub fn with_fallback_span_width(mut self, width: SpanWidth) -> Self {
        assert!(width.is_valid(), "Fallback span width must be finite and positive");
        self.fallback_span_width_ms = width.as_millis();
        self
    }

    pub fn fallback_span_width(&self) -> SpanWidth {
        SpanWidth::from_millis(self.fallback_span_width_ms)
    }

    /// Bin width for the initial density view over `extent`.
    ///
    /// Splits the extent into `initial_bucket_count` bins, falling back to
    /// `fallback_span_width_ms` when the extent is a single instant.
    pub fn initial_span_width(&self, extent: &TimeExtent) -> SpanWidth {
        let width = extent.duration_millis() as f64 / self.initial_bucket_count.max(1) as f64;
        let width = SpanWidth::from_millis(width);
        if width.is_valid() {
            width
        } else {
            self.fallback_span_width()
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.initial_bucket_count == 0 {
            return Err("Initial bucket count must be greater than zero".to_string());
        }

        if !self.fallback_span_width_ms.is_finite() {
            return Err("Fallback span width must be finite (not NaN or infinity)".to_string());
        }
        if self.fallback_span_width_ms <= 0.0 {
            return Err("Fallback span width must be positive".to_string());
        }

        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Read a configuration file. `.toml` files need the `toml` feature;
    /// anything else is parsed as JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            #[cfg(feature = "toml")]
            Some("toml") => {
                Self::from_toml(&contents).map_err(|e| TimelineError::ConfigParse(e.to_string()))
            }
            #[cfg(not(feature = "toml"))]
            Some("toml") => Err(TimelineError::ConfigParse(format!(
                "{} is a TOML file but the 'toml' feature is disabled",
                path.display()
            ))),
            _ => Self::from_json(&contents).map_err(|e| TimelineError::ConfigParse(e.to_string())),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            highlight_events: Self::default_events_enabled(),
            selection_events: Self::default_events_enabled(),
            initial_bucket_count: Self::default_initial_bucket_count(),
            fallback_span_width_ms: Self::default_fallback_span_width_ms(),
        }
    }
}

/// Counters describing what the controller has processed.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimelineStats {
    /// Number of successful loads
    pub loads: u64,
    /// Number of accepted span changes
    pub span_changes: u64,
    /// Highlight events forwarded to listeners
    pub highlights_forwarded: u64,
    /// Selection events forwarded to listeners
    pub selections_forwarded: u64,
    /// Resolvable objects in the current collection
    pub resolvable_objects: usize,
    /// Untimed objects skipped in the current collection
    pub skipped_objects: usize,
}

impl TimelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_load(&mut self, resolvable: usize, skipped: usize) {
        self.loads += 1;
        self.resolvable_objects = resolvable;
        self.skipped_objects = skipped;
    }

    pub fn record_span_change(&mut self) {
        self.span_changes += 1;
    }

    pub fn record_highlight(&mut self) {
        self.highlights_forwarded += 1;
    }

    pub fn record_selection(&mut self) {
        self.selections_forwarded += 1;
    }

    pub fn clear_collection(&mut self) {
        self.resolvable_objects = 0;
        self.skipped_objects = 0;
    }
}
