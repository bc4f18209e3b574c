//! Controller builder for flexible configuration
//!
//! This module provides a builder pattern for creating timeline controllers
//! with event flags, initial resolution and listeners set up front.

use crate::config::{Config, SpanWidth};
use crate::controller::{TimelineController, TimelineListener};
use crate::error::{Result, TimelineError};
use std::path::PathBuf;

/// Builder for a [`TimelineController`].
///
/// # Examples
///
/// ```rust
/// use fuzzy_timeline::TimelineBuilder;
///
/// let timeline = TimelineBuilder::new()
///     .highlight_events(false)
///     .initial_bucket_count(50)
///     .build()?;
/// assert!(!timeline.config().highlight_events);
/// # Ok::<(), fuzzy_timeline::TimelineError>(())
/// ```
pub struct TimelineBuilder {
    config: Config,
    config_path: Option<PathBuf>,
    listeners: Vec<Box<dyn TimelineListener>>,
}

impl TimelineBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            config_path: None,
            listeners: Vec::new(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Read the configuration from a file at build time. Overrides `config`.
    pub fn config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn highlight_events(mut self, enabled: bool) -> Self {
        self.config.highlight_events = enabled;
        self
    }

    pub fn selection_events(mut self, enabled: bool) -> Self {
        self.config.selection_events = enabled;
        self
    }

    /// Number of bins the full extent is split into on load.
    pub fn initial_bucket_count(mut self, count: usize) -> Self {
        self.config.initial_bucket_count = count;
        self
    }

    /// Bin width used when the loaded extent is a single instant.
    pub fn fallback_span_width(mut self, width: SpanWidth) -> Self {
        self.config.fallback_span_width_ms = width.as_millis();
        self
    }

    /// Register a listener on the built controller.
    pub fn listener<L>(mut self, listener: L) -> Self
    where
        L: TimelineListener + 'static,
    {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Build the controller. Validates the configuration.
    pub fn build(self) -> Result<TimelineController> {
        let config = match self.config_path {
            Some(path) => Config::load(&path).map_err(|e| match e {
                TimelineError::Io(io) => TimelineError::InvalidConfig(format!(
                    "cannot read {}: {}",
                    path.display(),
                    io
                )),
                other => other,
            })?,
            None => self.config,
        };

        let mut controller = TimelineController::new(config)?;
        for listener in self.listeners {
            controller.add_boxed_listener(listener);
        }
        Ok(controller)
    }
}

impl Default for TimelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
