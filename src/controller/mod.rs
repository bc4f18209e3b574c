//! Interaction controller for the timeline.
//!
//! This module defines the `TimelineController` state machine that owns the
//! loaded dataset collection and its overall extent, recomputes views when
//! the visible span changes, and forwards highlight and selection events to
//! registered listeners.

use crate::compute::temporal::{
    TickResult, fit_span_width, objects_at, partition_visible, summarize, ticks_for,
};
use crate::compute::validation::{validate_datasets, validate_span_width};
use crate::config::{
    Config, DataObject, Dataset, SpanWidth, TimeExtent, TimelineStats, Timestamp,
};
use crate::error::{Result, TimelineError};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

mod listener;
mod views;

pub use listener::{ListenerId, Selection, TimelineListener};
pub use views::{BinView, DatasetProportion, ProportionView};

/// Externally visible controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineState {
    /// Nothing loaded; only `load` and `unload` are accepted.
    Uninitialized,
    /// A collection is loaded and its initial views were emitted.
    Loaded,
    /// At least one span, highlight or selection event was handled since the
    /// last load.
    Interacting,
}

impl fmt::Display for TimelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimelineState::Uninitialized => "uninitialized",
            TimelineState::Loaded => "loaded",
            TimelineState::Interacting => "interacting",
        };
        f.write_str(name)
    }
}

/// Everything derived from one `load`. Built fresh on every load and dropped
/// on unload.
#[derive(Debug)]
struct Session {
    datasets: Vec<Dataset>,
    extent: TimeExtent,
    density_width: SpanWidth,
}

#[derive(Debug)]
enum Stage {
    Uninitialized,
    Loaded(Session),
    Interacting(Session),
}

type Listeners = SmallVec<[(ListenerId, Box<dyn TimelineListener>); 2]>;

/// Timeline controller (single-threaded, synchronous).
///
/// Owns the dataset collection and the overall extent for the lifetime of a
/// load. Every state-changing call takes `&mut self` and runs to completion,
/// so events are handled strictly in call order.
///
/// # Examples
///
/// ```rust
/// use fuzzy_timeline::prelude::*;
///
/// # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
/// let mut timeline = TimelineController::new(Config::default())?;
/// assert_eq!(timeline.state(), TimelineState::Uninitialized);
///
/// let jan1 = Timestamp::from_ymd(2020, 1, 1).unwrap();
/// let jan31 = Timestamp::from_ymd(2020, 1, 31).unwrap();
/// timeline.load(vec![Dataset::from_objects(
///     "letters",
///     vec![DataObject::fuzzy("undated letter", jan1, jan31)],
/// )])?;
/// assert_eq!(timeline.state(), TimelineState::Loaded);
///
/// let (shown, hidden) = timeline.partition(TimeExtent::new(jan1, jan31))?;
/// timeline.span_changed(SpanWidth::from_days(7.0), &shown, &hidden)?;
/// assert_eq!(timeline.state(), TimelineState::Interacting);
/// # Ok(())
/// # }
/// ```
pub struct TimelineController {
    config: Config,
    stage: Stage,
    listeners: Listeners,
    next_listener_id: u64,
    stats: TimelineStats,
}

impl TimelineController {
    /// Create an empty controller. Fails if `config` does not validate.
    pub fn new(config: Config) -> Result<Self> {
        config.validate().map_err(TimelineError::InvalidConfig)?;

        Ok(Self {
            config,
            stage: Stage::Uninitialized,
            listeners: SmallVec::new(),
            next_listener_id: 0,
            stats: TimelineStats::new(),
        })
    }

    pub fn state(&self) -> TimelineState {
        match self.stage {
            Stage::Uninitialized => TimelineState::Uninitialized,
            Stage::Loaded(_) => TimelineState::Loaded,
            Stage::Interacting(_) => TimelineState::Interacting,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stats(&self) -> &TimelineStats {
        &self.stats
    }

    /// Overall extent of the loaded collection.
    pub fn extent(&self) -> Option<TimeExtent> {
        self.session().map(|session| session.extent)
    }

    /// Loaded datasets; empty when nothing is loaded.
    pub fn datasets(&self) -> &[Dataset] {
        self.session()
            .map(|session| session.datasets.as_slice())
            .unwrap_or_default()
    }

    /// Bin width of the density view chosen at load time.
    pub fn density_span_width(&self) -> Option<SpanWidth> {
        self.session().map(|session| session.density_width)
    }

    /// Register a listener. Listeners are notified in registration order.
    pub fn add_listener<L>(&mut self, listener: L) -> ListenerId
    where
        L: TimelineListener + 'static,
    {
        self.add_boxed_listener(Box::new(listener))
    }

    pub(crate) fn add_boxed_listener(&mut self, listener: Box<dyn TimelineListener>) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Remove a listener. Returns `false` if the id is unknown.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Replace the loaded collection.
    ///
    /// Accepted in every state. Invalid input (a fuzzy span ending before it
    /// begins) is rejected before anything changes. Otherwise prior derived
    /// state is dropped first:
    ///
    /// - an empty collection leaves the controller `Uninitialized`;
    /// - a collection without temporal data leaves it `Uninitialized` and
    ///   returns [`TimelineError::EmptyExtent`];
    /// - anything else computes the overall extent, enters `Loaded`, and emits
    ///   the initial density and range views over the whole collection.
    pub fn load(&mut self, datasets: Vec<Dataset>) -> Result<()> {
        validate_datasets(&datasets)?;

        if datasets.is_empty() {
            log::debug!("Loaded an empty dataset collection; timeline is uninitialized");
            self.clear();
            return Ok(());
        }

        let summary = summarize(&datasets);
        let Some(extent) = summary.extent else {
            log::debug!(
                "None of {} objects in {} datasets carry temporal data",
                summary.skipped,
                datasets.len()
            );
            self.clear();
            return Err(TimelineError::EmptyExtent);
        };

        let density_width = self.config.initial_span_width(&extent);
        let view = match BinView::compute(&datasets, &extent, density_width) {
            Ok(view) => view,
            Err(e) => {
                self.clear();
                return Err(e);
            }
        };

        log::debug!(
            "Loaded {} datasets: {} timed objects, {} skipped, extent {}, density width {}",
            datasets.len(),
            summary.resolvable,
            summary.skipped,
            extent,
            density_width
        );

        self.stats.record_load(summary.resolvable, summary.skipped);
        self.stage = Stage::Loaded(Session {
            datasets,
            extent,
            density_width,
        });

        if let Stage::Loaded(session) = &self.stage {
            notify(&mut self.listeners, |l| l.density_changed(&view));
            notify(&mut self.listeners, |l| l.range_changed(&session.datasets, &view));
        }
        Ok(())
    }

    /// Drop the loaded collection and all derived state.
    pub fn unload(&mut self) {
        log::debug!("Unloading timeline ({})", self.state());
        self.clear();
    }

    /// React to a change of the visible span.
    ///
    /// Re-bins `shown` for the density view (at the load-time width) and for
    /// the range view (at `span_width`), and recomputes the shown/hidden
    /// proportions from both sets.
    ///
    /// A width too fine to lay the loaded extent out in
    /// [`MAX_BINS`](crate::compute::temporal::ticks::MAX_BINS) bins is
    /// coarsened for the range view; the view carries the width it used.
    pub fn span_changed(
        &mut self,
        span_width: SpanWidth,
        shown: &[Dataset],
        hidden: &[Dataset],
    ) -> Result<()> {
        let session = self.require_session("span_changed")?;
        validate_span_width(span_width)?;

        let density = BinView::compute(shown, &session.extent, session.density_width)?;
        let range_width = fit_span_width(&session.extent, span_width)?;
        let range = BinView::compute(shown, &session.extent, range_width)?;
        let proportions = ProportionView::compute(shown, hidden);

        self.enter_interacting();
        self.stats.record_span_change();

        notify(&mut self.listeners, |l| l.density_changed(&density));
        notify(&mut self.listeners, |l| l.range_changed(shown, &range));
        notify(&mut self.listeners, |l| l.proportions_changed(&proportions));
        Ok(())
    }

    /// Forward objects to highlight, grouped per dataset.
    ///
    /// A no-op when highlight events are disabled or no object is given.
    pub fn highlight_changed(&mut self, objects: &[Vec<Arc<DataObject>>]) -> Result<()> {
        if !self.config.highlight_events {
            log::trace!("Highlight events disabled; ignoring highlight");
            return Ok(());
        }
        if objects.iter().all(Vec::is_empty) {
            return Ok(());
        }
        self.require_session("highlight_changed")?;

        self.enter_interacting();
        self.stats.record_highlight();
        notify(&mut self.listeners, |l| l.highlight_changed(objects));
        Ok(())
    }

    /// Forward a selection.
    ///
    /// A no-op when selection events are disabled or the selection is empty.
    pub fn selection_changed(&mut self, selection: &Selection) -> Result<()> {
        if !self.config.selection_events {
            log::trace!("Selection events disabled; ignoring selection");
            return Ok(());
        }
        if selection.is_empty() {
            return Ok(());
        }
        self.require_session("selection_changed")?;

        self.enter_interacting();
        self.stats.record_selection();
        notify(&mut self.listeners, |l| l.selection_changed(selection));
        Ok(())
    }

    /// Objects of the loaded collection whose extent contains `at`.
    pub fn objects_at(&self, at: Timestamp) -> Result<Vec<Vec<Arc<DataObject>>>> {
        let session = self.require_session("objects_at")?;
        Ok(objects_at(&session.datasets, at))
    }

    /// Tick result of `object` against the loaded overall extent.
    pub fn ticks_for(&self, object: &DataObject, span_width: SpanWidth) -> Result<Option<TickResult>> {
        let session = self.require_session("ticks_for")?;
        ticks_for(object, session.extent.min(), span_width)
    }

    /// Split the loaded collection into objects visible in `window` and the
    /// rest, ready to pass to [`span_changed`](Self::span_changed).
    pub fn partition(&self, window: TimeExtent) -> Result<(Vec<Dataset>, Vec<Dataset>)> {
        let session = self.require_session("partition")?;
        Ok(partition_visible(&session.datasets, window))
    }

    fn session(&self) -> Option<&Session> {
        match &self.stage {
            Stage::Uninitialized => None,
            Stage::Loaded(session) | Stage::Interacting(session) => Some(session),
        }
    }

    fn require_session(&self, operation: &'static str) -> Result<&Session> {
        self.session()
            .ok_or_else(|| TimelineError::invalid_state(operation, self.state()))
    }

    fn enter_interacting(&mut self) {
        let stage = std::mem::replace(&mut self.stage, Stage::Uninitialized);
        self.stage = match stage {
            Stage::Loaded(session) => {
                log::debug!("Timeline state: loaded -> interacting");
                Stage::Interacting(session)
            }
            other => other,
        };
    }

    fn clear(&mut self) {
        self.stage = Stage::Uninitialized;
        self.stats.clear_collection();
        notify(&mut self.listeners, |l| l.cleared());
    }
}

fn notify<F>(listeners: &mut Listeners, mut f: F)
where
    F: FnMut(&mut dyn TimelineListener),
{
    for (_, listener) in listeners.iter_mut() {
        f(listener.as_mut());
    }
}

impl fmt::Debug for TimelineController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimelineController")
            .field("state", &self.state())
            .field("extent", &self.extent())
            .field("datasets", &self.datasets().len())
            .field("listeners", &self.listeners.len())
            .field("config", &self.config)
            .finish()
    }
}
