//! Observer interface between the controller and renderers.

use super::views::{BinView, ProportionView};
use crate::config::{DataObject, Dataset};
use std::sync::Arc;

/// Receives the results of every recomputation.
///
/// All methods default to no-ops, so a renderer implements only what it
/// draws. Listeners are notified synchronously, in registration order.
///
/// # Examples
///
/// ```
/// use fuzzy_timeline::controller::{BinView, TimelineListener};
///
/// struct DensityPrinter;
///
/// impl TimelineListener for DensityPrinter {
///     fn density_changed(&mut self, view: &BinView) {
///         println!("{} bins, peak {}", view.bin_count(), view.max_weight());
///     }
/// }
/// ```
pub trait TimelineListener {
    /// Density histograms were recomputed.
    fn density_changed(&mut self, _view: &BinView) {}

    /// Range histograms were recomputed for the shown datasets at a new width.
    fn range_changed(&mut self, _shown: &[Dataset], _view: &BinView) {}

    /// The shown/hidden split changed.
    fn proportions_changed(&mut self, _view: &ProportionView) {}

    /// Objects to emphasise, grouped per dataset. Passed through unmodified.
    fn highlight_changed(&mut self, _objects: &[Vec<Arc<DataObject>>]) {}

    /// A new selection, passed through unmodified.
    fn selection_changed(&mut self, _selection: &Selection) {}

    /// All derived state was dropped; nothing should be drawn.
    fn cleared(&mut self) {}
}

/// Handle returned by `TimelineController::add_listener`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

/// Objects selected by the user, grouped per dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub objects: Vec<Vec<Arc<DataObject>>>,
}

impl Selection {
    pub fn new(objects: Vec<Vec<Arc<DataObject>>>) -> Self {
        Self { objects }
    }

    /// Select whole datasets.
    pub fn from_datasets(datasets: &[Dataset]) -> Self {
        Self {
            objects: datasets.iter().map(|d| d.objects.clone()).collect(),
        }
    }

    /// True when no dataset has a selected object.
    pub fn is_empty(&self) -> bool {
        self.objects.iter().all(Vec::is_empty)
    }

    /// Total number of selected objects.
    pub fn len(&self) -> usize {
        self.objects.iter().map(Vec::len).sum()
    }
}
