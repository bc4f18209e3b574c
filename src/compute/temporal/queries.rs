//! Point and window queries over dataset collections.
//!
//! Every query returns one result per input dataset, in input order, even
//! when a result is empty, so callers can zip results back to the datasets
//! they came from.

use super::extent::resolve;
use crate::config::{DataObject, Dataset, TimeExtent, Timestamp};
use std::sync::Arc;

/// Objects whose resolved extent contains `at`, grouped per dataset.
///
/// # Examples
///
/// ```
/// use fuzzy_timeline::compute::temporal::objects_at;
/// use fuzzy_timeline::{DataObject, Dataset, Timestamp};
///
/// let jan1 = Timestamp::from_ymd(2020, 1, 1).unwrap();
/// let jan31 = Timestamp::from_ymd(2020, 1, 31).unwrap();
/// let datasets = vec![
///     Dataset::from_objects("a", vec![DataObject::fuzzy("january", jan1, jan31)]),
///     Dataset::new("empty"),
/// ];
///
/// let found = objects_at(&datasets, Timestamp::from_ymd(2020, 1, 15).unwrap());
/// assert_eq!(found.len(), 2);
/// assert_eq!(found[0].len(), 1);
/// assert!(found[1].is_empty());
/// ```
pub fn objects_at(datasets: &[Dataset], at: Timestamp) -> Vec<Vec<Arc<DataObject>>> {
    filter_each(datasets, |extent| extent.contains(at))
}

/// Objects whose resolved extent overlaps `window`, grouped per dataset.
pub fn objects_within(datasets: &[Dataset], window: TimeExtent) -> Vec<Vec<Arc<DataObject>>> {
    filter_each(datasets, |extent| extent.overlaps(&window))
}

/// Split a collection into the parts visible inside `window` and the rest.
///
/// Returns `(shown, hidden)`, each with one dataset per input dataset and the
/// input labels. Untimed objects appear in neither.
///
/// # Examples
///
/// ```
/// use fuzzy_timeline::compute::temporal::partition_visible;
/// use fuzzy_timeline::{DataObject, Dataset, TimeExtent, Timestamp};
///
/// let day = |d| Timestamp::from_ymd(2020, 1, d).unwrap();
/// let datasets = vec![Dataset::from_objects(
///     "a",
///     vec![DataObject::exact("in", day(5)), DataObject::exact("out", day(20))],
/// )];
///
/// let (shown, hidden) = partition_visible(&datasets, TimeExtent::new(day(1), day(10)));
/// assert_eq!(shown[0].objects[0].label, "in");
/// assert_eq!(hidden[0].objects[0].label, "out");
/// ```
pub fn partition_visible(datasets: &[Dataset], window: TimeExtent) -> (Vec<Dataset>, Vec<Dataset>) {
    let mut shown = Vec::with_capacity(datasets.len());
    let mut hidden = Vec::with_capacity(datasets.len());

    for dataset in datasets {
        let mut visible = Vec::new();
        let mut invisible = Vec::new();
        for object in dataset {
            match resolve(object) {
                Some(extent) if extent.overlaps(&window) => visible.push(Arc::clone(object)),
                Some(_) => invisible.push(Arc::clone(object)),
                None => {}
            }
        }
        shown.push(dataset.derive(visible));
        hidden.push(dataset.derive(invisible));
    }

    (shown, hidden)
}

fn filter_each<F>(datasets: &[Dataset], keep: F) -> Vec<Vec<Arc<DataObject>>>
where
    F: Fn(&TimeExtent) -> bool,
{
    datasets
        .iter()
        .map(|dataset| {
            dataset
                .iter()
                .filter(|object| resolve(object).is_some_and(|extent| keep(&extent)))
                .cloned()
                .collect()
        })
        .collect()
}
