//! Temporal extent resolution for single objects and whole collections.

use crate::config::{DataObject, Dataset, TimeExtent, TimeTag};
use crate::error::{Result, TimelineError};

/// Resolve the effective `[min, max]` extent of one object.
///
/// - `Exact` resolves to its first date as a single-instant extent. Further
///   dates are ignored.
/// - `FuzzySpan` resolves to `[begin, end]`.
/// - `Untimed`, and `Exact` without any date, resolve to `None`.
///
/// # Examples
///
/// ```
/// use fuzzy_timeline::compute::temporal::resolve;
/// use fuzzy_timeline::{DataObject, Timestamp};
///
/// let date = Timestamp::from_ymd(2020, 1, 10).unwrap();
/// let extent = resolve(&DataObject::exact("letter", date)).unwrap();
/// assert_eq!(extent.min(), date);
/// assert_eq!(extent.max(), date);
///
/// assert!(resolve(&DataObject::untimed("note")).is_none());
/// ```
pub fn resolve(object: &DataObject) -> Option<TimeExtent> {
    match &object.time {
        TimeTag::Exact { dates } => dates.first().copied().map(TimeExtent::instant),
        TimeTag::FuzzySpan { begin, end } => Some(TimeExtent::new(*begin, *end)),
        TimeTag::Untimed => None,
    }
}

/// Fold every resolvable object of every dataset into one overall extent.
///
/// Returns `None` when there is nothing to resolve.
pub fn try_aggregate(datasets: &[Dataset]) -> Option<TimeExtent> {
    datasets
        .iter()
        .flat_map(|dataset| dataset.iter())
        .filter_map(|object| resolve(object))
        .reduce(|overall, extent| overall.union(&extent))
}

/// Like [`try_aggregate`], but reports a collection without temporal data as
/// [`TimelineError::EmptyExtent`].
///
/// # Examples
///
/// ```
/// use fuzzy_timeline::compute::temporal::aggregate;
/// use fuzzy_timeline::{DataObject, Dataset, Timestamp};
///
/// let jan1 = Timestamp::from_ymd(2020, 1, 1).unwrap();
/// let jan31 = Timestamp::from_ymd(2020, 1, 31).unwrap();
/// let feb15 = Timestamp::from_ymd(2020, 2, 15).unwrap();
///
/// let datasets = vec![Dataset::from_objects(
///     "events",
///     vec![
///         DataObject::fuzzy("january", jan1, jan31),
///         DataObject::exact("mid february", feb15),
///     ],
/// )];
///
/// let extent = aggregate(&datasets)?;
/// assert_eq!((extent.min(), extent.max()), (jan1, feb15));
/// # Ok::<(), fuzzy_timeline::TimelineError>(())
/// ```
pub fn aggregate(datasets: &[Dataset]) -> Result<TimeExtent> {
    try_aggregate(datasets).ok_or(TimelineError::EmptyExtent)
}

/// Overall extent plus how many objects took part in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtentSummary {
    pub extent: Option<TimeExtent>,
    pub resolvable: usize,
    pub skipped: usize,
}

/// Single pass computing the overall extent and the resolvable/skipped
/// object counts.
pub fn summarize(datasets: &[Dataset]) -> ExtentSummary {
    let mut summary = ExtentSummary {
        extent: None,
        resolvable: 0,
        skipped: 0,
    };

    for (dataset_idx, dataset) in datasets.iter().enumerate() {
        for object in dataset {
            match resolve(object) {
                Some(extent) => {
                    summary.resolvable += 1;
                    summary.extent = Some(match summary.extent {
                        Some(overall) => overall.union(&extent),
                        None => extent,
                    });
                }
                None => {
                    summary.skipped += 1;
                    log::trace!(
                        "Skipping object '{}' ({}) in dataset {}: no temporal data",
                        object.label,
                        object.id,
                        dataset_idx
                    );
                }
            }
        }
    }

    summary
}
