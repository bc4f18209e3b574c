//! Validation for span widths and loaded datasets.

use crate::config::{DataObject, Dataset, SpanWidth, TimeTag};
use crate::error::{Result, TimelineError};

/// Validates that a bin width is finite and strictly positive.
///
/// Widths are never clamped: a zero or negative width is a caller bug.
///
/// # Examples
///
/// ```
/// use fuzzy_timeline::compute::validation::validate_span_width;
/// use fuzzy_timeline::SpanWidth;
///
/// assert!(validate_span_width(SpanWidth::from_days(1.0)).is_ok());
/// assert!(validate_span_width(SpanWidth::from_millis(0.0)).is_err());
/// assert!(validate_span_width(SpanWidth::from_millis(-3.0)).is_err());
/// ```
pub fn validate_span_width(span_width: SpanWidth) -> Result<()> {
    if span_width.is_valid() {
        Ok(())
    } else {
        Err(TimelineError::InvalidSpanWidth(span_width.as_millis()))
    }
}

/// Validates the temporal tag of a single object.
///
/// Fuzzy spans must not end before they begin. Untimed objects and exact
/// objects without dates are valid; they are skipped by every computation.
pub fn validate_object(object: &DataObject) -> Result<()> {
    if let TimeTag::FuzzySpan { begin, end } = &object.time
        && begin > end
    {
        return Err(TimelineError::InvalidInput(format!(
            "Fuzzy span of '{}' ends before it begins: {} > {}",
            object.label, begin, end
        )));
    }
    Ok(())
}

/// Validates every object of every dataset.
///
/// # Examples
///
/// ```
/// use fuzzy_timeline::compute::validation::validate_datasets;
/// use fuzzy_timeline::{DataObject, Dataset, Timestamp};
///
/// let early = Timestamp::from_ymd(1900, 1, 1).unwrap();
/// let late = Timestamp::from_ymd(1950, 1, 1).unwrap();
///
/// let ok = vec![Dataset::from_objects("d", vec![DataObject::fuzzy("x", early, late)])];
/// assert!(validate_datasets(&ok).is_ok());
///
/// let inverted = vec![Dataset::from_objects("d", vec![DataObject::fuzzy("x", late, early)])];
/// assert!(validate_datasets(&inverted).is_err());
/// ```
pub fn validate_datasets(datasets: &[Dataset]) -> Result<()> {
    for (dataset_idx, dataset) in datasets.iter().enumerate() {
        for (object_idx, object) in dataset.iter().enumerate() {
            validate_object(object).map_err(|e| {
                TimelineError::InvalidInput(format!(
                    "Dataset {} object at index {}: {}",
                    dataset_idx, object_idx, e
                ))
            })?;
        }
    }
    Ok(())
}
