//! Bin/tick calculation for fuzzy density accumulation.
//!
//! Bins are fixed-width slots laid out from the overall minimum of the loaded
//! collection: bin `i` starts at `overall_min + i * span_width`. An object
//! contributes to every bin its extent touches; the first and last bins get a
//! fractional weight equal to the share of the bin the extent covers, interior
//! bins get weight 1.

use super::extent::resolve;
use crate::compute::validation::validate_span_width;
use crate::config::{DataObject, SpanWidth, TimeExtent, Timestamp};
use crate::error::{Result, TimelineError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Upper bound on the number of bins a single view may allocate.
pub const MAX_BINS: usize = 1 << 20;

/// Bins an object occupies and the weights of its boundary bins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickResult {
    /// Zero-based index of the first occupied bin
    pub first_tick: i64,
    /// Zero-based index of the last occupied bin
    pub last_tick: i64,
    /// Share of the first bin covered by the object, in `(0, 1]`
    pub first_tick_percentage: f64,
    /// Share of the last bin covered by the object, in `(0, 1]`
    pub last_tick_percentage: f64,
}

impl TickResult {
    pub fn spans_single_bin(&self) -> bool {
        self.first_tick == self.last_tick
    }

    /// Number of bins the object touches.
    pub fn bins_spanned(&self) -> u64 {
        self.last_tick.abs_diff(self.first_tick).saturating_add(1)
    }

    /// Weight the object adds to bin `tick`; zero outside its range.
    pub fn weight(&self, tick: i64) -> f64 {
        if tick < self.first_tick || tick > self.last_tick {
            0.0
        } else if self.spans_single_bin() {
            1.0
        } else if tick == self.first_tick {
            self.first_tick_percentage
        } else if tick == self.last_tick {
            self.last_tick_percentage
        } else {
            1.0
        }
    }

    /// `(bin, weight)` pairs for every occupied bin.
    pub fn weights(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        (self.first_tick..=self.last_tick).map(move |tick| (tick, self.weight(tick)))
    }
}

/// Compute the tick result of `object` relative to `overall_min`.
///
/// Returns `Ok(None)` for objects without temporal data and
/// [`TimelineError::InvalidSpanWidth`] when `span_width` is not a finite
/// positive width.
///
/// # Examples
///
/// ```
/// use fuzzy_timeline::compute::temporal::ticks_for;
/// use fuzzy_timeline::{DataObject, SpanWidth, Timestamp};
///
/// let jan1 = Timestamp::from_ymd(2020, 1, 1).unwrap();
/// let jan3 = Timestamp::from_ymd(2020, 1, 3).unwrap();
///
/// let ticks = ticks_for(&DataObject::fuzzy("span", jan1, jan3), jan1, SpanWidth::from_days(1.0))?
///     .unwrap();
/// assert_eq!((ticks.first_tick, ticks.last_tick), (0, 2));
/// assert_eq!(ticks.first_tick_percentage, 1.0);
/// assert_eq!(ticks.last_tick_percentage, 1.0);
/// # Ok::<(), fuzzy_timeline::TimelineError>(())
/// ```
pub fn ticks_for(
    object: &DataObject,
    overall_min: Timestamp,
    span_width: SpanWidth,
) -> Result<Option<TickResult>> {
    validate_span_width(span_width)?;
    Ok(resolve(object).map(|extent| ticks_for_extent(&extent, overall_min, span_width)))
}

/// Tick result for an already resolved extent. `span_width` must be valid.
pub fn ticks_for_extent(
    extent: &TimeExtent,
    overall_min: Timestamp,
    span_width: SpanWidth,
) -> TickResult {
    let width = span_width.as_millis();
    let offset_min = extent.min().millis_since(overall_min) as f64;
    let offset_max = extent.max().millis_since(overall_min) as f64;

    let first_tick = (offset_min / width).floor() as i64;
    let last_tick = (offset_max / width).floor() as i64;

    if first_tick == last_tick {
        return TickResult {
            first_tick,
            last_tick,
            first_tick_percentage: 1.0,
            last_tick_percentage: 1.0,
        };
    }

    let second_tick_start = (first_tick + 1) as f64 * width;
    let last_tick_start = last_tick as f64 * width;

    TickResult {
        first_tick,
        last_tick,
        first_tick_percentage: boundary_weight((second_tick_start - offset_min) / width),
        last_tick_percentage: boundary_weight((offset_max - last_tick_start) / width),
    }
}

// An extent that ends exactly on a bin start touches that bin in one instant
// and is weighted like a point inside it.
fn boundary_weight(fraction: f64) -> f64 {
    if fraction <= 0.0 { 1.0 } else { fraction.min(1.0) }
}

/// Number of bins needed to cover `extent` at `span_width`.
pub fn bin_count(extent: &TimeExtent, span_width: SpanWidth) -> Result<usize> {
    validate_span_width(span_width)?;

    let bins = (extent.duration_millis() as f64 / span_width.as_millis()).floor() + 1.0;
    if bins > MAX_BINS as f64 {
        return Err(TimelineError::InvalidInput(format!(
            "span width {} splits {} into {} bins, more than the maximum of {}",
            span_width, extent, bins, MAX_BINS
        )));
    }

    Ok(bins as usize)
}

/// Finest width, no finer than `span_width`, that lays `extent` out in at
/// most [`MAX_BINS`] bins.
///
/// Returns `span_width` itself whenever it fits.
pub fn fit_span_width(extent: &TimeExtent, span_width: SpanWidth) -> Result<SpanWidth> {
    validate_span_width(span_width)?;

    let duration = extent.duration_millis() as f64;
    if (duration / span_width.as_millis()).floor() + 1.0 <= MAX_BINS as f64 {
        return Ok(span_width);
    }

    let fitted = SpanWidth::from_millis(duration / (MAX_BINS - 1) as f64);
    log::debug!(
        "Span width {} is too fine for {}; using {} instead",
        span_width,
        extent,
        fitted
    );
    Ok(fitted)
}

/// Add the weights of `ticks` into `bins`. Returns how many occupied bins fell
/// outside the slice and were dropped.
///
/// Only the ticks overlapping the slice are visited.
pub fn accumulate(bins: &mut [f64], ticks: &TickResult) -> u64 {
    let occupied = ticks.bins_spanned();
    let Some(last_bin) = bins.len().checked_sub(1) else {
        return occupied;
    };

    let first = ticks.first_tick.max(0);
    let last = ticks
        .last_tick
        .min(i64::try_from(last_bin).unwrap_or(i64::MAX));
    if first > last {
        return occupied;
    }

    for tick in first..=last {
        bins[tick as usize] += ticks.weight(tick);
    }
    occupied - (last.abs_diff(first) + 1)
}

/// Weighted histogram of `objects` over `bins` slots starting at `overall_min`.
///
/// Untimed objects are skipped.
pub fn histogram(
    objects: &[Arc<DataObject>],
    overall_min: Timestamp,
    bins: usize,
    span_width: SpanWidth,
) -> Result<Vec<f64>> {
    validate_span_width(span_width)?;

    let mut counts = vec![0.0; bins];
    let mut dropped: u64 = 0;
    for object in objects {
        if let Some(extent) = resolve(object) {
            let ticks = ticks_for_extent(&extent, overall_min, span_width);
            dropped = dropped.saturating_add(accumulate(&mut counts, &ticks));
        }
    }

    if dropped > 0 {
        log::warn!(
            "Dropped {} bin contributions outside the {} bins starting at {}",
            dropped,
            bins,
            overall_min
        );
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MILLIS_PER_DAY, TimeTag};

    fn date(y: i32, m: u32, d: u32) -> Timestamp {
        Timestamp::from_ymd(y, m, d).unwrap()
    }

    fn one_day() -> SpanWidth {
        SpanWidth::from_days(1.0)
    }

    #[test]
    fn test_exact_object_single_bin() {
        let day = date(2020, 1, 10);
        let ticks = ticks_for(&DataObject::exact("a", day), day, one_day())
            .unwrap()
            .unwrap();

        assert_eq!(ticks.first_tick, 0);
        assert_eq!(ticks.last_tick, 0);
        assert_eq!(ticks.first_tick_percentage, 1.0);
        assert_eq!(ticks.last_tick_percentage, 1.0);
    }

    #[test]
    fn test_span_aligned_to_bin_starts() {
        let object = DataObject::fuzzy("c", date(2020, 1, 1), date(2020, 1, 3));
        let ticks = ticks_for(&object, date(2020, 1, 1), one_day())
            .unwrap()
            .unwrap();

        assert_eq!(ticks.first_tick, 0);
        assert_eq!(ticks.last_tick, 2);
        assert_eq!(ticks.first_tick_percentage, 1.0);
        assert_eq!(ticks.last_tick_percentage, 1.0);
    }

    #[test]
    fn test_partial_boundary_bins() {
        let origin = date(2020, 1, 1);
        // From 06:00 on day 0 to 18:00 on day 2
        let begin = origin.saturating_add_millis(MILLIS_PER_DAY / 4);
        let end = origin.saturating_add_millis(2 * MILLIS_PER_DAY + 3 * MILLIS_PER_DAY / 4);
        let ticks = ticks_for(&DataObject::fuzzy("p", begin, end), origin, one_day())
            .unwrap()
            .unwrap();

        assert_eq!((ticks.first_tick, ticks.last_tick), (0, 2));
        assert!((ticks.first_tick_percentage - 0.75).abs() < 1e-12);
        assert!((ticks.last_tick_percentage - 0.75).abs() < 1e-12);
        assert_eq!(ticks.weight(1), 1.0);
        assert_eq!(ticks.weight(3), 0.0);
        assert_eq!(ticks.bins_spanned(), 3);
    }

    #[test]
    fn test_fractional_span_width() {
        let origin = Timestamp::from_millis(0);
        let object = DataObject::fuzzy("f", Timestamp::from_millis(5), Timestamp::from_millis(20));
        let ticks = ticks_for(&object, origin, SpanWidth::from_millis(7.5))
            .unwrap()
            .unwrap();

        assert_eq!((ticks.first_tick, ticks.last_tick), (0, 2));
        assert!((ticks.first_tick_percentage - 2.5 / 7.5).abs() < 1e-12);
        assert!((ticks.last_tick_percentage - 5.0 / 7.5).abs() < 1e-12);
    }

    #[test]
    fn test_untimed_object_has_no_ticks() {
        let result = ticks_for(&DataObject::untimed("u"), date(2020, 1, 1), one_day()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_span_width_is_rejected() {
        let object = DataObject::exact("a", date(2020, 1, 1));
        for width in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = ticks_for(&object, date(2020, 1, 1), SpanWidth::from_millis(width));
            assert!(matches!(result, Err(TimelineError::InvalidSpanWidth(_))));
        }
    }

    #[test]
    fn test_invalid_span_width_rejected_even_for_untimed() {
        let result = ticks_for(
            &DataObject::new("u", TimeTag::Untimed),
            date(2020, 1, 1),
            SpanWidth::from_millis(0.0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_bin_count() {
        let extent = TimeExtent::new(date(2020, 1, 1), date(2020, 1, 11));
        assert_eq!(bin_count(&extent, one_day()).unwrap(), 11);
        assert_eq!(bin_count(&extent, SpanWidth::from_days(3.0)).unwrap(), 4);
        assert_eq!(bin_count(&TimeExtent::instant(date(2020, 1, 1)), one_day()).unwrap(), 1);
    }

    #[test]
    fn test_bin_count_rejects_excessive_resolution() {
        let extent = TimeExtent::new(date(1500, 1, 1), date(2020, 1, 1));
        let result = bin_count(&extent, SpanWidth::from_millis(1.0));
        assert!(matches!(result, Err(TimelineError::InvalidInput(_))));
    }

    #[test]
    fn test_accumulate_drops_out_of_range_bins() {
        let ticks = TickResult {
            first_tick: -1,
            last_tick: 2,
            first_tick_percentage: 0.5,
            last_tick_percentage: 0.25,
        };
        let mut bins = vec![0.0; 2];
        let dropped = accumulate(&mut bins, &ticks);

        assert_eq!(dropped, 2);
        assert_eq!(bins, vec![1.0, 1.0]);
    }

    #[test]
    fn test_accumulate_visits_only_overlapping_bins() {
        let ticks = TickResult {
            first_tick: -2_000_000_000,
            last_tick: 2_000_000_000,
            first_tick_percentage: 0.5,
            last_tick_percentage: 0.5,
        };
        let mut bins = vec![0.0; 4];
        let dropped = accumulate(&mut bins, &ticks);

        assert_eq!(bins, vec![1.0, 1.0, 1.0, 1.0]);
        assert_eq!(dropped, 4_000_000_001 - 4);
    }

    #[test]
    fn test_accumulate_outside_slice() {
        let ticks = TickResult {
            first_tick: 7,
            last_tick: 9,
            first_tick_percentage: 0.5,
            last_tick_percentage: 0.5,
        };
        let mut bins = vec![0.0; 4];
        assert_eq!(accumulate(&mut bins, &ticks), 3);
        assert_eq!(accumulate(&mut [], &ticks), 3);
        assert!(bins.iter().all(|w| *w == 0.0));
    }

    #[test]
    fn test_bins_spanned_saturates() {
        let ticks = TickResult {
            first_tick: i64::MIN,
            last_tick: i64::MAX,
            first_tick_percentage: 1.0,
            last_tick_percentage: 1.0,
        };
        assert_eq!(ticks.bins_spanned(), u64::MAX);
        assert_eq!(accumulate(&mut [0.0; 2], &ticks), u64::MAX - 2);
    }

    #[test]
    fn test_fit_span_width() {
        let extent = TimeExtent::new(date(1400, 1, 1), date(2000, 1, 1));
        assert_eq!(fit_span_width(&extent, SpanWidth::from_days(30.0)).unwrap(), SpanWidth::from_days(30.0));

        let hour = SpanWidth::from_millis(3_600_000.0);
        let fitted = fit_span_width(&extent, hour).unwrap();
        assert!(fitted.as_millis() > hour.as_millis());
        assert!(bin_count(&extent, fitted).unwrap() <= MAX_BINS);

        let point = TimeExtent::instant(date(2000, 1, 1));
        assert_eq!(fit_span_width(&point, SpanWidth::from_millis(1.0)).unwrap(), SpanWidth::from_millis(1.0));
        assert!(fit_span_width(&point, SpanWidth::from_millis(0.0)).is_err());
    }

    #[test]
    fn test_histogram_weights() {
        let origin = date(2020, 1, 1);
        let half_day = MILLIS_PER_DAY / 2;
        let objects: Vec<Arc<DataObject>> = vec![
            Arc::new(DataObject::exact("point", date(2020, 1, 2))),
            Arc::new(DataObject::fuzzy(
                "half-half",
                origin.saturating_add_millis(half_day),
                origin.saturating_add_millis(MILLIS_PER_DAY + half_day),
            )),
            Arc::new(DataObject::untimed("skip")),
        ];

        let bins = histogram(&objects, origin, 3, one_day()).unwrap();
        assert_eq!(bins, vec![0.5, 1.5, 0.0]);
    }
}
