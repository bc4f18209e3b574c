//! Numeric views handed to listeners for drawing.

use crate::compute::temporal::{bin_count, histogram, resolve};
use crate::config::{Dataset, SpanWidth, TimeExtent, Timestamp};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Per-dataset weighted histograms over a common bin layout.
///
/// Bin `i` covers `[overall_min + i * span_width, overall_min + (i + 1) * span_width)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinView {
    pub overall_min: Timestamp,
    pub span_width: SpanWidth,
    /// One histogram per dataset, in dataset order
    pub bins: Vec<Vec<f64>>,
}

impl BinView {
    /// Bin every dataset across the whole of `extent`.
    pub fn compute(datasets: &[Dataset], extent: &TimeExtent, span_width: SpanWidth) -> Result<Self> {
        let count = bin_count(extent, span_width)?;
        let bins = datasets
            .iter()
            .map(|dataset| histogram(&dataset.objects, extent.min(), count, span_width))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            overall_min: extent.min(),
            span_width,
            bins,
        })
    }

    /// Number of bins in each histogram.
    pub fn bin_count(&self) -> usize {
        self.bins.first().map_or(0, Vec::len)
    }

    /// Start instant of bin `index`, rounded to the millisecond.
    pub fn bin_start(&self, index: usize) -> Timestamp {
        let offset = (index as f64 * self.span_width.as_millis()).round() as i64;
        self.overall_min.saturating_add_millis(offset)
    }

    /// Sum of all datasets per bin.
    pub fn totals(&self) -> Vec<f64> {
        let mut totals = vec![0.0; self.bin_count()];
        for histogram in &self.bins {
            for (total, weight) in totals.iter_mut().zip(histogram) {
                *total += weight;
            }
        }
        totals
    }

    /// Largest single-dataset bin weight, for scaling bar heights.
    pub fn max_weight(&self) -> f64 {
        self.bins
            .iter()
            .flatten()
            .copied()
            .fold(0.0, f64::max)
    }
}

/// Shown versus hidden object counts of one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetProportion {
    pub label: String,
    pub shown: usize,
    pub hidden: usize,
}

impl DatasetProportion {
    pub fn total(&self) -> usize {
        self.shown + self.hidden
    }

    /// Fraction of objects currently shown; zero for an empty dataset.
    pub fn shown_share(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.shown as f64 / total as f64,
        }
    }
}

/// Shown/hidden split of every dataset, counting objects with temporal data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProportionView {
    pub datasets: Vec<DatasetProportion>,
}

impl ProportionView {
    /// Pair `shown[i]` with `hidden[i]`. A missing side counts as empty.
    pub fn compute(shown: &[Dataset], hidden: &[Dataset]) -> Self {
        let len = shown.len().max(hidden.len());
        let datasets = (0..len)
            .map(|idx| {
                let shown = shown.get(idx);
                let hidden = hidden.get(idx);
                let label = shown
                    .or(hidden)
                    .map(|dataset| dataset.label.clone())
                    .unwrap_or_default();

                DatasetProportion {
                    label,
                    shown: shown.map_or(0, count_resolvable),
                    hidden: hidden.map_or(0, count_resolvable),
                }
            })
            .collect();

        Self { datasets }
    }
}

fn count_resolvable(dataset: &Dataset) -> usize {
    dataset
        .iter()
        .filter(|object| resolve(object).is_some())
        .count()
}
