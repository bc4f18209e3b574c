//! Temporal computation and query processing.
//!
//! - `extent`: resolving a single object and aggregating a collection
//! - `ticks`: bin indices, boundary weights and histograms
//! - `queries`: point-in-range and window queries over datasets

pub mod extent;
pub mod queries;
pub mod ticks;

pub use extent::{ExtentSummary, aggregate, resolve, summarize, try_aggregate};
pub use queries::{objects_at, objects_within, partition_visible};
pub use ticks::{TickResult, accumulate, bin_count, fit_span_width, histogram, ticks_for};
