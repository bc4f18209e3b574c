//! Fuzzy-temporal binning and range engine for interactive timeline views.
//!
//! Objects carry either an exact date or a fuzzy span (an uncertain date
//! between a begin and an end). The engine computes the overall extent of a
//! dataset collection, splits it into fixed-width bins with fractional
//! boundary weights for density display, answers point-in-range queries, and
//! drives a small state machine that re-derives views on every span change.
//!
//! ## Features
//! - **One resolution rule**: exact and fuzzy objects resolve to a `[min, max]` extent
//! - **Proportional bins**: partially covered boundary bins get fractional weight
//! - **Containment queries**: per-dataset results that mirror the input shape
//! - **Observer interface**: renderers implement `TimelineListener`
//!
//! ```rust
//! use fuzzy_timeline::{DataObject, Dataset, SpanWidth, Timestamp};
//! use fuzzy_timeline::compute::temporal::{aggregate, ticks_for};
//!
//! let jan1 = Timestamp::from_ymd(2020, 1, 1).unwrap();
//! let jan31 = Timestamp::from_ymd(2020, 1, 31).unwrap();
//! let feb15 = Timestamp::from_ymd(2020, 2, 15).unwrap();
//!
//! let datasets = vec![Dataset::from_objects(
//!     "events",
//!     vec![
//!         DataObject::fuzzy("january", jan1, jan31),
//!         DataObject::exact("february", feb15),
//!     ],
//! )];
//!
//! let extent = aggregate(&datasets)?;
//! let week = SpanWidth::from_days(7.0);
//! let ticks = ticks_for(&datasets[0].objects[0], extent.min(), week)?.unwrap();
//! assert_eq!((ticks.first_tick, ticks.last_tick), (0, 4));
//! # Ok::<(), fuzzy_timeline::TimelineError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod controller;
pub mod error;

pub use builder::TimelineBuilder;
pub use controller::{
    BinView, DatasetProportion, ListenerId, ProportionView, Selection, TimelineController,
    TimelineListener, TimelineState,
};
pub use error::{Result, TimelineError};

pub use config::{
    Config, DataObject, Dataset, MILLIS_PER_DAY, ObjectId, SpanWidth, TimeExtent, TimeTag,
    TimelineStats, Timestamp,
};

pub use compute::temporal::TickResult;
pub use compute::validation;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Result, TimelineBuilder, TimelineController, TimelineError, TimelineState};

    pub use crate::{DataObject, Dataset, ObjectId, SpanWidth, TimeExtent, TimeTag, Timestamp};

    pub use crate::{BinView, ProportionView, Selection, TimelineListener};

    pub use crate::{Config, TickResult};

    pub use crate::compute::temporal::{aggregate, objects_at, partition_visible, resolve, ticks_for};
}
