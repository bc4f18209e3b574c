//! # timeline-types
//!
//! Core temporal data types for the fuzzy-timeline binning engine.
//!
//! This crate provides the plain, serializable data the engine works on:
//!
//! - **Instants and widths**: `Timestamp`, `SpanWidth`
//! - **Extents**: `TimeExtent`
//! - **Domain objects**: `TimeTag`, `DataObject`, `ObjectId`, `Dataset`
//!
//! All types are serializable with Serde. Timestamps are millisecond offsets
//! from the Unix epoch, so historical (pre-1970) dates are negative values.
//!
//! ## Examples
//!
//! ```rust
//! use timeline_types::object::{DataObject, Dataset};
//! use timeline_types::instant::Timestamp;
//!
//! let begin = Timestamp::from_ymd(1517, 10, 31).unwrap();
//! let end = Timestamp::from_ymd(1521, 5, 26).unwrap();
//!
//! let mut dataset = Dataset::new("reformation");
//! dataset.push(DataObject::fuzzy("Theses to Worms", begin, end));
//! assert_eq!(dataset.len(), 1);
//! ```

pub mod extent;
pub mod instant;
pub mod object;
