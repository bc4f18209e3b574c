//! Compute layer for timeline queries and binning.
//!
//! This module holds the pure, stateless parts of the engine:
//! - Temporal extent resolution and aggregation
//! - Bin/tick calculation and histogram accumulation
//! - Point and window containment queries
//! - Input validation
//!
//! Nothing here owns state. The controller calls into these functions with
//! borrowed datasets on every load and interaction event.

pub mod temporal;
pub mod validation;
