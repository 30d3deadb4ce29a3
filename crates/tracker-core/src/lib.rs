//! Core types and completion math for gr8life.
//!
//! This crate is pure: it performs no I/O and owns no state. It provides:
//!
//! - [`Dimension`] - The eight fixed life dimensions and their display metadata
//! - [`aggregate`] - Per-dimension counting of entries inside a time window
//! - [`CompletionCounts`] / [`CompletionFlags`] - Count and boolean projections
//! - [`completion_score`] / [`balance_score`] - The two displayed metrics
//! - [`week`] - Monday-start week window helpers
//!
//! # Example
//!
//! ```rust
//! use tracker_core::{aggregate, completion_score, Dimension, Tallied};
//!
//! struct Row(&'static str, i64);
//!
//! impl Tallied for Row {
//!     fn dimension_key(&self) -> &str {
//!         self.0
//!     }
//!
//!     fn created_at(&self) -> i64 {
//!         self.1
//!     }
//! }
//!
//! let rows = [Row("health", 10), Row("learn", 11), Row("health", 5)];
//! let counts = aggregate(&rows, 10);
//!
//! assert_eq!(counts.get(Dimension::Health), 1);
//! assert_eq!(completion_score(&counts), 2);
//! ```

mod completion;
mod dimension;
mod error;
pub mod week;

pub use completion::{
    aggregate, balance_score, completion_percent, completion_score, CompletionCounts,
    CompletionFlags, Tallied,
};
pub use dimension::{Dimension, DimensionInfo};
pub use error::UnknownDimension;
