//! Model definitions for Enviromux metrics.
//!
//! This module provides the core data structures for the normalized metric
//! set built from a device snapshot, and the trait the HTTP layer uses to
//! obtain one.

pub mod metrics;
pub mod traits;
pub mod types;

// Re-export commonly used items at the module level
pub use metrics::{MetricFamily, MetricRecord, MetricSet};
pub use traits::SnapshotCollector;
pub use types::{FamilyKind, ReadingKind, Unit};
