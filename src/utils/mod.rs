//! Utility modules for authdeck.
//!
//! # Available Utilities
//!
//! - [`overflow`] - Width measurement and truncation for single-line text

pub mod overflow;

pub use overflow::OverflowTracker;
