//! Utility modules for bookvault.
//!
//! - [`datetime`] - UTC/local conversion and date formatting

pub mod datetime;
