//! File output.

/// CSV export of the power history.
pub mod export;
