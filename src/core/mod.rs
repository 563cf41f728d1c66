//! Core business logic - framework-agnostic vehicle, fill-up and reporting operations.

/// Fill-up records and per-event statistics
pub mod fillup;
/// Records with memoized derived statistics
pub mod loaded;
/// Pure fuel statistics over loaded fill-ups
pub mod metrics;
/// Per-vehicle fuel reports
pub mod report;
/// Vehicle records and aggregate statistics
pub mod vehicle;
