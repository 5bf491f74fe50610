//! Scan orchestration: backlog entries → reference search → match → progress store.
//!
//! The matcher stays pure; this layer owns searching, concurrency, pacing and
//! persistence. Entries already in the progress store are skipped, and the
//! store is flushed after every batch so an interrupted scan resumes cleanly.
pub mod pipeline;
pub mod report;

pub use pipeline::{ProcessedEntry, ScanOptions, ScanPipeline, ScanStats, TitleLookup};
pub use report::{BacklogSummary, CompletionEstimate};
