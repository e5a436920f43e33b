/// Shared infrastructure concerns
///
/// This module contains infrastructure implementations that are shared across
/// multiple bounded contexts (modules).
pub mod config;

// Re-exports for convenience
pub use config::{CsvOptions, DuplicateSkuPolicy, ImportConfig, TermFailurePolicy};
