//! Tracing/logging setup shared by storefront processes and tests.

use serde::{Deserialize, Serialize};

/// Tracing subscriber setup (filters, formatters).
pub mod tracing;

/// Output format of the fmt subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable multi-line output.
    Pretty,
}

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(format: LogFormat) {
    tracing::init(format);
}

/// Install a subscriber that writes through the test harness capture.
pub fn init_for_tests() {
    tracing::init_for_tests();
}
