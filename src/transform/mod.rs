//! Prompt transform engine.
//!
//! A pure pipeline from `(text, mode, format)` to text:
//! - `rewrite`: mode-specific rewrite rule
//! - `format_output`: output envelope (Markdown, JSON, XML, list, table)
//! - `Optimizer`: async wrapper adding the simulated latency and in-flight guard

mod format;
mod optimizer;
mod rewrite;
mod types;

pub use format::format_output;
pub use optimizer::{DEFAULT_LATENCY, Optimizer};
pub use rewrite::{SHORTEN_WORD_LIMIT, rewrite};
pub use types::{OptimizationMode, OutputFormat};

/// Rewrite `input` with `mode`, then wrap it in `format`.
pub fn optimize(input: &str, mode: Option<OptimizationMode>, format: OutputFormat) -> String {
    format_output(&rewrite(input, mode), format)
}

/// Same as [`optimize`] for a format given as a label.
///
/// An unrecognized label yields the rewritten text, trimmed.
pub fn optimize_label(input: &str, mode: Option<OptimizationMode>, format_label: &str) -> String {
    match format_label.parse::<OutputFormat>() {
        Ok(format) => optimize(input, mode, format),
        Err(_) => rewrite(input, mode).trim().to_string(),
    }
}
