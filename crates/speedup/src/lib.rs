//! Fastest-kernel versus generic-kernel speedups for VOLK profile results.
//!
//! Reads the JSON document written by `volk_profile -j`, computes for every
//! operation the ratio of the fastest specialized kernel's time to the generic
//! kernel's time, and renders the ratios as a bar chart.
//!
//! # Quick Start
//!
//! ```no_run
//! use volk_speedup::{analyze, AggregatorConfig, ChartRenderer, TerminalChart};
//!
//! let speedups = analyze("volk_results.json", &AggregatorConfig::default())?;
//! print!("{}", TerminalChart::default().render(&speedups));
//! # Ok::<(), volk_speedup::Error>(())
//! ```
//!
//! # Modules
//!
//! - [`result`] - Results document and speedup types
//! - [`io`] - Loading results and writing charts
//! - [`speedup`] - Per-operation ratio computation
//! - [`chart`] - SVG and terminal bar charts
//! - [`markdown`] - Markdown summary table
//! - [`config`] - Settings and aggregation policy
//! - [`error`] - Error types

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod chart;
pub mod config;
pub mod error;
pub mod io;
pub mod markdown;
pub mod result;
pub mod speedup;

pub use crate::chart::{ChartRenderer, SvgChart, TerminalChart};
pub use crate::config::{AggregatorConfig, EmptyVariantPolicy, Settings};
pub use crate::error::{ComputationError, Error, Result};
pub use crate::result::{Measurement, ResultsDocument, SpeedupRecord, TestRecord};
pub use crate::speedup::{compute_speedups, BASELINE_KEYS, NAMESPACE_PREFIX};

use std::path::Path;

/// Load a results file and compute the speedup of every eligible operation.
///
/// # Errors
///
/// Returns the first load, parse or computation error. No partial results are
/// produced.
pub fn analyze(
    path: impl AsRef<Path>,
    config: &AggregatorConfig,
) -> Result<Vec<SpeedupRecord>> {
    let doc = io::load_results(path)?;
    compute_speedups(&doc, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_missing_file() {
        let err = analyze("definitely/not/here.json", &AggregatorConfig::default()).unwrap_err();
        assert!(err.is_load());
    }

    #[test]
    fn test_prefix_constant_matches_length() {
        assert_eq!(NAMESPACE_PREFIX.chars().count(), speedup::NAMESPACE_PREFIX_LEN);
    }
}
