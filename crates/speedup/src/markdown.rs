//! Markdown summary of kernel speedups.
//!
//! The summary is printed, never written to disk.

use crate::result::SpeedupRecord;
use std::fmt::Write;

/// Generate a markdown table of speedups, one row per operation.
pub fn generate_summary(records: &[SpeedupRecord]) -> String {
    let mut output = String::new();

    writeln!(output, "# Fastest Kernel vs Generic").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Generated: {}", chrono::Utc::now().to_rfc3339()).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "| Operation | Best variant | Baseline | Ratio |").unwrap();
    writeln!(output, "|-----------|--------------|----------|-------|").unwrap();

    for r in records {
        writeln!(
            output,
            "| {} | {} | {} | {:.3} |",
            r.display_name, r.best_variant, r.baseline_key, r.ratio
        )
        .unwrap();
    }

    let faster = records.iter().filter(|r| r.is_faster()).count();
    writeln!(output).unwrap();
    writeln!(output, "---").unwrap();
    writeln!(output, "Operations: {}", records.len()).unwrap();
    writeln!(output, "Faster than generic: {faster}").unwrap();

    output
}
