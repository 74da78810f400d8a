//! Fastest-kernel versus baseline speedup computation.
//!
//! For every test record the baseline time comes from the first key of
//! [`BASELINE_KEYS`] present in its results. The best specialized time is the
//! minimum over every other variant, and the ratio is
//! `best_specialized / baseline`. Values below 1.0 mean the specialized kernel
//! is faster.
//!
//! Records with no baseline kernel are filtered out. Output order follows
//! document order.

use crate::config::{AggregatorConfig, EmptyVariantPolicy};
use crate::error::{ComputationError, Result};
use crate::result::{Measurement, ResultsDocument, SpeedupRecord, TestRecord};
use tracing::{debug, info, warn};

/// Baseline variant spellings, in precedence order.
pub const BASELINE_KEYS: [&str; 2] = ["generic", "u_generic"];

/// Namespace prefix carried by every kernel name.
pub const NAMESPACE_PREFIX: &str = "volk_";

/// Length of [`NAMESPACE_PREFIX`] in characters.
pub const NAMESPACE_PREFIX_LEN: usize = 5;

/// Whether `key` names a baseline variant.
pub fn is_baseline_key(key: &str) -> bool {
    BASELINE_KEYS.contains(&key)
}

/// Find the baseline measurement of a record, honouring key precedence.
pub fn find_baseline(record: &TestRecord) -> Option<(&'static str, &Measurement)> {
    BASELINE_KEYS
        .iter()
        .find_map(|key| record.results.get(*key).map(|m| (*key, m)))
}

/// Fastest specialized variant of a record, if it has any.
///
/// Ties resolve to the lexicographically smallest variant key.
pub fn best_specialized(record: &TestRecord) -> Option<(&str, &Measurement)> {
    record
        .results
        .iter()
        .filter(|(key, _)| !is_baseline_key(key))
        .min_by(|(_, a), (_, b)| a.time.total_cmp(&b.time))
        .map(|(key, m)| (key.as_str(), m))
}

/// Strip the first `prefix_len` characters of an operation name.
pub fn display_name(
    name: &str,
    prefix_len: usize,
) -> std::result::Result<&str, ComputationError> {
    match name.char_indices().nth(prefix_len) {
        Some((idx, _)) => Ok(&name[idx..]),
        None => Err(ComputationError::MalformedName {
            name: name.to_string(),
            prefix_len,
        }),
    }
}

fn checked_time(record: &TestRecord, variant: &str, m: &Measurement) -> Result<f64> {
    if m.time.is_finite() && m.time >= 0.0 {
        Ok(m.time)
    } else {
        Err(ComputationError::InvalidTime {
            name: record.name.clone(),
            variant: variant.to_string(),
            time: m.time,
        }
        .into())
    }
}

/// Compute the speedup of a single record.
///
/// Returns `Ok(None)` when the record is filtered out: it has no baseline
/// kernel, or it has only a baseline and the policy is
/// [`EmptyVariantPolicy::Skip`].
pub fn speedup_for(
    record: &TestRecord,
    config: &AggregatorConfig,
) -> Result<Option<SpeedupRecord>> {
    let Some((baseline_key, baseline)) = find_baseline(record) else {
        debug!(name = %record.name, "no generic kernel, skipping");
        return Ok(None);
    };

    let Some((best_variant, best)) = best_specialized(record) else {
        return match config.empty_variants {
            EmptyVariantPolicy::Skip => {
                warn!(
                    name = %record.name,
                    baseline = baseline_key,
                    "no specialized kernels, skipping"
                );
                Ok(None)
            }
            EmptyVariantPolicy::Fail => Err(ComputationError::NoSpecializedVariants {
                name: record.name.clone(),
                baseline: baseline_key.to_string(),
            }
            .into()),
        };
    };

    let baseline_time = checked_time(record, baseline_key, baseline)?;
    if baseline_time == 0.0 {
        return Err(ComputationError::ZeroBaseline {
            name: record.name.clone(),
        }
        .into());
    }
    let best_time = checked_time(record, best_variant, best)?;

    let display = display_name(&record.name, config.prefix_len)?;
    let ratio = best_time / baseline_time;

    debug!(
        name = %record.name,
        baseline = baseline_key,
        best = best_variant,
        ratio,
        "computed speedup"
    );

    Ok(Some(SpeedupRecord {
        display_name: display.to_string(),
        ratio,
        baseline_key: baseline_key.to_string(),
        best_variant: best_variant.to_string(),
    }))
}

/// Compute speedups for every eligible record, in document order.
///
/// # Errors
///
/// Stops at the first record that raises a [`ComputationError`].
pub fn compute_speedups(
    doc: &ResultsDocument,
    config: &AggregatorConfig,
) -> Result<Vec<SpeedupRecord>> {
    let mut speedups = Vec::with_capacity(doc.len());
    for record in &doc.volk_tests {
        if let Some(speedup) = speedup_for(record, config)? {
            speedups.push(speedup);
        }
    }

    info!(
        records = doc.len(),
        plotted = speedups.len(),
        "computed kernel speedups"
    );
    Ok(speedups)
}
