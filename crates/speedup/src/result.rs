//! Profile result types.
//!
//! Mirrors the JSON document written by `volk_profile -j`. Only `name`,
//! `results` and each measurement's `time` drive the computation; the other
//! harness fields are kept for reporting.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A complete `volk_profile` results document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsDocument {
    /// Benchmarked operations, in document order.
    pub volk_tests: Vec<TestRecord>,
}

impl ResultsDocument {
    /// Number of test records in the document.
    pub fn len(&self) -> usize {
        self.volk_tests.len()
    }

    /// Whether the document holds no test records.
    pub fn is_empty(&self) -> bool {
        self.volk_tests.is_empty()
    }
}

/// One benchmarked kernel operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRecord {
    /// Kernel name including the `volk_` namespace prefix.
    pub name: String,
    /// Per-variant measurements keyed by variant (architecture) name.
    pub results: BTreeMap<String, Measurement>,
    /// Vector length used by the harness.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlen: Option<u64>,
    /// Iterations run per variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iter: Option<u64>,
    /// Fastest aligned variant as chosen by the harness.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_arch_a: Option<String>,
    /// Fastest unaligned variant as chosen by the harness.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_arch_u: Option<String>,
}

impl TestRecord {
    /// Create a record with no measurements.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            results: BTreeMap::new(),
            vlen: None,
            iter: None,
            best_arch_a: None,
            best_arch_u: None,
        }
    }

    /// Add a variant's time.
    #[must_use]
    pub fn with_result(mut self, variant: impl Into<String>, time: f64) -> Self {
        self.results.insert(variant.into(), Measurement::new(time));
        self
    }
}

/// Timing outcome of a single kernel variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Elapsed time; lower is better.
    pub time: f64,
    /// Unit reported by the harness, usually `ms`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    /// Fields not interpreted here.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Measurement {
    /// Create a measurement from a bare time.
    pub fn new(time: f64) -> Self {
        Self {
            time,
            units: None,
            extra: serde_json::Map::new(),
        }
    }
}

/// Speedup of the fastest specialized kernel over the baseline for one
/// operation.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedupRecord {
    /// Operation name with the namespace prefix removed.
    pub display_name: String,
    /// Best specialized time divided by baseline time.
    pub ratio: f64,
    /// Baseline spelling that was used.
    pub baseline_key: String,
    /// Variant that achieved the best specialized time.
    pub best_variant: String,
}

impl SpeedupRecord {
    /// Whether the specialized kernel beats the baseline.
    pub fn is_faster(&self) -> bool {
        self.ratio < 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_keeps_unknown_fields() {
        let m: Measurement =
            serde_json::from_str(r#"{"name":"avx","time":1.5,"units":"ms"}"#).unwrap();
        assert_eq!(m.time, 1.5);
        assert_eq!(m.units.as_deref(), Some("ms"));
        assert_eq!(m.extra.get("name"), Some(&serde_json::json!("avx")));
    }

    #[test]
    fn test_record_optional_fields_default() {
        let r: TestRecord =
            serde_json::from_str(r#"{"name":"volk_32f_add","results":{}}"#).unwrap();
        assert!(r.vlen.is_none());
        assert!(r.best_arch_a.is_none());
        assert!(r.results.is_empty());
    }

    #[test]
    fn test_measurement_requires_time() {
        let parsed: Result<Measurement, _> = serde_json::from_str(r#"{"units":"ms"}"#);
        assert!(parsed.is_err());
    }
}
