//! Error types for speedup analysis.
//!
//! Every failure aborts the run. Records without a baseline kernel are
//! filtered by the aggregator and never surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while computing a single record's speedup.
#[derive(Debug, Error)]
pub enum ComputationError {
    /// The baseline kernel reported a time of zero.
    #[error("baseline time for {name} is zero, ratio is undefined")]
    ZeroBaseline {
        /// Kernel name.
        name: String,
    },

    /// A consulted measurement holds a negative or non-finite time.
    #[error("invalid time {time} for variant {variant} of {name}")]
    InvalidTime {
        /// Kernel name.
        name: String,
        /// Variant whose time is invalid.
        variant: String,
        /// The offending time.
        time: f64,
    },

    /// The operation name is not longer than the namespace prefix.
    #[error("operation name {name:?} is too short to strip a {prefix_len}-character prefix")]
    MalformedName {
        /// Kernel name as found in the document.
        name: String,
        /// Characters that should have been stripped.
        prefix_len: usize,
    },

    /// The record has a baseline but no specialized kernels to compare.
    #[error("{name} has a baseline ({baseline}) but no specialized variants")]
    NoSpecializedVariants {
        /// Kernel name.
        name: String,
        /// Baseline spelling present in the record.
        baseline: String,
    },
}

/// Top-level error for the speedup pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// The results file could not be opened or read.
    #[error("failed to read results file {path}: {source}")]
    Load {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The results document is not valid JSON or lacks `volk_tests`.
    #[error("failed to parse results document {path}: {source}")]
    Parse {
        /// Document that was parsed.
        path: PathBuf,
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },

    /// A record's ratio could not be computed.
    #[error(transparent)]
    Computation(#[from] ComputationError),

    /// The chart could not be written.
    #[error("failed to write chart {path}: {source}")]
    Render {
        /// Chart file that was written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Settings could not be assembled.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<::config::ConfigError> for Error {
    fn from(err: ::config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

impl Error {
    /// Whether this error came from reading the input file.
    pub fn is_load(&self) -> bool {
        matches!(self, Error::Load { .. })
    }

    /// Whether this error came from parsing the input document.
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }
}

/// Result type for speedup operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computation_error_converts() {
        let err: Error = ComputationError::ZeroBaseline {
            name: "volk_32f_add_32f".into(),
        }
        .into();
        assert!(matches!(
            err,
            Error::Computation(ComputationError::ZeroBaseline { .. })
        ));
        assert!(err.to_string().contains("volk_32f_add_32f"));
    }

    #[test]
    fn test_load_error_display_includes_path() {
        let err = Error::Load {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.is_load());
        assert!(!err.is_parse());
        assert!(err.to_string().contains("missing.json"));
    }
}
