//! Settings and aggregation policy.
//!
//! Settings are layered as: built-in defaults, an optional TOML file, then
//! environment variables prefixed with `VOLK_SPEEDUP_`. Command-line flags are
//! applied on top by the binary.
//!
//! # Example
//!
//! ```no_run
//! use volk_speedup::config::Settings;
//!
//! let settings = Settings::load(None)?;
//! let aggregator = settings.aggregator();
//! # Ok::<(), volk_speedup::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::speedup::NAMESPACE_PREFIX_LEN;
use ::config::{Config, Environment, File, FileFormat, FileSourceFile};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default results file written by `volk_profile -j`.
pub const DEFAULT_INPUT: &str = "volk_results.json";

/// Settings file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "volk-speedup.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "VOLK_SPEEDUP";

/// What to do with a record that has a baseline but nothing to compare it to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyVariantPolicy {
    /// Drop the record from the output.
    #[default]
    Skip,
    /// Abort the run with a computation error.
    Fail,
}

impl fmt::Display for EmptyVariantPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => f.write_str("skip"),
            Self::Fail => f.write_str("fail"),
        }
    }
}

impl FromStr for EmptyVariantPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "fail" => Ok(Self::Fail),
            other => Err(Error::Config(format!(
                "invalid empty-variant policy: {other} (expected skip or fail)"
            ))),
        }
    }
}

/// Knobs for the speedup aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorConfig {
    /// Handling of baseline-only records.
    pub empty_variants: EmptyVariantPolicy,
    /// Characters stripped from the front of each operation name.
    pub prefix_len: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            empty_variants: EmptyVariantPolicy::default(),
            prefix_len: NAMESPACE_PREFIX_LEN,
        }
    }
}

impl AggregatorConfig {
    /// Config that aborts on baseline-only records.
    pub fn strict() -> Self {
        Self {
            empty_variants: EmptyVariantPolicy::Fail,
            ..Self::default()
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Multi-line human readable output.
    #[default]
    Pretty,
    /// Single-line output.
    Compact,
    /// Structured JSON lines.
    Json,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(Error::Config(format!(
                "invalid log format: {other} (expected pretty, compact or json)"
            ))),
        }
    }
}

/// Run settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Results document to read.
    pub input: PathBuf,
    /// Handling of baseline-only records.
    pub empty_variants: EmptyVariantPolicy,
    /// Default log level when `RUST_LOG` is unset.
    pub log_level: String,
    /// Log output format.
    pub log_format: LogFormat,
    /// Where to write the SVG chart, if anywhere.
    pub svg: Option<PathBuf>,
    /// Width in cells of a full-scale terminal bar.
    pub terminal_width: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            empty_variants: EmptyVariantPolicy::default(),
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
            svg: None,
            terminal_width: 50,
        }
    }
}

impl Settings {
    /// Load settings from defaults, a settings file and the environment.
    ///
    /// With `path` set the file must exist. Without it,
    /// [`DEFAULT_CONFIG_FILE`] is read only if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p).format(FileFormat::Toml).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE)
                .format(FileFormat::Toml)
                .required(false),
        };
        Self::build(file, Environment::with_prefix(ENV_PREFIX))
    }

    /// Parse settings from TOML text, layered over the defaults.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize::<Self>()?;
        settings.validate()?;
        Ok(settings)
    }

    fn build(file: File<FileSourceFile, FileFormat>, env: Environment) -> Result<Self> {
        let settings = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize::<Self>()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.terminal_width == 0 {
            return Err(Error::Config("terminal_width must be positive".into()));
        }
        Ok(())
    }

    /// Aggregator configuration derived from these settings.
    pub fn aggregator(&self) -> AggregatorConfig {
        AggregatorConfig {
            empty_variants: self.empty_variants,
            ..AggregatorConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const ENV_VARS: [&str; 2] = ["VOLK_SPEEDUP_TERMINAL_WIDTH", "VOLK_SPEEDUP_EMPTY_VARIANTS"];

    fn clear_env() {
        for var in ENV_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.input, PathBuf::from("volk_results.json"));
        assert_eq!(settings.empty_variants, EmptyVariantPolicy::Skip);
        assert_eq!(settings.aggregator().prefix_len, 5);
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let settings = Settings::from_toml_str(
            "input = \"other.json\"\nempty_variants = \"fail\"\nlog_format = \"json\"\n",
        )
        .unwrap();
        assert_eq!(settings.input, PathBuf::from("other.json"));
        assert_eq!(settings.empty_variants, EmptyVariantPolicy::Fail);
        assert_eq!(settings.log_format, LogFormat::Json);
        assert_eq!(settings.terminal_width, 50);
        assert_eq!(settings.aggregator(), AggregatorConfig::strict());
    }

    #[test]
    fn test_zero_width_rejected() {
        let err = Settings::from_toml_str("terminal_width = 0\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    #[serial]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "terminal_width = 20\n").unwrap();
        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.terminal_width, 20);
    }

    #[test]
    #[serial]
    fn test_load_missing_required_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "terminal_width = 30\nempty_variants = \"skip\"\n").unwrap();

        env::set_var("VOLK_SPEEDUP_TERMINAL_WIDTH", "20");
        env::set_var("VOLK_SPEEDUP_EMPTY_VARIANTS", "fail");
        let loaded = Settings::load(Some(&path));
        clear_env();

        let settings = loaded.unwrap();
        assert_eq!(settings.terminal_width, 20);
        assert_eq!(settings.empty_variants, EmptyVariantPolicy::Fail);
        assert_eq!(settings.input, PathBuf::from(DEFAULT_INPUT));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("skip".parse::<EmptyVariantPolicy>().unwrap(), EmptyVariantPolicy::Skip);
        assert_eq!("FAIL".parse::<EmptyVariantPolicy>().unwrap(), EmptyVariantPolicy::Fail);
        assert!("maybe".parse::<EmptyVariantPolicy>().is_err());
    }
}
