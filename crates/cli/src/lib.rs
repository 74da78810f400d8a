//! CLI for VOLK kernel speedup charts.
//!
//! Loads a `volk_profile -j` results file, computes the fastest-kernel versus
//! generic-kernel ratio for every operation and draws it as a bar chart on the
//! terminal and, optionally, as an SVG file.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use volk_speedup::config::{LogFormat, Settings};
use volk_speedup::{
    compute_speedups, io, markdown, ChartRenderer, EmptyVariantPolicy, SvgChart, TerminalChart,
};

/// VOLK speedup CLI.
#[derive(Parser, Debug)]
#[command(name = "volk-speedup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Results file written by `volk_profile -j` (default: volk_results.json).
    pub file: Option<PathBuf>,

    /// Also write the chart as SVG to this path.
    #[arg(long, value_name = "PATH")]
    pub svg: Option<PathBuf>,

    /// Do not draw the terminal chart.
    #[arg(long)]
    pub no_terminal: bool,

    /// Print a markdown table of the ratios.
    #[arg(long)]
    pub summary: bool,

    /// Handling of operations that only have a generic kernel: skip or fail.
    #[arg(long, value_name = "POLICY")]
    pub empty_variants: Option<EmptyVariantPolicy>,

    /// Settings file (TOML).
    #[arg(short, long, value_name = "PATH", env = "VOLK_SPEEDUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log format: pretty, compact or json.
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve settings: defaults, settings file, environment, then flags.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref())
            .context("failed to load settings")?;

        if let Some(file) = &self.file {
            settings.input = file.clone();
        }
        if let Some(svg) = &self.svg {
            settings.svg = Some(svg.clone());
        }
        if let Some(policy) = self.empty_variants {
            settings.empty_variants = policy;
        }
        if let Some(format) = self.log_format {
            settings.log_format = format;
        }
        if self.verbose {
            settings.log_level = "debug".to_string();
        }
        Ok(settings)
    }

    /// Which outputs to produce on stdout.
    pub fn report(&self) -> Report {
        Report {
            terminal: !self.no_terminal,
            summary: self.summary,
        }
    }
}

/// Stdout outputs selected for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    /// Draw the terminal bar chart.
    pub terminal: bool,
    /// Print the markdown summary.
    pub summary: bool,
}

impl Default for Report {
    fn default() -> Self {
        Self {
            terminal: true,
            summary: false,
        }
    }
}

/// Install the tracing subscriber. Logs go to stderr.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn setup_logging(settings: &Settings) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match settings.log_format {
        LogFormat::Json => subscriber.json().try_init(),
        LogFormat::Compact => subscriber.compact().try_init(),
        LogFormat::Pretty => subscriber.pretty().try_init(),
    }
    .map_err(|e| anyhow!(e))
}

/// Load, compute and render according to `settings`.
///
/// Returns the number of operations plotted.
pub fn execute(settings: &Settings, report: Report, out: &mut dyn Write) -> Result<usize> {
    let doc = io::load_results(&settings.input)?;
    info!(path = %settings.input.display(), records = doc.len(), "loaded results");

    let speedups = compute_speedups(&doc, &settings.aggregator())?;

    if let Some(path) = &settings.svg {
        io::write_chart(&SvgChart::default(), &speedups, path)?;
    }
    if report.terminal {
        let chart = TerminalChart::new(settings.terminal_width);
        write!(out, "{}", chart.render(&speedups))?;
    }
    if report.summary {
        writeln!(out)?;
        write!(out, "{}", markdown::generate_summary(&speedups))?;
    }
    out.flush()?;

    Ok(speedups.len())
}

/// Run the CLI with the process arguments.
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if any stage fails.
pub fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let settings = cli.settings()?;
    setup_logging(&settings)?;

    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    let plotted = execute(&settings, cli.report(), &mut lock)?;
    info!(plotted, "done");
    Ok(())
}
