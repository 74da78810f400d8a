//! I/O operations for profile results and charts.
//!
//! Loading is all-or-nothing: a results document is either read and parsed
//! completely or an error is returned.

use crate::chart::ChartRenderer;
use crate::error::{Error, Result};
use crate::result::{ResultsDocument, SpeedupRecord};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Read a `volk_profile` results document from disk.
///
/// # Errors
///
/// Returns [`Error::Load`] when the file cannot be read and
/// [`Error::Parse`] when it is not valid JSON or has no `volk_tests` field.
pub fn load_results(path: impl AsRef<Path>) -> Result<ResultsDocument> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| Error::Load {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = parse_document(&content, path)?;
    debug!(path = %path.display(), records = doc.len(), "loaded results document");
    Ok(doc)
}

/// Parse a results document held in memory.
pub fn parse_results(content: &str) -> Result<ResultsDocument> {
    parse_document(content, Path::new("<memory>"))
}

fn parse_document(content: &str, path: &Path) -> Result<ResultsDocument> {
    serde_json::from_str(content).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Render a chart and write it to `path`, creating parent directories.
pub fn write_chart(
    renderer: &dyn ChartRenderer,
    records: &[SpeedupRecord],
    path: impl AsRef<Path>,
) -> Result<PathBuf> {
    let path = path.as_ref();
    let render_err = |source| Error::Render {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(render_err)?;
    }
    fs::write(path, renderer.render(records)).map_err(render_err)?;
    info!(path = %path.display(), bars = records.len(), "wrote chart");
    Ok(path.to_path_buf())
}
