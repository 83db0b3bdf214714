// 🧭 Orchestrator - fetch, parse, merge, serialize, write
//
// Strictly sequential. Any stage error aborts the run before the output file
// is touched.

use crate::config::Config;
use crate::error::{MergeError, Result};
use crate::fetcher::RemoteStore;
use crate::merger::{MergeEngine, MergeReport};
use crate::parser::parse_records;
use crate::serializer::serialize_records;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Absolute path of the written file
    pub output_path: PathBuf,
    pub report: MergeReport,
}

/// Run one merge against `store` with `config`, returning the output path.
pub fn run(config: &Config, store: &dyn RemoteStore) -> Result<RunSummary> {
    config.validate()?;

    let base_path = config.base_path();
    let incoming_path = config.incoming_path();

    info!(path = %base_path, "fetching base file");
    let base_text = store.fetch(&base_path)?;

    info!(path = %incoming_path, "fetching incoming file");
    let incoming_text = store.fetch(&incoming_path)?;

    let base = parse_records(&base_text, &base_path, &config.id_column)?;
    let incoming = parse_records(&incoming_text, &incoming_path, &config.id_column)?;
    info!(base = base.len(), incoming = incoming.len(), "parsed input files");

    let engine = MergeEngine::with_policy(config.empty_id_policy);
    let outcome = engine.merge(base, incoming);
    info!(
        updated = outcome.report.updated,
        appended = outcome.report.appended,
        policy = outcome.report.empty_id_policy.name(),
        "merged records"
    );

    let text = serialize_records(&outcome.records)?;

    let output_path = resolve_output_path(&config.output_path)?;
    write_output(&output_path, &text)?;
    info!(path = %output_path.display(), bytes = text.len(), "wrote merged file");

    Ok(RunSummary {
        output_path,
        report: outcome.report,
    })
}

/// Relative paths resolve against the current working directory
fn resolve_output_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    let cwd = std::env::current_dir().map_err(|source| MergeError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(cwd.join(path))
}

/// Overwrites any existing file
fn write_output(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|source| MergeError::Write {
        path: path.to_path_buf(),
        source,
    })
}
