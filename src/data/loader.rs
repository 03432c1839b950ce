use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::error::DataError;
use super::model::{Record, ZipDataset};

// ---------------------------------------------------------------------------
// Source location
// ---------------------------------------------------------------------------

/// Default dataset file name, as produced by the upstream scoring pipeline.
pub const DATASET_FILE: &str = "LA_County_Analysis_Final_with_Scores.csv";

/// Candidate locations for the dataset file, probed in order:
/// the name as given, next to the executable, and the working directory.
pub fn candidate_paths(name: &str) -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(name)];
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            candidates.push(dir.join(name));
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(name));
    }
    candidates
}

/// Probe the candidate paths for an existing source file.
///
/// This is the one user-visible failure path of the whole system: if no
/// candidate exists the session cannot start.
pub fn locate_source(name: &str) -> Result<PathBuf, DataError> {
    let candidates = candidate_paths(name);
    candidates
        .iter()
        .find(|p| p.exists())
        .cloned()
        .ok_or_else(|| DataError::SourceNotFound {
            name: name.to_string(),
            candidates,
        })
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse the dataset from a CSV file with the schema header row.
pub fn load_csv(path: &Path) -> Result<ZipDataset, DataError> {
    let mut reader = csv::Reader::from_path(path)?;

    let mut records: Vec<Record> = Vec::new();
    for (row, result) in reader.deserialize::<Record>().enumerate() {
        let record = result.map_err(|source| DataError::InvalidRow { row, source })?;
        records.push(record);
    }

    log::info!(
        "Loaded {} zip codes from {}",
        records.len(),
        path.display()
    );
    Ok(ZipDataset::from_records(records))
}

/// Locate and load the default dataset.
pub fn load_default() -> Result<Arc<ZipDataset>, DataError> {
    let path = locate_source(DATASET_FILE)?;
    Ok(Arc::new(load_csv(&path)?))
}

// ---------------------------------------------------------------------------
// Memoized loading
// ---------------------------------------------------------------------------

/// Load-once memoization: the parsed dataset is cached keyed by resolved
/// path and file modification time, and reloaded only when that key changes.
#[derive(Default)]
pub struct CachedLoader {
    cached: Option<(PathBuf, SystemTime, Arc<ZipDataset>)>,
}

impl CachedLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dataset for `path`, parsed at most once per (path, mtime) key.
    pub fn load(&mut self, path: &Path) -> Result<Arc<ZipDataset>, DataError> {
        let mtime = std::fs::metadata(path)?.modified()?;

        if let Some((cached_path, cached_mtime, dataset)) = &self.cached {
            if cached_path == path && *cached_mtime == mtime {
                return Ok(Arc::clone(dataset));
            }
        }

        let dataset = Arc::new(load_csv(path)?);
        self.cached = Some((path.to_path_buf(), mtime, Arc::clone(&dataset)));
        Ok(dataset)
    }
}
