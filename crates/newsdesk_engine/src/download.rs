use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use newsdesk_logging::desk_info;
use tempfile::NamedTempFile;
use thiserror::Error;

pub const EXPORT_FILE_PREFIX: &str = "aktualnosci_";
pub const EXPORT_FILE_EXTENSION: &str = "txt";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("{0:?} exists and is not a directory")]
    NotADirectory(PathBuf),
    #[error("cannot create {dir:?}: {source}")]
    CreateDir { dir: PathBuf, source: io::Error },
    #[error("cannot write {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Writes `bytes` to `dir/file_name` so readers see either the old file or
/// the complete new one. `dir` is created when missing; an existing file of
/// the same name is replaced.
pub fn save_atomically(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, SaveError> {
    match fs::metadata(dir) {
        Ok(meta) if !meta.is_dir() => return Err(SaveError::NotADirectory(dir.to_path_buf())),
        Ok(_) => {}
        Err(_) => fs::create_dir_all(dir).map_err(|source| SaveError::CreateDir {
            dir: dir.to_path_buf(),
            source,
        })?,
    }

    let path = dir.join(file_name);
    let write_err = |source| SaveError::Write {
        path: path.clone(),
        source,
    };
    let mut staged = NamedTempFile::new_in(dir).map_err(write_err)?;
    staged.write_all(bytes).map_err(write_err)?;
    staged.as_file().sync_all().map_err(write_err)?;
    staged.persist(&path).map_err(|err| write_err(err.error))?;
    Ok(path)
}

/// Returns today's date as `YYYY-MM-DD`.
pub type DateClock = Arc<dyn Fn() -> String + Send + Sync>;

/// Current UTC date, truncated to the day.
pub fn utc_today() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// `aktualnosci_<iso-date>.txt`
pub fn export_filename(iso_date: &str) -> String {
    format!("{EXPORT_FILE_PREFIX}{iso_date}.{EXPORT_FILE_EXTENSION}")
}

/// Saves export payloads into the download directory under a dated name.
#[derive(Clone)]
pub struct DownloadWriter {
    dir: PathBuf,
    today: DateClock,
}

impl DownloadWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self::with_clock(dir, Arc::new(utc_today))
    }

    pub fn with_clock(dir: PathBuf, today: DateClock) -> Self {
        Self { dir, today }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Same-day exports overwrite each other.
    pub fn save(&self, content: &[u8]) -> Result<PathBuf, SaveError> {
        let path = save_atomically(&self.dir, &export_filename(&(self.today)()), content)?;
        desk_info!("Saved export ({} bytes) to {:?}", content.len(), path);
        Ok(path)
    }
}

impl std::fmt::Debug for DownloadWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadWriter")
            .field("dir", &self.dir)
            .finish_non_exhaustive()
    }
}
