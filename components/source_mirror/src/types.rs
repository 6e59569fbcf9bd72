use source_tree::PathError;
use std::path::{Path, PathBuf};
use thiserror::Error;
use vercel_client::ClientError;

#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("cannot create destination {path}")]
    Destination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    UnsafePath(#[from] PathError),

    #[error("file entry {path} has no uid")]
    MissingUid { path: String },

    #[error("failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("download failed: {0}")]
    Download(#[from] ClientError),

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("download task aborted: {0}")]
    TaskAborted(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub bytes: u64,
}

#[derive(Debug)]
pub struct FailedEntry {
    /// Local path, or the remote path when it could not be mapped
    pub path: PathBuf,
    pub error: MirrorError,
}

/// Outcome of every entry of one mirror run
#[derive(Debug, Default)]
pub struct MirrorReport {
    pub directories: Vec<PathBuf>,
    pub files: Vec<WrittenFile>,
    /// Already present locally, left untouched
    pub skipped: Vec<PathBuf>,
    /// Remote entries without content (lambdas, bare symlinks)
    pub ignored: Vec<String>,
    pub failed: Vec<FailedEntry>,
}

impl MirrorReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Directories created plus files written
    pub fn writes(&self) -> usize {
        self.directories.len() + self.files.len()
    }

    pub fn written_bytes(&self) -> u64 {
        self.files.iter().map(|file| file.bytes).sum()
    }
}

/// Progress hooks, called as entries are processed.
///
/// `download_started` and `download_finished` run on the download tasks.
pub trait MirrorObserver: Send + Sync {
    fn directory_created(&self, _path: &Path) {}
    fn entry_skipped(&self, _path: &Path) {}
    fn entry_failed(&self, _path: &Path, _error: &MirrorError) {}
    fn download_started(&self, _path: &Path) {}
    fn download_finished(&self, _path: &Path, _outcome: Result<u64, &MirrorError>) {}
}

/// Observer that ignores everything
pub struct Silent;

impl MirrorObserver for Silent {}
