//! Mirror a flattened deployment source tree onto local disk.
//!
//! Entries are processed in flatten order. Directories are created before the
//! next entry is looked at, so a file's parent always exists by the time its
//! download task is spawned. File downloads run concurrently and never abort
//! each other; every outcome ends up in the [`MirrorReport`].

mod types;

use deployment_primitives::DeploymentId;
use source_tree::{flatten, EntryKind, FlatEntry, TreeNode};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use vercel_client::SourceApi;

pub use types::{FailedEntry, MirrorError, MirrorObserver, MirrorReport, Silent, WrittenFile};

pub struct SourceMirror {
    api: Arc<dyn SourceApi>,
    destination: PathBuf,
    observer: Arc<dyn MirrorObserver>,
    limit: Option<Arc<Semaphore>>,
}

type Download = JoinHandle<Result<u64, MirrorError>>;

impl SourceMirror {
    /// Mirror into `destination`, downloading through `api`
    pub fn new(api: Arc<dyn SourceApi>, destination: impl AsRef<Path>) -> Self {
        Self {
            api,
            destination: destination.as_ref().to_owned(),
            observer: Arc::new(Silent),
            limit: None,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn MirrorObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Cap the number of downloads in flight. Unbounded by default.
    pub fn with_concurrency_limit(mut self, max_downloads: usize) -> Self {
        self.limit = Some(Arc::new(Semaphore::new(max_downloads.max(1))));
        self
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Flatten `tree` and mirror it
    pub async fn mirror_tree(
        &self,
        tree: &TreeNode,
        id: &DeploymentId,
    ) -> Result<MirrorReport, MirrorError> {
        self.mirror(&flatten(tree), id).await
    }

    /// Materialize `entries` below the destination.
    ///
    /// Only a failure to create the destination itself is returned as an
    /// error; per-entry failures are collected in the report.
    pub async fn mirror(
        &self,
        entries: &[FlatEntry],
        id: &DeploymentId,
    ) -> Result<MirrorReport, MirrorError> {
        tokio::fs::create_dir_all(&self.destination)
            .await
            .map_err(|source| MirrorError::Destination {
                path: self.destination.clone(),
                source,
            })?;

        let mut report = MirrorReport::default();
        let mut downloads: Vec<(PathBuf, Download)> = Vec::new();

        for entry in entries {
            let local = match entry.local_path(&self.destination) {
                Ok(local) => local,
                Err(err) => {
                    self.record_failure(&mut report, PathBuf::from(&entry.path), err.into());
                    continue;
                }
            };

            if tokio::fs::try_exists(&local).await.unwrap_or(false) {
                tracing::debug!("{} exists, skipping", local.display());
                self.observer.entry_skipped(&local);
                report.skipped.push(local);
                continue;
            }

            match (entry.kind, entry.uid.as_deref()) {
                (EntryKind::Directory, _) => match tokio::fs::create_dir(&local).await {
                    Ok(()) => {
                        tracing::debug!("created {}", local.display());
                        self.observer.directory_created(&local);
                        report.directories.push(local);
                    }
                    Err(source) => {
                        let err = MirrorError::CreateDir {
                            path: local.clone(),
                            source,
                        };
                        self.record_failure(&mut report, local, err);
                    }
                },
                (_, Some(uid)) if entry.has_content() => {
                    let task = self.spawn_download(id.clone(), uid.to_string(), local.clone());
                    downloads.push((local, task));
                }
                (EntryKind::File, None) => {
                    let err = MirrorError::MissingUid {
                        path: entry.path.clone(),
                    };
                    self.record_failure(&mut report, local, err);
                }
                _ => {
                    tracing::debug!("ignoring {} without content", entry.path);
                    report.ignored.push(entry.path.clone());
                }
            }
        }

        for (path, task) in downloads {
            let outcome = task
                .await
                .unwrap_or_else(|join_err| Err(MirrorError::TaskAborted(join_err.to_string())));
            match outcome {
                Ok(bytes) => report.files.push(WrittenFile { path, bytes }),
                Err(error) => {
                    tracing::warn!("{}: {}", path.display(), error);
                    report.failed.push(FailedEntry { path, error });
                }
            }
        }

        Ok(report)
    }

    fn record_failure(&self, report: &mut MirrorReport, path: PathBuf, error: MirrorError) {
        tracing::warn!("{}: {}", path.display(), error);
        self.observer.entry_failed(&path, &error);
        report.failed.push(FailedEntry { path, error });
    }

    fn spawn_download(&self, id: DeploymentId, uid: String, path: PathBuf) -> Download {
        let api = Arc::clone(&self.api);
        let observer = Arc::clone(&self.observer);
        let limit = self.limit.clone();

        tokio::spawn(async move {
            let _permit = match limit {
                Some(semaphore) => Some(
                    semaphore
                        .acquire_owned()
                        .await
                        .map_err(|e| MirrorError::TaskAborted(e.to_string()))?,
                ),
                None => None,
            };

            observer.download_started(&path);
            let outcome = download(api.as_ref(), &id, &uid, &path).await;
            observer.download_finished(&path, outcome.as_ref().copied());
            outcome
        })
    }
}

async fn download(
    api: &dyn SourceApi,
    id: &DeploymentId,
    uid: &str,
    path: &Path,
) -> Result<u64, MirrorError> {
    let bytes = api.fetch_file_bytes(id, uid).await?;
    tokio::fs::write(path, &bytes)
        .await
        .map_err(|source| MirrorError::Write {
            path: path.to_owned(),
            source,
        })?;
    tracing::debug!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(bytes.len() as u64)
}
