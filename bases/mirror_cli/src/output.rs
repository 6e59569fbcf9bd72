// bases/mirror_cli/src/output.rs
use crate::config::ConfigError;
use indicatif::{HumanBytes, MultiProgress, ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use source_mirror::{MirrorError, MirrorObserver, MirrorReport};
use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(80);

pub struct OutputHandler {
    verbose: bool,
    progress: MultiProgress,
}

impl OutputHandler {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            progress: MultiProgress::new(),
        }
    }

    /// Show a spinner while `task` runs, then mark it done or failed
    pub async fn track<T, E, F>(&self, message: &str, task: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        let spinner = spinner(&self.progress, message.to_string());
        let outcome = task.await;
        finish(&spinner, message, outcome.is_ok());
        outcome
    }

    /// Observer drawing one spinner per file download
    pub fn download_observer(&self) -> Arc<DownloadProgress> {
        Arc::new(DownloadProgress {
            progress: self.progress.clone(),
            spinners: Mutex::new(HashMap::new()),
            verbose: self.verbose,
        })
    }

    pub fn print_summary(&self, report: &MirrorReport, destination: &Path) {
        println!("{} into {}", summary_line(report), destination.display());

        if self.verbose {
            for skipped in &report.skipped {
                println!("  skipped {}", skipped.display());
            }
            for ignored in &report.ignored {
                println!("  ignored {}", ignored);
            }
        }

        if !report.is_complete() {
            println!(
                "{}",
                format!("{} entries could not be mirrored:", report.failed.len())
                    .bold()
                    .red()
            );
            for failed in &report.failed {
                println!("  {}: {}", failed.path.display(), cause_chain(&failed.error));
            }
        }
    }

    pub fn print_config_error(&self, config_error: &ConfigError) {
        println!("{}", config_error.to_string().bold().red());
        match config_error {
            ConfigError::MissingToken => {
                println!("\nSet VERCEL_TOKEN in a .env file or pass --token");
            }
            ConfigError::MissingDeployment => {
                println!(
                    "\ne.g: vercel-source example-5ik51k4n7.vercel.app\
                     \ne.g: vercel-source dpl_6CR1uw9hBdpWgrMvPkncsTGRC18A"
                );
            }
            ConfigError::Api(_) => {}
        }
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        println!("{}", diagnostic(error).bold().red());

        if self.verbose {
            println!("\nError details:");
            error.chain().skip(1).for_each(|cause| {
                println!("  caused by: {}", cause);
            });
        }
    }
}

/// Spinners for in-flight downloads, keyed by local path
pub struct DownloadProgress {
    progress: MultiProgress,
    spinners: Mutex<HashMap<PathBuf, ProgressBar>>,
    verbose: bool,
}

impl MirrorObserver for DownloadProgress {
    fn directory_created(&self, path: &Path) {
        if self.verbose {
            self.progress
                .println(format!("{} {}", "+".green(), path.display()))
                .ok();
        }
    }

    fn entry_failed(&self, path: &Path, error: &MirrorError) {
        if let Some(line) = self.failure_line(path, error) {
            self.progress.println(line).ok();
        }
    }

    fn download_started(&self, path: &Path) {
        let spinner = spinner(&self.progress, downloading(path));
        self.spinners.lock().insert(path.to_owned(), spinner);
    }

    fn download_finished(&self, path: &Path, outcome: Result<u64, &MirrorError>) {
        if let Some(spinner) = self.spinners.lock().remove(path) {
            finish(&spinner, &downloading(path), outcome.is_ok());
        }
    }
}

impl DownloadProgress {
    /// Failures are listed in the summary, so live lines are verbose only
    fn failure_line(&self, path: &Path, error: &MirrorError) -> Option<String> {
        self.verbose
            .then(|| format!("{} {}: {}", "✖".red(), path.display(), error))
    }
}

fn downloading(path: &Path) -> String {
    format!("Downloading {}", path.display())
}

fn spinner(progress: &MultiProgress, message: String) -> ProgressBar {
    let spinner = progress.add(ProgressBar::new_spinner());
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(TICK);
    spinner
}

fn finish(spinner: &ProgressBar, message: &str, succeeded: bool) {
    let mark = if succeeded {
        "✔".green().to_string()
    } else {
        "✖".red().to_string()
    };
    spinner.set_style(
        ProgressStyle::with_template("{msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.finish_with_message(format!("{} {}", mark, message));
}

fn cause_chain(error: &dyn std::error::Error) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        // messages that already embed their source
        let text = cause.to_string();
        if !rendered.contains(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        source = cause.source();
    }
    rendered
}

/// Fatal error with its whole context chain on one line
pub fn diagnostic(error: &color_eyre::Report) -> String {
    format!("Error: {:#}", error)
}

/// One-line account of a run, without styling
pub fn summary_line(report: &MirrorReport) -> String {
    let mut parts = vec![
        format!("{} files", report.files.len()),
        format!("{} directories", report.directories.len()),
        format!("{} skipped", report.skipped.len()),
    ];
    if !report.failed.is_empty() {
        parts.push(format!("{} failed", report.failed.len()));
    }
    format!(
        "Mirrored {} ({})",
        parts.join(", "),
        HumanBytes(report.written_bytes())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use source_mirror::{FailedEntry, WrittenFile};

    #[test]
    fn summary_of_clean_run() {
        let report = MirrorReport {
            directories: vec![PathBuf::from("out/sub")],
            files: vec![
                WrittenFile { path: PathBuf::from("out/a.txt"), bytes: 1024 },
                WrittenFile { path: PathBuf::from("out/sub/b.txt"), bytes: 1024 },
            ],
            ..Default::default()
        };
        assert_eq!(
            summary_line(&report),
            "Mirrored 2 files, 1 directories, 0 skipped (2.00 KiB)"
        );
    }

    #[test]
    fn summary_mentions_failures() {
        let report = MirrorReport {
            skipped: vec![PathBuf::from("out/a.txt")],
            failed: vec![FailedEntry {
                path: PathBuf::from("out/b.txt"),
                error: MirrorError::MissingUid { path: "src/b.txt".to_string() },
            }],
            ..Default::default()
        };
        assert_eq!(
            summary_line(&report),
            "Mirrored 0 files, 0 directories, 1 skipped, 1 failed (0 B)"
        );
    }

    #[test]
    fn cause_chain_includes_sources() {
        let error = MirrorError::Write {
            path: PathBuf::from("out/a.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(cause_chain(&error), "failed to write out/a.txt: denied");
    }

    #[test]
    fn diagnostic_shows_every_cause() {
        use color_eyre::eyre::WrapErr;

        let error = Err::<(), _>(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))
            .wrap_err("could not read the tree")
            .unwrap_err();
        assert_eq!(diagnostic(&error), "Error: could not read the tree: gone");
    }

    #[test]
    fn failures_are_printed_live_only_when_verbose() {
        let error = MirrorError::MissingUid { path: "src/b.txt".to_string() };
        let path = Path::new("out/b.txt");

        let quiet = OutputHandler::new(false).download_observer();
        assert_eq!(quiet.failure_line(path, &error), None);

        let verbose = OutputHandler::new(true).download_observer();
        let line = verbose.failure_line(path, &error).unwrap();
        assert!(line.contains("out/b.txt"));
        assert!(line.contains(&error.to_string()));
    }

    #[test]
    fn cause_chain_skips_repeated_messages() {
        let error = MirrorError::Download(vercel_client::ClientError::NotFound {
            what: "file uid-a".to_string(),
        });
        assert_eq!(cause_chain(&error), "download failed: file uid-a not found");
    }
}
