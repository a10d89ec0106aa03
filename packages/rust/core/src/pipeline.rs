//! End-to-end fetch pipeline: run reference → listing → download → extract.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{info, instrument, warn};

use artifactview_github::GithubClient;
use artifactview_shared::{ArtifactViewError, Result, RunRef};

use crate::extract;

/// Outcome of one fetch run.
#[derive(Debug)]
pub struct FetchReport {
    /// Artifacts the listing reported for the run.
    pub artifacts_found: usize,
    /// Artifacts downloaded and extracted.
    pub artifacts_fetched: usize,
    /// Artifacts skipped after a failed download.
    pub artifacts_skipped: usize,
    /// (artifact name, error detail) for each skipped artifact.
    pub errors: Vec<(String, String)>,
    /// Total elapsed time.
    pub duration: Duration,
    /// The output root that was populated.
    pub output_root: PathBuf,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called before each artifact's download starts.
    fn artifact_started(&self, name: &str, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, report: &FetchReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn artifact_started(&self, _name: &str, _current: usize, _total: usize) {}
    fn done(&self, _report: &FetchReport) {}
}

/// Run the full fetch pipeline for one workflow run.
///
/// 1. List the run's artifacts
/// 2. Reset the output root (skipped entirely when the listing is empty)
/// 3. Download and extract each artifact in order
///
/// A failed download skips that artifact and continues with the next; a
/// corrupt archive aborts the whole run.
#[instrument(skip_all, fields(run = %run, output_root = %output_root.display()))]
pub async fn fetch_run(
    client: &GithubClient,
    run: &RunRef,
    output_root: &Path,
    progress: &dyn ProgressReporter,
) -> Result<FetchReport> {
    let start = Instant::now();

    progress.phase("Listing artifacts");
    let listing = client.list_artifacts(run).await?;
    let total = listing.artifacts.len();

    // Empty run: report it and leave the filesystem untouched.
    if listing.artifacts.is_empty() {
        info!(%run, "run has no artifacts");
        let report = FetchReport {
            artifacts_found: 0,
            artifacts_fetched: 0,
            artifacts_skipped: 0,
            errors: vec![],
            duration: start.elapsed(),
            output_root: output_root.to_path_buf(),
        };
        progress.done(&report);
        return Ok(report);
    }

    reset_output_root(output_root)?;

    let mut fetched = 0usize;
    let mut errors: Vec<(String, String)> = Vec::new();

    for (i, artifact) in listing.artifacts.iter().enumerate() {
        progress.artifact_started(&artifact.name, i + 1, total);

        if artifact.expired {
            warn!(
                artifact = %artifact.name,
                "artifact is past its retention period, download will likely fail"
            );
        }

        let stem = fs_safe_name(&artifact.name);
        let artifact_dir = output_root.join(&stem);
        std::fs::create_dir_all(&artifact_dir)
            .map_err(|e| ArtifactViewError::io(&artifact_dir, e))?;

        let zip_path = artifact_dir.join(format!("{stem}.zip"));

        match client.download_artifact(artifact, &zip_path).await {
            Ok(bytes) => {
                info!(artifact = %artifact.name, bytes, "artifact downloaded");
            }
            Err(e) => {
                warn!(artifact = %artifact.name, error = %e, "download failed, skipping artifact");
                errors.push((artifact.name.clone(), e.to_string()));
                // A skipped artifact leaves no directory in the served tree.
                let _ = std::fs::remove_dir_all(&artifact_dir);
                continue;
            }
        }

        extract::extract_archive(&zip_path, &artifact_dir)?;
        fetched += 1;
    }

    let report = FetchReport {
        artifacts_found: total,
        artifacts_fetched: fetched,
        artifacts_skipped: errors.len(),
        errors,
        duration: start.elapsed(),
        output_root: output_root.to_path_buf(),
    };

    progress.done(&report);

    info!(
        found = report.artifacts_found,
        fetched = report.artifacts_fetched,
        skipped = report.artifacts_skipped,
        elapsed_ms = report.duration.as_millis(),
        "fetch pipeline complete"
    );

    Ok(report)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Delete and recreate the output root. Prior contents are lost.
fn reset_output_root(root: &Path) -> Result<()> {
    if root.exists() {
        info!(path = %root.display(), "removing existing output root");
        std::fs::remove_dir_all(root).map_err(|e| ArtifactViewError::io(root, e))?;
    }
    std::fs::create_dir_all(root).map_err(|e| ArtifactViewError::io(root, e))?;
    Ok(())
}

/// Map an artifact name to a filesystem-safe directory/file stem.
///
/// Path separators are replaced and the dot segments `.` and `..` are
/// renamed so a hostile name cannot escape the output root; ordinary names
/// pass through unchanged.
fn fs_safe_name(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    if safe.is_empty() || safe == "." || safe == ".." {
        "artifact".to_string()
    } else {
        safe
    }
}
