//! Core domain types: the workflow-run reference parsed from a run URL.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ArtifactViewError, Result};

/// Default GitHub REST API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// The run URL shape named in validation errors and the CLI usage hint.
pub const RUN_URL_FORMAT: &str = "https://github.com/<owner>/<repo>/actions/runs/<run_id>";

/// Anchored pattern for GitHub Actions run URLs. Trailing path segments or
/// query strings after the run id are accepted and ignored.
static RUN_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://github\.com/([\w-]+)/([\w-]+)/actions/runs/(\d+)")
        .expect("run URL pattern is valid")
});

// ---------------------------------------------------------------------------
// RunRef
// ---------------------------------------------------------------------------

/// One workflow run, identified by owner, repository, and numeric run id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRef {
    /// Repository owner (user or organisation).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Numeric run id from the run URL.
    pub run_id: u64,
}

impl RunRef {
    /// Parse a GitHub Actions run URL.
    ///
    /// Accepts the canonical form plus anything after the run id (job pages,
    /// `?pr=` query strings); any other shape is a validation error whose
    /// message names the expected format.
    pub fn parse(input: &str) -> Result<Self> {
        let caps = RUN_URL_RE.captures(input.trim()).ok_or_else(|| {
            ArtifactViewError::validation(format!(
                "'{input}' is not a GitHub Actions run URL. \
                 Expected format: {RUN_URL_FORMAT}"
            ))
        })?;

        let run_id: u64 = caps[3].parse().map_err(|_| {
            ArtifactViewError::validation(format!("run id '{}' is out of range", &caps[3]))
        })?;

        Ok(Self {
            owner: caps[1].to_string(),
            repo: caps[2].to_string(),
            run_id,
        })
    }

    /// Canonical artifact-listing endpoint for this run on api.github.com.
    pub fn artifacts_url(&self) -> String {
        self.artifacts_url_for(DEFAULT_API_BASE)
    }

    /// Artifact-listing endpoint under an alternate API base (GitHub
    /// Enterprise hosts, mock servers in tests).
    pub fn artifacts_url_for(&self, api_base: &str) -> String {
        format!(
            "{}/repos/{}/{}/actions/runs/{}/artifacts",
            api_base.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.run_id
        )
    }
}

impl fmt::Display for RunRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} run {}", self.owner, self.repo, self.run_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_canonical_url() {
        let run =
            RunRef::parse("https://github.com/rust-lang/cargo/actions/runs/9234567890").unwrap();
        assert_eq!(run.owner, "rust-lang");
        assert_eq!(run.repo, "cargo");
        assert_eq!(run.run_id, 9234567890);
    }

    #[test]
    fn parse_allows_trailing_segments() {
        let run =
            RunRef::parse("https://github.com/octo-org/octo_repo/actions/runs/42/job/7?pr=12")
                .unwrap();
        assert_eq!(run.owner, "octo-org");
        assert_eq!(run.repo, "octo_repo");
        assert_eq!(run.run_id, 42);
    }

    #[test]
    fn parse_tolerates_surrounding_whitespace() {
        // Clipboard content often carries a trailing newline.
        let run = RunRef::parse("https://github.com/a/b/actions/runs/1\n").unwrap();
        assert_eq!(run.run_id, 1);
    }

    #[test]
    fn parse_rejects_other_hosts() {
        let err = RunRef::parse("https://gitlab.com/owner/repo/actions/runs/42").unwrap_err();
        assert!(matches!(err, ArtifactViewError::Validation { .. }));
        assert!(err.to_string().contains(RUN_URL_FORMAT));
    }

    #[test]
    fn parse_rejects_missing_or_non_numeric_run_id() {
        assert!(RunRef::parse("https://github.com/owner/repo/actions/runs/").is_err());
        assert!(RunRef::parse("https://github.com/owner/repo/actions/runs/abc").is_err());
    }

    #[test]
    fn parse_rejects_wrong_scheme_and_partial_paths() {
        assert!(RunRef::parse("http://github.com/owner/repo/actions/runs/42").is_err());
        assert!(RunRef::parse("https://github.com/owner/actions/runs/42").is_err());
        assert!(RunRef::parse("https://github.com/owner/repo/pull/42").is_err());
        assert!(RunRef::parse("not a url at all").is_err());
    }

    #[test]
    fn artifacts_url_round_trip() {
        let run = RunRef::parse("https://github.com/my-org/my_repo/actions/runs/123456").unwrap();
        assert_eq!(
            run.artifacts_url(),
            "https://api.github.com/repos/my-org/my_repo/actions/runs/123456/artifacts"
        );
    }

    #[test]
    fn artifacts_url_for_alternate_base() {
        let run = RunRef::parse("https://github.com/a/b/actions/runs/1").unwrap();
        assert_eq!(
            run.artifacts_url_for("http://127.0.0.1:8080/"),
            "http://127.0.0.1:8080/repos/a/b/actions/runs/1/artifacts"
        );
    }
}
