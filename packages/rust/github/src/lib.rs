//! GitHub Actions REST client for artifact listing and archive download.
//!
//! Exactly two call shapes: enumerate the artifacts of one workflow run, and
//! stream each artifact's zip archive to a local file. Both carry the
//! `Authorization: token <value>` and `Accept: application/vnd.github.v3+json`
//! headers, installed once as client defaults.

mod types;

use std::path::Path;
use std::time::Duration;

use artifactview_shared::{ArtifactViewError, Result, RunRef};
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};

pub use types::{Artifact, ArtifactList};

/// Maximum redirects to follow (archive downloads redirect to blob storage).
const MAX_REDIRECTS: usize = 5;

/// Connect timeout in seconds. No total request timeout: archive bodies are
/// streamed and may legitimately take longer than any fixed deadline.
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Accept header value for the GitHub v3 REST API.
const ACCEPT_GITHUB_V3: &str = "application/vnd.github.v3+json";

/// Page size for the listing call.
const PER_PAGE: u32 = 100;

/// User-Agent string for API requests.
const USER_AGENT: &str = concat!("artifactview/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// GithubClient
// ---------------------------------------------------------------------------

/// Authenticated client for the GitHub Actions artifact endpoints.
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    api_base: String,
}

impl GithubClient {
    /// Build a client with the token installed in its default headers.
    pub fn new(token: &str, api_base: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        let mut auth = HeaderValue::from_str(&format!("token {token}")).map_err(|_| {
            ArtifactViewError::config(
                "GitHub token contains characters not permitted in an HTTP header",
            )
        })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_GITHUB_V3));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ArtifactViewError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base: api_base.into(),
        })
    }

    /// List the artifacts of the given run (single page, up to 100).
    ///
    /// A non-success status halts the caller; no retry.
    #[instrument(skip_all, fields(run = %run))]
    pub async fn list_artifacts(&self, run: &RunRef) -> Result<ArtifactList> {
        let url = run.artifacts_url_for(&self.api_base);

        debug!(%url, "listing artifacts");

        let response = self
            .client
            .get(&url)
            .query(&[("per_page", PER_PAGE)])
            .send()
            .await
            .map_err(|e| ArtifactViewError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArtifactViewError::Network(format!("{url}: HTTP {status}")));
        }

        let list: ArtifactList = response.json().await.map_err(|e| {
            ArtifactViewError::Network(format!("{url}: invalid listing response: {e}"))
        })?;

        info!(total = list.total_count, "artifact listing fetched");

        Ok(list)
    }

    /// Stream one artifact's zip archive to `dest`. Returns bytes written.
    ///
    /// Errors carry the artifact name so a failed download can be reported
    /// and skipped without stopping the remaining artifacts.
    #[instrument(skip_all, fields(artifact = %artifact.name))]
    pub async fn download_artifact(&self, artifact: &Artifact, dest: &Path) -> Result<u64> {
        let mut response = self
            .client
            .get(&artifact.archive_download_url)
            .send()
            .await
            .map_err(|e| ArtifactViewError::Network(format!("{}: {e}", artifact.name)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArtifactViewError::Network(format!(
                "{}: HTTP {status}",
                artifact.name
            )));
        }

        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| ArtifactViewError::io(dest, e))?;

        let mut written: u64 = 0;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| ArtifactViewError::Network(format!("{}: {e}", artifact.name)))?
        {
            file.write_all(&chunk)
                .await
                .map_err(|e| ArtifactViewError::io(dest, e))?;
            written += chunk.len() as u64;
        }

        file.flush()
            .await
            .map_err(|e| ArtifactViewError::io(dest, e))?;

        debug!(bytes = written, path = %dest.display(), "archive downloaded");

        Ok(written)
    }
}
