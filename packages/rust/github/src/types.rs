//! Wire types for the GitHub Actions REST API.

use chrono::{DateTime, Utc};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Artifact
// ---------------------------------------------------------------------------

/// One artifact descriptor from the listing response. Never mutated locally;
/// unknown response fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Artifact {
    /// Numeric artifact id.
    pub id: u64,
    /// Artifact name, used (filesystem-sanitized) as the directory and zip name.
    pub name: String,
    /// Uncompressed size reported by the API.
    pub size_in_bytes: u64,
    /// Endpoint that streams the artifact's zip archive.
    pub archive_download_url: String,
    /// Whether the artifact has passed its retention period.
    #[serde(default)]
    pub expired: bool,
    /// When the artifact was uploaded.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// When the artifact will be (or was) deleted by retention.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Listing envelope returned by `GET .../runs/{run_id}/artifacts`.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactList {
    /// Total artifact count for the run.
    pub total_count: u64,
    /// The artifacts themselves.
    pub artifacts: Vec<Artifact>,
}
