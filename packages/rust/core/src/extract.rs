//! Zip extraction for downloaded artifact archives.

use std::fs::File;
use std::path::Path;

use artifactview_shared::{ArtifactViewError, Result};
use tracing::debug;
use zip::ZipArchive;

/// Extract `archive_path` into `destination`, preserving unix permissions.
///
/// A corrupt archive is an `Archive` error and aborts the extraction; the
/// caller decides whether that halts the whole run.
pub fn extract_archive(archive_path: &Path, destination: &Path) -> Result<()> {
    let file = File::open(archive_path).map_err(|e| ArtifactViewError::io(archive_path, e))?;

    let mut archive = ZipArchive::new(file)
        .map_err(|e| ArtifactViewError::Archive(format!("{}: {e}", archive_path.display())))?;

    let mut extracted = 0usize;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| {
            ArtifactViewError::Archive(format!("{}: entry {i}: {e}", archive_path.display()))
        })?;

        // Entry names can contain `..`; enclosed_name rejects those.
        let outpath = match entry.enclosed_name() {
            Some(path) => destination.join(path),
            None => continue,
        };

        if entry.name().ends_with('/') {
            std::fs::create_dir_all(&outpath).map_err(|e| ArtifactViewError::io(&outpath, e))?;
        } else {
            if let Some(parent) = outpath.parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| ArtifactViewError::io(parent, e))?;
                }
            }
            let mut outfile =
                File::create(&outpath).map_err(|e| ArtifactViewError::io(&outpath, e))?;
            std::io::copy(&mut entry, &mut outfile)
                .map_err(|e| ArtifactViewError::io(&outpath, e))?;
            extracted += 1;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode))
                    .map_err(|e| ArtifactViewError::io(&outpath, e))?;
            }
        }
    }

    debug!(
        files = extracted,
        path = %destination.display(),
        "archive extracted"
    );

    Ok(())
}
