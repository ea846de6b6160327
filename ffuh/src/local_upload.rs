use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use tempfile::{Builder, TempPath};
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, info, instrument, warn};

use crate::{
    config::UploadConfig,
    error::{UploadError, UploadResult},
    naming::{generate_name, random_file_name},
};

/// A file written to the local upload directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Name of the multipart field
    pub field_name: Option<String>,
    /// File name sent by the client
    pub original_name: String,
    /// Name the file was stored under
    pub file_name: String,
    /// Full path on disk
    pub path: PathBuf,
    /// MIME type sent by the client
    pub content_type: Option<String>,
    /// Bytes written
    pub size: u64,
}

impl StoredFile {
    /// URL of the stored file below `base_url`
    #[must_use]
    pub fn url(&self, base_url: Option<&str>) -> String {
        base_url.map_or_else(
            || self.file_name.clone(),
            |base| format!("{base}/{}", self.file_name),
        )
    }
}

/// A file fully received into a temporary path next to its destination
struct PendingFile {
    temp: TempPath,
    stored: StoredFile,
}

/// Streams every file of a multipart body into the local upload directory
///
/// Each field carrying a file name is assigned its destination before any of
/// its bytes are read. The directory is checked once, when the first file is
/// announced. Fields without a file name are skipped.
///
/// Files are written to hidden temporary files in the upload directory and
/// only moved to their destinations once the whole body has been read. If the
/// request fails at any point, the temporary files are removed and nothing in
/// the directory changes.
///
/// # Errors
///
/// - `UploadError::ConfigurationMissing` if no local directory is configured
/// - `UploadError::DirectoryNotFound` if the directory does not exist
/// - `UploadError::NoFilesUploaded` if the body contains no file
/// - `UploadError::Multipart` or `UploadError::Io` if reading or writing fails
#[instrument(skip(multipart, config))]
pub async fn handle_local_upload(
    mut multipart: Multipart,
    config: &UploadConfig,
) -> UploadResult<Vec<StoredFile>> {
    let mut directory: Option<&Path> = None;
    let mut pending = Vec::new();

    while let Some(mut field) = multipart.next_field().await? {
        let Some(original_name) = field.file_name().map(ToString::to_string) else {
            debug!("Skipping non-file field {:?}", field.name());
            while field.chunk().await?.is_some() {}
            continue;
        };

        let dir = match directory {
            Some(dir) => dir,
            None => {
                let dir = checked_directory(config).await?;
                directory = Some(dir);
                dir
            }
        };

        let file_name = destination_name(&original_name, config.random_names);
        let path = dir.join(&file_name);

        let (file, temp) = Builder::new()
            .prefix(".upload-")
            .suffix(".part")
            .tempfile_in(dir)?
            .into_parts();
        debug!("Receiving {original_name} into {}", temp.display());

        let mut file = fs::File::from_std(file);
        let mut size = 0u64;
        while let Some(chunk) = field.chunk().await? {
            file.write_all(&chunk).await?;
            size += chunk.len() as u64;
        }
        file.flush().await?;

        pending.push(PendingFile {
            temp,
            stored: StoredFile {
                field_name: field.name().map(ToString::to_string),
                original_name,
                file_name,
                path,
                content_type: field.content_type().map(ToString::to_string),
                size,
            },
        });
    }

    if pending.is_empty() {
        return Err(UploadError::NoFilesUploaded);
    }

    let stored = persist_all(pending)?;
    info!("Stored {} uploaded file(s)", stored.len());
    Ok(stored)
}

/// Moves every received file to its destination
///
/// On failure, files already moved by this call are removed again and the
/// remaining temporary files are dropped, which deletes them.
fn persist_all(pending: Vec<PendingFile>) -> UploadResult<Vec<StoredFile>> {
    let mut stored: Vec<StoredFile> = Vec::with_capacity(pending.len());

    for PendingFile { temp, stored: file } in pending {
        if let Err(err) = temp.persist(&file.path) {
            for done in &stored {
                if let Err(e) = std::fs::remove_file(&done.path) {
                    warn!("Failed to roll back {}: {e}", done.path.display());
                }
            }
            return Err(UploadError::Io(err.error));
        }
        debug!("Stored {}", file.path.display());
        stored.push(file);
    }

    Ok(stored)
}

async fn checked_directory(config: &UploadConfig) -> UploadResult<&Path> {
    let dir = config
        .local_directory
        .as_deref()
        .ok_or(UploadError::ConfigurationMissing("local upload directory"))?;

    match fs::metadata(dir).await {
        Ok(metadata) if metadata.is_dir() => Ok(dir),
        _ => Err(UploadError::DirectoryNotFound(dir.to_path_buf())),
    }
}

/// Name to store a client file under
///
/// Only the last path component of the client's name is kept, so a name can
/// never point outside the upload directory.
fn destination_name(original_name: &str, random: bool) -> String {
    let base = Path::new(original_name)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty());

    base.map_or_else(|| random_file_name(None), |name| generate_name(name, random))
}
