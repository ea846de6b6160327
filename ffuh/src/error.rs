//! Error types for upload operations

use std::path::PathBuf;

use axum::extract::multipart::MultipartError;
use thiserror::Error;

use crate::bucket::ProviderError;

/// Result type for upload operations
pub type UploadResult<T> = Result<T, UploadError>;

/// Errors that can occur while deciding or performing an upload
#[derive(Error, Debug)]
pub enum UploadError {
    /// A required setting is absent
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(&'static str),

    /// The local upload directory does not exist
    #[error("Upload directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The multipart body did not contain any file
    #[error("No files were uploaded")]
    NoFilesUploaded,

    /// The presigned URL lifetime is outside what S3 accepts
    #[error("Invalid presigned URL expiry: {0}s")]
    InvalidExpiration(u64),

    /// A signed upload was requested but no bucket is registered
    #[error("S3 bucket is not configured")]
    BucketNotConfigured,

    /// The storage provider failed to sign the request
    #[error(transparent)]
    Provider(ProviderError),

    /// The multipart body could not be decoded
    #[error("Invalid multipart body: {0}")]
    Multipart(#[from] MultipartError),

    /// Writing the uploaded file failed
    #[error("Failed to write uploaded file: {0}")]
    Io(#[from] std::io::Error),
}
