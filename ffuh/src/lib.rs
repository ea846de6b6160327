//! Full-stack file upload helper
//!
//! Hands a browser either a presigned S3 `PUT` URL or the address of a local
//! upload endpoint, and stores multipart uploads on disk for the local case.

#![deny(clippy::all, clippy::pedantic, clippy::nursery)]

/// Bucket handle, signer capability and startup registration
pub mod bucket;

/// Per-mount upload configuration
pub mod config;

/// Library error type
pub mod error;

/// Multipart uploads to the local filesystem
pub mod local_upload;

/// Storage keys and generated file names
pub mod naming;

/// HTTP routes of the demo integration
pub mod routes;

/// Server startup
pub mod server;

/// Presigned S3 uploads
pub mod signed_upload;

/// Choice between the S3 and local upload flows
pub mod strategy;

/// Shared types (environment, HTTP errors, extractors)
pub mod types;

pub use config::UploadConfig;
pub use error::{UploadError, UploadResult};
pub use strategy::{UploadDestination, UploadRequest, UploadStrategy};
