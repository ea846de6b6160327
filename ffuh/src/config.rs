//! Upload configuration for a single mount point

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

/// Default lifetime of a presigned URL in seconds
pub const DEFAULT_EXPIRATION_SECS: u64 = 60;

/// Longest lifetime S3 accepts for a presigned URL (7 days)
pub const MAX_EXPIRATION_SECS: u64 = 7 * 24 * 60 * 60;

/// Whether `secs` is a lifetime S3 accepts for a presigned URL
#[must_use]
pub const fn is_valid_expiration(secs: u64) -> bool {
    matches!(secs, 1..=MAX_EXPIRATION_SECS)
}

/// Settings shared by every request handled by one [`UploadStrategy`]
///
/// Built once at startup and read-only afterwards.
///
/// [`UploadStrategy`]: crate::strategy::UploadStrategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    /// Lifetime of presigned URLs in seconds
    pub expiration_secs: u64,
    /// Store files under random names instead of their original names
    pub random_names: bool,
    /// Directory local uploads are written to
    pub local_directory: Option<PathBuf>,
    /// Endpoint clients send local uploads to
    pub local_upload_endpoint: Option<String>,
    /// Base URL local files are served from
    pub local_file_base_url: Option<String>,
    /// Key prefix inside the bucket
    pub storage_path_prefix: Option<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            expiration_secs: DEFAULT_EXPIRATION_SECS,
            random_names: false,
            local_directory: None,
            local_upload_endpoint: None,
            local_file_base_url: None,
            storage_path_prefix: None,
        }
    }
}

impl UploadConfig {
    /// Loads the configuration from environment variables
    ///
    /// Unset variables keep their defaults. Values that fail to parse, and
    /// expiries S3 would reject, are logged and replaced by the default.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let expiration_secs = parsed_var::<u64>("PRESIGNED_URL_EXPIRY_SECS")
            .filter(|&secs| {
                let valid = is_valid_expiration(secs);
                if !valid {
                    warn!(
                        "PRESIGNED_URL_EXPIRY_SECS={secs} is outside 1..={MAX_EXPIRATION_SECS}, using {}",
                        defaults.expiration_secs
                    );
                }
                valid
            })
            .unwrap_or(defaults.expiration_secs);

        Self {
            expiration_secs,
            random_names: non_empty_var("UPLOAD_RANDOM_NAMES")
                .and_then(|val| {
                    let flag = parse_flag(&val);
                    if flag.is_none() {
                        warn!("Ignoring unrecognized UPLOAD_RANDOM_NAMES={val:?}");
                    }
                    flag
                })
                .unwrap_or(defaults.random_names),
            local_directory: non_empty_var("UPLOAD_LOCAL_DIR").map(PathBuf::from),
            local_upload_endpoint: non_empty_var("UPLOAD_LOCAL_ENDPOINT"),
            local_file_base_url: non_empty_var("UPLOAD_LOCAL_BASE_URL"),
            storage_path_prefix: non_empty_var("UPLOAD_PATH_PREFIX"),
        }
    }

    /// Sets the presigned URL lifetime
    #[must_use]
    pub const fn with_expiration_secs(mut self, secs: u64) -> Self {
        self.expiration_secs = secs;
        self
    }

    /// Enables or disables random file names
    #[must_use]
    pub const fn with_random_names(mut self, random_names: bool) -> Self {
        self.random_names = random_names;
        self
    }

    /// Sets the local upload directory
    #[must_use]
    pub fn with_local_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.local_directory = Some(dir.into());
        self
    }

    /// Sets the endpoint advertised for local uploads
    #[must_use]
    pub fn with_local_upload_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.local_upload_endpoint = Some(endpoint.into());
        self
    }

    /// Sets the base URL local files are served from
    #[must_use]
    pub fn with_local_file_base_url(mut self, url: impl Into<String>) -> Self {
        self.local_file_base_url = Some(url.into());
        self
    }

    /// Sets the key prefix inside the bucket
    #[must_use]
    pub fn with_storage_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.storage_path_prefix = Some(prefix.into());
        self
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|val| !val.trim().is_empty())
}

fn parsed_var<T: FromStr>(key: &str) -> Option<T> {
    let val = non_empty_var(key)?;
    let parsed = val.trim().parse::<T>().ok();
    if parsed.is_none() {
        warn!("Ignoring unparsable {key}={val:?}");
    }
    parsed
}

fn parse_flag(val: &str) -> Option<bool> {
    match val.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
