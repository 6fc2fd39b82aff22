//! Storage configuration types.

use std::path::PathBuf;

use crate::{Error, Result};

/// Storage backend selection.
///
/// Containers are named per work request, so this carries only what is
/// needed to build a client, not bucket names.
#[derive(Debug, Clone)]
pub enum StorageBackendConfig {
    /// AWS S3 or S3-compatible storage (MinIO, Ceph RGW, etc.)
    S3 {
        /// AWS region (e.g., "us-east-1"); environment default when absent
        region: Option<String>,
        /// Custom endpoint URL (for S3-compatible services like MinIO)
        endpoint: Option<String>,
    },

    /// Local filesystem storage; containers are top-level directories
    Filesystem {
        /// Base path for storage
        path: PathBuf,
    },

    /// In-memory storage (for testing)
    Memory,
}

impl StorageBackendConfig {
    /// Parse configuration from a URL string
    ///
    /// Supported URL formats:
    /// - `s3://?region=us-east-1&endpoint=http://localhost:9000`
    /// - `file:///path/to/data`
    /// - `memory://`
    pub fn from_url(url: &str) -> Result<Self> {
        let parsed = url::Url::parse(url)
            .map_err(|e| Error::Config(format!("Invalid storage URL: {}", e)))?;

        match parsed.scheme() {
            "s3" | "s3a" => {
                let region = parsed
                    .query_pairs()
                    .find(|(k, _)| k == "region")
                    .map(|(_, v)| v.to_string());
                let endpoint = parsed
                    .query_pairs()
                    .find(|(k, _)| k == "endpoint")
                    .map(|(_, v)| v.to_string());

                Ok(Self::S3 { region, endpoint })
            }
            "file" => Ok(Self::Filesystem {
                path: PathBuf::from(parsed.path()),
            }),
            "memory" => Ok(Self::Memory),
            scheme => Err(Error::Config(format!(
                "Unknown storage scheme: {}",
                scheme
            ))),
        }
    }
}
