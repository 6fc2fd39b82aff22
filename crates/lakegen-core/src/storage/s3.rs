//! S3 storage backend using the AWS SDK.
//!
//! Copies here cross bucket boundaries, which `CopyObject` performs
//! server-side from `src_bucket/key` into the destination bucket; object
//! bytes never pass through this process.

use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::{debug, info};

use super::StorageBackend;
use crate::error::StorageError;
use crate::listing::ObjectDescriptor;
use crate::{Error, Result};

// The CopySource header wants the key URL-encoded; keep '/' as the path
// separator and the unreserved characters as-is.
const COPY_SOURCE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn copy_source(container: &str, key: &str) -> String {
    format!("{}/{}", container, utf8_percent_encode(key, COPY_SOURCE_SET))
}

/// S3 storage backend
pub struct S3Backend {
    client: Client,
}

impl S3Backend {
    /// Build a client from environment credentials, optionally overriding
    /// region and endpoint (S3-compatible services need the endpoint
    /// override and path-style addressing).
    pub async fn from_env(region: Option<String>, endpoint: Option<String>) -> Self {
        let shared_config = aws_config::load_from_env().await;
        let mut builder = aws_sdk_s3::config::Builder::from(&shared_config)
            .retry_config(RetryConfig::standard().with_max_attempts(3));

        if let Some(region) = region {
            builder = builder.region(Region::new(region));
        }
        if let Some(endpoint) = endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        let client = Client::from_conf(builder.build());
        info!("Created S3 backend");
        Self { client }
    }
}

#[async_trait]
impl StorageBackend for S3Backend {
    async fn list(&self, container: &str) -> Result<Vec<ObjectDescriptor>> {
        debug!("S3 LIST: {}", container);

        let mut listing = Vec::new();
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(container)
            .into_paginator()
            .send();

        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| {
                Error::Storage(StorageError::Backend(format!("S3 LIST failed: {}", e)))
            })?;
            for object in page.contents() {
                let Some(key) = object.key() else { continue };
                listing.push(ObjectDescriptor {
                    name: key.to_string(),
                    size: object.size().unwrap_or(0).max(0) as u64,
                });
            }
        }

        Ok(listing)
    }

    async fn copy(
        &self,
        src_container: &str,
        src_key: &str,
        dest_container: &str,
        dest_key: &str,
    ) -> Result<()> {
        let source = copy_source(src_container, src_key);
        debug!("S3 COPY: {} -> {}/{}", source, dest_container, dest_key);

        self.client
            .copy_object()
            .copy_source(source)
            .bucket(dest_container)
            .key(dest_key)
            .send()
            .await
            .map_err(|e| {
                Error::Storage(StorageError::Backend(format!("S3 COPY failed: {}", e)))
            })?;

        Ok(())
    }

    async fn put(&self, container: &str, key: &str, data: Bytes) -> Result<()> {
        debug!("S3 PUT: {}/{}", container, key);

        self.client
            .put_object()
            .bucket(container)
            .key(key)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                Error::Storage(StorageError::Backend(format!("S3 PUT failed: {}", e)))
            })?;

        Ok(())
    }
}
