//! Work request construction from trigger parameters.

use tracing::debug;
use url::form_urlencoded;

use crate::{Error, Result};

/// Batch size used when `num_files` is absent or unparsable.
pub const DEFAULT_NUM_FILES: usize = 10;

/// Size class used when `size` is absent.
pub const DEFAULT_SIZE_CLASS: &str = "M";

/// Parameters of one invocation, built once per trigger and immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkRequest {
    /// Container holding the seed data
    pub source_container: String,
    /// Container receiving the generated copies
    pub destination_container: String,
    /// Exact number of objects to produce
    pub target_count: usize,
    /// Accepted and carried for a future sizing policy; unused by copy logic
    pub size_class: String,
}

impl WorkRequest {
    /// Decode a form-URL-encoded queue message body.
    ///
    /// `src_bucket` and `dest_bucket` are required and missing either fails
    /// with [`Error::MalformedRequest`]. `num_files` and `size` fall back to
    /// their defaults when missing or unparsable; a bad optional value is
    /// substituted, never propagated as an error.
    pub fn from_form_body(body: &str) -> Result<Self> {
        let mut src_bucket = None;
        let mut dest_bucket = None;
        let mut num_files = None;
        let mut size = None;

        for (key, value) in form_urlencoded::parse(body.as_bytes()) {
            match key.as_ref() {
                "src_bucket" => src_bucket = Some(value.into_owned()),
                "dest_bucket" => dest_bucket = Some(value.into_owned()),
                "num_files" => num_files = Some(value.into_owned()),
                "size" => size = Some(value.into_owned()),
                other => debug!("Ignoring unknown request field '{}'", other),
            }
        }

        let source_container = src_bucket.ok_or_else(|| {
            Error::MalformedRequest("missing required field 'src_bucket'".to_string())
        })?;
        let destination_container = dest_bucket.ok_or_else(|| {
            Error::MalformedRequest("missing required field 'dest_bucket'".to_string())
        })?;

        let target_count = match num_files.as_deref().map(str::parse::<usize>) {
            Some(Ok(count)) => count,
            Some(Err(_)) => {
                debug!(
                    "Invalid num_files value {:?}; defaulting to {}",
                    num_files, DEFAULT_NUM_FILES
                );
                DEFAULT_NUM_FILES
            }
            None => DEFAULT_NUM_FILES,
        };
        let size_class = size.unwrap_or_else(|| DEFAULT_SIZE_CLASS.to_string());

        Ok(Self {
            source_container,
            destination_container,
            target_count,
            size_class,
        })
    }
}
