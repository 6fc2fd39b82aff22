//! Lakegen Core Library
//!
//! This crate provides the core functionality for synthesizing target-sized
//! batches of test data: it reads the object listing of a source container,
//! resamples it to an exact count by random duplication or truncation, and
//! copies the batch server-side into a destination container under freshly
//! generated names.

pub mod copy;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod listing;
pub mod queue;
pub mod request;
pub mod resample;
pub mod storage;
pub mod trigger;

pub use dispatch::{CopyFailure, DispatchReport, Dispatcher, WorkItem};
pub use engine::GenerateEngine;
pub use error::{Error, QueueError, Result, StorageError};
pub use listing::ObjectDescriptor;
pub use request::{WorkRequest, DEFAULT_NUM_FILES, DEFAULT_SIZE_CLASS};
pub use resample::resample;
pub use trigger::QueueTrigger;
