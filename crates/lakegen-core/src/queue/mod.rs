//! Queue backend abstraction and implementations.
//!
//! - **SQS**: Amazon SQS
//! - **Memory**: In-memory queue (for testing)

mod backend;
mod memory;
mod sqs;

pub use backend::{QueueBackend, QueueDelivery};
pub use memory::MemoryQueue;
pub use sqs::SqsBackend;
