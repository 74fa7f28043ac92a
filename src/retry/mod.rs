//! Retry mechanism for remote styling calls.

mod policy;

pub use policy::{RetryExecutor, RetryPolicy, with_retry};
