use crate::error::{PlatformError, Result as PlatformResult};

use std::future::Future;
use std::time::Duration;

/// Race a network call against its per-call-type deadline.
///
/// An elapsed deadline is a `Timeout` failure, distinct from a transport
/// failure; callers treat both as transient.
pub async fn with_deadline<T, F>(
    operation: &'static str,
    deadline: Duration,
    fut: F,
) -> PlatformResult<T>
where
    F: Future<Output = PlatformResult<T>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(PlatformError::timeout(
            operation,
            deadline.as_millis() as u64,
        )),
    }
}
