//! Deadline handling for batched refreshes.
//!
//! Screens like the dashboard fan out several fetches at once; the whole
//! batch races one wall-clock deadline so a single slow endpoint cannot
//! hang the view. Hitting the deadline surfaces as `AppError::Timeout`,
//! which carries "try again" messaging, distinct from a transport failure.

use std::future::Future;
use std::time::Duration;

use futures::future::{join_all, BoxFuture};

use trainia_core::AppError;

/// Run `fut` against a wall-clock deadline.
pub async fn with_deadline<T, F>(deadline: Duration, label: &str, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(label = %label, timeout_secs = deadline.as_secs(), "Refresh deadline hit");
            Err(AppError::Timeout(label.to_string()))
        }
    }
}

/// Run a batch of refresh tasks concurrently under one deadline. All tasks
/// run to completion (or the deadline); the first task error is reported
/// after the whole batch settles so one failing fetch does not cancel the
/// others mid-flight.
pub async fn refresh_all(
    deadline: Duration,
    label: &str,
    tasks: Vec<BoxFuture<'_, Result<(), AppError>>>,
) -> Result<(), AppError> {
    with_deadline(deadline, label, async {
        let results = join_all(tasks).await;
        for result in results {
            result?;
        }
        Ok(())
    })
    .await
}
