//! MySQL repository implementations using SQLx.

mod reset_token_repository_impl;
mod token_repository_impl;
mod user_repository_impl;

pub use reset_token_repository_impl::MySqlResetTokenRepository;
pub use token_repository_impl::MySqlTokenRepository;
pub use user_repository_impl::MySqlUserRepository;

use std::future::Future;
use std::time::Duration;

use store_core::errors::DomainError;

/// Default bound on a single store operation
pub(crate) const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Run a store operation under the request-scoped timeout
///
/// On elapse the operation fails with a retryable `DatabaseQuery` error;
/// any transaction driven by the future is dropped and rolls back, so a
/// timeout never leaves a partial commit behind.
pub(crate) async fn with_query_timeout<T, F>(
    timeout: Duration,
    context: &'static str,
    fut: F,
) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(context, timeout_secs = timeout.as_secs(), "store operation timed out");
            Err(DomainError::DatabaseQuery {
                message: format!("{} timed out", context),
            })
        }
    }
}

/// Map a SQLx failure to the retryable store error class
///
/// The driver detail stays in logs; callers surface a generic message.
pub(crate) fn db_error(context: &'static str, error: sqlx::Error) -> DomainError {
    tracing::error!(context, error = %error, "database query failed");
    DomainError::DatabaseQuery {
        message: format!("{}: {}", context, error),
    }
}
