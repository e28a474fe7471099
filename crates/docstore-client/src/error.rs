//! Store outcome taxonomy.

use std::time::Duration;

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure classification for store operations.
///
/// Rate limiting is the store's admission-control signal and an expected
/// outcome under sustained load; drivers count it and move on without
/// retrying. Everything else is an unexpected backend failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store rejected the request for lack of allocated capacity.
    /// Carries the store's suggested wait when it provides one; the harness
    /// records the hint but never waits on it.
    #[error("rate limited by the store{}", retry_after_suffix(.retry_after))]
    RateLimited { retry_after: Option<Duration> },

    /// Any other backend failure.
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(err: impl std::fmt::Display) -> Self {
        StoreError::Backend(err.to_string())
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, StoreError::RateLimited { .. })
    }

    /// Suggested wait attached to a rate-limited outcome, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            StoreError::RateLimited { retry_after } => *retry_after,
            StoreError::Backend(_) => None,
        }
    }
}

fn retry_after_suffix(retry_after: &Option<Duration>) -> String {
    match retry_after {
        Some(wait) => format!(" (retry after {}ms)", wait.as_millis()),
        None => String::new(),
    }
}
