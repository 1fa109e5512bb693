// result.rs — Status-plus-cause result for bulk connector operations.
//
// Bulk operations (copy-in) report an OpResult rather than a Rust Result so
// callers that only route status codes can do so without knowing the
// backend's error type. The cause is kept as a boxed error and can be
// downcast back to the backend's concrete error.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome class of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    Ok,
    Error,
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultStatus::Ok => write!(f, "ok"),
            ResultStatus::Error => write!(f, "error"),
        }
    }
}

/// Boxed cause carried by an error result.
pub type Cause = Box<dyn Error + Send + Sync + 'static>;

/// Result of a connector operation: a status and, on error, the cause.
#[derive(Debug)]
pub struct OpResult {
    status: ResultStatus,
    cause: Option<Cause>,
}

impl OpResult {
    /// A successful result.
    pub fn ok() -> Self {
        Self {
            status: ResultStatus::Ok,
            cause: None,
        }
    }

    /// A failed result carrying its cause.
    pub fn error(cause: impl Into<Cause>) -> Self {
        Self {
            status: ResultStatus::Error,
            cause: Some(cause.into()),
        }
    }

    pub fn status(&self) -> ResultStatus {
        self.status
    }

    pub fn is_ok(&self) -> bool {
        self.status == ResultStatus::Ok
    }

    pub fn is_error(&self) -> bool {
        self.status == ResultStatus::Error
    }

    /// The underlying cause, if this is an error result.
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

impl fmt::Display for OpResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}: {}", self.status, cause),
            None => write!(f, "{}", self.status),
        }
    }
}

impl<T, E> From<Result<T, E>> for OpResult
where
    E: Into<Cause>,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(_) => OpResult::ok(),
            Err(e) => OpResult::error(e),
        }
    }
}
