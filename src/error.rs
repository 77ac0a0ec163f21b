//! Error types shared by every underbar module.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the utilities.
///
/// All of these are programmer errors and nothing is retried. Only
/// `invoke_mut` can fail after writing, on the elements before the failing one.
#[derive(Debug, Error)]
pub enum UtilError {
    #[error("{op}: empty input and no initial value")]
    EmptyInput { op: &'static str },

    #[error("{op}: invalid argument: {reason}")]
    InvalidArgument { op: &'static str, reason: String },

    #[error("scheduler is closed")]
    SchedulerClosed,

    #[error("scheduler is full ({limit} pending jobs)")]
    SchedulerFull { limit: usize },

    #[error("failed to start timer thread: {0}")]
    TimerThread(std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl UtilError {
    pub(crate) fn invalid(op: &'static str, reason: impl Into<String>) -> Self {
        UtilError::InvalidArgument {
            op,
            reason: reason.into(),
        }
    }
}

/// Result type for underbar operations.
pub type UtilResult<T> = Result<T, UtilError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = UtilError::EmptyInput { op: "reduce" };
        assert_eq!(err.to_string(), "reduce: empty input and no initial value");

        let err = UtilError::invalid("invoke", "unknown method 'frob'");
        assert_eq!(
            err.to_string(),
            "invoke: invalid argument: unknown method 'frob'"
        );

        let err = UtilError::SchedulerFull { limit: 4 };
        assert_eq!(err.to_string(), "scheduler is full (4 pending jobs)");
    }
}
