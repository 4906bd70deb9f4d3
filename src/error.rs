//! Error types for gssh

use thiserror::Error;

/// Exit status for configuration and setup failures
pub const EXIT_FAILURE: i32 = 1;

/// Exit status when the ssh child could not be spawned or did not exit normally
pub const EXIT_EXECUTION_FAILURE: i32 = 125;

/// Main error type for gssh
#[derive(Debug, Error)]
pub enum GsshError {
    /// Profile file for a named target is missing or unparsable
    #[error("failed to read config for target '{target}': {reason}")]
    ConfigRead { target: String, reason: String },

    /// Resolved profile is unusable
    #[error("{0}")]
    Validation(String),

    /// The ssh client is not on PATH
    #[error(
        "{program} client not found in PATH. Install OpenSSH client and ensure '{program}' is available: {source}"
    )]
    ExecutableNotFound {
        program: String,
        #[source]
        source: which::Error,
    },

    /// Spawn or wait failed, or the child did not exit with a code
    #[error("ssh execution failed: {0}")]
    Execution(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using GsshError
pub type Result<T> = std::result::Result<T, GsshError>;

impl GsshError {
    /// Create a config read error for a target
    pub fn config_read(target: impl Into<String>, reason: impl ToString) -> Self {
        GsshError::ConfigRead {
            target: target.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a validation error from a string
    pub fn validation(msg: impl Into<String>) -> Self {
        GsshError::Validation(msg.into())
    }

    /// Create an execution error from a string
    pub fn execution(msg: impl Into<String>) -> Self {
        GsshError::Execution(msg.into())
    }

    /// Process exit status this error terminates with
    pub fn exit_code(&self) -> i32 {
        match self {
            GsshError::Execution(_) => EXIT_EXECUTION_FAILURE,
            _ => EXIT_FAILURE,
        }
    }
}
