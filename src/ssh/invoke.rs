//! Running the ssh client
//!
//! The child inherits stdin, stdout and stderr so interactive sessions work
//! unmodified. The caller blocks until the child exits.

use std::process::{Command, ExitStatus, Stdio};

use tracing::debug;

use crate::error::{GsshError, Result};

/// Something that can run a program and report its exit code
pub trait Launcher {
    /// Run `program` with `args`, returning the child's exit code
    fn launch(&self, program: &str, args: &[String]) -> Result<i32>;
}

/// Launcher that spawns real processes found on `PATH`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&self, program: &str, args: &[String]) -> Result<i32> {
        invoke(program, args)
    }
}

/// Locate `program` on `PATH`, run it with inherited streams and wait for it
///
/// # Returns
/// * `Ok(code)` - The child exited normally with `code`
/// * `Err(GsshError::ExecutableNotFound)` - `program` is not on `PATH`
/// * `Err(GsshError::Execution)` - Spawn or wait failed, or the child was killed by a signal
pub fn invoke(program: &str, args: &[String]) -> Result<i32> {
    let path = which::which(program).map_err(|source| GsshError::ExecutableNotFound {
        program: program.to_string(),
        source,
    })?;

    debug!("Running {} with {} argument(s)", path.display(), args.len());

    let status = Command::new(&path)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| GsshError::execution(e.to_string()))?;

    exit_code(status)
}

/// Translate a child's exit status into the code this process should exit with
fn exit_code(status: ExitStatus) -> Result<i32> {
    if let Some(code) = status.code() {
        debug!("Child exited with code {}", code);
        return Ok(code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return Err(GsshError::execution(format!(
                "terminated by signal {}",
                signal
            )));
        }
    }

    Err(GsshError::execution(format!(
        "child did not exit normally ({})",
        status
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoke_missing_executable() {
        let err = invoke("gssh-no-such-binary-7f3a", &[]).unwrap_err();
        assert!(matches!(err, GsshError::ExecutableNotFound { .. }));
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("not found in PATH"));
    }

    #[cfg(unix)]
    #[test]
    fn test_invoke_propagates_exit_code() {
        let args = vec!["-c".to_string(), "exit 3".to_string()];
        assert_eq!(invoke("sh", &args).unwrap(), 3);

        let args = vec!["-c".to_string(), "true".to_string()];
        assert_eq!(SystemLauncher.launch("sh", &args).unwrap(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_invoke_signal_is_execution_error() {
        let args = vec!["-c".to_string(), "kill -9 $$".to_string()];
        let err = invoke("sh", &args).unwrap_err();
        assert!(matches!(err, GsshError::Execution(_)));
        assert!(err.to_string().contains("signal 9"));
        assert_eq!(err.exit_code(), 125);
    }
}
