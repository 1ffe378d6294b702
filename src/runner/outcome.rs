use std::borrow::Cow;

use crate::repo::{Error, Result};

/// The result of one external command that was spawned and ran to exit.
///
/// Both output streams are complete. A nonzero exit is still a
/// `CommandOutcome`; use [`CommandOutcome::into_result`] to turn it into
/// [`Error::ExecutionFailed`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommandOutcome {
    command: String,
    exit_code: Option<i32>,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

impl CommandOutcome {
    pub(crate) fn new(
        command: String,
        exit_code: Option<i32>,
        stdout: Vec<u8>,
        stderr: Vec<u8>,
    ) -> Self {
        CommandOutcome {
            command,
            exit_code,
            stdout,
            stderr,
        }
    }

    /// The command line that produced this outcome, shell-quoted.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Exit status of the process, or `None` if it was ended by a signal.
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// Return `true` if the process exited with status 0.
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Everything the process wrote to standard output.
    pub fn stdout(&self) -> &[u8] {
        &self.stdout
    }

    /// Everything the process wrote to standard error.
    pub fn stderr(&self) -> &[u8] {
        &self.stderr
    }

    /// Standard output as text. Invalid UTF-8 is replaced.
    pub fn stdout_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    /// Standard error as text. Invalid UTF-8 is replaced.
    pub fn stderr_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }

    /// Standard error, a newline, then standard output.
    ///
    /// git does not always report failures on stderr, so both are kept.
    pub fn diagnostic(&self) -> String {
        format!("{}\n{}", self.stderr_str(), self.stdout_str())
    }

    /// `Ok(self)` on success, otherwise [`Error::ExecutionFailed`] carrying
    /// [`CommandOutcome::diagnostic`].
    pub fn into_result(self) -> Result<Self> {
        if self.succeeded() {
            Ok(self)
        } else {
            Err(Error::ExecutionFailed {
                output: self.diagnostic(),
                command: self.command,
                code: self.exit_code,
            })
        }
    }

    /// Consume the outcome and return standard output as a `String`.
    pub fn into_stdout(self) -> String {
        match String::from_utf8(self.stdout) {
            Ok(s) => s,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(code: Option<i32>) -> CommandOutcome {
        CommandOutcome::new(
            "git branch -d nope".to_string(),
            code,
            b"out\n".to_vec(),
            b"error: branch 'nope' not found.".to_vec(),
        )
    }

    #[test]
    fn success() {
        let o = outcome(Some(0));
        assert!(o.succeeded());
        assert_eq!(o.stdout_str(), "out\n");

        let o = o.into_result().unwrap();
        assert_eq!(o.into_stdout(), "out\n");
    }

    #[test]
    fn failure_carries_both_streams() {
        let err = outcome(Some(1)).into_result().unwrap_err();

        match err {
            Error::ExecutionFailed {
                command,
                code,
                output,
            } => {
                assert_eq!(command, "git branch -d nope");
                assert_eq!(code, Some(1));
                assert_eq!(output, "error: branch 'nope' not found.\nout\n");
            }
            _ => panic!("Unexpected error {:?}", err),
        }
    }

    #[test]
    fn signal_is_failure() {
        let o = outcome(None);
        assert!(!o.succeeded());

        let err = o.into_result().unwrap_err();
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn lossy_stdout() {
        let o = CommandOutcome::new("x".to_string(), Some(0), vec![b'a', 0xff], vec![]);
        assert_eq!(o.into_stdout(), "a\u{FFFD}");
    }
}
