//! Running one external command against one repository.
//!
//! Each call spawns a single process with its working directory set to the
//! repository root and its environment set to the host's environment plus
//! the repository's overrides. Standard output and standard error are each
//! read to the end on their own thread while the runner waits, so a chatty
//! command can never block on a full pipe.
//!
//! Calls are independent. Nothing here serializes commands issued against
//! the same repository from several threads; if git's own locks collide,
//! that shows up as an ordinary failed command.

use std::{
    ffi::OsStr,
    io::{self, Read},
    path::Path,
    process::{Child, Command, ExitStatus, Stdio},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use tracing::{debug, trace, warn};

use crate::{
    command::{render, Args},
    config::Config,
    repo::{Error, Repository, Result},
};

mod outcome;
pub use outcome::CommandOutcome;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

type Reader = JoinHandle<io::Result<Vec<u8>>>;

/// Spawns commands for repository handles.
#[derive(Clone, Debug, Default)]
pub struct CommandRunner {
    config: Config,
}

impl CommandRunner {
    /// Create a runner that uses `config` for the git executable and timeout.
    pub fn new(config: Config) -> Self {
        CommandRunner { config }
    }

    /// Return the configuration this runner was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run `program` with `args` in `repo`'s root directory.
    ///
    /// Returns a [`CommandOutcome`] whenever the process could be started and
    /// ran to exit, whatever its exit status. Fails with
    /// [`Error::SpawnFailure`] if the process could not be started at all and
    /// with [`Error::Timeout`] if a configured timeout expired first.
    pub fn execute<P: AsRef<OsStr>>(
        &self,
        repo: &Repository,
        program: P,
        args: &Args,
    ) -> Result<CommandOutcome> {
        self.execute_in(repo.root_path(), &repo.env(), program.as_ref(), args)
    }

    /// Run git with `args` in `repo`'s root directory.
    ///
    /// Unlike [`CommandRunner::execute`], a nonzero exit becomes
    /// [`Error::ExecutionFailed`].
    pub fn run(&self, repo: &Repository, args: &Args) -> Result<CommandOutcome> {
        self.execute(repo, self.config.git_bin(), args)?
            .into_result()
    }

    /// Return `true` if the configured git executable can be started.
    pub fn git_available(&self) -> bool {
        Command::new(self.config.git_bin())
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }

    pub(crate) fn execute_in(
        &self,
        cwd: &Path,
        env: &[(String, String)],
        program: &OsStr,
        args: &Args,
    ) -> Result<CommandOutcome> {
        let command = render(program, args);
        debug!("Running {} in {}", command, cwd.display());

        let mut child = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .envs(env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| Error::SpawnFailure {
                command: command.clone(),
                source,
            })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match self.config.timeout() {
            None => child.wait()?,
            Some(timeout) => match wait_with_timeout(&mut child, timeout)? {
                Some(status) => status,
                None => {
                    warn!("{} timed out after {:?}; killing it", command, timeout);
                    // It may have exited on its own in the meantime.
                    child.kill().unwrap_or(());
                    child.wait()?;

                    // The readers are not joined here. A grandchild that
                    // inherited the pipes could keep them open indefinitely.
                    return Err(Error::Timeout { command, timeout });
                }
            },
        };

        let stdout = collect(stdout)?;
        let stderr = collect(stderr)?;

        debug!("{} exited with {:?}", command, status.code());
        if !stdout.is_empty() {
            trace!("stdout: {}", String::from_utf8_lossy(&stdout));
        }
        if !stderr.is_empty() {
            trace!("stderr: {}", String::from_utf8_lossy(&stderr));
        }

        Ok(CommandOutcome::new(command, status.code(), stdout, stderr))
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Reader {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

fn collect(reader: Reader) -> Result<Vec<u8>> {
    let buf = reader
        .join()
        .map_err(|_| io::Error::new(io::ErrorKind::Other, "output reader thread panicked"))??;
    Ok(buf)
}

// Returns `None` if `child` is still running once `timeout` has elapsed.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> io::Result<Option<ExitStatus>> {
    let start = Instant::now();

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            return Ok(None);
        }

        thread::sleep(POLL_INTERVAL.min(timeout - elapsed));
    }
}
