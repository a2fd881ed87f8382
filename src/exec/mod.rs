//! Run one subprocess with a deadline.
//!
//! Output pipes are drained on reader threads while the parent waits, so a
//! child that writes more than the pipe buffer cannot stall against us. On
//! Unix the child leads its own process group. The whole group is killed
//! when the deadline passes, and whatever is left of it once the child exits.

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use wait_timeout::ChildExt;

use crate::command::CommandLine;

/// How long to wait for both reader threads once the child is gone.
const OUTPUT_COLLECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// A child that ran to completion within its deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completed {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the child was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl Completed {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Errors that prevent a command from producing a [`Completed`] result.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to wait for `{program}`: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{program}` did not finish within {}s", after.as_secs())]
    TimedOut { program: String, after: Duration },
}

/// Spawn `line` in the current directory and wait at most `timeout`.
///
/// Exactly one spawn, no retries. On timeout the child (and its process
/// group on Unix) is killed and its partial output discarded.
pub fn execute(line: &CommandLine, timeout: Duration) -> Result<Completed, ExecError> {
    let mut command = Command::new(&line.program);
    command
        .args(&line.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    let mut child = command.spawn().map_err(|source| ExecError::Spawn {
        program: line.program.clone(),
        source,
    })?;
    tracing::debug!(pid = child.id(), command = %line, "spawned");

    let stdout = Capture::spawn(child.stdout.take());
    let stderr = Capture::spawn(child.stderr.take());

    let status = match child.wait_timeout(timeout) {
        Ok(status) => status,
        Err(source) => {
            terminate(&mut child);
            return Err(ExecError::Wait {
                program: line.program.clone(),
                source,
            });
        }
    };

    let Some(status) = status else {
        tracing::debug!(pid = child.id(), ?timeout, "deadline passed, killing");
        terminate(&mut child);
        return Err(ExecError::TimedOut {
            program: line.program.clone(),
            after: timeout,
        });
    };

    // Background processes left in the group would hold the pipes open.
    kill_group(&child);
    let deadline = Instant::now() + OUTPUT_COLLECTION_TIMEOUT;
    let stdout = stdout.collect(deadline);
    let stderr = stderr.collect(deadline);

    tracing::debug!(code = ?status.code(), "child exited");
    Ok(Completed {
        stdout,
        stderr,
        exit_code: status.code(),
    })
}

/// Output read so far from one pipe by a background thread.
///
/// The buffer is shared so that whatever arrived before the collection
/// deadline is kept even if the pipe never reaches EOF.
struct Capture {
    buf: Arc<Mutex<Vec<u8>>>,
    done: mpsc::Receiver<()>,
}

impl Capture {
    fn spawn<R: Read + Send + 'static>(pipe: Option<R>) -> Self {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let (tx, done) = mpsc::channel();
        match pipe {
            Some(mut pipe) => {
                let sink = Arc::clone(&buf);
                thread::spawn(move || {
                    let mut chunk = [0u8; 8192];
                    loop {
                        match pipe.read(&mut chunk) {
                            Ok(0) => break,
                            Ok(n) => {
                                if let Ok(mut sink) = sink.lock() {
                                    sink.extend_from_slice(&chunk[..n]);
                                }
                            }
                            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                            Err(err) => {
                                tracing::warn!(%err, "error reading child output");
                                break;
                            }
                        }
                    }
                    let _ = tx.send(());
                });
            }
            None => {
                let _ = tx.send(());
            }
        }
        Capture { buf, done }
    }

    /// Wait for EOF until `deadline`, then take what was read.
    fn collect(self, deadline: Instant) -> String {
        let wait = deadline.saturating_duration_since(Instant::now());
        if self.done.recv_timeout(wait).is_err() {
            tracing::warn!("child output still open after exit, relaying partial output");
        }
        let buf = match self.buf.lock() {
            Ok(buf) => buf.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Kill whatever is left in the exited child's process group.
fn kill_group(child: &Child) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;

        // ESRCH here just means nothing outlived the child.
        if killpg(Pid::from_raw(child.id() as i32), Signal::SIGKILL).is_ok() {
            tracing::debug!(pgid = child.id(), "killed leftover background processes");
        }
    }
    #[cfg(not(unix))]
    let _ = child;
}

/// Kill the child and its descendants, then reap it.
fn terminate(child: &mut Child) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;

        // The child is its own group leader, so its pid is the pgid.
        if let Err(err) = killpg(Pid::from_raw(child.id() as i32), Signal::SIGKILL) {
            tracing::debug!(%err, "killpg failed, falling back to kill");
            let _ = child.kill();
        }
    }
    #[cfg(not(unix))]
    {
        let _ = child.kill();
    }
    let _ = child.wait();
}
