//! Session capture: runs a script in a pseudo-terminal and decodes its output.
//!
//! Spawning is behind [`SessionSource`] so the read/decode loop can be
//! driven by an in-memory stream in tests. [`PtySource`] is the real
//! implementation on top of `portable-pty`.

use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use portable_pty::{Child, ChildKiller, CommandBuilder, MasterPty, PtySize, native_pty_system};
use tracing::{debug, warn};

use crate::ansi::AnsiDecoder;
use crate::error::{RenderError, Result};
use crate::transcript::Transcript;

/// Default pseudo-terminal width in columns.
pub const DEFAULT_COLS: u16 = 120;

/// Default pseudo-terminal height in rows.
pub const DEFAULT_ROWS: u16 = 30;

/// `EIO`: what Linux returns from a pty master once the child side closes.
/// The value is 5 on Linux, macOS and the BSDs; only unix consults it.
const EIO: i32 = 5;

/// A launched script: its combined output stream and a handle to the process.
pub struct Session {
    pub output: Box<dyn BufRead + Send>,
    pub process: Box<dyn SessionProcess>,
}

/// Handle to a running script.
pub trait SessionProcess {
    /// Blocks until the process exits and returns its exit code.
    fn wait(&mut self) -> io::Result<u32>;

    /// A handle that can terminate the process from another thread.
    fn killer(&self) -> Box<dyn ProcessKiller>;
}

/// Terminates a process; used by the timeout watchdog.
pub trait ProcessKiller: Send {
    fn kill(&mut self) -> io::Result<()>;
}

/// Starts scripts and hands back their output.
pub trait SessionSource {
    fn launch(&self, script: &Path) -> Result<Session>;
}

/// Runs scripts attached to a fresh pseudo-terminal, so they emit the
/// same colors and formatting they would in an interactive shell.
pub struct PtySource {
    size: PtySize,
}

impl Default for PtySource {
    fn default() -> Self {
        Self::new(DEFAULT_COLS)
    }
}

impl PtySource {
    /// A source whose terminal is `cols` columns wide.
    pub fn new(cols: u16) -> Self {
        Self {
            size: PtySize {
                rows: DEFAULT_ROWS,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            },
        }
    }
}

impl SessionSource for PtySource {
    fn launch(&self, script: &Path) -> Result<Session> {
        let launch_failure = |reason: String| RenderError::LaunchFailure {
            program: script.to_path_buf(),
            reason,
        };

        // CommandBuilder defaults to $HOME as cwd; keep relative paths meaning what they say.
        let program = std::path::absolute(script).map_err(|e| launch_failure(e.to_string()))?;
        let cwd = std::env::current_dir().map_err(|e| launch_failure(e.to_string()))?;

        let pair = native_pty_system()
            .openpty(self.size)
            .map_err(|e| launch_failure(format!("failed to open pty: {e:#}")))?;

        let mut cmd = CommandBuilder::new(&program);
        cmd.cwd(cwd);
        let child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|e| launch_failure(format!("{e:#}")))?;
        // The reader only sees EOF once every handle to the slave side is closed.
        drop(pair.slave);

        let reader = pair
            .master
            .try_clone_reader()
            .map_err(|e| launch_failure(format!("failed to clone pty reader: {e:#}")))?;

        debug!(program = %program.display(), cols = self.size.cols, "launched in pty");
        Ok(Session {
            output: Box::new(BufReader::new(reader)),
            process: Box::new(PtyProcess {
                child,
                _master: pair.master,
            }),
        })
    }
}

struct PtyProcess {
    child: Box<dyn Child + Send + Sync>,
    // Dropping the master hangs up the terminal; keep it until the child is reaped.
    _master: Box<dyn MasterPty + Send>,
}

impl SessionProcess for PtyProcess {
    fn wait(&mut self) -> io::Result<u32> {
        self.child.wait().map(|status| status.exit_code())
    }

    fn killer(&self) -> Box<dyn ProcessKiller> {
        Box::new(PtyKiller(self.child.clone_killer()))
    }
}

struct PtyKiller(Box<dyn ChildKiller + Send + Sync>);

impl ProcessKiller for PtyKiller {
    fn kill(&mut self) -> io::Result<()> {
        self.0.kill()
    }
}

/// Kills the process if it is still running when the deadline passes.
struct Watchdog {
    disarm: mpsc::Sender<()>,
    handle: JoinHandle<bool>,
}

impl Watchdog {
    fn arm(mut killer: Box<dyn ProcessKiller>, limit: Duration) -> Self {
        let (disarm, rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || match rx.recv_timeout(limit) {
            Err(RecvTimeoutError::Timeout) => match killer.kill() {
                Ok(()) => true,
                Err(e) => {
                    // Usually means the process already exited on its own.
                    debug!(error = %e, "watchdog kill failed");
                    false
                }
            },
            _ => false,
        });
        Self { disarm, handle }
    }

    /// Stops the watchdog; returns true if it had to kill the process.
    fn disarm(self) -> bool {
        drop(self.disarm);
        self.handle.join().unwrap_or(false)
    }
}

/// Whether a read error just means the other end of the stream is gone.
fn is_end_of_stream(err: &io::Error) -> bool {
    (cfg!(unix) && err.raw_os_error() == Some(EIO)) || err.kind() == io::ErrorKind::BrokenPipe
}

/// Runs `script` from `source` and decodes everything it prints.
///
/// Blocks until the script exits. With `timeout` set, the script is
/// killed once the deadline passes and [`RenderError::Timeout`] is returned.
/// A non-zero exit code is logged, not treated as an error.
pub fn capture<S: SessionSource + ?Sized>(
    source: &S,
    script: &Path,
    timeout: Option<Duration>,
) -> Result<Transcript> {
    let Session {
        mut output,
        mut process,
    } = source.launch(script)?;
    let watchdog = timeout.map(|limit| Watchdog::arm(process.killer(), limit));

    let mut decoder = AnsiDecoder::new();
    let mut transcript = Transcript::new();
    let mut raw = Vec::new();

    loop {
        raw.clear();
        match output.read_until(b'\n', &mut raw) {
            Ok(0) => break,
            Ok(_) => transcript.push(decoder.decode_line(&raw)),
            Err(e) if is_end_of_stream(&e) => {
                if !raw.is_empty() {
                    transcript.push(decoder.decode_line(&raw));
                }
                break;
            }
            Err(e) => return Err(RenderError::CaptureFailure(e)),
        }
    }
    drop(output);

    let exit_code = process.wait().map_err(RenderError::CaptureFailure)?;

    let timed_out = watchdog.is_some_and(Watchdog::disarm);
    if timed_out {
        return Err(RenderError::Timeout {
            seconds: timeout.map_or(0, |t| t.as_secs()),
        });
    }

    if exit_code != 0 {
        warn!(script = %script.display(), exit_code, "script exited with non-zero status");
    }
    debug!(
        lines = transcript.len(),
        canvas_width = transcript.canvas_width(),
        "capture finished"
    );
    Ok(transcript)
}

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;
