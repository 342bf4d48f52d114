//! Fixed-interval polling engine.
//!
//! A ticker thread runs one acquisition process per tick. Stdout lines become
//! an [`AcquisitionEvent`] stream that the consumer drains from its own thread
//! (the UI thread in the GUI). Stderr only goes to the log.

use std::io::{BufRead, BufReader, Read};
use std::process::Child;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use super::command::SigrokCommand;

/// Default poll period.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Time an in-flight process gets to exit after SIGTERM before it is killed.
pub const TERMINATE_GRACE: Duration = Duration::from_millis(1200);

const SLEEP_SLICE: Duration = Duration::from_millis(10);

/// Messages from the polling engine to its consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionEvent {
    /// One stdout line, lossily decoded, line ending stripped.
    Line(String),
    /// The process of one poll exited. `code` is `None` when it died from a signal.
    Finished { code: Option<i32> },
    /// The process could not be started.
    SpawnFailed(String),
}

struct Shared {
    running: AtomicBool,
    inflight: AtomicBool,
    child: Mutex<Option<Child>>,
    tx: Sender<AcquisitionEvent>,
}

impl Shared {
    fn child(&self) -> MutexGuard<'_, Option<Child>> {
        self.child.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Handle to a running polling loop. Dropping it stops the loop.
pub struct Poller {
    shared: Arc<Shared>,
    ticker: Option<JoinHandle<()>>,
}

impl Poller {
    /// Start polling `command` every `interval`. The first poll is issued immediately.
    pub fn start(command: SigrokCommand, interval: Duration) -> (Self, Receiver<AcquisitionEvent>) {
        let (tx, rx) = channel();
        let shared = Arc::new(Shared {
            running: AtomicBool::new(true),
            inflight: AtomicBool::new(false),
            child: Mutex::new(None),
            tx,
        });

        info!(
            program = %command.program.display(),
            args = ?command.args(),
            interval_ms = interval.as_millis() as u64,
            "polling started"
        );

        let ticker_shared = Arc::clone(&shared);
        let ticker = thread::spawn(move || {
            while ticker_shared.running.load(Ordering::SeqCst) {
                poll_once(&ticker_shared, &command);
                let deadline = Instant::now() + interval;
                while ticker_shared.running.load(Ordering::SeqCst) && Instant::now() < deadline {
                    thread::sleep(SLEEP_SLICE.min(deadline.saturating_duration_since(Instant::now())));
                }
            }
        });

        (
            Self {
                shared,
                ticker: Some(ticker),
            },
            rx,
        )
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// Whether a poll process is currently alive.
    pub fn is_inflight(&self) -> bool {
        self.shared.inflight.load(Ordering::SeqCst)
    }

    /// Stop issuing polls and terminate the in-flight process, if any.
    pub fn stop(&mut self) {
        if !self.shared.running.swap(false, Ordering::SeqCst) && self.ticker.is_none() {
            return;
        }
        // Once the ticker is joined no further process can be spawned.
        if let Some(ticker) = self.ticker.take() {
            let _ = ticker.join();
        }
        let child = self.shared.child().take();
        if let Some(mut child) = child {
            terminate(&mut child, TERMINATE_GRACE);
        }
        self.shared.inflight.store(false, Ordering::SeqCst);
        info!("polling stopped");
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Run one poll unless stopped or another poll is still in flight.
/// Returns `true` when a process was started.
fn poll_once(shared: &Arc<Shared>, command: &SigrokCommand) -> bool {
    if !shared.running.load(Ordering::SeqCst) {
        return false;
    }
    if shared.inflight.swap(true, Ordering::SeqCst) {
        debug!("previous poll still in flight, skipping tick");
        return false;
    }

    let mut child = match command.to_command().spawn() {
        Ok(child) => child,
        Err(e) => {
            error!(program = %command.program.display(), "spawn failed: {e}");
            shared.inflight.store(false, Ordering::SeqCst);
            let _ = shared.tx.send(AcquisitionEvent::SpawnFailed(e.to_string()));
            return false;
        }
    };
    debug!(pid = child.id(), "poll started");

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    {
        let mut slot = shared.child();
        if !shared.running.load(Ordering::SeqCst) {
            drop(slot);
            terminate(&mut child, TERMINATE_GRACE);
            shared.inflight.store(false, Ordering::SeqCst);
            return false;
        }
        *slot = Some(child);
    }

    let watcher_shared = Arc::clone(shared);
    thread::spawn(move || {
        let stderr_reader = stderr.map(|err| thread::spawn(move || log_stderr(err)));
        if let Some(out) = stdout {
            forward_lines(out, &watcher_shared.tx);
        }
        if let Some(handle) = stderr_reader {
            let _ = handle.join();
        }

        // `stop()` may have taken the child to terminate it; then it owns the reaping.
        let child = watcher_shared.child().take();
        if let Some(mut child) = child {
            let code = match child.wait() {
                Ok(status) => status.code(),
                Err(e) => {
                    warn!("wait on poll process failed: {e}");
                    None
                }
            };
            debug!(?code, "poll finished");
            if watcher_shared.running.load(Ordering::SeqCst) {
                let _ = watcher_shared.tx.send(AcquisitionEvent::Finished { code });
            }
        }
        watcher_shared.inflight.store(false, Ordering::SeqCst);
    });
    true
}

/// Forward every non-empty line of `reader` as [`AcquisitionEvent::Line`].
fn forward_lines<R: Read>(reader: R, tx: &Sender<AcquisitionEvent>) {
    for chunk in BufReader::new(reader).split(b'\n') {
        let Ok(bytes) = chunk else { break };
        let line = String::from_utf8_lossy(&bytes);
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            continue;
        }
        if tx.send(AcquisitionEvent::Line(line.to_string())).is_err() {
            break;
        }
    }
}

/// Log every non-empty stderr line. Errors and warnings go out at `warn`.
fn log_stderr<R: Read>(reader: R) {
    for chunk in BufReader::new(reader).split(b'\n') {
        let Ok(bytes) = chunk else { break };
        let line = String::from_utf8_lossy(&bytes);
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            continue;
        }
        if line.starts_with("ERROR:") || line.starts_with("WARNING:") {
            warn!(target: "sigrok", "{line}");
        } else {
            debug!(target: "sigrok", "{line}");
        }
    }
}

/// Ask `child` to exit, then kill it if it is still alive after `grace`.
pub fn terminate(child: &mut Child, grace: Duration) {
    request_exit(child);
    let deadline = Instant::now() + grace;
    while Instant::now() < deadline {
        match child.try_wait() {
            Ok(Some(_)) => return,
            Ok(None) => thread::sleep(SLEEP_SLICE),
            Err(_) => break,
        }
    }
    warn!(pid = child.id(), "process ignored terminate request, killing");
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(unix)]
fn request_exit(child: &Child) {
    // SAFETY: plain signal delivery to a pid we spawned and have not reaped yet.
    unsafe {
        libc::kill(child.id() as libc::pid_t, libc::SIGTERM);
    }
}

#[cfg(not(unix))]
fn request_exit(_child: &Child) {}
