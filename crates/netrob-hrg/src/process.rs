//! Child process execution with live output relay and a bounded wait.

use std::io::{self, BufRead, BufReader, Read};
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{info, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Why a child process did not produce an exit status.
#[derive(Debug)]
pub(crate) enum RunFailure {
    Spawn(io::Error),
    Wait(io::Error),
    Timeout(Duration),
}

impl RunFailure {
    pub(crate) fn describe(&self) -> String {
        match self {
            RunFailure::Spawn(err) => format!("failed to spawn: {err}"),
            RunFailure::Wait(err) => format!("failed while waiting: {err}"),
            RunFailure::Timeout(limit) => format!("timed out after {}s", limit.as_secs_f64()),
        }
    }
}

/// Runs `command` to completion, relaying stdout at `info` and stderr at
/// `warn` line by line. The child is killed once `timeout` elapses; relay
/// threads are then left to drain on their own instead of being joined.
pub(crate) fn run_streaming(
    command: &mut Command,
    label: &str,
    timeout: Duration,
) -> Result<ExitStatus, RunFailure> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(RunFailure::Spawn)?;

    let relays: Vec<JoinHandle<()>> = [
        child.stdout.take().map(|out| relay(out, label, false)),
        child.stderr.take().map(|err| relay(err, label, true)),
    ]
    .into_iter()
    .flatten()
    .collect();

    let started = Instant::now();
    let outcome = loop {
        match child.try_wait() {
            Ok(Some(status)) => break Ok(status),
            Ok(None) if started.elapsed() >= timeout => {
                if let Err(err) = child.kill() {
                    warn!(program = label, %err, "failed to kill timed out child");
                }
                let _ = child.wait();
                break Err(RunFailure::Timeout(timeout));
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(err) => break Err(RunFailure::Wait(err)),
        }
    };

    // descendants of a killed child may still hold the pipes open
    if matches!(outcome, Err(RunFailure::Timeout(_))) {
        return outcome;
    }
    for handle in relays {
        if handle.join().is_err() {
            warn!(program = label, "output relay thread panicked");
        }
    }
    outcome
}

fn relay<R: Read + Send + 'static>(stream: R, label: &str, is_stderr: bool) -> JoinHandle<()> {
    let label = label.to_owned();
    thread::spawn(move || {
        for line in BufReader::new(stream).lines() {
            match line {
                Ok(line) if is_stderr => warn!(program = %label, "{line}"),
                Ok(line) => info!(program = %label, "{line}"),
                Err(_) => break,
            }
        }
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn reports_exit_status() {
        let status = run_streaming(
            Command::new("sh").args(["-c", "echo out; echo err >&2; exit 3"]),
            "sh",
            Duration::from_secs(30),
        )
        .unwrap();
        assert_eq!(status.code(), Some(3));
    }

    #[test]
    fn kills_children_that_overrun() {
        let failure = run_streaming(
            Command::new("sh").args(["-c", "exec sleep 5"]),
            "sh",
            Duration::from_millis(200),
        )
        .unwrap_err();
        assert!(matches!(failure, RunFailure::Timeout(_)));
    }

    #[test]
    fn timeout_holds_when_grandchildren_keep_the_pipes_open() {
        let started = Instant::now();
        let failure = run_streaming(
            Command::new("sh").args(["-c", "sleep 6; echo done"]),
            "sh",
            Duration::from_millis(200),
        )
        .unwrap_err();
        assert!(matches!(failure, RunFailure::Timeout(_)));
        assert!(
            started.elapsed() < Duration::from_secs(3),
            "returned after {:?}",
            started.elapsed()
        );
    }

    #[test]
    fn missing_programs_fail_to_spawn() {
        let failure = run_streaming(
            &mut Command::new("/nonexistent/netrob-genhrg"),
            "genhrg",
            Duration::from_secs(1),
        )
        .unwrap_err();
        assert!(matches!(failure, RunFailure::Spawn(_)));
    }
}
