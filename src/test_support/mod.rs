//! Test utilities for b2-invoke unit tests.
//!
//! [`RecordingRunner`] stands in for the system runner so invoker tests can
//! inspect what would have been executed without spawning anything.

use std::process::ExitStatus;
use std::sync::{Arc, Mutex};

use anyhow::Result;

use crate::invoke::CommandRunner;
use crate::util::process::ProcessBuilder;

/// Build an `ExitStatus` carrying the given exit code.
pub fn exit_status(code: i32) -> ExitStatus {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        ExitStatus::from_raw(code << 8)
    }
    #[cfg(windows)]
    {
        use std::os::windows::process::ExitStatusExt;
        ExitStatus::from_raw(code as u32)
    }
}

/// Runner that records every command and returns a fixed status.
///
/// Clones share the same call log.
#[derive(Debug, Clone)]
pub struct RecordingRunner {
    status: ExitStatus,
    calls: Arc<Mutex<Vec<ProcessBuilder>>>,
}

impl RecordingRunner {
    pub fn new(status: ExitStatus) -> Self {
        RecordingRunner {
            status,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Commands run so far.
    pub fn calls(&self) -> Vec<ProcessBuilder> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, process: &ProcessBuilder) -> Result<ExitStatus> {
        self.calls.lock().unwrap().push(process.clone());
        Ok(self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status_codes() {
        assert!(exit_status(0).success());
        assert_eq!(exit_status(2).code(), Some(2));
    }

    #[test]
    fn test_recording_runner_shares_log() {
        let runner = RecordingRunner::new(exit_status(0));
        let clone = runner.clone();

        clone.run(&ProcessBuilder::new("b2").args(["link=static"])).unwrap();
        assert_eq!(runner.calls().len(), 1);
        assert_eq!(runner.calls()[0].display_command(), "b2 link=static");
    }
}
