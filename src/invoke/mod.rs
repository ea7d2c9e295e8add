//! `b2` command-line assembly and execution.
//!
//! The invoker is a thin passthrough: it never validates flags and never
//! interprets the exit status. A non-zero exit is returned to the caller as
//! is; only a failure to launch the process is an error.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitStatus;

use anyhow::Result;

use crate::core::Settings;
use crate::translate::FlagTranslator;
use crate::util::config::DEFAULT_PROGRAM;
use crate::util::process::{quote_command, resolve_program, ProcessBuilder};

/// Executes an assembled command.
pub trait CommandRunner {
    fn run(&self, process: &ProcessBuilder) -> Result<ExitStatus>;
}

/// Runs the command as a child process with inherited stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, process: &ProcessBuilder) -> Result<ExitStatus> {
        process.status()
    }
}

/// Targets appended after the flags, in caller order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Targets {
    One(String),
    Many(Vec<String>),
}

impl Targets {
    fn append_to(&self, command: &mut Vec<String>) {
        match self {
            Targets::One(target) => command.push(target.clone()),
            Targets::Many(targets) => command.extend(targets.iter().cloned()),
        }
    }
}

impl Default for Targets {
    fn default() -> Self {
        Targets::Many(Vec::new())
    }
}

impl From<&str> for Targets {
    fn from(target: &str) -> Self {
        Targets::One(target.to_string())
    }
}

impl From<String> for Targets {
    fn from(target: String) -> Self {
        Targets::One(target)
    }
}

impl From<Vec<String>> for Targets {
    fn from(targets: Vec<String>) -> Self {
        Targets::Many(targets)
    }
}

impl<const N: usize> From<[&str; N]> for Targets {
    fn from(targets: [&str; N]) -> Self {
        Targets::Many(targets.iter().map(|t| t.to_string()).collect())
    }
}

/// Per-call inputs to [`B2Invoker::build`].
#[derive(Debug, Clone, Default)]
pub struct BuildRequest {
    /// Arguments placed right after the program, verbatim
    pub args: Vec<String>,
    /// Intermediate output directory
    pub build_dir: Option<PathBuf>,
    /// Targets in b2 target syntax
    pub targets: Targets,
}

impl BuildRequest {
    pub fn new() -> Self {
        BuildRequest::default()
    }

    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(|a| a.into()));
        self
    }

    pub fn build_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.build_dir = Some(dir.into());
        self
    }

    pub fn targets(mut self, targets: impl Into<Targets>) -> Self {
        self.targets = targets.into();
        self
    }
}

/// Invokes b2 with the flags translated from one settings snapshot.
pub struct B2Invoker {
    program: String,
    flags: Vec<String>,
    env: BTreeMap<String, String>,
    should_build: bool,
    runner: Box<dyn CommandRunner>,
}

impl B2Invoker {
    /// Translate `settings` once and keep the flags for later builds.
    pub fn new(translator: &FlagTranslator, settings: &Settings) -> Self {
        Self::from_flags(translator.translate(settings))
    }

    /// Invoker over an already translated flag list.
    pub fn from_flags(flags: Vec<String>) -> Self {
        B2Invoker {
            program: DEFAULT_PROGRAM.to_string(),
            flags,
            env: BTreeMap::new(),
            should_build: true,
            runner: Box::new(SystemRunner),
        }
    }

    /// Override the program name or path.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Add run-time environment variables for the child process.
    pub fn with_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Open or close the build gate. A closed gate makes [`build`](Self::build)
    /// a no-op.
    pub fn with_gate(mut self, should_build: bool) -> Self {
        self.should_build = should_build;
        self
    }

    /// Replace the runner used to execute commands.
    pub fn with_runner(mut self, runner: Box<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    pub fn should_build(&self) -> bool {
        self.should_build
    }

    /// Full command line: program, args, build dir, flags, targets.
    pub fn command_line(&self, request: &BuildRequest) -> Vec<String> {
        let mut command = vec![self.program.clone()];
        command.extend(request.args.iter().cloned());
        if let Some(ref dir) = request.build_dir {
            command.push(format!("--build-dir=\"{}\"", dir.display()));
        }
        command.extend(self.flags.iter().cloned());
        request.targets.append_to(&mut command);
        command
    }

    /// Run b2. Returns `None` without launching anything when the gate is
    /// closed.
    pub fn build(&self, request: &BuildRequest) -> Result<Option<ExitStatus>> {
        if !self.should_build {
            tracing::debug!("build step disabled, not invoking `{}`", self.program);
            return Ok(None);
        }

        let command = self.command_line(request);
        tracing::info!("{}", quote_command(&command));

        let process = ProcessBuilder::new(resolve_program(&self.program))
            .args(&command[1..])
            .envs(&self.env);

        let status = self.runner.run(&process)?;
        tracing::debug!("`{}` exited with {}", process.display_command(), status);
        Ok(Some(status))
    }
}
