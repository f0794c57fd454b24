use std::fmt::Display;
use std::io::{self, Write};

use log::{debug, info, warn};
use nix::sys::signal::Signal;

mod executor;

use crate::{
    core::{
        commands::{Builtins, Flow, ProcessDirectory, WorkingDirectory},
        env::ShellEnv,
        state::ShellState,
    },
    error::ShellError,
    input::{LineSource, ReadOutcome},
    process::{
        reap_once,
        signal::{setup_signal_handlers, SignalFlags},
        ProcessControl, UnixProcessControl,
    },
};

use executor::CommandHandler;

/// Consecutive failed reads after which input is treated as exhausted.
const MAX_READ_FAILURES: usize = 2;

/// The interactive session: shell state plus the system it runs against.
pub struct Shell {
    pub(crate) state: ShellState,
    pub(crate) builtins: Builtins,
    pub(crate) processes: Box<dyn ProcessControl>,
    pub(crate) directory: Box<dyn WorkingDirectory>,
    pub(crate) diagnostics: Box<dyn Write>,
    pub(crate) environment: Box<dyn Fn() -> ShellEnv>,
    pub(crate) signals: Option<SignalFlags>,
}

impl Shell {
    /// A shell driving real processes, reporting on stderr.
    pub fn new() -> Result<Self, ShellError> {
        let signals = setup_signal_handlers()?;
        let mut shell = Self::with_system(
            UnixProcessControl::new(),
            ProcessDirectory,
            io::stderr(),
            ShellEnv::from_process,
        );
        shell.signals = Some(signals);
        Ok(shell)
    }

    pub fn with_system<P, D, W, E>(processes: P, directory: D, diagnostics: W, environment: E) -> Self
    where
        P: ProcessControl + 'static,
        D: WorkingDirectory + 'static,
        W: Write + 'static,
        E: Fn() -> ShellEnv + 'static,
    {
        Self {
            state: ShellState::new(),
            builtins: Builtins::new(),
            processes: Box::new(processes),
            directory: Box::new(directory),
            diagnostics: Box::new(diagnostics),
            environment: Box::new(environment),
            signals: None,
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    /// Reads and runs lines until `exit` or end of input. Returns the status
    /// the process should exit with.
    pub fn run(&mut self, input: &mut dyn LineSource) -> i32 {
        let mut read_failures = 0;

        loop {
            self.log_signals();
            self.reap();

            let env = (self.environment)();
            match input.read_line(env.prompt()) {
                Ok(ReadOutcome::Line(line)) => {
                    read_failures = 0;
                    if let Flow::Exit(status) = self.execute_line(&line, &env) {
                        return self.shutdown(status);
                    }
                }
                Ok(ReadOutcome::Interrupted) => {
                    if let Err(e) = writeln!(self.diagnostics) {
                        warn!("Couldn't write to stderr: {}", e);
                    }
                    continue;
                }
                Ok(ReadOutcome::Eof) => {
                    info!("end of input");
                    let status = self.state.last_foreground_status();
                    return self.shutdown(status);
                }
                Err(e) if e.is_undecodable_line() => {
                    self.report(&e);
                }
                Err(e) => {
                    self.report(&e);
                    read_failures += 1;
                    if read_failures >= MAX_READ_FAILURES {
                        let status = self.state.last_foreground_status();
                        return self.shutdown(status);
                    }
                }
            }
        }
    }

    fn reap(&mut self) {
        let result = reap_once(
            &mut self.state,
            self.processes.as_mut(),
            self.diagnostics.as_mut(),
        );
        if let Err(e) = result {
            self.report(&e);
        }
    }

    fn log_signals(&self) {
        if let Some(signals) = &self.signals {
            for name in signals.take_pending() {
                debug!("shell received {}", name);
            }
        }
    }

    /// Announces the exit and interrupts every tracked job.
    fn shutdown(&mut self, status: i32) -> i32 {
        if let Err(e) = writeln!(self.diagnostics, "\nexit") {
            warn!("Couldn't write to stderr: {}", e);
        }

        for pid in self.state.jobs().pids() {
            debug!("sending SIGINT to {}", pid);
            if let Err(e) = self.processes.kill(pid, Signal::SIGINT) {
                warn!("{}", e);
            }
        }

        info!("exiting with status {}", status);
        status
    }

    pub(crate) fn report(&mut self, error: &dyn Display) {
        if let Err(e) = writeln!(self.diagnostics, "atrium: {}", error) {
            warn!("Couldn't report '{}': {}", error, e);
        }
    }
}
