use log::debug;

use super::Shell;
use crate::core::commands::{Context, Flow};
use crate::core::env::ShellEnv;
use crate::process::ProcessExecutor;
use crate::syntax::{parse_line, Expansion};

pub(crate) trait CommandHandler {
    fn execute_line(&mut self, line: &str, env: &ShellEnv) -> Flow;
}

impl CommandHandler for Shell {
    fn execute_line(&mut self, line: &str, env: &ShellEnv) -> Flow {
        let shell_pid = self.processes.shell_pid();
        let expansion = Expansion::new(env.home().ok(), shell_pid, &self.state);
        let Some(command) = parse_line(line, env.delimiters(), &expansion) else {
            return Flow::Continue;
        };
        let Some(program) = command.program() else {
            return Flow::Continue;
        };
        debug!("dispatching {:?}", command);

        // Builtins ignore redirections and the background marker.
        let mut context = Context {
            state: &mut self.state,
            env,
            directory: self.directory.as_mut(),
        };
        if let Some(result) = self.builtins.execute(program, command.args(), &mut context) {
            return match result {
                Ok(flow) => flow,
                Err(e) => {
                    self.report(&e);
                    Flow::Continue
                }
            };
        }

        let result = ProcessExecutor::new(self.processes.as_mut(), self.diagnostics.as_mut())
            .spawn_process(&command, &mut self.state);
        if let Err(e) = result {
            self.report(&e);
        }
        Flow::Continue
    }
}
