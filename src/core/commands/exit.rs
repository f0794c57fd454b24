use super::{Command, CommandError, Context, Flow};

#[derive(Debug, Clone, Default)]
pub struct ExitCommand;

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    /// Resolves the exit status. Signalling jobs and leaving is up to the
    /// caller, which does the same on end of input.
    fn execute(&self, args: &[String], context: &mut Context<'_>) -> Result<Flow, CommandError> {
        match args {
            [] => Ok(Flow::Exit(context.state.last_foreground_status())),
            [status] => parse_status(status).map(Flow::Exit),
            _ => Err(CommandError::Usage("exit [status]")),
        }
    }
}

/// Accepts decimal digits only. The value wraps like an OS exit code.
fn parse_status(arg: &str) -> Result<i32, CommandError> {
    if arg.is_empty() || !arg.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CommandError::NotAnInteger(arg.to_string()));
    }

    let status = arg
        .bytes()
        .fold(0u32, |acc, digit| (acc * 10 + u32::from(digit - b'0')) % 256);
    Ok(status as i32)
}
