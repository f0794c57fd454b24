use std::env;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use super::{Command, CommandError, Context, Flow};

/// Where `cd` actually changes directory.
pub trait WorkingDirectory {
    fn change_to(&mut self, path: &Path) -> io::Result<()>;
}

/// Changes the working directory of the shell process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessDirectory;

impl WorkingDirectory for ProcessDirectory {
    fn change_to(&mut self, path: &Path) -> io::Result<()> {
        env::set_current_dir(path)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CdCommand;

impl CdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for CdCommand {
    fn execute(&self, args: &[String], context: &mut Context<'_>) -> Result<Flow, CommandError> {
        let target = match args {
            [] => context.env.home()?.to_path_buf(),
            [path] => PathBuf::from(path),
            _ => return Err(CommandError::Usage("cd [directory]")),
        };

        context
            .directory
            .change_to(&target)
            .map_err(|source| CommandError::ChangeDirectory {
                path: target.clone(),
                source,
            })?;
        debug!("changed directory to {}", target.display());
        Ok(Flow::Continue)
    }
}
