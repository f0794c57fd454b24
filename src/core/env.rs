use std::env;
use std::path::{Path, PathBuf};

use crate::syntax::DEFAULT_DELIMITERS;

#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("Home directory not found")]
    HomeDirNotFound,
}

/// Environment settings the shell consults on every iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellEnv {
    home: Option<PathBuf>,
    delimiters: String,
    prompt: String,
}

impl Default for ShellEnv {
    fn default() -> Self {
        Self {
            home: None,
            delimiters: DEFAULT_DELIMITERS.to_string(),
            prompt: String::new(),
        }
    }
}

impl ShellEnv {
    /// Reads `HOME`, `IFS` and `PS1` from the process environment.
    pub fn from_process() -> Self {
        let mut shell_env = Self::from_lookup(|name| env::var(name).ok());
        if shell_env.home.is_none() {
            shell_env.home = dirs::home_dir();
        }
        shell_env
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            home: lookup("HOME").map(PathBuf::from),
            delimiters: lookup("IFS").unwrap_or(defaults.delimiters),
            prompt: lookup("PS1").unwrap_or(defaults.prompt),
        }
    }

    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn with_delimiters(mut self, delimiters: impl Into<String>) -> Self {
        self.delimiters = delimiters.into();
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn home(&self) -> Result<&Path, EnvError> {
        self.home.as_deref().ok_or(EnvError::HomeDirNotFound)
    }

    pub fn delimiters(&self) -> &str {
        &self.delimiters
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}
