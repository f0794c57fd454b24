use std::path::Path;

use nix::unistd::Pid;

use crate::core::state::ShellState;

/// Values substituted into words before directives are parsed.
///
/// Recognised pairs are `~/` (home directory), `$$` (shell pid), `$?` (last
/// foreground status) and `$!` (last background pid). A word is scanned once
/// from left to right, so text produced by a substitution is never expanded
/// again.
#[derive(Debug, Clone)]
pub struct Expansion<'a> {
    home: Option<&'a Path>,
    shell_pid: Pid,
    last_status: i32,
    last_background_pid: Option<Pid>,
}

impl<'a> Expansion<'a> {
    pub fn new(home: Option<&'a Path>, shell_pid: Pid, state: &ShellState) -> Self {
        Self {
            home,
            shell_pid,
            last_status: state.last_foreground_status(),
            last_background_pid: state.last_background_pid(),
        }
    }

    pub fn expand(&self, word: &str) -> String {
        let mut result = String::with_capacity(word.len());
        let mut chars = word.chars().peekable();

        while let Some(c) = chars.next() {
            let replacement = match (c, chars.peek()) {
                ('~', Some('/')) => self
                    .home
                    .map(|home| format!("{}/", home.to_string_lossy())),
                ('$', Some('$')) => Some(self.shell_pid.to_string()),
                ('$', Some('?')) => Some(self.last_status.to_string()),
                ('$', Some('!')) => Some(
                    self.last_background_pid
                        .map(|pid| pid.to_string())
                        .unwrap_or_default(),
                ),
                _ => None,
            };

            match replacement {
                Some(text) => {
                    chars.next();
                    result.push_str(&text);
                }
                None => result.push(c),
            }
        }

        result
    }
}
