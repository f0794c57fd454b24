//! Turning a raw input line into a [`Command`].
//!
//! A line goes through three stages: [`tokenizer::split_words`] cuts it into
//! words, [`expander::Expansion`] rewrites the special two-character
//! sequences, and [`directive::parse_directives`] pulls the comment,
//! background and redirection markers out of the argument vector.

use std::path::PathBuf;

pub mod directive;
pub mod expander;
pub mod tokenizer;

pub use directive::parse_directives;
pub use expander::Expansion;
pub use tokenizer::{split_words, DEFAULT_DELIMITERS};

/// A command ready for dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    /// Program name followed by its arguments.
    pub argv: Vec<String>,
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub run_in_background: bool,
}

impl Command {
    pub fn program(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }
}

/// Runs all three stages over `line`. Returns `None` when nothing is left to
/// dispatch.
pub fn parse_line(line: &str, delimiters: &str, expansion: &Expansion<'_>) -> Option<Command> {
    let words = split_words(line, delimiters)
        .into_iter()
        .map(|word| expansion.expand(word))
        .collect();

    let command = parse_directives(words);
    (!command.is_empty()).then_some(command)
}
