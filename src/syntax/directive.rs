use std::path::PathBuf;

use super::Command;

const COMMENT: &str = "#";
const BACKGROUND: &str = "&";
/// Trailing `< file` / `> file` pairs looked at, whatever their streams.
const MAX_REDIRECTIONS: usize = 2;

#[derive(Clone, Copy)]
enum Redirection {
    Input,
    Output,
}

impl Redirection {
    fn from_operator(word: &str) -> Option<Self> {
        match word {
            "<" => Some(Self::Input),
            ">" => Some(Self::Output),
            _ => None,
        }
    }
}

/// Separates comment, background and redirection directives from the argv.
///
/// Directives are only recognised at the end of the line, in the order
/// `[< file | > file]{0,2} [&]`. Only the last two pairs are consumed; a
/// third one further left stays in the argument vector.
pub fn parse_directives(mut words: Vec<String>) -> Command {
    if let Some(comment) = words.iter().position(|word| word == COMMENT) {
        words.truncate(comment);
    }

    let run_in_background = words.last().is_some_and(|word| word == BACKGROUND);
    if run_in_background {
        words.pop();
    }

    let mut input_path = None;
    let mut output_path = None;

    for _ in 0..MAX_REDIRECTIONS {
        let Some(kind) = words
            .len()
            .checked_sub(2)
            .and_then(|operator| words.get(operator))
            .and_then(|word| Redirection::from_operator(word))
        else {
            break;
        };

        let slot = match kind {
            Redirection::Input => &mut input_path,
            Redirection::Output => &mut output_path,
        };
        // The pair nearer the program overrides one after it.
        *slot = words.pop().map(PathBuf::from);
        words.pop();
    }

    Command {
        argv: words,
        input_path,
        output_path,
        run_in_background,
    }
}
