/// Delimiters used when `IFS` is not set.
pub const DEFAULT_DELIMITERS: &str = " \t\n";

/// Splits `line` into its maximal runs of non-delimiter characters.
///
/// An empty delimiter set never splits, so a non-empty line becomes a single
/// word.
pub fn split_words<'a>(line: &'a str, delimiters: &str) -> Vec<&'a str> {
    line.split(|c: char| delimiters.contains(c))
        .filter(|word| !word.is_empty())
        .collect()
}
