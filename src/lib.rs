pub mod error;
pub mod flags;
pub mod shell;

pub mod core;
pub mod input;
pub mod process;
pub mod syntax;

#[cfg(test)]
pub(crate) mod test_support;
