pub mod commands;
pub mod env;
pub mod jobs;
pub mod state;
