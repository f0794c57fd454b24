use std::process;

use atrium::error::ShellError;
use atrium::flags::Flags;
use atrium::input;
use atrium::shell::Shell;
use clap::Parser;
use env_logger::Env;
use log::info;

fn run(flags: &Flags) -> Result<i32, ShellError> {
    let mut shell = Shell::new()?;
    let mut input = input::open(flags)?;
    Ok(shell.run(input.as_mut()))
}

fn main() {
    let flags = Flags::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(flags.default_log_filter()))
        .init();
    info!("starting with {:?}", flags);

    match run(&flags) {
        Ok(status) => process::exit(status),
        Err(e) => {
            eprintln!("atrium: {}", e);
            process::exit(1);
        }
    }
}
