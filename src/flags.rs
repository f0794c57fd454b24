use clap::Parser;

/// Command line options of the shell binary.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "atrium", version, about)]
pub struct Flags {
    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,

    /// Read plain lines from stdin even when it is a terminal
    #[arg(long)]
    pub no_editor: bool,
}

impl Flags {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "warn"
        }
    }
}
