use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use signal_hook::consts::{SIGQUIT, SIGTSTP};

use crate::error::ShellError;

/// Flags raised by the shell's own signal handlers.
///
/// The handlers keep the shell alive when the terminal sends interrupt, quit
/// or suspend to the whole foreground process group. Children get default
/// dispositions back when they exec, so the signals still reach them.
#[derive(Debug, Clone, Default)]
pub struct SignalFlags {
    interrupted: Arc<AtomicBool>,
    quit: Arc<AtomicBool>,
    suspended: Arc<AtomicBool>,
}

impl SignalFlags {
    /// Names of the signals received since the last call.
    pub fn take_pending(&self) -> Vec<&'static str> {
        [
            (&self.interrupted, "SIGINT"),
            (&self.quit, "SIGQUIT"),
            (&self.suspended, "SIGTSTP"),
        ]
        .into_iter()
        .filter(|(flag, _)| flag.swap(false, Ordering::Relaxed))
        .map(|(_, name)| name)
        .collect()
    }
}

pub fn setup_signal_handlers() -> Result<SignalFlags, ShellError> {
    let flags = SignalFlags::default();

    let interrupted = Arc::clone(&flags.interrupted);
    ctrlc::set_handler(move || interrupted.store(true, Ordering::Relaxed))?;

    signal_hook::flag::register(SIGQUIT, Arc::clone(&flags.quit))?;
    signal_hook::flag::register(SIGTSTP, Arc::clone(&flags.suspended))?;

    Ok(flags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_pending_clears_flags() {
        let flags = SignalFlags::default();
        assert!(flags.take_pending().is_empty());

        flags.interrupted.store(true, Ordering::Relaxed);
        flags.suspended.store(true, Ordering::Relaxed);
        assert_eq!(flags.take_pending(), vec!["SIGINT", "SIGTSTP"]);
        assert!(flags.take_pending().is_empty());
    }
}
