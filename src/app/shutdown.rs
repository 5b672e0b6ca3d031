use std::io;
use std::sync::mpsc::Sender;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    SigInt,
    SigTerm,
}

impl TerminationSignal {
    pub fn exit_code(self) -> i32 {
        match self {
            TerminationSignal::SigInt => 130,
            TerminationSignal::SigTerm => 143,
        }
    }
}

/// Forwards SIGINT/SIGTERM to `tx`. If the main loop has not exited two
/// seconds later, the process is terminated with the conventional code.
#[cfg(unix)]
pub fn install_termination_signals(
    tx: Sender<TerminationSignal>,
) -> io::Result<std::thread::JoinHandle<()>> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;
    use std::time::Duration;

    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    Ok(std::thread::spawn(move || {
        for sig in signals.forever() {
            let signal = match sig {
                SIGINT => TerminationSignal::SigInt,
                SIGTERM => TerminationSignal::SigTerm,
                _ => continue,
            };

            let _ = tx.send(signal);

            std::thread::sleep(Duration::from_secs(2));
            tracing::warn!(?signal, "main loop did not stop in time, exiting");
            std::process::exit(signal.exit_code());
        }
    }))
}

#[cfg(not(unix))]
pub fn install_termination_signals(
    _tx: Sender<TerminationSignal>,
) -> io::Result<std::thread::JoinHandle<()>> {
    Ok(std::thread::spawn(|| {}))
}

#[cfg(test)]
#[path = "../../tests/unit/app/shutdown.rs"]
mod tests;
