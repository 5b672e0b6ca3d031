use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};
use workspace_sync::app::{install_termination_signals, render_tree, HostEvent, WorkspaceHost};
use workspace_sync::kernel::services::adapters::{ensure_settings_file, load_settings};
use workspace_sync::kernel::Action;

mod logging;

const TICK_INTERVAL: Duration = Duration::from_millis(50);

struct Options {
    path: Option<String>,
    once: bool,
    filter: String,
}

fn parse_args() -> Options {
    let mut options = Options {
        path: None,
        once: false,
        filter: String::new(),
    };
    for arg in std::env::args().skip(1) {
        if arg == "--once" {
            options.once = true;
        } else if let Some(value) = arg.strip_prefix("--filter=") {
            options.filter = value.to_string();
        } else if options.path.is_none() {
            options.path = Some(arg);
        }
    }
    options
}

#[derive(Debug)]
struct StartupPaths {
    root: PathBuf,
    open_file: Option<PathBuf>,
}

/// A directory argument becomes the root. A file argument opens that file,
/// rooted at `cwd` when the file lives under it and at its parent otherwise.
fn resolve_startup_paths(cwd: &Path, arg: Option<&str>) -> io::Result<StartupPaths> {
    let Some(arg) = arg else {
        return Ok(StartupPaths {
            root: cwd.to_path_buf(),
            open_file: None,
        });
    };
    let raw = Path::new(arg);
    let joined = if raw.is_absolute() {
        raw.to_path_buf()
    } else {
        cwd.join(raw)
    };
    let metadata = std::fs::metadata(&joined)?;
    if metadata.is_dir() {
        let root = if raw.is_absolute() {
            joined.canonicalize()?
        } else {
            joined
        };
        return Ok(StartupPaths {
            root,
            open_file: None,
        });
    }
    let root = if joined.starts_with(cwd) {
        cwd.to_path_buf()
    } else {
        joined
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.to_path_buf())
    };
    Ok(StartupPaths {
        root,
        open_file: Some(joined),
    })
}

fn main() -> io::Result<()> {
    let options = parse_args();
    let cwd = std::env::current_dir()?;
    let startup = match resolve_startup_paths(&cwd, options.path.as_deref()) {
        Ok(startup) => startup,
        Err(e) => {
            eprintln!("workspace-sync: {e}");
            eprintln!("usage: workspace-sync [path] [--once] [--filter=<text>]");
            std::process::exit(2);
        }
    };

    let logging = logging::init();
    if let Err(e) = ensure_settings_file() {
        tracing::warn!(error = %e, "cannot create settings file");
    }
    let settings = load_settings();
    if let Some(guard) = &logging {
        eprintln!("logging to {}", guard.log_dir().display());
    }

    let (signal_tx, signal_rx) = mpsc::channel();
    install_termination_signals(signal_tx)?;

    let mut host = WorkspaceHost::with_local_storage(settings)?;
    host.open_root(startup.root.clone());
    if let Some(file) = startup.open_file {
        host.dispatch(Action::Select { path: file });
    }

    loop {
        if let Ok(signal) = signal_rx.try_recv() {
            tracing::info!(?signal, "shutting down");
            break;
        }

        if host.tick(Instant::now()) {
            print!(
                "{}",
                render_tree(host.state(), host.drop_target(), &options.filter)
            );
        }
        for event in host.take_events() {
            match event {
                HostEvent::WatchFailed { path, error } => {
                    eprintln!("not watching {}: {error}", path.display());
                }
                other => tracing::debug!(?other, "unhandled host event"),
            }
        }

        let session = &host.state().session;
        if options.once && !session.is_loading {
            break;
        }
        std::thread::sleep(TICK_INTERVAL);
    }

    tracing::info!(root = %startup.root.display(), "exiting");
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/cli_startup_paths.rs"]
mod tests;
