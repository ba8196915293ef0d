//! Process launching for built editor commands.
//!
//! The launcher receives the finished `/bin/sh -c '...'` line together with the
//! screen the menu was shown on. Once the process is spawned our part is
//! over: the editor's lifetime is not tracked, but a background thread reaps
//! the child so the host never accumulates zombies.

use open_atom_core::prelude::*;
use std::process::{Child, Command, Stdio};

// ─────────────────────────────────────────────────────────────────────────────
// Screen Context
// ─────────────────────────────────────────────────────────────────────────────

/// Display/screen the menu was activated on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenContext {
    /// X11/Wayland display name, e.g. `:0`
    pub display: Option<String>,
}

impl ScreenContext {
    pub fn new(display: impl Into<String>) -> Self {
        Self {
            display: Some(display.into()),
        }
    }

    /// The display of the current process environment.
    pub fn from_env() -> Self {
        Self {
            display: std::env::var("DISPLAY").ok().filter(|d| !d.is_empty()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Launchers
// ─────────────────────────────────────────────────────────────────────────────

/// Starts a command line on a screen.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessLauncher: Send + Sync {
    fn launch(&self, command_line: &str, screen: &ScreenContext) -> Result<()>;
}

/// Spawns the command as a detached child process.
///
/// The command line is split with POSIX shell word rules, so a
/// `/bin/sh -c '<command>'` line runs the shell with the command as its
/// single script argument.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpawnLauncher;

impl ProcessLauncher for SpawnLauncher {
    fn launch(&self, command_line: &str, screen: &ScreenContext) -> Result<()> {
        let mut command = prepare_command(command_line, screen)?;

        let child = command
            .spawn()
            .map_err(|e| Error::launch_failure(command_line, e.to_string()))?;

        debug!("Spawned pid {} for {}", child.id(), command_line);
        reap_in_background(child);
        Ok(())
    }
}

/// Wait for the child on a detached thread.
///
/// The `/bin/sh` wrapper exits as soon as the editor forks away, and the host
/// process stays alive for the whole session; without a wait its entry would
/// linger in the process table.
fn reap_in_background(mut child: Child) {
    let pid = child.id();
    let reaper = std::thread::Builder::new()
        .name(format!("reap-{pid}"))
        .spawn(move || match child.wait() {
            Ok(status) => trace!("Child {} exited with {}", pid, status),
            Err(e) => debug!("Could not wait for child {}: {}", pid, e),
        });

    if let Err(e) = reaper {
        warn!("Could not start reaper thread for pid {}: {}", pid, e);
    }
}

/// Build the [`Command`] for a command line without running it.
pub fn prepare_command(command_line: &str, screen: &ScreenContext) -> Result<Command> {
    let words = shlex::split(command_line)
        .ok_or_else(|| Error::launch_failure(command_line, "unbalanced quotes"))?;
    let (program, args) = words.split_first().ok_or(Error::EmptyCommand)?;

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    if let Some(display) = &screen.display {
        command.env("DISPLAY", display);
    }

    Ok(command)
}

/// Launch and swallow failures.
///
/// A failed launch is logged and otherwise ignored: no retry, no dialog.
/// Returns whether the launch succeeded.
pub fn launch_or_log(
    launcher: &dyn ProcessLauncher,
    command_line: &str,
    screen: &ScreenContext,
) -> bool {
    match launcher.launch(command_line, screen) {
        Ok(()) => {
            info!("Launched {}", command_line);
            true
        }
        Err(e) => {
            warn!("Could not start application on atom: {}", e);
            false
        }
    }
}
