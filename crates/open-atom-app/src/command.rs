//! Editor command line construction.
//!
//! The folder path is always shell-quoted and appended to the editor command
//! template; the result is then wrapped in `/bin/sh -c` so a shell, never the
//! launcher, interprets it.

use open_atom_core::prelude::*;
use open_atom_core::{shell_command, shell_quote};
use std::path::Path;

/// Editor invoked when no command template is configured.
pub const DEFAULT_EDITOR: &str = "atom";

/// Build `<template> <quoted path>`.
///
/// Returns `None` when there is no path, or when the path is not valid UTF-8
/// and so cannot be placed in a command string.
pub fn build_command(path: Option<&Path>, template: Option<&str>) -> Option<String> {
    let path = path?;
    let Some(path_str) = path.to_str() else {
        debug!("Skipping non UTF-8 path {:?}", path);
        return None;
    };

    let quoted_path = shell_quote(path_str);
    let command = match template {
        Some(template) => format!("{} {}", template, quoted_path),
        None => format!("{} {}", DEFAULT_EDITOR, quoted_path),
    };

    Some(command)
}

/// Build the full `/bin/sh -c '<command>'` line handed to the launcher.
pub fn build_shell_command(path: Option<&Path>, template: Option<&str>) -> Option<String> {
    build_command(path, template).map(|command| shell_command(&command))
}

/// The program a template would run, if it can be determined.
pub fn editor_program(template: Option<&str>) -> Option<String> {
    match template {
        None => Some(DEFAULT_EDITOR.to_string()),
        Some(template) => shlex::split(template)?.into_iter().next(),
    }
}

/// Whether the editor program is on `PATH`.
///
/// Templates that can't be parsed are reported as unavailable. Only used for
/// diagnostics; menus are offered either way.
pub fn editor_available(template: Option<&str>) -> bool {
    match editor_program(template) {
        Some(program) => which::which(&program).is_ok(),
        None => false,
    }
}
