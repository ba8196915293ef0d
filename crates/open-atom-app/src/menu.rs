//! Menu actions offered to the file manager.
//!
//! A [`MenuAction`] carries everything its activation needs (target path,
//! editor template, screen, launcher), captured when the menu is built. It
//! can only be created from a resolved path.

use crate::command::{build_shell_command, editor_available};
use crate::config::PreferenceFlags;
use crate::launcher::{launch_or_log, ProcessLauncher, ScreenContext};
use open_atom_core::prelude::*;
use open_atom_core::UriClass;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Menu strings.
pub mod labels {
    pub const OPEN_IN_EDITOR: &str = "Open in A_tom";
    pub const OPEN_EDITOR: &str = "Open A_tom";
    pub const SELECTED_FOLDER_TOOLTIP: &str = "Open the currently selected folder in Atom";
    pub const OPEN_FOLDER_TOOLTIP: &str = "Open the currently open folder in Atom";
    pub const NEW_WINDOW_TOOLTIP: &str = "Open a new Atom window";
    pub const ICON: &str = "atom";
}

const ACTION_PREFIX: &str = "NautilusOpenAtom";

/// Which host request a menu is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuContext {
    /// Right click on the folder background
    Background,
    /// Right click on a selected item
    Selection,
}

/// What an activated action opens, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchTarget {
    pub path: PathBuf,
    pub template: Option<String>,
    pub screen: ScreenContext,
}

/// One menu entry.
#[derive(Clone)]
pub struct MenuAction {
    /// Stable action identifier
    pub name: String,
    /// Label with `_` mnemonic
    pub label: &'static str,
    pub tooltip: &'static str,
    pub icon: &'static str,
    target: LaunchTarget,
    launcher: Arc<dyn ProcessLauncher>,
}

impl fmt::Debug for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuAction")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("tooltip", &self.tooltip)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl MenuAction {
    pub(crate) fn new(
        context: MenuContext,
        class: UriClass,
        prefs: &PreferenceFlags,
        target: LaunchTarget,
        launcher: Arc<dyn ProcessLauncher>,
    ) -> Self {
        let (label, tooltip) = label_and_tooltip(context, class, prefs);
        let name = action_name(context == MenuContext::Background, target.template.as_deref());

        Self {
            name,
            label,
            tooltip,
            icon: labels::ICON,
            target,
            launcher,
        }
    }

    pub fn target(&self) -> &LaunchTarget {
        &self.target
    }

    /// The `/bin/sh -c` line activation will run.
    pub fn command_line(&self) -> Option<String> {
        build_shell_command(Some(&self.target.path), self.target.template.as_deref())
    }

    /// Run the action. Failures are logged, never returned.
    ///
    /// Returns whether a process was started.
    pub fn activate(&self) -> bool {
        let template = self.target.template.as_deref();
        if !editor_available(template) {
            debug!("Editor for {:?} not found on PATH", template);
        }

        match self.command_line() {
            Some(command_line) => {
                launch_or_log(self.launcher.as_ref(), &command_line, &self.target.screen)
            }
            None => {
                warn!("No command for {:?}", self.target.path);
                false
            }
        }
    }
}

/// Label and tooltip for a menu entry.
pub fn label_and_tooltip(
    context: MenuContext,
    class: UriClass,
    prefs: &PreferenceFlags,
) -> (&'static str, &'static str) {
    match class {
        UriClass::DesktopPseudoFolder if prefs.desktop_opens_home_dir => {
            (labels::OPEN_EDITOR, labels::NEW_WINDOW_TOOLTIP)
        }
        UriClass::DesktopPseudoFolder => (labels::OPEN_IN_EDITOR, labels::OPEN_FOLDER_TOOLTIP),
        UriClass::Local | UriClass::Other => match context {
            MenuContext::Selection => (labels::OPEN_IN_EDITOR, labels::SELECTED_FOLDER_TOOLTIP),
            MenuContext::Background => (labels::OPEN_IN_EDITOR, labels::OPEN_FOLDER_TOOLTIP),
        },
    }
}

/// Action identifier, unique per template.
pub fn action_name(remote: bool, template: Option<&str>) -> String {
    let base = if remote {
        "open_remote_atom"
    } else {
        "open_atom"
    };

    match template {
        Some(template) => format!("{}::{}_{}", ACTION_PREFIX, base, template),
        None => format!("{}::{}", ACTION_PREFIX, base),
    }
}
