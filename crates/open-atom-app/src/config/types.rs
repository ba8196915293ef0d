//! Configuration types for nautilus-open-atom
//!
//! Defines:
//! - `Settings` - contents of `config.toml`
//! - `PreferenceFlags` - the boolean flags read on every menu request
//! - The preference keys the flags are looked up by

use serde::{Deserialize, Serialize};

/// Desktop pseudo-folder opens the home directory instead of `~/Desktop`.
pub const KEY_DESKTOP_OPENS_HOME_DIR: &str = "/apps/nautilus-open-atom/desktop_opens_home_dir";

/// File manager shows the home directory as the desktop.
pub const KEY_DESKTOP_IS_HOME_DIR: &str = "/apps/nautilus/preferences/desktop_is_home_dir";

/// Administrative lockdown of command-line functionality.
pub const KEY_DISABLE_COMMAND_LINE: &str = "/desktop/gnome/lockdown/disable_command_line";

/// Every key [`PreferenceFlags`] is built from.
pub const KNOWN_KEYS: &[&str] = &[
    KEY_DESKTOP_OPENS_HOME_DIR,
    KEY_DESKTOP_IS_HOME_DIR,
    KEY_DISABLE_COMMAND_LINE,
];

/// Boolean preferences consulted while building menus.
///
/// Read fresh from a [`super::PreferenceProvider`] on every request; never
/// cached by the core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreferenceFlags {
    pub desktop_opens_home_dir: bool,
    pub desktop_is_home_dir: bool,
    pub command_line_locked_down: bool,
}

impl PreferenceFlags {
    /// Either flag redirects the desktop pseudo-folder to the home directory.
    pub fn desktop_redirects_home(&self) -> bool {
        self.desktop_is_home_dir || self.desktop_opens_home_dir
    }
}

/// Application settings (`config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub desktop: DesktopSettings,

    #[serde(default)]
    pub lockdown: LockdownSettings,

    #[serde(default)]
    pub editor: EditorSettings,
}

impl Settings {
    /// Look up a boolean preference by key.
    ///
    /// Unknown keys read as `false`.
    pub fn get_bool(&self, key: &str) -> bool {
        match key {
            KEY_DESKTOP_OPENS_HOME_DIR => self.desktop.opens_home_dir,
            KEY_DESKTOP_IS_HOME_DIR => self.desktop.is_home_dir,
            KEY_DISABLE_COMMAND_LINE => self.lockdown.disable_command_line,
            _ => false,
        }
    }

    /// The flags these settings describe.
    pub fn flags(&self) -> PreferenceFlags {
        PreferenceFlags {
            desktop_opens_home_dir: self.get_bool(KEY_DESKTOP_OPENS_HOME_DIR),
            desktop_is_home_dir: self.get_bool(KEY_DESKTOP_IS_HOME_DIR),
            command_line_locked_down: self.get_bool(KEY_DISABLE_COMMAND_LINE),
        }
    }
}

/// Desktop pseudo-folder settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DesktopSettings {
    /// Open the home directory when invoked on the desktop
    #[serde(default)]
    pub opens_home_dir: bool,

    /// The desktop is the home directory
    #[serde(default)]
    pub is_home_dir: bool,
}

/// Lockdown settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LockdownSettings {
    /// Hide every menu entry
    #[serde(default)]
    pub disable_command_line: bool,
}

/// Editor settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EditorSettings {
    /// Command prefix placed before the quoted path (empty = `atom`)
    #[serde(default)]
    pub command: String,
}

impl EditorSettings {
    /// The configured command template, if any.
    pub fn template(&self) -> Option<&str> {
        let trimmed = self.command.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}
