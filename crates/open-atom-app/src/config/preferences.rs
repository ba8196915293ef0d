//! Preference storage collaborators
//!
//! The core only ever asks for booleans by key and an optional editor
//! command. Where they come from is up to the provider injected at startup.

use super::settings::{config_file_path, load_settings_file};
use super::types::{
    PreferenceFlags, KEY_DESKTOP_IS_HOME_DIR, KEY_DESKTOP_OPENS_HOME_DIR,
    KEY_DISABLE_COMMAND_LINE,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Everything one menu request reads, taken together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceSnapshot {
    pub flags: PreferenceFlags,
    pub editor_command: Option<String>,
}

/// Read-only preference lookups.
///
/// Implementations return `false` for unset keys and on lookup errors.
#[cfg_attr(test, mockall::automock)]
pub trait PreferenceProvider: Send + Sync {
    /// Look up a boolean preference.
    fn get_bool(&self, key: &str) -> bool;

    /// Editor command template, `None` for the default editor.
    fn editor_command(&self) -> Option<String> {
        None
    }

    /// Read all flags in one go.
    fn flags(&self) -> PreferenceFlags {
        PreferenceFlags {
            desktop_opens_home_dir: self.get_bool(KEY_DESKTOP_OPENS_HOME_DIR),
            desktop_is_home_dir: self.get_bool(KEY_DESKTOP_IS_HOME_DIR),
            command_line_locked_down: self.get_bool(KEY_DISABLE_COMMAND_LINE),
        }
    }

    /// Read flags and editor command as one consistent view.
    ///
    /// Stores that can change underneath us override this to read once.
    fn snapshot(&self) -> PreferenceSnapshot {
        PreferenceSnapshot {
            flags: self.flags(),
            editor_command: self.editor_command(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TOML-backed preferences
// ─────────────────────────────────────────────────────────────────────────────

/// Preferences stored in `config.toml`.
///
/// The file is re-read on every lookup so edits apply to the next menu
/// without restarting the file manager.
#[derive(Debug, Clone)]
pub struct TomlPreferences {
    path: PathBuf,
}

impl TomlPreferences {
    /// Preferences in the user's config directory.
    pub fn user() -> Self {
        Self::at(config_file_path())
    }

    /// Preferences in a specific file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceProvider for TomlPreferences {
    fn get_bool(&self, key: &str) -> bool {
        load_settings_file(&self.path).get_bool(key)
    }

    fn editor_command(&self) -> Option<String> {
        load_settings_file(&self.path)
            .editor
            .template()
            .map(str::to_string)
    }

    fn flags(&self) -> PreferenceFlags {
        load_settings_file(&self.path).flags()
    }

    fn snapshot(&self) -> PreferenceSnapshot {
        let settings = load_settings_file(&self.path);
        PreferenceSnapshot {
            flags: settings.flags(),
            editor_command: settings.editor.template().map(str::to_string),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory preferences
// ─────────────────────────────────────────────────────────────────────────────

/// Fixed in-memory preferences, for command-line overrides and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticPreferences {
    values: HashMap<String, bool>,
    editor_command: Option<String>,
}

impl StaticPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a boolean key.
    pub fn with(mut self, key: &str, value: bool) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }

    /// Set the editor command template.
    pub fn with_editor_command(mut self, command: impl Into<String>) -> Self {
        self.editor_command = Some(command.into());
        self
    }

    /// Build from flags.
    pub fn from_flags(flags: PreferenceFlags) -> Self {
        Self::new()
            .with(KEY_DESKTOP_OPENS_HOME_DIR, flags.desktop_opens_home_dir)
            .with(KEY_DESKTOP_IS_HOME_DIR, flags.desktop_is_home_dir)
            .with(KEY_DISABLE_COMMAND_LINE, flags.command_line_locked_down)
    }
}

impl PreferenceProvider for StaticPreferences {
    fn get_bool(&self, key: &str) -> bool {
        self.values.get(key).copied().unwrap_or(false)
    }

    fn editor_command(&self) -> Option<String> {
        self.editor_command.clone()
    }
}
