//! Settings parser for `config.toml`

use super::types::Settings;
use open_atom_core::prelude::*;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "nautilus-open-atom";

// ─────────────────────────────────────────────────────────────────────────────
// Locations
// ─────────────────────────────────────────────────────────────────────────────

/// Directory holding `config.toml` (`~/.config/nautilus-open-atom`).
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Full path of the user's `config.toml`.
pub fn config_file_path() -> PathBuf {
    config_dir().join(CONFIG_FILENAME)
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings Loading
// ─────────────────────────────────────────────────────────────────────────────

/// Load settings from `<dir>/config.toml`.
pub fn load_settings_in(dir: &Path) -> Settings {
    load_settings_file(&dir.join(CONFIG_FILENAME))
}

/// Load settings from a specific file.
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings_file(config_path: &Path) -> Settings {
    if !config_path.exists() {
        trace!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                trace!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings Writing
// ─────────────────────────────────────────────────────────────────────────────

/// Create a commented default `config.toml` in `dir` if none exists.
///
/// Returns the path of the config file.
pub fn init_config_file(dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .map_err(|e| Error::config(format!("Failed to create {:?}: {}", dir, e)))?;
    }

    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        std::fs::write(&config_path, generate_default_config())
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(config_path)
}

/// Save settings to `<dir>/config.toml`.
///
/// Uses atomic write (temp file + rename).
pub fn save_settings(dir: &Path, settings: &Settings) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .map_err(|e| Error::config(format!("Failed to create {:?}: {}", dir, e)))?;
    }

    let config_path = dir.join(CONFIG_FILENAME);
    let temp_path = dir.join(".config.toml.tmp");

    let content = toml::to_string_pretty(settings)
        .map_err(|e| Error::config(format!("Failed to serialize settings: {}", e)))?;
    let full_content = format!("{}{}", generate_config_header(), content);

    std::fs::write(&temp_path, &full_content)
        .map_err(|e| Error::config(format!("Failed to write temp file: {}", e)))?;

    std::fs::rename(&temp_path, &config_path)
        .map_err(|e| Error::config(format!("Failed to rename temp file: {}", e)))?;

    info!("Saved settings to {:?}", config_path);
    Ok(())
}

fn generate_config_header() -> &'static str {
    "# nautilus-open-atom configuration\n\n"
}

fn generate_default_config() -> String {
    format!(
        r#"{}[desktop]
# Open the home directory instead of ~/Desktop from the desktop
opens_home_dir = false
# The file manager treats the home directory as the desktop
is_home_dir = false

[lockdown]
# Hide the menu entries entirely
disable_command_line = false

[editor]
# Command placed before the quoted folder path (empty = "atom")
# Examples:
#   "code --new-window"
#   "subl -n"
command = ""
"#,
        generate_config_header()
    )
}
