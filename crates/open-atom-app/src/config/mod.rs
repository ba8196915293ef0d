//! Configuration and preference storage for nautilus-open-atom
//!
//! Supports:
//! - `~/.config/nautilus-open-atom/config.toml` - desktop, lockdown and editor settings
//! - [`PreferenceProvider`] - the key/value interface the core reads flags through

pub mod preferences;
pub mod settings;
pub mod types;

pub use preferences::{PreferenceProvider, PreferenceSnapshot, StaticPreferences, TomlPreferences};
#[cfg(test)]
pub use preferences::MockPreferenceProvider;
pub use settings::{
    config_dir, config_file_path, init_config_file, load_settings_file, load_settings_in,
    save_settings,
};
pub use types::*;
