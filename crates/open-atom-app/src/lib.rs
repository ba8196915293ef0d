//! # open-atom-app - Menu Policy and Collaborators
//!
//! Everything between the file manager's menu callbacks and the spawned
//! editor: preferences, path resolution, command building, launch policy and
//! process launching.
//!
//! ## Public API
//!
//! - [`OpenAtomProvider`] / [`MenuProvider`] - the two host entry points
//! - [`LaunchPolicy`], [`menu_allowed()`] - which actions a request gets
//! - [`PathResolver`], [`VfsMapper`], [`GvfsMapper`] - URI to local path
//! - [`build_command()`], [`build_shell_command()`] - editor command lines
//! - [`ProcessLauncher`], [`SpawnLauncher`] - process start
//! - [`config`] - `config.toml` and [`PreferenceProvider`]

pub mod command;
pub mod config;
pub mod file_info;
pub mod launcher;
pub mod menu;
pub mod policy;
pub mod provider;
pub mod resolver;

pub use command::{
    build_command, build_shell_command, editor_available, editor_program, DEFAULT_EDITOR,
};
pub use config::{
    PreferenceFlags, PreferenceProvider, PreferenceSnapshot, StaticPreferences, TomlPreferences,
};
pub use file_info::{FileInfo, FileKind};
pub use launcher::{launch_or_log, prepare_command, ProcessLauncher, ScreenContext, SpawnLauncher};
pub use menu::{labels, LaunchTarget, MenuAction, MenuContext};
pub use policy::{absorb, ensure_menu_allowed, menu_allowed, LaunchPolicy, MenuRequest};
pub use provider::{MenuProvider, OpenAtomProvider, PROVIDER_TYPE_NAME};
pub use resolver::{FileUriMapper, GvfsMapper, PathResolver, VfsMapper};
