//! nautilus-open-atom library
//!
//! File manager extension that opens the selected or current folder in an
//! external editor.

pub mod module;

pub use module::ExtensionModule;

/// Re-exports of the workspace crates
pub mod core {
    pub use open_atom_core::*;
}

pub mod app {
    pub use open_atom_app::*;
}
