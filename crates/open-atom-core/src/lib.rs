//! # open-atom-core - Host-independent Resolution Logic
//!
//! Foundation crate for nautilus-open-atom. Provides URI classification,
//! `file:` URI decoding, shell quoting, error handling and logging.
//!
//! This crate knows nothing about the file manager, preferences or process
//! launching; everything here is a pure function of its inputs.
//!
//! ## Public API
//!
//! ### URIs (`uri`)
//! - [`UriClass`] - Local / DesktopPseudoFolder / Other
//! - [`classify()`] - Classify an activation URI by its scheme
//! - [`local_path_from_uri()`] - Decode a `file:` URI to a local path
//!
//! ### Quoting (`quote`)
//! - [`shell_quote()`] - Single-quote a string for a POSIX shell
//! - [`shell_command()`] - Wrap a command as `/bin/sh -c '<command>'`
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Error enum with `is_silent` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ## Prelude
//!
//! ```rust
//! use open_atom_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod prelude;
pub mod quote;
pub mod uri;

pub use error::{Error, Result};
pub use quote::{shell_command, shell_quote, SHELL};
pub use uri::{
    classify, local_path_from_uri, parse_scheme, UriClass, DESKTOP_SCHEME, LOCAL_SCHEME,
};
