//! Prelude for common imports used throughout all nautilus-open-atom crates

pub use crate::error::{Error, Result};
pub use tracing::{debug, info, trace, warn};
