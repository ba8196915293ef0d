//! Host-facing menu provider.
//!
//! The file manager asks a `MenuProvider` for items twice per right click at
//! most: once for the folder background and once for the selection. Both calls
//! are synchronous and run to completion inside the host's callback.
//!
//! [`OpenAtomProvider`] is constructed once with its collaborators injected:
//!
//! 1. [`PreferenceProvider`] - flags and editor command, one snapshot per request
//! 2. [`VfsMapper`] - maps remote URIs to locally mirrored paths
//! 3. [`ProcessLauncher`] - starts the editor when an action is activated

use std::fmt;
use std::sync::Arc;

use crate::config::PreferenceProvider;
use crate::file_info::FileInfo;
use crate::launcher::{ProcessLauncher, ScreenContext};
use crate::menu::MenuAction;
use crate::policy::{LaunchPolicy, MenuRequest};
use crate::resolver::{PathResolver, VfsMapper};
use open_atom_core::prelude::*;

/// Type name the provider is registered under with the host.
pub const PROVIDER_TYPE_NAME: &str = "NautilusOpenAtom";

/// The capability interface the host calls into.
///
/// Errors never cross this boundary: anything that goes wrong yields an empty
/// list.
pub trait MenuProvider: Send + Sync + fmt::Debug {
    /// Name the provider is registered under.
    fn type_name(&self) -> &'static str;

    /// Items for the currently displayed folder.
    fn background_items(&self, window: &ScreenContext, folder: &FileInfo) -> Vec<MenuAction>;

    /// Items for the selected files.
    fn file_items(&self, window: &ScreenContext, files: &[FileInfo]) -> Vec<MenuAction>;
}

/// Offers "Open in Atom" for folders.
#[derive(Clone)]
pub struct OpenAtomProvider {
    preferences: Arc<dyn PreferenceProvider>,
    policy: LaunchPolicy,
}

impl fmt::Debug for OpenAtomProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAtomProvider")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl OpenAtomProvider {
    pub fn new(
        preferences: Arc<dyn PreferenceProvider>,
        vfs: Arc<dyn VfsMapper>,
        launcher: Arc<dyn ProcessLauncher>,
    ) -> Self {
        Self::with_resolver(preferences, PathResolver::new(vfs), launcher)
    }

    /// Provider with a preconfigured resolver (fixed home/desktop dirs).
    pub fn with_resolver(
        preferences: Arc<dyn PreferenceProvider>,
        resolver: PathResolver,
        launcher: Arc<dyn ProcessLauncher>,
    ) -> Self {
        Self {
            preferences,
            policy: LaunchPolicy::new(resolver, launcher),
        }
    }

    pub fn policy(&self) -> &LaunchPolicy {
        &self.policy
    }

    /// Read preferences for one request.
    fn request(&self, window: &ScreenContext) -> MenuRequest {
        let snapshot = self.preferences.snapshot();
        trace!("Preferences for request: {:?}", snapshot);

        MenuRequest {
            prefs: snapshot.flags,
            template: snapshot.editor_command,
            screen: window.clone(),
        }
    }
}

impl MenuProvider for OpenAtomProvider {
    fn type_name(&self) -> &'static str {
        PROVIDER_TYPE_NAME
    }

    fn background_items(&self, window: &ScreenContext, folder: &FileInfo) -> Vec<MenuAction> {
        self.policy
            .offer_for_background(folder, &self.request(window))
    }

    fn file_items(&self, window: &ScreenContext, files: &[FileInfo]) -> Vec<MenuAction> {
        self.policy.offer_for_selection(files, &self.request(window))
    }
}
