//! Extension lifecycle: initialize, list provider types, shutdown.
//!
//! The host loads the extension once, asks which provider types it exposes,
//! and shuts it down on unload. Everything the providers need (preferences,
//! GVFS mapping, launcher) is wired up here and nowhere else.

use std::sync::Arc;

use open_atom_app::{
    GvfsMapper, MenuProvider, OpenAtomProvider, PreferenceProvider, ProcessLauncher,
    SpawnLauncher, TomlPreferences, VfsMapper,
};
use open_atom_core::logging;
use open_atom_core::prelude::*;

/// A loaded extension.
#[derive(Debug)]
pub struct ExtensionModule {
    provider: Arc<dyn MenuProvider>,
}

impl ExtensionModule {
    /// Load the extension with the user's preferences and the session's GVFS
    /// mounts.
    pub fn initialize() -> Self {
        if let Err(e) = logging::init() {
            eprintln!("nautilus-open-atom: logging disabled: {}", e);
        }

        Self::with_collaborators(
            Arc::new(TomlPreferences::user()),
            Arc::new(GvfsMapper::new()),
            Arc::new(SpawnLauncher),
        )
    }

    /// Load the extension with explicit collaborators.
    pub fn with_collaborators(
        preferences: Arc<dyn PreferenceProvider>,
        vfs: Arc<dyn VfsMapper>,
        launcher: Arc<dyn ProcessLauncher>,
    ) -> Self {
        let provider = OpenAtomProvider::new(preferences, vfs, launcher);
        Self::with_provider(Arc::new(provider))
    }

    /// Load the extension around an already built provider.
    pub fn with_provider(provider: Arc<dyn MenuProvider>) -> Self {
        info!("Initializing nautilus-open-atom extension");
        Self { provider }
    }

    /// Provider type names exposed to the host.
    pub fn list_types(&self) -> Vec<&'static str> {
        vec![self.provider.type_name()]
    }

    /// The menu provider the host calls into.
    pub fn menu_provider(&self) -> Arc<dyn MenuProvider> {
        self.provider.clone()
    }

    /// Unload the extension. The provider is released with the module.
    pub fn shutdown(self) {
        info!("Shutting down nautilus-open-atom extension");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use open_atom_app::{FileInfo, FileUriMapper, ScreenContext, StaticPreferences};

    fn provider() -> Arc<dyn MenuProvider> {
        Arc::new(OpenAtomProvider::new(
            Arc::new(StaticPreferences::new()),
            Arc::new(FileUriMapper),
            Arc::new(SpawnLauncher),
        ))
    }

    #[test]
    fn test_list_types() {
        let module = ExtensionModule::with_collaborators(
            Arc::new(StaticPreferences::new()),
            Arc::new(FileUriMapper),
            Arc::new(SpawnLauncher),
        );
        assert_eq!(module.list_types(), vec!["NautilusOpenAtom"]);
        module.shutdown();
    }

    #[test]
    fn test_menu_provider_is_wired() {
        let module = ExtensionModule::with_collaborators(
            Arc::new(StaticPreferences::new()),
            Arc::new(FileUriMapper),
            Arc::new(SpawnLauncher),
        );
        let items = module
            .menu_provider()
            .file_items(&ScreenContext::default(), &[FileInfo::directory("file:///tmp")]);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_menu_provider_shares_the_module_provider() {
        let provider = provider();
        let module = ExtensionModule::with_provider(provider.clone());

        assert!(Arc::ptr_eq(&module.menu_provider(), &provider));
        assert_eq!(module.list_types(), vec![provider.type_name()]);
    }

    #[test]
    fn test_shutdown_releases_provider() {
        let provider = provider();
        let module = ExtensionModule::with_provider(provider.clone());
        assert_eq!(Arc::strong_count(&provider), 2);

        module.shutdown();
        assert_eq!(Arc::strong_count(&provider), 1);
    }
}
