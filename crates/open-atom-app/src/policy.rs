//! When to offer a menu entry.
//!
//! Lockdown suppresses everything. Otherwise an entry is offered only when the
//! location resolves to a local path that fits in a command line; an entry
//! never exists without something to run.
//!
//! Every reason for offering nothing is an [`Error`], absorbed here and logged.
//! The host only ever sees an empty list.

use crate::command::build_command;
use crate::config::PreferenceFlags;
use crate::file_info::FileInfo;
use crate::launcher::{ProcessLauncher, ScreenContext};
use crate::menu::{LaunchTarget, MenuAction, MenuContext};
use crate::resolver::PathResolver;
use open_atom_core::prelude::*;
use open_atom_core::UriClass;
use std::path::PathBuf;
use std::sync::Arc;

/// Whether any menu may be offered. Fails closed under lockdown.
pub fn menu_allowed(prefs: &PreferenceFlags) -> bool {
    !prefs.command_line_locked_down
}

/// Fail with [`Error::PolicyDenied`] under lockdown.
pub fn ensure_menu_allowed(prefs: &PreferenceFlags) -> Result<()> {
    if menu_allowed(prefs) {
        Ok(())
    } else {
        Err(Error::PolicyDenied)
    }
}

/// Turn the outcome of building an entry into the list handed to the host.
pub fn absorb(outcome: Result<Option<MenuAction>>) -> Vec<MenuAction> {
    match outcome {
        Ok(action) => action.into_iter().collect(),
        Err(e) if e.is_silent() => {
            debug!("No menu item: {}", e);
            Vec::new()
        }
        Err(e) => {
            warn!("No menu item: {}", e);
            Vec::new()
        }
    }
}

/// Inputs read once per menu request.
#[derive(Debug, Clone, Default)]
pub struct MenuRequest {
    pub prefs: PreferenceFlags,
    pub template: Option<String>,
    pub screen: ScreenContext,
}

/// Decides which menu actions a request gets.
#[derive(Clone)]
pub struct LaunchPolicy {
    resolver: PathResolver,
    launcher: Arc<dyn ProcessLauncher>,
}

impl std::fmt::Debug for LaunchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LaunchPolicy")
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

impl LaunchPolicy {
    pub fn new(resolver: PathResolver, launcher: Arc<dyn ProcessLauncher>) -> Self {
        Self { resolver, launcher }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Classify and resolve a folder offered in the background context.
    ///
    /// Every class qualifies here; only the path can rule a folder out.
    pub fn background_target(
        &self,
        folder: &FileInfo,
        prefs: &PreferenceFlags,
    ) -> Result<(UriClass, PathBuf)> {
        self.resolver.require(&folder.uri, prefs)
    }

    /// Classify and resolve the selected item.
    ///
    /// `Ok(None)` when the selection doesn't qualify: anything but exactly one
    /// item that opens as a folder, or the desktop pseudo-folder.
    pub fn selection_target<'a>(
        &self,
        files: &'a [FileInfo],
        prefs: &PreferenceFlags,
    ) -> Result<Option<(&'a FileInfo, UriClass, PathBuf)>> {
        let [file] = files else {
            trace!("Selection of {} items, no entry", files.len());
            return Ok(None);
        };

        if !file.kind.is_openable_folder() {
            return Ok(None);
        }

        if UriClass::classify(&file.uri) == UriClass::DesktopPseudoFolder {
            return Ok(None);
        }

        let (class, path) = self.resolver.require(&file.uri, prefs)?;
        Ok(Some((file, class, path)))
    }

    /// Build the entry for the currently displayed folder.
    pub fn background_action(
        &self,
        folder: &FileInfo,
        request: &MenuRequest,
    ) -> Result<Option<MenuAction>> {
        ensure_menu_allowed(&request.prefs)?;
        let (class, path) = self.background_target(folder, &request.prefs)?;
        self.action(MenuContext::Background, class, path, request)
            .map(Some)
    }

    /// Build the entry for a selection.
    pub fn selection_action(
        &self,
        files: &[FileInfo],
        request: &MenuRequest,
    ) -> Result<Option<MenuAction>> {
        ensure_menu_allowed(&request.prefs)?;
        match self.selection_target(files, &request.prefs)? {
            Some((_, class, path)) => self
                .action(MenuContext::Selection, class, path, request)
                .map(Some),
            None => Ok(None),
        }
    }

    /// Menu actions for the currently displayed folder.
    pub fn offer_for_background(&self, folder: &FileInfo, request: &MenuRequest) -> Vec<MenuAction> {
        absorb(self.background_action(folder, request))
    }

    /// Menu actions for a selection.
    pub fn offer_for_selection(&self, files: &[FileInfo], request: &MenuRequest) -> Vec<MenuAction> {
        absorb(self.selection_action(files, request))
    }

    /// Bind an action to a path, provided the path fits in a command line.
    fn action(
        &self,
        context: MenuContext,
        class: UriClass,
        path: PathBuf,
        request: &MenuRequest,
    ) -> Result<MenuAction> {
        if build_command(Some(&path), request.template.as_deref()).is_none() {
            return Err(Error::unquotable(path));
        }

        let target = LaunchTarget {
            path,
            template: request.template.clone(),
            screen: request.screen.clone(),
        };
        Ok(MenuAction::new(
            context,
            class,
            &request.prefs,
            target,
            self.launcher.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_info::FileKind;
    use crate::launcher::MockProcessLauncher;
    use crate::menu::labels;
    use crate::resolver::{FileUriMapper, MockVfsMapper, VfsMapper};

    fn policy_with(vfs: Arc<dyn VfsMapper>) -> LaunchPolicy {
        let resolver = PathResolver::with_user_dirs(
            vfs,
            Some(PathBuf::from("/home/user")),
            Some(PathBuf::from("/home/user/Desktop")),
        );
        LaunchPolicy::new(resolver, Arc::new(MockProcessLauncher::new()))
    }

    fn policy() -> LaunchPolicy {
        policy_with(Arc::new(FileUriMapper))
    }

    fn locked() -> MenuRequest {
        MenuRequest {
            prefs: PreferenceFlags {
                command_line_locked_down: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_menu_allowed_iff_not_locked() {
        assert!(menu_allowed(&PreferenceFlags::default()));
        assert!(!menu_allowed(&locked().prefs));
    }

    #[test]
    fn test_lockdown_reported_as_policy_denied() {
        let err = policy()
            .background_action(&FileInfo::directory("file:///tmp"), &locked())
            .unwrap_err();
        assert!(matches!(err, Error::PolicyDenied));
    }

    #[test]
    fn test_absorb_drops_errors() {
        assert!(absorb(Err(Error::PolicyDenied)).is_empty());
        assert!(absorb(Err(Error::config("unexpected"))).is_empty());
        assert!(absorb(Ok(None)).is_empty());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Unquotable Path Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_selection_offers_nothing() {
        let files = [FileInfo::directory("file:///tmp/caf%E9")];

        let err = policy()
            .selection_action(&files, &MenuRequest::default())
            .unwrap_err();
        assert!(matches!(err, Error::UnquotablePath { .. }));
        assert!(policy()
            .offer_for_selection(&files, &MenuRequest::default())
            .is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_background_offers_nothing() {
        let folder = FileInfo::directory("file:///tmp/caf%E9");
        assert!(policy()
            .offer_for_background(&folder, &MenuRequest::default())
            .is_empty());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Selection Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_selection_single_local_directory() {
        let files = [FileInfo::directory("file:///home/user/project")];
        let actions = policy().offer_for_selection(&files, &MenuRequest::default());

        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].target().path, PathBuf::from("/home/user/project"));
        assert_eq!(actions[0].tooltip, labels::SELECTED_FOLDER_TOOLTIP);
        assert_eq!(actions[0].name, "NautilusOpenAtom::open_atom");
    }

    #[test]
    fn test_selection_two_items_offers_nothing() {
        let files = [
            FileInfo::directory("file:///a"),
            FileInfo::directory("file:///b"),
        ];
        assert!(policy()
            .offer_for_selection(&files, &MenuRequest::default())
            .is_empty());
    }

    #[test]
    fn test_selection_empty_offers_nothing() {
        assert!(policy()
            .offer_for_selection(&[], &MenuRequest::default())
            .is_empty());
    }

    #[test]
    fn test_selection_kinds() {
        for (kind, offered) in [
            (FileKind::Directory, true),
            (FileKind::Shortcut, true),
            (FileKind::Mountable, true),
            (FileKind::Regular, false),
            (FileKind::Other, false),
        ] {
            let files = [FileInfo::new("file:///srv/thing", kind)];
            let actions = policy().offer_for_selection(&files, &MenuRequest::default());
            assert_eq!(actions.len() == 1, offered, "{kind:?}");
        }
    }

    #[test]
    fn test_selection_desktop_never_offered() {
        let files = [FileInfo::directory("x-nautilus-desktop:///")];
        assert!(policy()
            .offer_for_selection(&files, &MenuRequest::default())
            .is_empty());
    }

    #[test]
    fn test_selection_remote_with_mirror() {
        let mut mock = MockVfsMapper::new();
        mock.expect_local_path()
            .returning(|_| Some(PathBuf::from("/gvfs/sftp:host=h/dir")));
        let files = [FileInfo::new("sftp://h/dir", FileKind::Mountable)];

        let actions = policy_with(Arc::new(mock)).offer_for_selection(&files, &MenuRequest::default());

        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].target().path, PathBuf::from("/gvfs/sftp:host=h/dir"));
    }

    #[test]
    fn test_selection_remote_without_mirror() {
        let files = [FileInfo::directory("sftp://host/remote/dir")];
        assert!(policy()
            .offer_for_selection(&files, &MenuRequest::default())
            .is_empty());
    }

    #[test]
    fn test_selection_locked_down() {
        let files = [FileInfo::directory("file:///home/user")];
        assert!(policy().offer_for_selection(&files, &locked()).is_empty());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Background Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_background_local_folder() {
        let folder = FileInfo::directory("file:///home/user/My%20Docs");
        let actions = policy().offer_for_background(&folder, &MenuRequest::default());

        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].name, "NautilusOpenAtom::open_remote_atom");
        assert_eq!(actions[0].tooltip, labels::OPEN_FOLDER_TOOLTIP);
        assert_eq!(
            actions[0].command_line().as_deref(),
            Some("/bin/sh -c 'atom '\\''/home/user/My Docs'\\'''")
        );
    }

    #[test]
    fn test_background_desktop_opens_home() {
        let request = MenuRequest {
            prefs: PreferenceFlags {
                desktop_opens_home_dir: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let folder = FileInfo::directory("x-nautilus-desktop:///");
        let actions = policy().offer_for_background(&folder, &request);

        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].target().path, PathBuf::from("/home/user"));
        assert_eq!(actions[0].label, labels::OPEN_EDITOR);
        assert_eq!(actions[0].tooltip, labels::NEW_WINDOW_TOOLTIP);
    }

    #[test]
    fn test_background_desktop_default() {
        let folder = FileInfo::directory("x-nautilus-desktop:///");
        let actions = policy().offer_for_background(&folder, &MenuRequest::default());

        assert_eq!(actions[0].target().path, PathBuf::from("/home/user/Desktop"));
        assert_eq!(actions[0].label, labels::OPEN_IN_EDITOR);
    }

    #[test]
    fn test_background_remote_without_mirror() {
        let folder = FileInfo::directory("sftp://host/remote/dir");
        assert!(policy()
            .offer_for_background(&folder, &MenuRequest::default())
            .is_empty());

        let err = policy()
            .background_action(&folder, &MenuRequest::default())
            .unwrap_err();
        assert!(matches!(err, Error::UnresolvablePath { .. }));
    }

    #[test]
    fn test_background_locked_down() {
        let folder = FileInfo::directory("x-nautilus-desktop:///");
        assert!(policy().offer_for_background(&folder, &locked()).is_empty());
    }

    #[test]
    fn test_background_carries_template_and_screen() {
        let request = MenuRequest {
            template: Some("code".to_string()),
            screen: ScreenContext::new(":2"),
            ..Default::default()
        };
        let folder = FileInfo::directory("file:///srv");
        let actions = policy().offer_for_background(&folder, &request);

        let target = actions[0].target();
        assert_eq!(target.template.as_deref(), Some("code"));
        assert_eq!(target.screen, ScreenContext::new(":2"));
        assert_eq!(actions[0].name, "NautilusOpenAtom::open_remote_atom_code");
    }
}
