//! Resolution of activation URIs to local directories.
//!
//! Local URIs decode directly, the desktop pseudo-folder becomes the home or
//! desktop directory depending on preferences, and everything else is handed
//! to a [`VfsMapper`] that knows whether the location is mirrored locally.

use crate::config::PreferenceFlags;
use open_atom_core::prelude::*;
use open_atom_core::{local_path_from_uri, UriClass};
use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use url::Url;

// ─────────────────────────────────────────────────────────────────────────────
// Virtual filesystem mapping
// ─────────────────────────────────────────────────────────────────────────────

/// Maps a URI to a local path when its content is mirrored on disk.
///
/// A missing mapping is an ordinary answer, not an error.
#[cfg_attr(test, mockall::automock)]
pub trait VfsMapper: Send + Sync {
    fn local_path(&self, uri: &str) -> Option<PathBuf>;
}

/// Mapper for hosts without a virtual filesystem: only `file:` URIs map.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileUriMapper;

impl VfsMapper for FileUriMapper {
    fn local_path(&self, uri: &str) -> Option<PathBuf> {
        local_path_from_uri(uri)
    }
}

/// Mapper for GVFS FUSE mounts.
///
/// GVFS exposes each mounted remote location as a directory named after its
/// mount spec, e.g. `sftp:host=example.com,user=bob`, under
/// `$XDG_RUNTIME_DIR/gvfs` (older releases used `~/.gvfs`).
#[derive(Debug, Clone)]
pub struct GvfsMapper {
    mount_root: PathBuf,
}

impl GvfsMapper {
    /// Mapper rooted at the session's GVFS mount directory.
    pub fn new() -> Self {
        Self::with_root(default_mount_root())
    }

    /// Mapper rooted at a specific directory.
    pub fn with_root(mount_root: impl Into<PathBuf>) -> Self {
        Self {
            mount_root: mount_root.into(),
        }
    }

    pub fn mount_root(&self) -> &Path {
        &self.mount_root
    }

    /// Directory GVFS would mount this URI under, and the path inside it.
    ///
    /// Pure: does not check that the mount exists.
    pub fn mount_location(&self, uri: &str) -> Option<(PathBuf, String)> {
        let url = Url::parse(uri).ok()?;
        let host = url.host_str()?;
        let user = percent_decode_str(url.username()).decode_utf8().ok()?;
        let path = percent_decode_str(url.path()).decode_utf8().ok()?;

        let (mount_name, inner) = match url.scheme() {
            "sftp" | "ssh" => (mount_spec("sftp", host, url.port(), &user), path.to_string()),
            "ftp" | "ftps" | "dav" | "davs" | "afp" => (
                mount_spec(url.scheme(), host, url.port(), &user),
                path.to_string(),
            ),
            "smb" => {
                let trimmed = path.trim_start_matches('/');
                let (share, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));
                if share.is_empty() {
                    return None;
                }
                let mut name = format!("smb-share:server={},share={}", host, share);
                if !user.is_empty() {
                    name.push_str(&format!(",user={}", user));
                }
                (name, format!("/{}", rest))
            }
            _ => return None,
        };

        Some((self.mount_root.join(mount_name), inner))
    }
}

impl Default for GvfsMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl VfsMapper for GvfsMapper {
    fn local_path(&self, uri: &str) -> Option<PathBuf> {
        if let Some(path) = local_path_from_uri(uri) {
            return Some(path);
        }

        let (mount_dir, inner) = self.mount_location(uri)?;
        if !mount_dir.is_dir() {
            trace!("No GVFS mount at {:?} for {}", mount_dir, uri);
            return None;
        }

        let mut path = mount_dir;
        for segment in inner.split('/').filter(|s| !s.is_empty()) {
            if segment == ".." {
                return None;
            }
            path.push(segment);
        }
        Some(path)
    }
}

fn mount_spec(kind: &str, host: &str, port: Option<u16>, user: &str) -> String {
    let mut spec = format!("{}:host={}", kind, host);
    if let Some(port) = port {
        spec.push_str(&format!(",port={}", port));
    }
    if !user.is_empty() {
        spec.push_str(&format!(",user={}", user));
    }
    spec
}

fn default_mount_root() -> PathBuf {
    if let Some(runtime) = dirs::runtime_dir() {
        let root = runtime.join("gvfs");
        if root.is_dir() {
            return root;
        }
    }

    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/"))
        .join(".gvfs")
}

// ─────────────────────────────────────────────────────────────────────────────
// Path resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Turns a classified URI into a local path.
///
/// Deterministic for a given resolver: the home and desktop directories are
/// captured at construction.
#[derive(Clone)]
pub struct PathResolver {
    vfs: Arc<dyn VfsMapper>,
    home_dir: Option<PathBuf>,
    desktop_dir: Option<PathBuf>,
}

impl std::fmt::Debug for PathResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathResolver")
            .field("home_dir", &self.home_dir)
            .field("desktop_dir", &self.desktop_dir)
            .finish_non_exhaustive()
    }
}

impl PathResolver {
    /// Resolver using the current user's home and desktop directories.
    pub fn new(vfs: Arc<dyn VfsMapper>) -> Self {
        let home_dir = dirs::home_dir();
        let desktop_dir = dirs::desktop_dir()
            .or_else(|| home_dir.as_ref().map(|h| h.join("Desktop")));
        Self::with_user_dirs(vfs, home_dir, desktop_dir)
    }

    /// Resolver with explicit home and desktop directories.
    pub fn with_user_dirs(
        vfs: Arc<dyn VfsMapper>,
        home_dir: Option<PathBuf>,
        desktop_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            vfs,
            home_dir,
            desktop_dir,
        }
    }

    /// Resolve a URI that has already been classified.
    ///
    /// `None` means the location has no reachable local path.
    pub fn resolve(&self, uri: &str, class: UriClass, prefs: &PreferenceFlags) -> Option<PathBuf> {
        let path = match class {
            UriClass::Local => local_path_from_uri(uri),
            UriClass::DesktopPseudoFolder => {
                if prefs.desktop_redirects_home() {
                    self.home_dir.clone()
                } else {
                    self.desktop_dir.clone()
                }
            }
            UriClass::Other => self.vfs.local_path(uri),
        };

        debug!("Resolved {} ({}) to {:?}", uri, class, path);
        path
    }

    /// Classify and resolve in one step.
    pub fn classify_and_resolve(
        &self,
        uri: &str,
        prefs: &PreferenceFlags,
    ) -> (UriClass, Option<PathBuf>) {
        let class = UriClass::classify(uri);
        (class, self.resolve(uri, class, prefs))
    }

    /// Classify and resolve, reporting a missing path as an error.
    ///
    /// A `file:` URI that fails to decode is [`Error::InvalidUri`]; any other
    /// location without a local path is [`Error::UnresolvablePath`].
    pub fn require(&self, uri: &str, prefs: &PreferenceFlags) -> Result<(UriClass, PathBuf)> {
        match self.classify_and_resolve(uri, prefs) {
            (class, Some(path)) => Ok((class, path)),
            (UriClass::Local, None) => Err(Error::invalid_uri(uri)),
            (_, None) => Err(Error::unresolvable(uri)),
        }
    }
}
