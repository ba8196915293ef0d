//! What the host tells us about a file or folder.

/// Kind of a file as reported by the file manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileKind {
    Regular,
    #[default]
    Directory,
    Shortcut,
    Mountable,
    Other,
}

impl FileKind {
    /// Kinds that can be opened as a folder.
    pub fn is_openable_folder(&self) -> bool {
        matches!(
            self,
            FileKind::Directory | FileKind::Shortcut | FileKind::Mountable
        )
    }
}

/// A selected item or the currently displayed folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Activation URI
    pub uri: String,
    pub kind: FileKind,
}

impl FileInfo {
    pub fn new(uri: impl Into<String>, kind: FileKind) -> Self {
        Self {
            uri: uri.into(),
            kind,
        }
    }

    pub fn directory(uri: impl Into<String>) -> Self {
        Self::new(uri, FileKind::Directory)
    }
}
