//! Activation URI classification and `file:` URI decoding
//!
//! The file manager hands us activation URIs as plain strings. Only the scheme
//! decides how a URI is treated:
//!
//! - `file:` - a local file, decoded straight to a filesystem path
//! - `x-nautilus-desktop:` - the desktop pseudo-folder
//! - anything else, or no scheme at all - a remote or virtual location

use percent_encoding::percent_decode_str;
use std::path::PathBuf;

/// Scheme of local `file:` URIs.
pub const LOCAL_SCHEME: &str = "file";

/// Scheme the file manager uses for the desktop view.
pub const DESKTOP_SCHEME: &str = "x-nautilus-desktop";

/// How an activation URI should be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UriClass {
    /// `file:` URI, always has a direct local path
    Local,
    /// The desktop pseudo-folder
    DesktopPseudoFolder,
    /// Remote or virtual location, may be mirrored locally
    Other,
}

impl UriClass {
    /// Classify an activation URI.
    ///
    /// Total: malformed input or input without a scheme is `Other`.
    pub fn classify(uri: &str) -> Self {
        match parse_scheme(uri) {
            Some(scheme) if scheme.eq_ignore_ascii_case(LOCAL_SCHEME) => UriClass::Local,
            Some(scheme) if scheme.eq_ignore_ascii_case(DESKTOP_SCHEME) => {
                UriClass::DesktopPseudoFolder
            }
            _ => UriClass::Other,
        }
    }
}

impl std::fmt::Display for UriClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UriClass::Local => write!(f, "local"),
            UriClass::DesktopPseudoFolder => write!(f, "desktop"),
            UriClass::Other => write!(f, "other"),
        }
    }
}

/// Shorthand for [`UriClass::classify`].
pub fn classify(uri: &str) -> UriClass {
    UriClass::classify(uri)
}

/// Extract the scheme of a URI.
///
/// RFC 3986: `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )` followed by `:`.
/// Returns `None` when there is no separator or the scheme is malformed.
pub fn parse_scheme(uri: &str) -> Option<&str> {
    let (scheme, _) = uri.split_once(':')?;
    let mut chars = scheme.chars();

    if !chars.next()?.is_ascii_alphabetic() {
        return None;
    }

    if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        Some(scheme)
    } else {
        None
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// file: URI decoding
// ─────────────────────────────────────────────────────────────────────────────

/// Convert a `file:` URI to a local path.
///
/// Accepts `file:///path`, `file://host/path` (host is ignored) and
/// `file:/path`. Returns `None` for other schemes, fragments, malformed
/// escapes, and escapes that decode to NUL or `/`.
pub fn local_path_from_uri(uri: &str) -> Option<PathBuf> {
    let scheme = parse_scheme(uri)?;
    if !scheme.eq_ignore_ascii_case(LOCAL_SCHEME) {
        return None;
    }

    let rest = &uri[scheme.len() + 1..];
    if rest.contains('#') {
        return None;
    }

    let path_part = if let Some(after) = rest.strip_prefix("//") {
        let slash = after.find('/')?;
        let host = &after[..slash];
        if !valid_escapes(host, false) {
            return None;
        }
        &after[slash..]
    } else {
        rest
    };

    if !path_part.starts_with('/') || !valid_escapes(path_part, true) {
        return None;
    }

    let bytes: Vec<u8> = percent_decode_str(path_part).collect();
    path_from_bytes(bytes)
}

/// Check `%XX` escapes are well formed.
///
/// With `path` set, escapes that would smuggle in a separator are rejected.
fn valid_escapes(segment: &str, path: bool) -> bool {
    let bytes = segment.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = match segment.get(i + 1..i + 3) {
                Some(hex) if hex.bytes().all(|b| b.is_ascii_hexdigit()) => hex,
                _ => return false,
            };
            let value = match u8::from_str_radix(hex, 16) {
                Ok(value) => value,
                Err(_) => return false,
            };
            if value == 0 || (path && value == b'/') {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    true
}

#[cfg(unix)]
fn path_from_bytes(bytes: Vec<u8>) -> Option<PathBuf> {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    Some(PathBuf::from(OsString::from_vec(bytes)))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: Vec<u8>) -> Option<PathBuf> {
    String::from_utf8(bytes).ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    // ─────────────────────────────────────────────────────────────────────────
    // Classification Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_classify_file_scheme_is_local() {
        assert_eq!(classify("file:///home/user"), UriClass::Local);
        assert_eq!(classify("file:/etc"), UriClass::Local);
        assert_eq!(classify("FILE:///tmp"), UriClass::Local);
    }

    #[test]
    fn test_classify_desktop_scheme() {
        assert_eq!(classify("x-nautilus-desktop:///"), UriClass::DesktopPseudoFolder);
    }

    #[test]
    fn test_classify_other_schemes() {
        assert_eq!(classify("sftp://host/remote/dir"), UriClass::Other);
        assert_eq!(classify("smb://server/share"), UriClass::Other);
        assert_eq!(classify("trash:///"), UriClass::Other);
        assert_eq!(classify("files:///tmp"), UriClass::Other);
    }

    #[test]
    fn test_classify_without_scheme_is_other() {
        assert_eq!(classify(""), UriClass::Other);
        assert_eq!(classify("/home/user"), UriClass::Other);
        assert_eq!(classify("1file:///x"), UriClass::Other);
        assert_eq!(classify("fi le:///x"), UriClass::Other);
    }

    #[test]
    fn test_parse_scheme() {
        assert_eq!(parse_scheme("svn+ssh://host/repo"), Some("svn+ssh"));
        assert_eq!(parse_scheme("x-nautilus-desktop:///"), Some("x-nautilus-desktop"));
        assert_eq!(parse_scheme("no-separator"), None);
        assert_eq!(parse_scheme(":///x"), None);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Decoding Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_local_path_plain() {
        assert_eq!(
            local_path_from_uri("file:///home/user/project"),
            Some(PathBuf::from("/home/user/project"))
        );
    }

    #[test]
    fn test_local_path_percent_decoded() {
        assert_eq!(
            local_path_from_uri("file:///home/user/My%20Docs"),
            Some(PathBuf::from("/home/user/My Docs"))
        );
        assert_eq!(
            local_path_from_uri("file:///tmp/%C3%A9t%C3%A9"),
            Some(PathBuf::from("/tmp/été"))
        );
    }

    #[test]
    fn test_local_path_literal_space_kept() {
        assert_eq!(
            local_path_from_uri("file:///home/user/My Docs"),
            Some(PathBuf::from("/home/user/My Docs"))
        );
    }

    #[test]
    fn test_local_path_host_ignored() {
        assert_eq!(
            local_path_from_uri("file://localhost/etc/hosts"),
            Some(PathBuf::from("/etc/hosts"))
        );
    }

    #[test]
    fn test_local_path_single_slash_form() {
        assert_eq!(local_path_from_uri("file:/var/log"), Some(PathBuf::from("/var/log")));
    }

    #[test]
    fn test_local_path_rejects_bad_escapes() {
        assert_eq!(local_path_from_uri("file:///tmp/%zz"), None);
        assert_eq!(local_path_from_uri("file:///tmp/%2"), None);
        assert_eq!(local_path_from_uri("file:///tmp/%+1"), None);
        assert_eq!(local_path_from_uri("file:///tmp/%00"), None);
        assert_eq!(local_path_from_uri("file:///tmp/a%2Fb"), None);
    }

    #[test]
    fn test_local_path_rejects_fragment_and_relative() {
        assert_eq!(local_path_from_uri("file:///tmp/a#frag"), None);
        assert_eq!(local_path_from_uri("file:relative/path"), None);
        assert_eq!(local_path_from_uri("file://hostonly"), None);
    }

    #[test]
    fn test_local_path_other_scheme() {
        assert_eq!(local_path_from_uri("sftp://host/tmp"), None);
        assert_eq!(local_path_from_uri("x-nautilus-desktop:///"), None);
    }

    #[test]
    fn test_local_path_is_deterministic() {
        let uri = "file:///srv/data%20set";
        assert_eq!(local_path_from_uri(uri), local_path_from_uri(uri));
        assert_eq!(
            local_path_from_uri(uri).as_deref(),
            Some(Path::new("/srv/data set"))
        );
    }
}
