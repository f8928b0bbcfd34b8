//! Naming conventions shared by the eligibility filter and the resolver.
//!
//! Archive suffix detection, base-name stripping and the root alias live
//! here so both sides classify an entry the same way.

/// Suffix marking a packaged web application archive
pub const ARCHIVE_SUFFIX: &str = ".war";

/// Extension of an explicit per-application context descriptor
pub const DESCRIPTOR_SUFFIX: &str = ".xml";

/// Context path of the server root
pub const ROOT_CONTEXT: &str = "/";

/// Whether `name` ends with the archive suffix (ASCII case-insensitive)
pub fn is_archive(name: &str) -> bool {
    let len = ARCHIVE_SUFFIX.len();
    name.len() >= len
        && name.is_char_boundary(name.len() - len)
        && name[name.len() - len..].eq_ignore_ascii_case(ARCHIVE_SUFFIX)
}

/// Strip the archive suffix from `name`, or return it unchanged
pub fn base_name(name: &str) -> &str {
    if is_archive(name) {
        &name[..name.len() - ARCHIVE_SUFFIX.len()]
    } else {
        name
    }
}

/// Whether `name` is the reserved alias for the root context
pub fn is_reserved_root_name(name: &str) -> bool {
    name.eq_ignore_ascii_case("root") || name.eq_ignore_ascii_case("root/")
}

/// Both spellings of `stem + suffix` probed on disk, lower- then upper-case
pub fn suffixed_variants(stem: &str, suffix: &str) -> [String; 2] {
    [
        format!("{}{}", stem, suffix.to_ascii_lowercase()),
        format!("{}{}", stem, suffix.to_ascii_uppercase()),
    ]
}

/// What a directory entry is, as far as deployment is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// An exploded application directory
    Directory,
    /// A packaged archive file
    Archive,
    /// Anything else
    Unsupported,
}

impl ArtifactKind {
    /// Classify an entry. A directory stays a directory even when its
    /// name carries the archive suffix.
    pub fn classify(is_dir: bool, name: &str) -> Self {
        if is_dir {
            ArtifactKind::Directory
        } else if is_archive(name) {
            ArtifactKind::Archive
        } else {
            ArtifactKind::Unsupported
        }
    }

    /// The un-normalized context name for an entry of this kind
    pub fn context_name<'a>(&self, name: &'a str) -> Option<&'a str> {
        match self {
            ArtifactKind::Directory => Some(name),
            ArtifactKind::Archive => Some(base_name(name)),
            ArtifactKind::Unsupported => None,
        }
    }

    pub fn is_deployable(&self) -> bool {
        !matches!(self, ArtifactKind::Unsupported)
    }
}

/// Turn a context name into a routable context path.
///
/// The root alias maps to `/`, a leading `/` is added when missing and a
/// trailing `/` is dropped unless the whole path is `/`.
pub fn normalize_context_path(context: &str) -> String {
    let mut path = if is_reserved_root_name(context) {
        ROOT_CONTEXT.to_string()
    } else {
        context.to_string()
    };

    if !path.starts_with('/') {
        path.insert(0, '/');
    }

    if path.len() > ROOT_CONTEXT.len() && path.ends_with('/') {
        path.pop();
    }

    path
}
