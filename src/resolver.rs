//! Translate a selected deployable unit into a deployment descriptor.

use crate::error::{DeployError, Result};
use crate::naming::{normalize_context_path, ArtifactKind};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

/// A directory entry selected for deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployableUnit {
    /// Where the unit lives on disk
    pub origin_path: PathBuf,
}

impl DeployableUnit {
    pub fn new(origin_path: impl Into<PathBuf>) -> Self {
        Self {
            origin_path: origin_path.into(),
        }
    }
}

/// Operator-configured options copied into every descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploymentOptions {
    /// Defaults descriptor applied before the application's own
    pub defaults_descriptor: Option<PathBuf>,
    /// Whether archives are extracted before deployment
    pub extract_archives: bool,
    /// Whether the parent class loader is consulted first
    pub parent_loader_priority: bool,
}

/// Everything needed to instantiate the application at runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentDescriptor {
    pub context_path: String,
    pub source_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults_descriptor: Option<PathBuf>,
    pub extract_archives: bool,
    pub parent_loader_priority: bool,
}

/// Resolve `unit` into a descriptor carrying `options`.
///
/// The origin path is made absolute and `.`/`..` segments are folded away
/// before its final component is read, so `blog/WEB-INF/..` is `blog`.
/// Fails with [`DeployError::NotFound`] when the source has vanished and
/// with [`DeployError::UnsupportedArtifact`] when it is neither a directory
/// nor an archive, or yields no usable name.
pub fn resolve(unit: &DeployableUnit, options: &DeploymentOptions) -> Result<DeploymentDescriptor> {
    let path = normalized(&unit.origin_path);
    let metadata = std::fs::metadata(&path).map_err(|_| DeployError::NotFound {
        path: unit.origin_path.clone(),
    })?;

    let unsupported = || DeployError::UnsupportedArtifact {
        path: unit.origin_path.clone(),
    };

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(unsupported)?;
    let kind = ArtifactKind::classify(metadata.is_dir(), &name);
    // A bare ".war" has no base name and must not fall through to "/"
    let context = kind
        .context_name(&name)
        .filter(|c| !c.is_empty())
        .ok_or_else(unsupported)?;

    Ok(DeploymentDescriptor {
        context_path: normalize_context_path(context),
        source_path: path,
        defaults_descriptor: options.defaults_descriptor.clone(),
        extract_archives: options.extract_archives,
        parent_loader_priority: options.parent_loader_priority,
    })
}

/// Absolute form of `path` with `.` and `..` folded lexically
fn normalized(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn options() -> DeploymentOptions {
        DeploymentOptions {
            defaults_descriptor: Some(PathBuf::from("/etc/webdefault.xml")),
            extract_archives: true,
            parent_loader_priority: false,
        }
    }

    #[test]
    fn test_directory_resolves_to_its_name() {
        let temp = TempDir::new().unwrap();
        let app = temp.path().join("app");
        fs::create_dir(&app).unwrap();

        let descriptor = resolve(&DeployableUnit::new(&app), &options()).unwrap();

        assert_eq!(descriptor.context_path, "/app");
        assert_eq!(descriptor.source_path, app);
        assert_eq!(
            descriptor.defaults_descriptor,
            Some(PathBuf::from("/etc/webdefault.xml"))
        );
        assert!(descriptor.extract_archives);
        assert!(!descriptor.parent_loader_priority);
    }

    #[test]
    fn test_archive_and_directory_normalize_identically() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("exploded");
        let war = temp.path().join("packed");
        fs::create_dir_all(dir.join("app")).unwrap();
        fs::create_dir_all(&war).unwrap();
        fs::write(war.join("app.war"), b"PK").unwrap();

        let from_dir = resolve(&DeployableUnit::new(dir.join("app")), &options()).unwrap();
        let from_war = resolve(&DeployableUnit::new(war.join("app.war")), &options()).unwrap();

        assert_eq!(from_dir.context_path, "/app");
        assert_eq!(from_war.context_path, "/app");
    }

    #[test]
    fn test_upper_case_archive_suffix_stripped() {
        let temp = TempDir::new().unwrap();
        let war = temp.path().join("Portal.WAR");
        fs::write(&war, b"PK").unwrap();

        let descriptor = resolve(&DeployableUnit::new(&war), &options()).unwrap();
        assert_eq!(descriptor.context_path, "/Portal");
    }

    #[test]
    fn test_root_alias_maps_to_root_context() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("ROOT");
        fs::create_dir(&dir).unwrap();
        let war = temp.path().join("other");
        fs::create_dir(&war).unwrap();
        fs::write(war.join("root.war"), b"PK").unwrap();

        let from_dir = resolve(&DeployableUnit::new(&dir), &options()).unwrap();
        let from_war = resolve(&DeployableUnit::new(war.join("root.war")), &options()).unwrap();

        assert_eq!(from_dir.context_path, "/");
        assert_eq!(from_war.context_path, "/");
    }

    #[test]
    fn test_directory_with_archive_suffix_keeps_suffix() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("odd.war");
        fs::create_dir(&dir).unwrap();

        let descriptor = resolve(&DeployableUnit::new(&dir), &options()).unwrap();
        assert_eq!(descriptor.context_path, "/odd.war");
    }

    #[test]
    fn test_missing_source_is_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone.war");

        let err = resolve(&DeployableUnit::new(&missing), &options()).unwrap_err();
        assert!(matches!(err, DeployError::NotFound { ref path } if *path == missing));
    }

    #[test]
    fn test_plain_file_is_unsupported() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("readme.txt");
        fs::write(&file, b"hello").unwrap();

        let err = resolve(&DeployableUnit::new(&file), &options()).unwrap_err();
        assert!(matches!(err, DeployError::UnsupportedArtifact { .. }));
    }

    #[test]
    fn test_source_path_is_absolute() {
        let temp = TempDir::new().unwrap();
        let app = temp.path().join("app");
        fs::create_dir(&app).unwrap();

        let descriptor = resolve(&DeployableUnit::new(&app), &DeploymentOptions::default()).unwrap();
        assert!(descriptor.source_path.is_absolute());
        assert!(descriptor.defaults_descriptor.is_none());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let war = temp.path().join("news.war");
        fs::write(&war, b"PK").unwrap();
        let unit = DeployableUnit::new(&war);

        let first = resolve(&unit, &options()).unwrap();
        let second = resolve(&unit, &options()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parent_segment_resolves_to_enclosing_app() {
        let temp = TempDir::new().unwrap();
        let blog = temp.path().join("webapps/blog");
        fs::create_dir_all(blog.join("WEB-INF")).unwrap();

        let unit = DeployableUnit::new(blog.join("WEB-INF/.."));
        let descriptor = resolve(&unit, &options()).unwrap();

        assert_eq!(descriptor.context_path, "/blog");
        assert_eq!(descriptor.source_path, blog);
    }

    #[test]
    fn test_current_dir_segment_is_ignored() {
        let temp = TempDir::new().unwrap();
        let shop = temp.path().join("shop");
        fs::create_dir(&shop).unwrap();

        let descriptor = resolve(&DeployableUnit::new(shop.join(".")), &options()).unwrap();
        assert_eq!(descriptor.context_path, "/shop");
    }

    #[test]
    fn test_filesystem_root_is_unsupported() {
        let err = resolve(&DeployableUnit::new("/"), &options()).unwrap_err();
        assert!(matches!(err, DeployError::UnsupportedArtifact { .. }));
    }

    #[test]
    fn test_bare_archive_suffix_is_unsupported() {
        let temp = TempDir::new().unwrap();
        let war = temp.path().join(".war");
        fs::write(&war, b"PK").unwrap();

        let err = resolve(&DeployableUnit::new(&war), &options()).unwrap_err();
        assert!(matches!(err, DeployError::UnsupportedArtifact { ref path } if *path == war));
    }
}
