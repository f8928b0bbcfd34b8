use crate::error::{DeployError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default config filename
pub const DEFAULT_CONFIG_NAME: &str = "autodeploy.yaml";

/// Operator configuration for the deployer
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Directory scanned for archives and exploded applications
    pub monitored_dir: String,

    /// Directory holding explicit context descriptors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_descriptor_dir: Option<String>,

    /// Defaults descriptor passed to every application
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults_descriptor: Option<String>,

    /// Extract archives before deploying them
    #[serde(default)]
    pub extract_archives: bool,

    /// Consult the parent class loader first
    #[serde(default)]
    pub parent_loader_priority: bool,

    /// Seconds between scans; 0 means manual only
    #[serde(default)]
    pub scan_interval: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            monitored_dir: "./webapps".to_string(),
            context_descriptor_dir: Some("./contexts".to_string()),
            defaults_descriptor: None,
            extract_archives: false,
            parent_loader_priority: false,
            scan_interval: 0,
        }
    }
}

impl Config {
    /// Monitored directory, resolved against `base`
    pub fn monitored_dir(&self, base: &Path) -> PathBuf {
        resolve_against(base, &self.monitored_dir)
    }

    /// Context descriptor directory, resolved against `base`.
    /// Parsed the same way as a runtime reconfiguration.
    pub fn context_descriptor_dir(&self, base: &Path) -> Option<PathBuf> {
        let dir = parse_dir_setting(self.context_descriptor_dir.as_deref()?)?;
        if dir.is_absolute() {
            Some(dir)
        } else {
            Some(base.join(dir))
        }
    }

    /// Defaults descriptor, resolved against `base`
    pub fn defaults_descriptor(&self, base: &Path) -> Option<PathBuf> {
        self.defaults_descriptor
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| resolve_against(base, s))
    }
}

/// Expand shell variables in a path string (e.g., $HOME, ${HOME}, ~)
pub fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Expand `path` and join it onto `base` unless it is already absolute
pub fn resolve_against(base: &Path, path: &str) -> PathBuf {
    let expanded = PathBuf::from(expand_path(path));
    if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    }
}

/// Turn an operator-supplied directory setting into a path.
///
/// Accepts plain paths, `file:` URLs and shell variables. Blank values and
/// values that fail to expand yield `None`, which turns the setting off.
pub fn parse_dir_setting(value: &str) -> Option<PathBuf> {
    let trimmed = value.trim();
    let raw = trimmed
        .strip_prefix("file://")
        .or_else(|| trimmed.strip_prefix("file:"))
        .unwrap_or(trimmed);
    if raw.is_empty() {
        return None;
    }
    let expanded = shellexpand::full(raw).ok()?;
    Some(PathBuf::from(expanded.into_owned()))
}

/// Directory containing the config file
pub fn config_dir(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Discover and load a config
pub fn discover_config(override_path: Option<&Path>) -> Result<(Config, PathBuf)> {
    let config_path = if let Some(path) = override_path {
        debug!("Using config from --config flag: {:?}", path);
        if !path.exists() {
            return Err(DeployError::ConfigNotFound);
        }
        path.to_path_buf()
    } else {
        find_config_walk_up()?
    };

    info!("Loading config from {:?}", config_path);
    load_config(&config_path).map(|c| (c, config_path))
}

/// Look for a config in the working directory and its ancestors.
///
/// The search ends at the first directory that is a repository root
/// (holds `.git`), so a deployment checkout never picks up a config from
/// an unrelated parent tree.
fn find_config_walk_up() -> Result<PathBuf> {
    let cwd = std::env::current_dir()
        .map_err(|e| DeployError::io(e, "Failed to get current directory"))?;

    for dir in cwd.ancestors() {
        let candidate = dir.join(DEFAULT_CONFIG_NAME);
        if candidate.is_file() {
            info!("Found config at {:?}", candidate);
            return Ok(candidate);
        }
        if dir.join(".git").exists() {
            debug!("No config up to repository root {:?}", dir);
            return Err(DeployError::ConfigNotFound);
        }
    }

    debug!("No config between {:?} and the filesystem root", cwd);
    Err(DeployError::ConfigNotFound)
}

/// Load and parse a config file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| DeployError::io(e, format!("Failed to read config at {:?}", path)))?;

    serde_yaml::from_str(&content).map_err(|e| DeployError::ConfigParseError {
        message: e.to_string(),
    })
}

/// Serialize a config to YAML
pub fn render_config(config: &Config) -> Result<String> {
    serde_yaml::to_string(config).map_err(|e| DeployError::SerializeError {
        message: format!("Failed to serialize config: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_minimal_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_NAME);
        std::fs::write(&path, "monitored_dir: ./apps\n").unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.monitored_dir, "./apps");
        assert!(config.context_descriptor_dir.is_none());
        assert!(config.defaults_descriptor.is_none());
        assert!(!config.extract_archives);
        assert!(!config.parent_loader_priority);
        assert_eq!(config.scan_interval, 0);
    }

    #[test]
    fn test_load_full_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_NAME);
        std::fs::write(
            &path,
            r#"
monitored_dir: /srv/webapps
context_descriptor_dir: contexts
defaults_descriptor: etc/webdefault.xml
extract_archives: true
parent_loader_priority: true
scan_interval: 5
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        let base = config_dir(&path);

        assert_eq!(config.monitored_dir(&base), PathBuf::from("/srv/webapps"));
        assert_eq!(
            config.context_descriptor_dir(&base),
            Some(temp.path().join("contexts"))
        );
        assert_eq!(
            config.defaults_descriptor(&base),
            Some(temp.path().join("etc/webdefault.xml"))
        );
        assert!(config.extract_archives);
        assert!(config.parent_loader_priority);
        assert_eq!(config.scan_interval, 5);
    }

    #[test]
    fn test_missing_monitored_dir_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_NAME);
        std::fs::write(&path, "extract_archives: true\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, DeployError::ConfigParseError { .. }));
    }

    #[test]
    fn test_blank_descriptor_dir_is_disabled() {
        let config = Config {
            context_descriptor_dir: Some("  ".to_string()),
            ..Config::default()
        };
        assert!(config.context_descriptor_dir(Path::new("/base")).is_none());
    }

    #[test]
    fn test_resolve_against_expands_variables() {
        std::env::set_var("AUTODEPLOY_TEST_ROOT", "/opt/server");
        let resolved = resolve_against(Path::new("/base"), "$AUTODEPLOY_TEST_ROOT/webapps");
        assert_eq!(resolved, PathBuf::from("/opt/server/webapps"));
        std::env::remove_var("AUTODEPLOY_TEST_ROOT");

        let relative = resolve_against(Path::new("/base"), "webapps");
        assert_eq!(relative, PathBuf::from("/base/webapps"));
    }

    #[test]
    fn test_config_dir_of_bare_filename() {
        assert_eq!(config_dir(Path::new("autodeploy.yaml")), PathBuf::from("."));
        assert_eq!(
            config_dir(Path::new("/etc/autodeploy/autodeploy.yaml")),
            PathBuf::from("/etc/autodeploy")
        );
    }

    #[test]
    fn test_default_config_round_trips() {
        let rendered = render_config(&Config::default()).unwrap();
        let parsed: Config = serde_yaml::from_str(&rendered).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_discover_with_missing_override() {
        let temp = TempDir::new().unwrap();
        let err = discover_config(Some(&temp.path().join("absent.yaml"))).unwrap_err();
        assert!(matches!(err, DeployError::ConfigNotFound));
    }

    #[test]
    fn test_descriptor_dir_accepts_file_url() {
        let config = Config {
            context_descriptor_dir: Some("file:///srv/contexts".to_string()),
            ..Config::default()
        };
        assert_eq!(
            config.context_descriptor_dir(Path::new("/base")),
            Some(PathBuf::from("/srv/contexts"))
        );
    }

    #[test]
    fn test_descriptor_dir_unexpandable_is_disabled() {
        let config = Config {
            context_descriptor_dir: Some("$AUTODEPLOY_SURELY_UNSET_VAR/contexts".to_string()),
            ..Config::default()
        };
        assert!(config.context_descriptor_dir(Path::new("/base")).is_none());
    }

    #[test]
    fn test_descriptor_dir_relative_joins_base() {
        let config = Config {
            context_descriptor_dir: Some("file:contexts".to_string()),
            ..Config::default()
        };
        assert_eq!(
            config.context_descriptor_dir(Path::new("/base")),
            Some(PathBuf::from("/base/contexts"))
        );
    }

    #[test]
    fn test_parse_dir_setting() {
        assert_eq!(
            parse_dir_setting(" /srv/contexts "),
            Some(PathBuf::from("/srv/contexts"))
        );
        assert_eq!(
            parse_dir_setting("file:/srv/contexts"),
            Some(PathBuf::from("/srv/contexts"))
        );
        assert!(parse_dir_setting("").is_none());
        assert!(parse_dir_setting("file://").is_none());
    }
}
