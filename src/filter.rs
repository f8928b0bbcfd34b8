//! Eligibility filter for entries of a monitored directory.
//!
//! Decides whether an entry should be picked up as a new deployable unit.
//! The filter is a total predicate: filesystem errors count as "does not
//! exist" and lead to rejection.

use crate::naming::{suffixed_variants, ArtifactKind, ARCHIVE_SUFFIX, DESCRIPTOR_SUFFIX};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Immutable filter configuration snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Directory holding explicit context descriptors (`<name>.xml`)
    pub context_descriptor_dir: Option<PathBuf>,
}

/// Why an entry was turned down
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The monitored directory itself is missing
    MissingDirectory,
    /// Neither a directory nor an archive
    NotDeployable,
    /// A same-named archive sits next to this directory
    ArchivePrecedence { archive: PathBuf },
    /// An explicit context descriptor owns this unit
    ExplicitDescriptor { descriptor: PathBuf },
}

impl Rejection {
    pub fn describe(&self) -> String {
        match self {
            Rejection::MissingDirectory => "directory does not exist".to_string(),
            Rejection::NotDeployable => "not a directory or .war archive".to_string(),
            Rejection::ArchivePrecedence { archive } => {
                format!("shadowed by archive {}", archive.display())
            }
            Rejection::ExplicitDescriptor { descriptor } => {
                format!("explicit descriptor {}", descriptor.display())
            }
        }
    }
}

/// Outcome of evaluating a single entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject(Rejection),
}

impl Verdict {
    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }
}

/// Filter deciding which entries of a monitored directory are deployable.
///
/// The configuration is held as an `Arc` snapshot. Reconfiguration swaps the
/// whole snapshot; each evaluation clones the `Arc` once and works on that.
#[derive(Debug, Default)]
pub struct EligibilityFilter {
    config: RwLock<Arc<FilterConfig>>,
}

impl EligibilityFilter {
    pub fn new(config: FilterConfig) -> Self {
        Self {
            config: RwLock::new(Arc::new(config)),
        }
    }

    /// Current configuration snapshot
    pub fn config(&self) -> Arc<FilterConfig> {
        // The guarded value is always a complete snapshot, so a poisoned
        // lock is still safe to read.
        let guard = self.config.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Replace the configuration snapshot
    pub fn reconfigure(&self, config: FilterConfig) {
        let next = Arc::new(config);
        let mut guard = self.config.write().unwrap_or_else(|e| e.into_inner());
        *guard = next;
    }

    pub fn context_descriptor_dir(&self) -> Option<PathBuf> {
        self.config().context_descriptor_dir.clone()
    }

    pub fn set_context_descriptor_dir(&self, dir: Option<PathBuf>) {
        self.reconfigure(FilterConfig {
            context_descriptor_dir: dir,
        });
    }

    /// Whether `dir/name` should be deployed automatically
    pub fn accept(&self, dir: &Path, name: &str) -> bool {
        self.evaluate(dir, name).is_accept()
    }

    /// Evaluate `dir/name` and report which rule decided
    pub fn evaluate(&self, dir: &Path, name: &str) -> Verdict {
        let config = self.config();
        evaluate_with(&config, dir, name)
    }
}

/// Evaluate an entry against a fixed configuration snapshot.
///
/// Rules apply in order and the first match decides.
pub fn evaluate_with(config: &FilterConfig, dir: &Path, name: &str) -> Verdict {
    if !dir.exists() {
        return Verdict::Reject(Rejection::MissingDirectory);
    }

    let entry = dir.join(name);
    let kind = ArtifactKind::classify(entry.is_dir(), name);
    if !kind.is_deployable() {
        return Verdict::Reject(Rejection::NotDeployable);
    }

    if kind == ArtifactKind::Directory {
        if let Some(archive) = first_existing(dir, &suffixed_variants(name, ARCHIVE_SUFFIX)) {
            return Verdict::Reject(Rejection::ArchivePrecedence { archive });
        }
    }

    if let Some(ref contexts) = config.context_descriptor_dir {
        let context = kind.context_name(name).unwrap_or(name);
        if let Some(descriptor) =
            first_existing(contexts, &suffixed_variants(context, DESCRIPTOR_SUFFIX))
        {
            return Verdict::Reject(Rejection::ExplicitDescriptor { descriptor });
        }
    }

    Verdict::Accept
}

fn first_existing(dir: &Path, names: &[String]) -> Option<PathBuf> {
    names.iter().map(|n| dir.join(n)).find(|p| p.exists())
}
