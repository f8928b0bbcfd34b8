//! One pass over a monitored directory.
//!
//! Enumerates the direct children of the directory, runs each through the
//! provider's filter and resolves the accepted ones. This is a single scan
//! cycle; nothing is watched or remembered between calls.

use crate::error::{DeployError, Result};
use crate::filter::Verdict;
use crate::provider::WebAppProvider;
use crate::resolver::{DeployableUnit, DeploymentDescriptor};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// What happened to one directory entry during a scan
#[derive(Debug)]
pub enum ScanOutcome {
    /// Accepted and resolved
    Deployable(DeploymentDescriptor),
    /// Turned down by the filter
    Rejected(Verdict),
    /// Accepted but resolution failed
    Failed(DeployError),
}

#[derive(Debug)]
pub struct ScannedEntry {
    pub name: String,
    pub path: PathBuf,
    pub outcome: ScanOutcome,
}

/// List entry names directly inside `dir`, sorted
pub fn list_entries(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            DeployError::io(
                std::io::Error::other(e.to_string()),
                format!("Failed to read directory {:?}", dir),
            )
        })?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }

    Ok(names)
}

/// Evaluate every entry of `dir` once
pub fn scan_directory(provider: &WebAppProvider, dir: &Path) -> Result<Vec<ScannedEntry>> {
    info!("Scanning {:?}", dir);

    if !dir.is_dir() {
        warn!("Monitored directory {:?} does not exist", dir);
        return Ok(Vec::new());
    }

    let names = list_entries(dir)?;
    let mut results = Vec::with_capacity(names.len());

    for name in names {
        let path = dir.join(&name);
        let outcome = match provider.evaluate(dir, &name) {
            Verdict::Accept => match provider.resolve(&DeployableUnit::new(&path)) {
                Ok(descriptor) => {
                    debug!("{} -> {}", name, descriptor.context_path);
                    ScanOutcome::Deployable(descriptor)
                }
                Err(e) => {
                    warn!(
                        "Failed to resolve {:?} ({}): {}",
                        path,
                        e.kind(),
                        e
                    );
                    ScanOutcome::Failed(e)
                }
            },
            verdict => {
                debug!("Skipping {}: {:?}", name, verdict);
                ScanOutcome::Rejected(verdict)
            }
        };

        results.push(ScannedEntry {
            name,
            path,
            outcome,
        });
    }

    let deployable = results
        .iter()
        .filter(|r| matches!(r.outcome, ScanOutcome::Deployable(_)))
        .count();
    info!("Found {} deployable of {} entries", deployable, results.len());

    Ok(results)
}
