//! Web application provider: the operator-facing configuration surface.
//!
//! Owns one eligibility filter and one snapshot of deployment options. An
//! external scanner calls [`WebAppProvider::accept`] for each entry and
//! [`WebAppProvider::resolve`] for each unit it decides to materialize.

use crate::config::{parse_dir_setting, Config};
use crate::error::Result;
use crate::filter::{EligibilityFilter, FilterConfig, Verdict};
use crate::resolver::{self, DeployableUnit, DeploymentDescriptor, DeploymentOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
pub struct WebAppProvider {
    filter: EligibilityFilter,
    options: RwLock<Arc<DeploymentOptions>>,
    scan_interval: u64,
}

impl WebAppProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a provider from a loaded config. Relative paths resolve
    /// against `base`, the directory holding the config file.
    pub fn from_config(config: &Config, base: &Path) -> Self {
        let options = DeploymentOptions {
            defaults_descriptor: config.defaults_descriptor(base),
            extract_archives: config.extract_archives,
            parent_loader_priority: config.parent_loader_priority,
        };
        Self {
            filter: EligibilityFilter::new(FilterConfig {
                context_descriptor_dir: config.context_descriptor_dir(base),
            }),
            options: RwLock::new(Arc::new(options)),
            scan_interval: config.scan_interval,
        }
    }

    /// Seconds between scans; 0 means scanning is manual only
    pub fn scan_interval(&self) -> u64 {
        self.scan_interval
    }

    pub fn filter(&self) -> &EligibilityFilter {
        &self.filter
    }

    /// Current options snapshot
    pub fn options(&self) -> Arc<DeploymentOptions> {
        let guard = self.options.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    fn update_options(&self, update: impl FnOnce(&mut DeploymentOptions)) {
        let mut guard = self.options.write().unwrap_or_else(|e| e.into_inner());
        let mut next = (**guard).clone();
        update(&mut next);
        *guard = Arc::new(next);
    }

    pub fn extract_archives(&self) -> bool {
        self.options().extract_archives
    }

    pub fn set_extract_archives(&self, extract: bool) {
        self.update_options(|o| o.extract_archives = extract);
    }

    pub fn parent_loader_priority(&self) -> bool {
        self.options().parent_loader_priority
    }

    pub fn set_parent_loader_priority(&self, priority: bool) {
        self.update_options(|o| o.parent_loader_priority = priority);
    }

    pub fn defaults_descriptor(&self) -> Option<PathBuf> {
        self.options().defaults_descriptor.clone()
    }

    pub fn set_defaults_descriptor(&self, descriptor: Option<PathBuf>) {
        self.update_options(|o| o.defaults_descriptor = descriptor);
    }

    pub fn context_descriptor_dir(&self) -> Option<PathBuf> {
        self.filter.context_descriptor_dir()
    }

    /// Set the directory searched for explicit context descriptors.
    ///
    /// If `foo/` or `foo.war` shows up in the monitored directory and this
    /// directory holds `foo.xml`, the unit is left to whatever handles
    /// explicit descriptors. The value is not validated: a value that
    /// cannot be expanded, or is blank, turns the check off.
    pub fn set_context_descriptor_dir(&self, dir: &str) {
        self.filter.set_context_descriptor_dir(parse_dir_setting(dir));
    }

    pub fn accept(&self, dir: &Path, name: &str) -> bool {
        self.filter.accept(dir, name)
    }

    pub fn evaluate(&self, dir: &Path, name: &str) -> Verdict {
        self.filter.evaluate(dir, name)
    }

    /// Resolve a unit against the current options snapshot
    pub fn resolve(&self, unit: &DeployableUnit) -> Result<DeploymentDescriptor> {
        let options = self.options();
        resolver::resolve(unit, &options)
    }
}
