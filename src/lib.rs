//! Decision layer for a directory-watching web application deployer.
//!
//! Given a monitored directory of `.war` archives and exploded application
//! directories, decides which entries are ready for automatic deployment
//! ([`EligibilityFilter`]) and turns a selected entry into a
//! [`DeploymentDescriptor`] ([`resolve`]).

pub mod config;
pub mod error;
pub mod filter;
pub mod naming;
pub mod provider;
pub mod resolver;
pub mod scan;

pub use error::{DeployError, Result};
pub use filter::{EligibilityFilter, FilterConfig, Rejection, Verdict};
pub use naming::ArtifactKind;
pub use provider::WebAppProvider;
pub use resolver::{resolve, DeployableUnit, DeploymentDescriptor, DeploymentOptions};
