//! Package installation
//!
//! Shells out to the platform package manager. Three responsibilities:
//! prerequisite packages, optional telemetry agent provisioning (signed
//! third-party repository), and the bridge package itself with a
//! dependency-repair retry on first failure.

mod apt;
mod repo;

use std::fs;
use std::path::Path;

use crate::error::{InstallError, Result};
use crate::ui;

pub use repo::AGENT_PACKAGE;

/// Packages required before the signed repository can be provisioned
const PREREQUISITES: &[&str] = &["ca-certificates", "gnupg"];

/// Runtime state directory created for the bridge on successful install
pub const RUNTIME_DIR: &str = "/var/lib/fleetglass";

/// Package-manager orchestration
pub struct Installer {
    verbose: bool,
}

impl Installer {
    pub fn new(verbose: bool) -> Installer {
        Installer { verbose }
    }

    /// Install prerequisite system packages. The index refresh is best
    /// effort; a stale index still resolves the prerequisites on most
    /// hosts and the bridge install refreshes again via the repair path.
    pub fn install_prerequisites(&self) -> Result<()> {
        if !apt::run_best_effort("apt-get", &["update"], self.verbose) {
            ui::warn("apt-get update failed; continuing with the existing package index");
        }

        let mut args = vec!["install", "-y"];
        args.extend_from_slice(PREREQUISITES);
        apt::apt_get(&args, self.verbose)
    }

    /// Provision the telemetry agent repository and package. Degrades to
    /// a warning at the call site; never aborts the bridge install.
    pub fn provision_agent(&self) -> Result<()> {
        repo::provision_agent(self.verbose)
    }

    /// Install the downloaded bridge package. On a first dpkg failure run
    /// dependency repair (`apt-get install -f -y`) and retry once.
    pub fn install_bridge(&self, deb: &Path) -> Result<()> {
        let deb_arg = deb.display().to_string();
        if apt::run("dpkg", &["-i", &deb_arg], self.verbose).is_ok() {
            return Ok(());
        }

        apt::apt_get(&["install", "-f", "-y"], self.verbose).map_err(|e| {
            InstallError::PackageInstallFailed {
                package: deb_arg.clone(),
                reason: format!("dependency repair failed: {e}"),
            }
        })?;

        apt::run("dpkg", &["-i", &deb_arg], self.verbose).map_err(|e| {
            InstallError::PackageInstallFailed {
                package: deb_arg,
                reason: e.to_string(),
            }
        })
    }

    /// Create the bridge runtime directory.
    pub fn create_runtime_dir(&self) -> Result<()> {
        fs::create_dir_all(RUNTIME_DIR)?;
        Ok(())
    }
}
