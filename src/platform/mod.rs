//! Host platform detection
//!
//! Resolves the install target: which ROS distro (or generic OS release)
//! the host runs, and which CPU architecture, normalized to the small
//! vocabulary the release assets are named with.
//!
//! Resolution order for the platform identity:
//! 1. Explicit override (`--ros-distro` flag or `ROS_DISTRO` env var)
//! 2. Filesystem probe of `/opt/ros/<distro>`
//! 3. `/etc/os-release` codename for plain Ubuntu/Debian hosts

mod arch;
mod os_release;

use std::path::Path;

use crate::error::{InstallError, Result};

pub use arch::Arch;
pub use os_release::OsRelease;

/// Known ROS distros, oldest first, with the Ubuntu codename each targets.
const KNOWN_DISTROS: &[(&str, &str)] = &[
    ("kinetic", "xenial"),
    ("melodic", "bionic"),
    ("noetic", "focal"),
    ("foxy", "focal"),
    ("galactic", "focal"),
    ("humble", "jammy"),
    ("iron", "jammy"),
    ("jazzy", "noble"),
    ("rolling", "noble"),
];

/// OS identifiers from os-release that we can install on without ROS.
const SUPPORTED_OS_IDS: &[&str] = &["ubuntu", "debian"];

/// The detected install target
#[derive(Debug, Clone, PartialEq)]
pub struct Host {
    /// ROS distro name, when the host has (or the user named) one
    pub ros_distro: Option<String>,
    /// OS release codename (e.g. "jammy"), when known
    pub codename: Option<String>,
    /// Normalized CPU architecture
    pub arch: Arch,
}

impl Host {
    /// One-line human description, e.g. "ROS humble (jammy) on arm64".
    pub fn describe(&self) -> String {
        let os = match (&self.ros_distro, &self.codename) {
            (Some(distro), Some(codename)) => format!("ROS {distro} ({codename})"),
            (Some(distro), None) => format!("ROS {distro}"),
            (None, Some(codename)) => codename.clone(),
            (None, None) => "unknown OS".to_string(),
        };
        format!("{os} on {}", self.arch.as_str())
    }
}

/// Ubuntu codename targeted by a known ROS distro
pub fn codename_for(distro: &str) -> Option<&'static str> {
    KNOWN_DISTROS
        .iter()
        .find(|(name, _)| *name == distro)
        .map(|(_, codename)| *codename)
}

/// Probe `<sysroot>/opt/ros` for installed distros. When several are
/// present the newest known one wins.
fn probe_ros_distro(ros_root: &Path) -> Option<String> {
    KNOWN_DISTROS
        .iter()
        .rev()
        .find(|(name, _)| ros_root.join(name).is_dir())
        .map(|(name, _)| (*name).to_string())
}

/// Detect the install target for this host.
///
/// `override_distro` is the `--ros-distro` flag / `ROS_DISTRO` env value;
/// an override always wins and is accepted even for distros we do not
/// know a codename for. `sysroot` is `/` outside of tests.
pub fn detect(override_distro: Option<&str>, sysroot: &Path) -> Result<Host> {
    let arch = arch::detect()?;

    if let Some(distro) = override_distro.map(str::trim).filter(|d| !d.is_empty()) {
        return Ok(Host {
            ros_distro: Some(distro.to_string()),
            codename: codename_for(distro).map(str::to_string),
            arch,
        });
    }

    if let Some(distro) = probe_ros_distro(&sysroot.join("opt/ros")) {
        let codename = codename_for(&distro).map(str::to_string);
        return Ok(Host {
            ros_distro: Some(distro),
            codename,
            arch,
        });
    }

    if let Some(release) = OsRelease::load(&sysroot.join("etc/os-release")) {
        if SUPPORTED_OS_IDS.contains(&release.id.as_str()) {
            return Ok(Host {
                ros_distro: None,
                codename: release.codename,
                arch,
            });
        }
    }

    Err(InstallError::PlatformUndetectable)
}
