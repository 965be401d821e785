//! Asset selection
//!
//! Builds a filename pattern from the detected host and picks the first
//! release asset that matches. Two naming conventions are recognized:
//! ROS buildfarm style (`ros-<distro>-fleetglass-bridge_..._<arch>.deb`)
//! for ROS hosts, and plain `fleetglass-bridge_...<codename>_<arch>.deb`
//! for generic Ubuntu/Debian hosts.

use regex::Regex;

use crate::error::{InstallError, Result};
use crate::platform::Host;
use crate::release::ReleaseAsset;

/// Debian package name of the bridge
pub const BRIDGE_PACKAGE: &str = "fleetglass-bridge";

/// Regex matching compatible asset filenames for this host.
#[allow(clippy::expect_used)]
pub fn filename_pattern(host: &Host) -> Regex {
    let arch = host.arch.as_str();
    let pattern = match (&host.ros_distro, &host.codename) {
        (Some(distro), _) => format!(
            "^ros-{}-{BRIDGE_PACKAGE}_.+_{arch}\\.deb$",
            regex::escape(distro)
        ),
        (None, Some(codename)) => format!(
            "^{BRIDGE_PACKAGE}_.+[._-]{}_{arch}\\.deb$",
            regex::escape(codename)
        ),
        (None, None) => format!("^{BRIDGE_PACKAGE}_.+_{arch}\\.deb$"),
    };
    Regex::new(&pattern).expect("asset pattern is built from escaped fragments")
}

/// Select the first asset compatible with this host.
pub fn select<'a>(host: &Host, assets: &'a [ReleaseAsset]) -> Result<&'a ReleaseAsset> {
    let pattern = filename_pattern(host);
    assets
        .iter()
        .find(|asset| pattern.is_match(&asset.name))
        .ok_or_else(|| InstallError::NoCompatibleAsset {
            pattern: pattern.to_string(),
            available: if assets.is_empty() {
                "(none)".to_string()
            } else {
                assets
                    .iter()
                    .map(|a| a.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            },
        })
}
