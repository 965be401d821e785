//! CLI definitions using clap derive API

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};
use std::path::PathBuf;

/// Default release source for the bridge package
pub const DEFAULT_BASE_URL: &str = "https://github.com/fleetglass/fleetglass-bridge";

/// FleetGlass installer
///
/// Detects the host's ROS distro (or Ubuntu/Debian release) and CPU
/// architecture, resolves the newest bridge release, downloads the matching
/// package and installs it, provisioning the telemetry agent alongside.
#[derive(Parser, Debug)]
#[command(
    name = "fleetglass-install",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install the FleetGlass ROS bridge and telemetry agent",
    long_about = "Detects the host platform (ROS distro or plain Ubuntu/Debian release, plus \
                  CPU architecture), resolves the newest published bridge release, downloads \
                  the matching Debian package and installs it via apt/dpkg, additionally \
                  provisioning the FleetGlass telemetry agent from its signed repository.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  fleetglass-install\n    \
                  fleetglass-install --ros-distro humble\n    \
                  fleetglass-install --release-tag v2.1.0 --skip-agent\n    \
                  fleetglass-install --base-url https://github.com/fleetglass/fleetglass-bridge\n\n\
                  \x1b[1m\x1b[32mExit codes:\x1b[0m\n    \
                  0  success\n    \
                  1  no supported platform detected (or general failure)\n    \
                  2  release resolution, compatible-package selection or download failure"
)]
pub struct Cli {
    /// Release source repository URL
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// ROS distro override (otherwise probed from /opt/ros and os-release)
    #[arg(long, value_name = "DISTRO", env = "ROS_DISTRO")]
    pub ros_distro: Option<String>,

    /// Release tag to install ("latest" resolves the newest release)
    #[arg(long, value_name = "TAG", default_value = "latest")]
    pub release_tag: String,

    /// Token for release metadata queries (avoids API rate limits)
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Skip telemetry agent repository and package provisioning
    #[arg(long)]
    pub skip_agent: bool,

    /// Stop after downloading; do not invoke the package manager
    #[arg(long)]
    pub dry_run: bool,

    /// Filesystem root used for platform probes (testing)
    #[arg(long, value_name = "DIR", hide = true, default_value = "/")]
    pub sysroot: PathBuf,

    /// Enable verbose output (prints the commands being run)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["fleetglass-install"]).unwrap();
        assert_eq!(cli.base_url, DEFAULT_BASE_URL);
        assert_eq!(cli.release_tag, "latest");
        assert_eq!(cli.sysroot, PathBuf::from("/"));
        assert!(!cli.skip_agent);
        assert!(!cli.dry_run);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parsing_overrides() {
        let cli = Cli::try_parse_from([
            "fleetglass-install",
            "--ros-distro",
            "humble",
            "--release-tag",
            "v2.1.0",
            "--base-url",
            "https://github.com/acme/bridge",
            "--skip-agent",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.ros_distro.as_deref(), Some("humble"));
        assert_eq!(cli.release_tag, "v2.1.0");
        assert_eq!(cli.base_url, "https://github.com/acme/bridge");
        assert!(cli.skip_agent);
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_parsing_sysroot_hidden_flag() {
        let cli =
            Cli::try_parse_from(["fleetglass-install", "--sysroot", "/tmp/fakeroot"]).unwrap();
        assert_eq!(cli.sysroot, PathBuf::from("/tmp/fakeroot"));
    }

    #[test]
    fn test_cli_rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["fleetglass-install", "--frobnicate"]).is_err());
    }
}
