//! Error types for the installer
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//! Every variant maps to a process exit code: 1 for platform and general
//! failures, 2 for release-resolution, asset-selection and download failures.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for installer operations
#[derive(Error, Diagnostic, Debug)]
pub enum InstallError {
    // Platform errors
    #[error("Could not detect a supported platform on this host")]
    #[diagnostic(
        code(fleetglass::platform::undetectable),
        help(
            "No ROS installation was found under /opt/ros and /etc/os-release did not \
             identify a supported OS. Pass --ros-distro <DISTRO> (e.g. --ros-distro humble) \
             or set the ROS_DISTRO environment variable."
        )
    )]
    PlatformUndetectable,

    #[error("Unsupported CPU architecture: {value}")]
    #[diagnostic(
        code(fleetglass::platform::unsupported_arch),
        help("Supported architectures: amd64, arm64, armhf, i386")
    )]
    UnsupportedArchitecture { value: String },

    #[error("Failed to determine CPU architecture: {reason}")]
    #[diagnostic(code(fleetglass::platform::arch_probe_failed))]
    ArchProbeFailed { reason: String },

    // Release errors
    #[error("Invalid base URL: {url}")]
    #[diagnostic(
        code(fleetglass::release::invalid_base_url),
        help("Expected a repository URL of the form https://github.com/<owner>/<repo>")
    )]
    InvalidBaseUrl { url: String },

    #[error("Failed to resolve latest release: {reason}")]
    #[diagnostic(
        code(fleetglass::release::resolve_failed),
        help("Check network connectivity, or pass --release-tag <TAG> to pin a release")
    )]
    ReleaseResolveFailed { reason: String },

    #[error("Failed to list assets for release '{tag}': {reason}")]
    #[diagnostic(code(fleetglass::release::asset_list_failed))]
    AssetListFailed { tag: String, reason: String },

    // Asset errors
    #[error("No compatible package found for this host (pattern: {pattern})")]
    #[diagnostic(code(fleetglass::asset::no_match), help("Available assets: {available}"))]
    NoCompatibleAsset { pattern: String, available: String },

    #[error("Failed to download {url}: {reason}")]
    #[diagnostic(code(fleetglass::asset::download_failed))]
    DownloadFailed { url: String, reason: String },

    // Installer errors
    #[error("Archive key fingerprint mismatch: expected {expected}, got {actual}")]
    #[diagnostic(
        code(fleetglass::installer::key_mismatch),
        help("The telemetry agent repository key did not verify and was not trusted")
    )]
    KeyFingerprintMismatch { expected: String, actual: String },

    #[error("Command failed: {command}: {reason}")]
    #[diagnostic(code(fleetglass::installer::command_failed))]
    CommandFailed { command: String, reason: String },

    #[error("Failed to install package {package}: {reason}")]
    #[diagnostic(
        code(fleetglass::installer::package_install_failed),
        help("Dependency repair (apt-get install -f) was already attempted")
    )]
    PackageInstallFailed { package: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    #[diagnostic(code(fleetglass::io_error))]
    Io(#[from] std::io::Error),
}

impl InstallError {
    /// Process exit code for this error: 2 for release-resolution,
    /// asset-selection and download failures, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            InstallError::ReleaseResolveFailed { .. }
            | InstallError::AssetListFailed { .. }
            | InstallError::NoCompatibleAsset { .. }
            | InstallError::DownloadFailed { .. } => 2,
            _ => 1,
        }
    }
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, InstallError>;
