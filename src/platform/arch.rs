//! CPU architecture normalization
//!
//! Raw reports from `dpkg --print-architecture` and `uname -m` are mapped
//! into the fixed vocabulary the release assets are named with.

use std::process::Command;

use crate::error::{InstallError, Result};

/// Normalized CPU architecture, in Debian package naming
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    Amd64,
    Arm64,
    Armhf,
    I386,
}

impl Arch {
    /// Label as it appears in asset filenames
    pub fn as_str(self) -> &'static str {
        match self {
            Arch::Amd64 => "amd64",
            Arch::Arm64 => "arm64",
            Arch::Armhf => "armhf",
            Arch::I386 => "i386",
        }
    }

    /// Map a raw kernel or package-manager report to a normalized label
    pub fn from_raw(raw: &str) -> Option<Arch> {
        match raw.trim() {
            "x86_64" | "amd64" => Some(Arch::Amd64),
            "aarch64" | "arm64" => Some(Arch::Arm64),
            "armv7l" | "armhf" => Some(Arch::Armhf),
            "i386" | "i686" => Some(Arch::I386),
            _ => None,
        }
    }
}

/// First line of stdout from a command, if it ran successfully
fn probe(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout.lines().next().map(|line| line.trim().to_string())
}

/// Detect the host architecture, preferring the package manager's view
/// (`dpkg --print-architecture`) over the kernel's (`uname -m`).
pub fn detect() -> Result<Arch> {
    let raw = probe("dpkg", &["--print-architecture"])
        .or_else(|| probe("uname", &["-m"]))
        .ok_or_else(|| InstallError::ArchProbeFailed {
            reason: "neither dpkg nor uname produced output".to_string(),
        })?;

    Arch::from_raw(&raw).ok_or(InstallError::UnsupportedArchitecture { value: raw })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_kernel_names() {
        assert_eq!(Arch::from_raw("x86_64"), Some(Arch::Amd64));
        assert_eq!(Arch::from_raw("aarch64"), Some(Arch::Arm64));
        assert_eq!(Arch::from_raw("armv7l"), Some(Arch::Armhf));
        assert_eq!(Arch::from_raw("i686"), Some(Arch::I386));
    }

    #[test]
    fn test_from_raw_dpkg_names() {
        assert_eq!(Arch::from_raw("amd64"), Some(Arch::Amd64));
        assert_eq!(Arch::from_raw("arm64"), Some(Arch::Arm64));
        assert_eq!(Arch::from_raw("armhf"), Some(Arch::Armhf));
        assert_eq!(Arch::from_raw("i386"), Some(Arch::I386));
    }

    #[test]
    fn test_from_raw_trims_whitespace() {
        assert_eq!(Arch::from_raw("x86_64\n"), Some(Arch::Amd64));
    }

    #[test]
    fn test_from_raw_unknown() {
        assert_eq!(Arch::from_raw("mips64el"), None);
        assert_eq!(Arch::from_raw(""), None);
    }

    #[test]
    fn test_as_str_round_trip() {
        for arch in [Arch::Amd64, Arch::Arm64, Arch::Armhf, Arch::I386] {
            assert_eq!(Arch::from_raw(arch.as_str()), Some(arch));
        }
    }
}
