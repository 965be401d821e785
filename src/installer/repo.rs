//! Telemetry agent repository provisioning
//!
//! Fetches the FleetGlass APT archive key, checks its primary fingerprint
//! against a fixed constant before trusting it, installs the keyring and
//! sources list, and installs the agent package. Every step can fail
//! without failing the overall bridge install; the caller downgrades
//! errors from here to warnings.

use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};
use std::time::Duration;

use crate::error::{InstallError, Result};
use crate::installer::apt;

/// Telemetry agent package installed from the FleetGlass repository
pub const AGENT_PACKAGE: &str = "fleetglass-agent";

const APT_REPO_URL: &str = "https://apt.fleetglass.io";
const ARCHIVE_KEY_URL: &str = "https://apt.fleetglass.io/fleetglass-archive-key.asc";
/// Primary fingerprint of the FleetGlass archive signing key
const ARCHIVE_KEY_FINGERPRINT: &str = "6D1F7A4B8C2E903A5F41D87B0A96C3E2518FD4B7";

const KEYRING_PATH: &str = "/usr/share/keyrings/fleetglass-archive-keyring.gpg";
const SOURCES_LIST_PATH: &str = "/etc/apt/sources.list.d/fleetglass.list";

/// Provision the signed repository and install the agent package.
pub fn provision_agent(verbose: bool) -> Result<()> {
    let key = fetch_archive_key()?;
    verify_archive_key(&key)?;
    install_keyring(&key)?;
    fs::write(SOURCES_LIST_PATH, sources_list_entry())?;

    apt::apt_get(&["update"], verbose)?;
    apt::apt_get(&["install", "-y", AGENT_PACKAGE], verbose)
}

fn fetch_archive_key() -> Result<String> {
    let agent = ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(30))
        .build();
    agent
        .get(ARCHIVE_KEY_URL)
        .call()
        .map_err(|e| InstallError::DownloadFailed {
            url: ARCHIVE_KEY_URL.to_string(),
            reason: e.to_string(),
        })?
        .into_string()
        .map_err(|e| InstallError::DownloadFailed {
            url: ARCHIVE_KEY_URL.to_string(),
            reason: e.to_string(),
        })
}

/// Refuse the key unless its primary fingerprint matches the pinned one.
fn verify_archive_key(key: &str) -> Result<()> {
    let colons = gpg_with_stdin(&["--show-keys", "--with-colons"], key)?;
    let actual =
        primary_fingerprint(&colons).ok_or_else(|| InstallError::CommandFailed {
            command: "gpg --show-keys --with-colons".to_string(),
            reason: "no fingerprint in output".to_string(),
        })?;

    if actual != ARCHIVE_KEY_FINGERPRINT {
        return Err(InstallError::KeyFingerprintMismatch {
            expected: ARCHIVE_KEY_FINGERPRINT.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

fn install_keyring(key: &str) -> Result<()> {
    gpg_with_stdin(&["--dearmor", "--yes", "-o", KEYRING_PATH], key)?;
    Ok(())
}

fn sources_list_entry() -> String {
    format!("deb [signed-by={KEYRING_PATH}] {APT_REPO_URL} stable main\n")
}

/// First `fpr` record in gpg's colon-delimited output (the primary key's)
fn primary_fingerprint(colons: &str) -> Option<&str> {
    colons
        .lines()
        .find(|line| line.starts_with("fpr:"))
        .and_then(|line| line.split(':').nth(9))
        .filter(|fpr| !fpr.is_empty())
}

/// Run gpg with `input` piped to stdin, returning stdout.
fn gpg_with_stdin(args: &[&str], input: &str) -> Result<String> {
    let mut child = Command::new("gpg")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| InstallError::CommandFailed {
            command: "gpg".to_string(),
            reason: e.to_string(),
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(input.as_bytes())?;
    }

    let output = child.wait_with_output()?;
    if !output.status.success() {
        return Err(InstallError::CommandFailed {
            command: format!("gpg {}", args.join(" ")),
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
