//! Minimal /etc/os-release parsing
//!
//! Only the fields the installer needs: `ID` and the release codename
//! (`VERSION_CODENAME`, with `UBUNTU_CODENAME` as fallback for derivatives
//! that leave the former unset).

use std::fs;
use std::path::Path;

/// OS identity from os-release
#[derive(Debug, Clone, PartialEq)]
pub struct OsRelease {
    /// Lowercase distribution id, e.g. "ubuntu"
    pub id: String,
    /// Release codename, e.g. "jammy"
    pub codename: Option<String>,
}

impl OsRelease {
    /// Read and parse an os-release file. Returns None when the file is
    /// missing or carries no `ID` field.
    pub fn load(path: &Path) -> Option<OsRelease> {
        let content = fs::read_to_string(path).ok()?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Option<OsRelease> {
        let mut id = None;
        let mut version_codename = None;
        let mut ubuntu_codename = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = unquote(value);
            match key {
                "ID" => id = Some(value.to_lowercase()),
                "VERSION_CODENAME" => version_codename = Some(value),
                "UBUNTU_CODENAME" => ubuntu_codename = Some(value),
                _ => {}
            }
        }

        Some(OsRelease {
            id: id.filter(|v| !v.is_empty())?,
            codename: version_codename
                .or(ubuntu_codename)
                .filter(|v| !v.is_empty()),
        })
    }
}

/// Strip a matching pair of single or double quotes
fn unquote(value: &str) -> String {
    let value = value.trim();
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return value[1..value.len() - 1].to_string();
        }
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ubuntu() {
        let release = OsRelease::parse(
            "NAME=\"Ubuntu\"\nID=ubuntu\nID_LIKE=debian\nVERSION_CODENAME=jammy\n",
        )
        .unwrap();
        assert_eq!(release.id, "ubuntu");
        assert_eq!(release.codename.as_deref(), Some("jammy"));
    }

    #[test]
    fn test_parse_quoted_values() {
        let release = OsRelease::parse("ID=\"debian\"\nVERSION_CODENAME='bookworm'\n").unwrap();
        assert_eq!(release.id, "debian");
        assert_eq!(release.codename.as_deref(), Some("bookworm"));
    }

    #[test]
    fn test_parse_ubuntu_codename_fallback() {
        let release =
            OsRelease::parse("ID=pop\nUBUNTU_CODENAME=jammy\n").unwrap();
        assert_eq!(release.id, "pop");
        assert_eq!(release.codename.as_deref(), Some("jammy"));
    }

    #[test]
    fn test_parse_version_codename_preferred() {
        let release =
            OsRelease::parse("ID=ubuntu\nVERSION_CODENAME=noble\nUBUNTU_CODENAME=jammy\n")
                .unwrap();
        assert_eq!(release.codename.as_deref(), Some("noble"));
    }

    #[test]
    fn test_parse_missing_codename() {
        let release = OsRelease::parse("ID=debian\n").unwrap();
        assert_eq!(release.codename, None);
    }

    #[test]
    fn test_parse_missing_id() {
        assert_eq!(OsRelease::parse("VERSION_CODENAME=jammy\n"), None);
    }

    #[test]
    fn test_parse_ignores_comments_and_noise() {
        let release =
            OsRelease::parse("# generated\n\nPRETTY_NAME=Ubuntu 22.04\nID=ubuntu\nnot-a-kv\n")
                .unwrap();
        assert_eq!(release.id, "ubuntu");
    }

    #[test]
    fn test_load_missing_file() {
        assert_eq!(OsRelease::load(Path::new("/nonexistent/os-release")), None);
    }
}
