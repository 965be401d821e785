//! Process-scoped scratch directory for downloaded artifacts.
//!
//! The directory is created under an absolute temp base so it is never
//! placed under the current working directory (e.g. when TMPDIR=tmp or
//! TMPDIR=./tmp), and is removed when the handle drops, on every exit path.

use std::env;
use std::io;
use std::path::PathBuf;

use tempfile::TempDir;

/// Returns an absolute directory path suitable for creating scratch dirs.
fn temp_dir_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        #[cfg(windows)]
        {
            env::var("TEMP")
                .or_else(|_| env::var("TMP"))
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("C:\\Windows\\Temp"))
        }
        #[cfg(not(windows))]
        {
            PathBuf::from("/tmp")
        }
    }
}

/// Create the scratch directory that holds the downloaded package until
/// the installer hands it to dpkg.
pub fn scratch_dir() -> io::Result<TempDir> {
    tempfile::Builder::new()
        .prefix("fleetglass-install-")
        .tempdir_in(temp_dir_base())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_base_is_absolute() {
        assert!(temp_dir_base().is_absolute());
    }

    #[test]
    fn test_scratch_dir_created_and_removed_on_drop() {
        let dir = scratch_dir().unwrap();
        let path = dir.path().to_path_buf();
        assert!(path.exists());
        assert!(
            path.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("fleetglass-install-")
        );
        drop(dir);
        assert!(!path.exists());
    }
}
