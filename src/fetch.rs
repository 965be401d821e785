//! Asset download
//!
//! Streams the selected release asset into the scratch directory. The
//! caller owns the scratch dir handle, so the file disappears with it on
//! every exit path.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{InstallError, Result};
use crate::progress::DownloadProgress;
use crate::release::{Client, ReleaseAsset};

const CHUNK_SIZE: usize = 64 * 1024;

/// Download `asset` into `dest_dir`, returning the path of the local file.
pub fn download(client: &Client, asset: &ReleaseAsset, dest_dir: &Path) -> Result<PathBuf> {
    let failed = |reason: String| InstallError::DownloadFailed {
        url: asset.browser_download_url.clone(),
        reason,
    };

    let response = client
        .fetch_raw(&asset.browser_download_url)
        .map_err(|reason| failed(reason))?;

    let total_bytes = response
        .header("content-length")
        .and_then(|v| v.parse::<u64>().ok());
    let progress = DownloadProgress::new(&asset.name, total_bytes);

    // Asset names come from remote metadata; keep only the file name so a
    // crafted name cannot escape the scratch dir.
    let file_name = Path::new(&asset.name)
        .file_name()
        .ok_or_else(|| failed("asset name is not a plain file name".to_string()))?;
    let dest = dest_dir.join(file_name);
    let mut file = File::create(&dest)?;
    let mut reader = response.into_reader();
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf).map_err(|e| failed(e.to_string()))?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n])?;
        progress.advance(n as u64);
    }
    file.flush()?;
    progress.finish();

    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_failure_reports_url() {
        // Connection refused on a closed local port, fails without network.
        let client = Client::new(
            crate::release::Repo::parse("https://github.com/acme/widget").unwrap(),
            None,
        );
        let asset = ReleaseAsset {
            name: "widget_1.0_amd64.deb".to_string(),
            browser_download_url: "http://127.0.0.1:9/widget_1.0_amd64.deb".to_string(),
        };
        let temp = tempfile::TempDir::new().unwrap();

        let err = download(&client, &asset, temp.path()).unwrap_err();
        match &err {
            InstallError::DownloadFailed { url, .. } => {
                assert!(url.contains("widget_1.0_amd64.deb"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.exit_code(), 2);
        assert!(!temp.path().join("widget_1.0_amd64.deb").exists());
    }
}
