//! Progress bar display for downloads

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for an asset download
pub struct DownloadProgress {
    bar: ProgressBar,
}

impl DownloadProgress {
    /// Create a progress bar for a download of known or unknown length
    pub fn new(asset_name: &str, total_bytes: Option<u64>) -> Self {
        let bar = match total_bytes {
            Some(total) => {
                let style = ProgressStyle::default_bar()
                    .template("[{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-");
                let bar = ProgressBar::new(total);
                bar.set_style(style);
                bar
            }
            None => {
                let style = ProgressStyle::default_spinner()
                    .template("{spinner} {bytes} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner());
                let bar = ProgressBar::new_spinner();
                bar.set_style(style);
                bar
            }
        };
        bar.set_message(asset_name.to_string());
        Self { bar }
    }

    /// Advance by a chunk of downloaded bytes
    pub fn advance(&self, bytes: u64) {
        self.bar.inc(bytes);
    }

    /// Finish and keep the final line visible
    pub fn finish(&self) {
        self.bar.finish();
    }
}
