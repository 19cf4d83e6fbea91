// Input-file progress bars (indicatif). Disabled under --debug so log lines
// are not interleaved with bar redraws.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;

pub struct ProgressManager {
    multi: Option<MultiProgress>,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self {
            multi: enabled.then(MultiProgress::new),
        }
    }

    // Byte-based bar sized to the input file, labelled with its file name.
    pub fn new_file_bar(&self, path: &str) -> Option<ProgressBar> {
        let mp = self.multi.as_ref()?;
        let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        let bar = mp.add(ProgressBar::new(size));
        bar.set_style(file_style());
        bar.set_prefix(format!("Reading {}", basename(path)));
        Some(bar)
    }
}

fn file_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{prefix:30} {bytes:>10}/{total_bytes:<10} [{bar:50}] {percent:>3}%",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("█ ")
}

pub fn basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}
