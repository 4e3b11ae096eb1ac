use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File extensions recognised as locale message sources
pub const LOCALE_EXTENSIONS: &[&str] = &["json", "json5", "yaml", "yml", "js", "mjs", "cjs", "ts", "mts", "cts"];

/// Enumerates locale message files below `dir`, sorted by path
///
/// Runs once at session start; the result is the fixed watch list.
pub fn discover_locale_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for result in WalkBuilder::new(dir).hidden(false).git_ignore(true).build() {
        let entry = match result {
            Ok(e) => e,
            Err(err) => {
                warn!(error = %err, "Failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let is_locale = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| LOCALE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if is_locale {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    debug!(dir = %dir.display(), count = files.len(), "Discovered locale files");
    files
}
