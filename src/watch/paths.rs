//! Watched path resolution and relevance filtering

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// Source files whose modification triggers regeneration
///
/// Locale files are resolved once, relative to the project root. Files
/// created later are not picked up for the rest of the session.
#[derive(Debug, Clone)]
pub struct WatchedPathSet {
    root: PathBuf,
    locale_paths: HashSet<PathBuf>,
    config_paths: Vec<PathBuf>,
    config_relative: Vec<PathBuf>,
}

impl WatchedPathSet {
    /// Resolves locale and i18n config files against `root`
    ///
    /// Inputs may be absolute or root-relative.
    pub fn new<L, C>(root: impl AsRef<Path>, locale_files: L, config_files: C) -> Self
    where
        L: IntoIterator,
        L::Item: AsRef<Path>,
        C: IntoIterator,
        C::Item: AsRef<Path>,
    {
        let root = absolutize(root.as_ref());

        let locale_paths = locale_files
            .into_iter()
            .map(|f| relative_to(&root, &resolve(&root, f.as_ref())))
            .collect();

        let config_paths: Vec<PathBuf> = config_files
            .into_iter()
            .map(|f| resolve(&root, f.as_ref()))
            .collect();
        let config_relative = config_paths
            .iter()
            .map(|p| relative_to(&root, p))
            .collect();

        Self {
            root,
            locale_paths,
            config_paths,
            config_relative,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute paths of the i18n config files
    pub fn config_paths(&self) -> &[PathBuf] {
        &self.config_paths
    }

    pub fn locale_count(&self) -> usize {
        self.locale_paths.len()
    }

    /// Canonical root-relative form of a path reported by the watch feed
    ///
    /// Relative inputs are resolved against the root first. Paths outside the
    /// root come back with leading `..` segments.
    pub fn normalize(&self, raw: &str) -> PathBuf {
        relative_to(&self.root, &resolve(&self.root, Path::new(raw)))
    }

    /// Whether a change to `raw` affects the generated declaration
    pub fn is_relevant(&self, raw: &str) -> bool {
        let path = self.normalize(raw);
        self.locale_paths.contains(&path) || self.config_relative.contains(&path)
    }
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return lexical_normalize(path);
    }
    match std::env::current_dir() {
        Ok(cwd) => lexical_normalize(&cwd.join(path)),
        Err(_) => lexical_normalize(path),
    }
}

/// Joins `path` onto `root` (absolute paths replace it) and folds `.`/`..`
fn resolve(root: &Path, path: &Path) -> PathBuf {
    lexical_normalize(&root.join(path))
}

fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn relative_to(root: &Path, path: &Path) -> PathBuf {
    let root_components: Vec<Component> = root.components().collect();
    let path_components: Vec<Component> = path.components().collect();

    let common = root_components
        .iter()
        .zip(&path_components)
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..root_components.len() {
        out.push("..");
    }
    for component in &path_components[common..] {
        out.push(component.as_os_str());
    }
    out
}
