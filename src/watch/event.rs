/// Kind of filesystem notification delivered by the watch feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchEventKind {
    Add,
    Change,
    Unlink,
    AddDir,
    UnlinkDir,
}

impl WatchEventKind {
    /// Only in-place modifications of existing files trigger regeneration
    pub fn is_modification(self) -> bool {
        matches!(self, WatchEventKind::Change)
    }
}

/// A changed-path notification from the watch feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    pub kind: WatchEventKind,
    /// Absolute or root-relative, depending on the feed
    pub path: String,
}

impl WatchEvent {
    pub fn new(kind: WatchEventKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    pub fn change(path: impl Into<String>) -> Self {
        Self::new(WatchEventKind::Change, path)
    }
}
