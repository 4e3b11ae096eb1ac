//! Filesystem-backed watch feed

use super::{WatchEvent, WatchEventKind};
use notify::event::{CreateKind, ModifyKind, RemoveKind, RenameMode};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{trace, warn};

/// Starts watching `root` recursively, forwarding notifications to `sender`
///
/// The returned watcher must be kept alive for the feed to keep running.
pub fn spawn_fs_feed(
    root: &Path,
    sender: UnboundedSender<WatchEvent>,
) -> notify::Result<RecommendedWatcher> {
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        match res {
            Ok(event) => {
                let Some(kind) = translate_kind(&event.kind) else {
                    return;
                };
                for path in event.paths {
                    trace!(?kind, path = %path.display(), "Filesystem event");
                    // Receiver gone means the session ended
                    let _ = sender.send(WatchEvent::new(kind, path.display().to_string()));
                }
            }
            Err(err) => warn!(error = %err, "Filesystem watcher error"),
        }
    })?;

    watcher.watch(root, RecursiveMode::Recursive)?;
    Ok(watcher)
}

/// Maps a notify event kind onto the feed's event kinds
///
/// Renames onto a path count as a change so editors that save by replacing
/// the file still trigger regeneration.
pub fn translate_kind(kind: &EventKind) -> Option<WatchEventKind> {
    match kind {
        EventKind::Create(CreateKind::Folder) => Some(WatchEventKind::AddDir),
        EventKind::Create(_) => Some(WatchEventKind::Add),
        EventKind::Modify(ModifyKind::Metadata(_)) => None,
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => Some(WatchEventKind::Unlink),
        EventKind::Modify(_) => Some(WatchEventKind::Change),
        EventKind::Remove(RemoveKind::Folder) => Some(WatchEventKind::UnlinkDir),
        EventKind::Remove(_) => Some(WatchEventKind::Unlink),
        EventKind::Access(_) | EventKind::Any | EventKind::Other => None,
    }
}
