//! Watched paths and the changed-path feed
//!
//! - [`WatchedPathSet`]: the fixed set of locale and i18n config files
//! - [`WatchEvent`]: notifications delivered by the feed
//! - [`discover_locale_files`]: one-shot enumeration of locale sources
//! - [`spawn_fs_feed`]: `notify`-backed feed for the CLI host

mod discover;
mod event;
mod fs_feed;
mod paths;

pub use discover::{discover_locale_files, LOCALE_EXTENSIONS};
pub use event::{WatchEvent, WatchEventKind};
pub use fs_feed::{spawn_fs_feed, translate_kind};
pub use paths::WatchedPathSet;
