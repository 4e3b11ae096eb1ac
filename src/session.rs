//! Session setup: wires the template, cache and coordinator together

use crate::cache::SnapshotCache;
use crate::config::TypegenConfig;
use crate::coordinator::RegenerationCoordinator;
use crate::declaration::TypeTemplate;
use crate::render::RenderTrigger;
use crate::source::MergedOptionsSource;
use crate::watch::WatchedPathSet;
use std::sync::Arc;
use tracing::debug;

/// A wired session: the render callback and the coordinator feeding it
pub struct PreparedSession {
    pub template: TypeTemplate,
    pub coordinator: RegenerationCoordinator,
    pub cache: SnapshotCache,
}

/// Sets up type generation for a session
///
/// Returns `None` when generation is disabled by configuration or the session
/// is not a development session; nothing is wired in that case. The render
/// trigger is built from the template so hosts can bind their renderer to it.
pub fn prepare_type_generation<F>(
    config: &TypegenConfig,
    source: Arc<dyn MergedOptionsSource>,
    watched: WatchedPathSet,
    make_trigger: F,
) -> Option<PreparedSession>
where
    F: FnOnce(&TypeTemplate) -> Arc<dyn RenderTrigger>,
{
    if !config.is_enabled() {
        debug!(
            typed_options = config.typed_options_and_messages,
            mode = %config.mode,
            "Type generation disabled"
        );
        return None;
    }

    let cache = SnapshotCache::new();
    let template = TypeTemplate::new(cache.clone());
    let trigger = make_trigger(&template);
    let coordinator = RegenerationCoordinator::new(source, cache.clone(), trigger, watched);

    Some(PreparedSession {
        template,
        coordinator,
        cache,
    })
}
