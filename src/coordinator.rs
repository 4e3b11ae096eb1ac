//! Regeneration coordinator
//!
//! Decides when merged options are re-fetched and the declaration artifact is
//! re-rendered:
//!
//! 1. On start it subscribes to the host lifecycle hooks. The first `reload`
//!    event whose fetch succeeds populates the cache, requests a render, and
//!    disposes the subscription. Failed attempts keep it attached.
//! 2. Every modification of a watched locale or i18n config file re-fetches,
//!    replaces the cached snapshot and requests a render.
//!
//! Fetch failures never clear an earlier snapshot; the artifact simply stays
//! stale (or empty before the first success). Events are handled one at a
//! time in delivery order, with no debounce and no cancellation.

use crate::cache::SnapshotCache;
use crate::declaration::GENERATED_FILENAME;
use crate::lifecycle::{LifecycleEvent, LifecycleHooks, Subscription, RELOAD_EVENT};
use crate::render::{RenderTrigger, TemplateSelector};
use crate::source::{FetchError, MergedOptionsSource};
use crate::watch::{WatchEvent, WatchedPathSet};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    /// Not started
    Idle,
    /// Subscribed, waiting for the first successful fetch
    AwaitingFirstFetch,
    /// First fetch done; lifecycle subscription released
    Ready,
}

/// Result of handling a changed-path notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regeneration {
    /// Not a watched path, or not a modification
    Ignored,
    Regenerated { revision: u64 },
    /// Fetch failed; the cached snapshot was left as it was
    FetchFailed,
}

/// Result of handling a lifecycle event while awaiting the first fetch
#[derive(Debug)]
pub enum FirstSignalOutcome {
    /// Snapshot stored and the subscription disposed
    Completed { revision: u64 },
    /// Still waiting; the subscription stays attached
    Pending(Subscription),
}

pub struct RegenerationCoordinator {
    source: Arc<dyn MergedOptionsSource>,
    cache: SnapshotCache,
    trigger: Arc<dyn RenderTrigger>,
    watched: WatchedPathSet,
    selector: TemplateSelector,
    state: CoordinatorState,
}

impl RegenerationCoordinator {
    pub fn new(
        source: Arc<dyn MergedOptionsSource>,
        cache: SnapshotCache,
        trigger: Arc<dyn RenderTrigger>,
        watched: WatchedPathSet,
    ) -> Self {
        Self {
            source,
            cache,
            trigger,
            watched,
            selector: TemplateSelector::filename(GENERATED_FILENAME),
            state: CoordinatorState::Idle,
        }
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    pub fn watched(&self) -> &WatchedPathSet {
        &self.watched
    }

    /// Subscribes to the lifecycle hooks and starts waiting for the first fetch
    pub fn start(&mut self, hooks: &LifecycleHooks) -> Subscription {
        self.state = CoordinatorState::AwaitingFirstFetch;
        debug!(
            locale_files = self.watched.locale_count(),
            config_files = self.watched.config_paths().len(),
            "Awaiting first reload signal"
        );
        hooks.subscribe()
    }

    /// Performs the first fetch; disposes `subscription` once it succeeds
    pub async fn handle_first_signal(&mut self, subscription: Subscription) -> FirstSignalOutcome {
        match self.refresh().await {
            Ok(revision) => {
                self.state = CoordinatorState::Ready;
                subscription.dispose();
                info!(revision, source = self.source.name(), "Initial type declarations generated");
                FirstSignalOutcome::Completed { revision }
            }
            Err(err) => {
                // Swallowed: the artifact stays empty until a later trigger succeeds
                debug!(error = %err, "Initial merged options fetch failed");
                FirstSignalOutcome::Pending(subscription)
            }
        }
    }

    /// Routes a lifecycle event; only the reload signal triggers a fetch
    pub async fn handle_lifecycle_event(
        &mut self,
        event: &LifecycleEvent,
        subscription: Subscription,
    ) -> FirstSignalOutcome {
        if !event.is(RELOAD_EVENT) {
            trace!(event = %event.name, "Ignoring lifecycle event");
            return FirstSignalOutcome::Pending(subscription);
        }
        self.handle_first_signal(subscription).await
    }

    /// Re-fetches and re-renders when `raw_path` is a watched file
    pub async fn handle_path_changed(&mut self, raw_path: &str) -> Regeneration {
        if !self.watched.is_relevant(raw_path) {
            return Regeneration::Ignored;
        }

        match self.refresh().await {
            Ok(revision) => {
                info!(path = raw_path, revision, "Regenerated type declarations");
                Regeneration::Regenerated { revision }
            }
            Err(err) => {
                // Swallowed: keep serving the previous snapshot
                debug!(path = raw_path, error = %err, "Merged options refresh failed");
                Regeneration::FetchFailed
            }
        }
    }

    /// Handles a feed notification; only modifications are considered
    pub async fn handle_watch_event(&mut self, event: &WatchEvent) -> Regeneration {
        if !event.kind.is_modification() {
            return Regeneration::Ignored;
        }
        self.handle_path_changed(&event.path).await
    }

    /// Drives the coordinator until the watch feed closes
    ///
    /// Lifecycle and watch events are processed one at a time. Returns the
    /// final state.
    pub async fn run(
        mut self,
        subscription: Subscription,
        mut watch_rx: UnboundedReceiver<WatchEvent>,
    ) -> CoordinatorState {
        let mut lifecycle = Some(subscription);

        loop {
            tokio::select! {
                // Lifecycle first, so a pending reload is handled before queued changes
                biased;

                event = next_lifecycle_event(&mut lifecycle) => {
                    let (Some(event), Some(subscription)) = (event, lifecycle.take()) else {
                        // Hooks closed before the first fetch succeeded
                        lifecycle = None;
                        continue;
                    };
                    if let FirstSignalOutcome::Pending(subscription) =
                        self.handle_lifecycle_event(&event, subscription).await
                    {
                        lifecycle = Some(subscription);
                    }
                }
                event = watch_rx.recv() => {
                    let Some(event) = event else {
                        break;
                    };
                    self.handle_watch_event(&event).await;
                }
            }
        }

        debug!(state = ?self.state, "Watch feed closed");
        self.state
    }

    async fn refresh(&self) -> Result<u64, FetchError> {
        let options = self.source.fetch_merged_options().await?;
        let revision = self.cache.store(options);
        self.trigger.request_rerender(&self.selector);
        Ok(revision)
    }
}

async fn next_lifecycle_event(subscription: &mut Option<Subscription>) -> Option<LifecycleEvent> {
    match subscription {
        Some(subscription) => subscription.recv().await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infer::{MergedOptions, MessageTree};
    use crate::render::RecordingTrigger;
    use crate::source::MockMergedOptionsSource;

    fn options(key: &str) -> MergedOptions {
        MergedOptions::with_messages(MessageTree::object([(key, MessageTree::string("v"))]))
    }

    fn coordinator(
        source: Arc<MockMergedOptionsSource>,
        trigger: Arc<RecordingTrigger>,
    ) -> (RegenerationCoordinator, SnapshotCache) {
        let cache = SnapshotCache::new();
        let watched = WatchedPathSet::new("/app", ["locales/en.json"], ["/app/i18n.config.ts"]);
        (
            RegenerationCoordinator::new(source, cache.clone(), trigger, watched),
            cache,
        )
    }

    #[tokio::test]
    async fn test_start_moves_to_awaiting() {
        let (mut coordinator, _) = coordinator(
            Arc::new(MockMergedOptionsSource::new()),
            Arc::new(RecordingTrigger::new()),
        );
        let hooks = LifecycleHooks::new();
        assert_eq!(coordinator.state(), CoordinatorState::Idle);

        let _sub = coordinator.start(&hooks);
        assert_eq!(coordinator.state(), CoordinatorState::AwaitingFirstFetch);
        assert_eq!(hooks.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn test_first_signal_failure_keeps_subscription() {
        let source = Arc::new(MockMergedOptionsSource::new());
        source.add_response(Err(FetchError::Status { status: 503 }));
        let trigger = Arc::new(RecordingTrigger::new());
        let (mut coordinator, cache) = coordinator(source.clone(), trigger.clone());
        let hooks = LifecycleHooks::new();
        let sub = coordinator.start(&hooks);

        let outcome = coordinator.handle_first_signal(sub).await;
        assert!(matches!(outcome, FirstSignalOutcome::Pending(_)));
        assert_eq!(coordinator.state(), CoordinatorState::AwaitingFirstFetch);
        assert!(cache.is_empty());
        assert_eq!(trigger.request_count(), 0);
        assert_eq!(hooks.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn test_first_signal_success_disposes_subscription() {
        let source = Arc::new(MockMergedOptionsSource::new());
        source.add_response(Ok(options("greeting")));
        let trigger = Arc::new(RecordingTrigger::new());
        let (mut coordinator, cache) = coordinator(source, trigger.clone());
        let hooks = LifecycleHooks::new();
        let sub = coordinator.start(&hooks);

        let outcome = coordinator.handle_first_signal(sub).await;
        assert!(matches!(outcome, FirstSignalOutcome::Completed { revision: 1 }));
        assert_eq!(coordinator.state(), CoordinatorState::Ready);
        assert_eq!(hooks.subscriber_count(), 0);
        assert_eq!(cache.latest().as_deref(), Some(&options("greeting")));
        assert_eq!(
            trigger.requests(),
            vec![TemplateSelector::filename(GENERATED_FILENAME)]
        );
    }

    #[tokio::test]
    async fn test_non_reload_event_does_not_fetch() {
        let source = Arc::new(MockMergedOptionsSource::new());
        let (mut coordinator, _) = coordinator(source.clone(), Arc::new(RecordingTrigger::new()));
        let hooks = LifecycleHooks::new();
        let sub = coordinator.start(&hooks);

        let outcome = coordinator
            .handle_lifecycle_event(&LifecycleEvent::new("build:done"), sub)
            .await;
        assert!(matches!(outcome, FirstSignalOutcome::Pending(_)));
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_irrelevant_path_is_a_no_op() {
        let source = Arc::new(MockMergedOptionsSource::new());
        let trigger = Arc::new(RecordingTrigger::new());
        let (mut coordinator, _) = coordinator(source.clone(), trigger.clone());

        assert_eq!(
            coordinator.handle_path_changed("components/App.vue").await,
            Regeneration::Ignored
        );
        assert_eq!(source.call_count(), 0);
        assert_eq!(trigger.request_count(), 0);
    }

    #[tokio::test]
    async fn test_absolute_and_config_paths_regenerate() {
        let source = Arc::new(MockMergedOptionsSource::new());
        source.add_responses([Ok(options("a")), Ok(options("b"))]);
        let (mut coordinator, cache) = coordinator(source, Arc::new(RecordingTrigger::new()));

        assert_eq!(
            coordinator.handle_path_changed("/app/locales/en.json").await,
            Regeneration::Regenerated { revision: 1 }
        );
        assert_eq!(
            coordinator.handle_path_changed("i18n.config.ts").await,
            Regeneration::Regenerated { revision: 2 }
        );
        assert_eq!(cache.latest().as_deref(), Some(&options("b")));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let source = Arc::new(MockMergedOptionsSource::new());
        source.add_responses([
            Ok(options("kept")),
            Err(FetchError::invalid_json("truncated")),
        ]);
        let trigger = Arc::new(RecordingTrigger::new());
        let (mut coordinator, cache) = coordinator(source, trigger.clone());

        coordinator.handle_path_changed("locales/en.json").await;
        assert_eq!(
            coordinator.handle_path_changed("locales/en.json").await,
            Regeneration::FetchFailed
        );
        assert_eq!(cache.latest().as_deref(), Some(&options("kept")));
        assert_eq!(cache.revision(), 1);
        assert_eq!(trigger.request_count(), 1);
    }

    #[tokio::test]
    async fn test_non_modification_events_are_ignored() {
        let source = Arc::new(MockMergedOptionsSource::new());
        let (mut coordinator, _) = coordinator(source.clone(), Arc::new(RecordingTrigger::new()));

        let event = WatchEvent::new(crate::watch::WatchEventKind::Add, "locales/en.json");
        assert_eq!(coordinator.handle_watch_event(&event).await, Regeneration::Ignored);
        assert_eq!(source.call_count(), 0);
    }
}
