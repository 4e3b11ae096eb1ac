use super::{FetchError, MergedOptionsSource};
use crate::infer::MergedOptions;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Scripted merged options source
///
/// Responses are handed out in the order they were queued. Once the queue is
/// drained every fetch fails with a network error.
pub struct MockMergedOptionsSource {
    responses: Mutex<VecDeque<Result<MergedOptions, FetchError>>>,
    calls: AtomicUsize,
    name: String,
}

impl MockMergedOptionsSource {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            name: "mock".to_string(),
        }
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::new()
        }
    }

    pub fn add_response(&self, response: Result<MergedOptions, FetchError>) {
        self.queue().push_back(response);
    }

    pub fn add_responses(
        &self,
        responses: impl IntoIterator<Item = Result<MergedOptions, FetchError>>,
    ) {
        self.queue().extend(responses);
    }

    /// Number of fetches performed so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn remaining_responses(&self) -> usize {
        self.queue().len()
    }

    fn queue(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<MergedOptions, FetchError>>> {
        self.responses.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockMergedOptionsSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MergedOptionsSource for MockMergedOptionsSource {
    async fn fetch_merged_options(&self) -> Result<MergedOptions, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queue()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::network("no mock responses queued")))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
