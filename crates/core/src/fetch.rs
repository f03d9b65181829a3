//! Canonical text fetching
//!
//! Verse lookup may be slow, so it runs on a worker thread while the
//! interface stays responsive. Requests carry a monotonically increasing id;
//! only the most recently issued request may publish its result, so a stale
//! fetch that completes after being superseded is dropped silently. That
//! check is the whole cancellation story — no explicit signal is needed.

use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use crate::verse::{passage_text, PassageRef, VerseSource};

#[derive(Debug, Default)]
struct FetchState {
    /// Id of the most recently issued request
    request_id: u64,
    /// Result of that request, once it completes
    text: Option<String>,
    ready: bool,
}

/// Latest-wins fetcher for canonical passage text
#[derive(Clone, Default)]
pub struct CanonicalFetcher {
    state: Arc<Mutex<FetchState>>,
}

impl CanonicalFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FetchState> {
        // A worker that panicked mid-store left no partial write; the state
        // is still usable
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Begin fetching the text for `passage` in the background.
    ///
    /// Supersedes any request still in flight; returns the new request id.
    /// Fetched text longer than `max_chars` characters is truncated with an
    /// ellipsis before it is published.
    pub fn request(
        &self,
        source: Arc<dyn VerseSource>,
        passage: PassageRef,
        max_chars: usize,
    ) -> u64 {
        let request_id = {
            let mut state = self.lock();
            state.request_id += 1;
            state.ready = false;
            state.text = None;
            state.request_id
        };

        let shared = Arc::clone(&self.state);
        thread::spawn(move || {
            let mut text = passage_text(source.as_ref(), &passage);
            if let Some((byte_index, _)) = text.char_indices().nth(max_chars) {
                text.truncate(byte_index);
                text.push_str(" ...");
            }

            let mut state = shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            if state.request_id != request_id {
                log::debug!(
                    "dropping stale fetch for {passage} (request {request_id}, current {})",
                    state.request_id
                );
                return;
            }
            state.text = Some(text);
            state.ready = true;
        });

        request_id
    }

    /// Whether the most recent request has completed
    pub fn is_ready(&self) -> bool {
        self.lock().ready
    }

    /// Result of the most recent request, if it has completed
    pub fn latest(&self) -> Option<String> {
        let state = self.lock();
        if state.ready {
            state.text.clone()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VerseError;
    use std::time::Duration;

    /// Source whose first lookup blocks long enough to be superseded.
    struct DelayedSource {
        delay: Duration,
        text: &'static str,
    }

    impl VerseSource for DelayedSource {
        fn verse_text(&self, _: &str, _: u32, _: u32) -> Result<String, VerseError> {
            thread::sleep(self.delay);
            Ok(self.text.to_string())
        }
    }

    fn wait_ready(fetcher: &CanonicalFetcher) {
        for _ in 0..200 {
            if fetcher.is_ready() {
                return;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("fetch never completed");
    }

    #[test]
    fn test_fetch_publishes_result() {
        let fetcher = CanonicalFetcher::new();
        let source = Arc::new(DelayedSource {
            delay: Duration::from_millis(1),
            text: "Jesus wept.",
        });

        fetcher.request(source, PassageRef::verse("John", 11, 35), 8000);
        wait_ready(&fetcher);

        assert_eq!(fetcher.latest().as_deref(), Some("Jesus wept."));
    }

    #[test]
    fn test_stale_result_is_dropped() {
        let fetcher = CanonicalFetcher::new();
        let slow = Arc::new(DelayedSource {
            delay: Duration::from_millis(150),
            text: "slow verse",
        });
        let fast = Arc::new(DelayedSource {
            delay: Duration::from_millis(1),
            text: "fast verse",
        });

        let first = fetcher.request(slow, PassageRef::verse("John", 1, 1), 8000);
        let second = fetcher.request(fast, PassageRef::verse("John", 1, 2), 8000);
        assert!(second > first);

        wait_ready(&fetcher);
        assert_eq!(fetcher.latest().as_deref(), Some("fast verse"));

        // Let the slow worker finish; its result must not overwrite
        thread::sleep(Duration::from_millis(200));
        assert_eq!(fetcher.latest().as_deref(), Some("fast verse"));
    }

    #[test]
    fn test_new_request_clears_readiness() {
        let fetcher = CanonicalFetcher::new();
        let source = Arc::new(DelayedSource {
            delay: Duration::from_millis(1),
            text: "text",
        });

        fetcher.request(Arc::clone(&source) as Arc<dyn VerseSource>, PassageRef::verse("John", 1, 1), 8000);
        wait_ready(&fetcher);

        fetcher.request(
            Arc::new(DelayedSource {
                delay: Duration::from_millis(100),
                text: "later",
            }),
            PassageRef::verse("John", 1, 2),
            8000,
        );
        assert!(fetcher.latest().is_none() || fetcher.latest().as_deref() == Some("later"));
    }

    #[test]
    fn test_fetched_text_is_truncated() {
        let fetcher = CanonicalFetcher::new();
        let source = Arc::new(DelayedSource {
            delay: Duration::from_millis(1),
            text: "one two three",
        });

        fetcher.request(source, PassageRef::verse("John", 1, 1), 3);
        wait_ready(&fetcher);

        assert_eq!(fetcher.latest().as_deref(), Some("one ..."));
    }
}
