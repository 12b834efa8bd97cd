use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

/// A single-flight memoizing cache keyed by an opaque string.
///
/// Concurrent callers asking for the same key share one in-flight fetch;
/// the underlying operation runs at most once per key for the lifetime of
/// the cache. Used by the metadata cache to memoize `(name, descriptor)`
/// registry resolutions, but is not itself aware of package semantics.
pub struct MemoCache<T, E> {
    entries: Mutex<HashMap<String, Arc<OnceCell<Result<T, E>>>>>,
}

impl<T, E> Default for MemoCache<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> MemoCache<T, E>
where
    T: Clone,
    E: Clone,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached value for `key`, computing it via `fetch` on first
    /// (or concurrently-first) access. `fetch` is only invoked once per key.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, fetch: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let cell = {
            let mut entries = self.entries.lock().await;
            entries
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        cell.get_or_init(fetch).await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn fetches_once_per_key() {
        let cache: MemoCache<i32, String> = MemoCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let calls_a = calls.clone();
        let a = cache.get_or_fetch("x", || async move {
            calls_a.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(42)
        });

        let calls_b = calls.clone();
        let b = cache.get_or_fetch("x", || async move {
            calls_b.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(7)
        });

        let (ra, rb) = tokio::join!(a, b);
        assert_eq!(ra.unwrap(), 42);
        assert_eq!(rb.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn distinct_keys_fetch_independently() {
        let cache: MemoCache<i32, String> = MemoCache::new();
        let a = cache.get_or_fetch("x", || async { Ok::<_, String>(1) }).await;
        let b = cache.get_or_fetch("y", || async { Ok::<_, String>(2) }).await;
        assert_eq!(a.unwrap(), 1);
        assert_eq!(b.unwrap(), 2);
        assert_eq!(cache.len().await, 2);
    }
}
