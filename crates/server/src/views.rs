//! In-memory cache of rendered views, keyed by view path.
//!
//! The engine invalidates through [`ViewCache`]; handlers read through
//! [`ViewCacheStore::get_or_build`]. Each path carries a generation counter so
//! a build that raced with an invalidation is served once but never stored.

use std::{collections::HashMap, future::Future};

use engine::ViewCache;
use parking_lot::RwLock;

#[derive(Debug)]
struct Views<T> {
    entries: HashMap<String, T>,
    generations: HashMap<String, u64>,
}

impl<T> Default for Views<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            generations: HashMap::new(),
        }
    }
}

#[derive(Debug)]
pub struct ViewCacheStore<T> {
    views: RwLock<Views<T>>,
}

impl<T> Default for ViewCacheStore<T> {
    fn default() -> Self {
        Self {
            views: RwLock::new(Views::default()),
        }
    }
}

impl<T: Clone> ViewCacheStore<T> {
    pub fn get(&self, view: &str) -> Option<T> {
        self.views.read().entries.get(view).cloned()
    }

    /// Return the cached `view`, or build and cache it.
    pub async fn get_or_build<F, Fut, E>(&self, view: &str, build: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let generation = {
            let views = self.views.read();
            if let Some(hit) = views.entries.get(view) {
                return Ok(hit.clone());
            }
            views.generations.get(view).copied().unwrap_or(0)
        };

        let built = build().await?;

        let mut views = self.views.write();
        if views.generations.get(view).copied().unwrap_or(0) == generation {
            views.entries.insert(view.to_string(), built.clone());
        }
        Ok(built)
    }
}

impl<T: Send + Sync> ViewCache for ViewCacheStore<T> {
    fn invalidate(&self, view: &str) {
        let mut views = self.views.write();
        views.entries.remove(view);
        *views.generations.entry(view.to_string()).or_insert(0) += 1;
        tracing::debug!("invalidated view {view}");
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;

    #[tokio::test]
    async fn builds_once_until_invalidated() {
        let cache = ViewCacheStore::<u32>::default();

        let first = cache
            .get_or_build("/dashboard/invoices", || async { Ok::<_, Infallible>(1) })
            .await
            .unwrap();
        let second = cache
            .get_or_build("/dashboard/invoices", || async { Ok::<_, Infallible>(2) })
            .await
            .unwrap();
        assert_eq!((first, second), (1, 1));

        cache.invalidate("/dashboard/invoices");
        assert_eq!(cache.get("/dashboard/invoices"), None);

        let third = cache
            .get_or_build("/dashboard/invoices", || async { Ok::<_, Infallible>(3) })
            .await
            .unwrap();
        assert_eq!(third, 3);
    }

    #[tokio::test]
    async fn build_racing_an_invalidation_is_not_stored() {
        let cache = ViewCacheStore::<u32>::default();

        let served = cache
            .get_or_build("/dashboard/invoices", || async {
                cache.invalidate("/dashboard/invoices");
                Ok::<_, Infallible>(7)
            })
            .await
            .unwrap();

        assert_eq!(served, 7);
        assert_eq!(cache.get("/dashboard/invoices"), None);
    }

    #[tokio::test]
    async fn invalidation_is_per_view() {
        let cache = ViewCacheStore::<u32>::default();
        for (view, value) in [("/a", 1), ("/b", 2)] {
            cache
                .get_or_build(view, || async move { Ok::<_, Infallible>(value) })
                .await
                .unwrap();
        }

        cache.invalidate("/a");

        assert_eq!(cache.get("/a"), None);
        assert_eq!(cache.get("/b"), Some(2));
    }
}
