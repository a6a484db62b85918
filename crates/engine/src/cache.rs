//! Side effects a successful mutation asks of its caller.
//!
//! Invalidation goes through an injected [`ViewCache`]; navigation is not a
//! call at all but a [`NavigationIntent`] value the routing layer acts on.

use serde::Serialize;

/// Cached representations of views, keyed by view path.
pub trait ViewCache: Send + Sync {
    /// Mark the cached representation of `view` stale so the next read rebuilds it.
    fn invalidate(&self, view: &str);
}

/// Terminal instruction to move the caller to another view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavigationIntent {
    pub to: String,
}

impl NavigationIntent {
    pub fn to(path: impl Into<String>) -> Self {
        Self { to: path.into() }
    }
}
