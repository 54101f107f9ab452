//! In-memory per-entity data stores.
//!
//! One [`EntityStore`] holds one fixture collection together with its
//! load lifecycle (loading flag, user-facing error message). All state
//! sits behind a single mutex for thread-safe interior mutability.
//!
//! Loads are epoch-stamped: [`EntityStore::begin_load`] hands out a
//! token and [`EntityStore::finish_load`] applies the outcome only if
//! no newer load (or [`EntityStore::invalidate`] on view teardown) has
//! started in between. A fetch that resolves after teardown is simply
//! discarded.

use std::sync::{Mutex, PoisonError};

use crate::models::{Commission, Order, User};

/// Collection element with a stable string identifier.
pub trait Entity: Clone {
    /// Returns the identifier used to match records on update.
    fn entity_id(&self) -> &str;
}

impl Entity for User {
    #[inline]
    fn entity_id(&self) -> &str {
        self.id.as_inner()
    }
}

impl Entity for Order {
    #[inline]
    fn entity_id(&self) -> &str {
        self.id().as_inner()
    }
}

impl Entity for Commission {
    #[inline]
    fn entity_id(&self) -> &str {
        self.id.as_inner()
    }
}

/// Token tying a load outcome to the load that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken {
    /// Epoch at the time the load started.
    epoch: u64,
}

/// In-memory holder of one entity collection.
#[derive(Debug, Default)]
pub struct EntityStore<T> {
    /// All state behind a single mutex.
    inner: Mutex<Inner<T>>,
}

/// Inner mutable state.
#[derive(Debug)]
struct Inner<T> {
    /// Loaded collection; `None` until the first successful load.
    data: Option<Vec<T>>,
    /// User-facing message of the last failed load.
    error: Option<String>,
    /// Whether a load is currently in flight.
    loading: bool,
    /// Bumped on every `begin_load`/`invalidate`; stale outcomes are
    /// dropped by comparing against it.
    epoch: u64,
}

impl<T> Default for Inner<T> {
    #[inline]
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            loading: false,
            epoch: 0_u64,
        }
    }
}

impl<T: Entity> EntityStore<T> {
    /// Creates a new empty store.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Acquires the inner lock and applies a closure.
    fn with_lock<R, F: FnOnce(&mut Inner<T>) -> R>(&self, f: F) -> R {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut inner)
    }

    /// Returns a copy of the current collection, or `None` if no load
    /// has succeeded yet.
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Option<Vec<T>> {
        self.with_lock(|inner| inner.data.clone())
    }

    /// Returns `true` while a load is in flight.
    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.with_lock(|inner| inner.loading)
    }

    /// Returns the user-facing message of the last failed load.
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.with_lock(|inner| inner.error.clone())
    }

    /// Looks up one record by identifier.
    #[inline]
    #[must_use]
    pub fn find(&self, id: &str) -> Option<T> {
        self.with_lock(|inner| {
            inner
                .data
                .as_ref()
                .and_then(|data| data.iter().find(|record| record.entity_id() == id).cloned())
        })
    }

    /// Starts a load: flags the store as loading, clears any previous
    /// error and returns the token to pass to [`Self::finish_load`].
    #[inline]
    pub fn begin_load(&self) -> LoadToken {
        self.with_lock(|inner| {
            inner.loading = true;
            inner.error = None;
            inner.epoch += 1;
            LoadToken { epoch: inner.epoch }
        })
    }

    /// Applies a load outcome.
    ///
    /// Returns `true` if the outcome was applied, `false` if it was
    /// discarded because a newer load or an [`Self::invalidate`] call
    /// superseded it. On failure the collection is left as it was and
    /// only the error message is recorded.
    pub fn finish_load(
        &self,
        token: LoadToken,
        outcome: Result<Vec<T>, String>,
    ) -> bool {
        self.with_lock(|inner| {
            if token.epoch != inner.epoch {
                return false;
            }
            inner.loading = false;
            match outcome {
                Ok(data) => {
                    inner.data = Some(data);
                    inner.error = None;
                }
                Err(message) => inner.error = Some(message),
            }
            true
        })
    }

    /// Invalidates any in-flight load (view teardown): its outcome will
    /// be discarded when it eventually resolves.
    #[inline]
    pub fn invalidate(&self) {
        self.with_lock(|inner| {
            inner.epoch += 1;
            inner.loading = false;
        });
    }

    /// Replaces the record whose id matches `record`, if present.
    ///
    /// A record with an unknown id, or an update before any data is
    /// loaded, is a silent no-op. This is a local patch only; nothing
    /// is written back anywhere.
    pub fn update(&self, record: T) {
        self.with_lock(|inner| {
            if let Some(data) = inner.data.as_mut()
                && let Some(slot) = data
                    .iter_mut()
                    .find(|existing| existing.entity_id() == record.entity_id())
            {
                *slot = record;
            }
        });
    }
}
