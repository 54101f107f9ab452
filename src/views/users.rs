//! Users list controller.

use std::sync::Arc;

use crate::models::{User, UserId};
use crate::query::{UserFilter, filter_users};
use crate::store::EntityStore;

/// Controller of the users list.
///
/// Owns the transient filter selections; the store is shared.
#[derive(Debug)]
pub struct UsersListView {
    /// Shared users store.
    store: Arc<EntityStore<User>>,
    /// Active filter selections (all unset initially).
    filter: UserFilter,
}

impl UsersListView {
    /// Creates the controller over the shared users store.
    #[inline]
    #[must_use]
    pub fn new(store: Arc<EntityStore<User>>) -> Self {
        Self {
            store,
            filter: UserFilter::new(),
        }
    }

    /// Returns the active filter selections.
    #[inline]
    #[must_use]
    pub const fn filter(&self) -> &UserFilter {
        &self.filter
    }

    /// Replaces the active filter selections.
    #[inline]
    pub fn set_filter(&mut self, filter: UserFilter) {
        self.filter = filter;
    }

    /// Returns `true` while the collection is loading.
    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    /// Returns the user-facing message of a failed load, if any.
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.store.error()
    }

    /// Returns `true` once data has loaded but the collection is empty.
    ///
    /// Distinct from an empty [`Self::visible`] result, which can also
    /// mean that the active filters matched nothing.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.snapshot().is_some_and(|users| users.is_empty())
    }

    /// Returns the users matching the active filters, in fixture order.
    #[inline]
    #[must_use]
    pub fn visible(&self) -> Vec<User> {
        filter_users(self.store.snapshot().unwrap_or_default(), &self.filter)
    }

    /// Flips the status of the given user in the shared store.
    ///
    /// Returns `false` (and changes nothing) when the id is unknown.
    /// All other fields of the record are left untouched.
    pub fn toggle_status(&self, id: &UserId) -> bool {
        match self.store.find(id.as_inner()) {
            Some(user) => {
                self.store.update(user.with_toggled_status());
                true
            }
            None => false,
        }
    }
}
