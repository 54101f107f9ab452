//! Detail view state machines.
//!
//! Both detail views follow the same machine:
//!
//! ```text
//! Loading ──► NotFound                  (terminal)
//! Loading ──► Viewing ⇄ Editing ──► save ──► Viewing
//! ```
//!
//! A save patches the shared store (unconditionally successful — there
//! is no network round-trip) and arms a success banner that stays
//! visible for three seconds; the "Saved" flash is thus represented by
//! [`UserDetailView::success_visible`] returning `true` while the
//! phase has already returned to [`DetailPhase::Viewing`]. The edit
//! buffer is seeded from the matched record on first sight and dies
//! with the view.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

use crate::models::{Order, OrderId, OrderItem, OrderStatus, User, UserId};
use crate::store::{Entity, EntityStore};

/// How long the success banner stays visible after a save, in seconds.
const SUCCESS_FLASH_SECS: i64 = 3;

/// Phase of a detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailPhase {
    /// The backing collection is still loading.
    Loading,
    /// The requested record does not exist. Terminal; the UI offers
    /// navigation back to the list.
    NotFound,
    /// Showing the record with no unsaved edits.
    Viewing,
    /// The edit buffer carries unsaved edits.
    Editing,
}

/// Shared edit-buffer machinery of the detail views.
#[derive(Debug)]
struct DetailCore<T: Entity> {
    /// Shared store of the edited collection.
    store: Arc<EntityStore<T>>,
    /// Identifier of the record under view.
    id: String,
    /// Edit buffer, seeded from the matched record on first sight.
    buffer: Option<T>,
    /// Whether the buffer carries unsaved edits.
    dirty: bool,
    /// Instant until which the success banner is visible.
    success_until: Option<DateTime<Utc>>,
}

impl<T: Entity> DetailCore<T> {
    /// Creates the core for one record of the given store.
    fn new(store: Arc<EntityStore<T>>, id: String) -> Self {
        Self {
            store,
            id,
            buffer: None,
            dirty: false,
            success_until: None,
        }
    }

    /// Seeds the buffer from the store on first sight of the record.
    fn seed(&mut self) {
        if self.buffer.is_none() {
            self.buffer = self.store.find(&self.id);
        }
    }

    /// Derives the current phase. `loading` is supplied by the view,
    /// which knows which stores it depends on.
    fn phase(&mut self, loading: bool) -> DetailPhase {
        if loading {
            return DetailPhase::Loading;
        }
        self.seed();
        match self.buffer {
            None => DetailPhase::NotFound,
            Some(_) if self.dirty => DetailPhase::Editing,
            Some(_) => DetailPhase::Viewing,
        }
    }

    /// Applies an edit to the buffer, marking it dirty.
    ///
    /// Returns `false` (and does nothing) while no record is available.
    fn edit<F: FnOnce(&mut T)>(&mut self, apply: F) -> bool {
        self.seed();
        match self.buffer.as_mut() {
            Some(buffer) => {
                apply(buffer);
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Saves the buffer into the shared store and arms the success
    /// banner. Returns `false` while no record is available.
    fn save(&mut self, now: DateTime<Utc>) -> bool {
        self.seed();
        match self.buffer.as_ref() {
            Some(buffer) => {
                self.store.update(buffer.clone());
                self.dirty = false;
                self.success_until = Some(now + TimeDelta::seconds(SUCCESS_FLASH_SECS));
                true
            }
            None => false,
        }
    }

    /// Discards edits by reseeding the buffer from the store.
    fn cancel(&mut self) {
        self.buffer = self.store.find(&self.id);
        self.dirty = false;
    }

    /// Returns `true` while the success banner should be shown.
    fn success_visible(&self, now: DateTime<Utc>) -> bool {
        self.success_until.is_some_and(|until| now < until)
    }
}

/// Detail controller for one user record.
#[derive(Debug)]
pub struct UserDetailView {
    /// Shared machinery over the users store.
    core: DetailCore<User>,
}

impl UserDetailView {
    /// Creates the controller for the given user id.
    #[inline]
    #[must_use]
    pub fn new(store: Arc<EntityStore<User>>, id: &UserId) -> Self {
        Self {
            core: DetailCore::new(store, id.as_inner().to_owned()),
        }
    }

    /// Derives the current phase of the view.
    #[inline]
    pub fn phase(&mut self) -> DetailPhase {
        let loading = self.core.store.is_loading();
        self.core.phase(loading)
    }

    /// Returns the edit buffer, if a record has been seen.
    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> Option<&User> {
        self.core.buffer.as_ref()
    }

    /// Edits the display name in the buffer.
    #[inline]
    pub fn set_name<T: Into<String>>(&mut self, name: T) -> bool {
        let value = name.into();
        self.core.edit(|user| user.name = value)
    }

    /// Edits the email address in the buffer.
    #[inline]
    pub fn set_email<T: Into<String>>(&mut self, email: T) -> bool {
        let value = email.into();
        self.core.edit(|user| user.email = value)
    }

    /// Flips the activation status in the buffer.
    #[inline]
    pub fn toggle_status(&mut self) -> bool {
        self.core.edit(|user| user.status = user.status.toggled())
    }

    /// Saves the buffer into the shared store and flashes the success
    /// banner until three seconds past `now`.
    #[inline]
    pub fn save(&mut self, now: DateTime<Utc>) -> bool {
        self.core.save(now)
    }

    /// Discards unsaved edits.
    #[inline]
    pub fn cancel(&mut self) {
        self.core.cancel();
    }

    /// Returns `true` while the success banner should be shown.
    #[inline]
    #[must_use]
    pub fn success_visible(&self, now: DateTime<Utc>) -> bool {
        self.core.success_visible(now)
    }
}

/// Detail controller for one order record.
#[derive(Debug)]
pub struct OrderDetailView {
    /// Shared machinery over the orders store.
    core: DetailCore<Order>,
    /// Shared users store, for the related-user card.
    users: Arc<EntityStore<User>>,
}

impl OrderDetailView {
    /// Creates the controller for the given order id.
    #[inline]
    #[must_use]
    pub fn new(
        orders: Arc<EntityStore<Order>>,
        users: Arc<EntityStore<User>>,
        id: &OrderId,
    ) -> Self {
        Self {
            core: DetailCore::new(orders, id.as_inner().to_owned()),
            users,
        }
    }

    /// Derives the current phase of the view.
    ///
    /// The view waits for both the orders and the users collection, as
    /// it renders the related user alongside the order.
    #[inline]
    pub fn phase(&mut self) -> DetailPhase {
        let loading = self.core.store.is_loading() || self.users.is_loading();
        self.core.phase(loading)
    }

    /// Returns the edit buffer, if a record has been seen.
    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> Option<&Order> {
        self.core.buffer.as_ref()
    }

    /// Edits the fulfilment status in the buffer.
    #[inline]
    pub fn set_status(&mut self, status: OrderStatus) -> bool {
        self.core.edit(|order| order.set_status(status))
    }

    /// Replaces the line items in the buffer; the order recomputes its
    /// total internally, so the saved record can never carry a stale
    /// sum.
    #[inline]
    pub fn set_items(&mut self, items: Vec<OrderItem>) -> bool {
        self.core.edit(|order| order.set_items(items))
    }

    /// Resolves the user the order belongs to, if loaded.
    #[inline]
    #[must_use]
    pub fn related_user(&self) -> Option<User> {
        let order = self
            .core
            .buffer
            .clone()
            .or_else(|| self.core.store.find(&self.core.id))?;
        self.users.find(order.user_id().as_inner())
    }

    /// Saves the buffer into the shared store and flashes the success
    /// banner until three seconds past `now`.
    #[inline]
    pub fn save(&mut self, now: DateTime<Utc>) -> bool {
        self.core.save(now)
    }

    /// Discards unsaved edits.
    #[inline]
    pub fn cancel(&mut self) {
        self.core.cancel();
    }

    /// Returns `true` while the success banner should be shown.
    #[inline]
    #[must_use]
    pub fn success_visible(&self, now: DateTime<Utc>) -> bool {
        self.core.success_visible(now)
    }
}
