//! Orders list controller.

use std::sync::Arc;

use crate::models::{Order, User, UserId};
use crate::query::{OrderFilter, OrderSort, OrderSortKey, filter_orders, sort_orders};
use crate::store::EntityStore;

/// Controller of the orders list.
///
/// Owns the transient filter and sort selections; the stores are
/// shared. The users store is only consulted to resolve the ordering
/// user's display name.
#[derive(Debug)]
pub struct OrdersListView {
    /// Shared orders store.
    orders: Arc<EntityStore<Order>>,
    /// Shared users store, for name lookups.
    users: Arc<EntityStore<User>>,
    /// Active status filter.
    filter: OrderFilter,
    /// Active sort (defaults to newest-first).
    sort: OrderSort,
}

impl OrdersListView {
    /// Creates the controller over the shared stores.
    #[inline]
    #[must_use]
    pub fn new(orders: Arc<EntityStore<Order>>, users: Arc<EntityStore<User>>) -> Self {
        Self {
            orders,
            users,
            filter: OrderFilter::new(),
            sort: OrderSort::default(),
        }
    }

    /// Returns the active status filter.
    #[inline]
    #[must_use]
    pub const fn filter(&self) -> OrderFilter {
        self.filter
    }

    /// Replaces the active status filter.
    #[inline]
    pub fn set_filter(&mut self, filter: OrderFilter) {
        self.filter = filter;
    }

    /// Returns the active sort.
    #[inline]
    #[must_use]
    pub const fn sort(&self) -> OrderSort {
        self.sort
    }

    /// Replaces the active sort.
    #[inline]
    pub fn set_sort(&mut self, sort: OrderSort) {
        self.sort = sort;
    }

    /// Returns `true` while either collection is loading.
    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.orders.is_loading() || self.users.is_loading()
    }

    /// Returns the user-facing message of a failed orders load, if any.
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.orders.error()
    }

    /// Returns `true` once data has loaded but the collection is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders
            .snapshot()
            .is_some_and(|orders| orders.is_empty())
    }

    /// Returns the orders matching the active filter, sorted by the
    /// active key and direction.
    #[inline]
    #[must_use]
    pub fn visible(&self) -> Vec<Order> {
        let filtered = filter_orders(self.orders.snapshot().unwrap_or_default(), &self.filter);
        sort_orders(filtered, self.sort)
    }

    /// Reacts to the user selecting a sort key (see
    /// [`OrderSort::toggle`]).
    #[inline]
    pub fn toggle_sort(&mut self, key: OrderSortKey) {
        self.sort.toggle(key);
    }

    /// Resolves the display name of the ordering user.
    #[inline]
    #[must_use]
    pub fn user_name(&self, id: &UserId) -> String {
        super::user_name(self.users.snapshot().as_deref(), id)
    }
}
