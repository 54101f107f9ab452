//! Dashboard overview controller.

use std::sync::Arc;

use crate::models::{Commission, Order, User};
use crate::stats::DashboardStats;
use crate::store::EntityStore;

/// Controller of the dashboard overview.
///
/// Holds no transient state of its own; it derives the summary figures
/// from the three shared stores on every call.
#[derive(Debug)]
pub struct DashboardView {
    /// Shared users store.
    users: Arc<EntityStore<User>>,
    /// Shared orders store.
    orders: Arc<EntityStore<Order>>,
    /// Shared commissions store.
    commissions: Arc<EntityStore<Commission>>,
}

impl DashboardView {
    /// Creates the controller over the three shared stores.
    #[inline]
    #[must_use]
    pub const fn new(
        users: Arc<EntityStore<User>>,
        orders: Arc<EntityStore<Order>>,
        commissions: Arc<EntityStore<Commission>>,
    ) -> Self {
        Self {
            users,
            orders,
            commissions,
        }
    }

    /// Returns `true` while any of the three collections is loading.
    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.users.is_loading() || self.orders.is_loading() || self.commissions.is_loading()
    }

    /// Computes the current dashboard figures.
    ///
    /// Collections that failed to load (or have not loaded yet)
    /// contribute zeros.
    #[inline]
    #[must_use]
    pub fn stats(&self) -> DashboardStats {
        DashboardStats::from_collections(
            self.users.snapshot().as_deref(),
            self.orders.snapshot().as_deref(),
            self.commissions.snapshot().as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CommissionId, CommissionStatus, OrderId, OrderItem, OrderItemId, OrderStatus, UserId, UserRole, UserStatus};
    use chrono::DateTime;

    /// Creates a test user.
    fn test_user(id: &str, status: UserStatus) -> User {
        User {
            id: UserId::new(id.to_owned()),
            name: format!("User {id}"),
            email: format!("{id}@example.com"),
            role: UserRole::Customer,
            country: "Brazil".to_owned(),
            status,
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    /// Creates an order worth `total`.
    fn test_order(id: &str, total: f64) -> Order {
        Order::new(
            OrderId::new(id.to_owned()),
            UserId::new("u-1".to_owned()),
            OrderStatus::Pending,
            vec![OrderItem {
                id: OrderItemId::new(format!("{id}-i1")),
                product_name: "Widget".to_owned(),
                quantity: 1,
                unit_price: total,
            }],
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        )
    }

    /// Creates a test commission.
    fn test_commission(id: &str, amount: f64) -> Commission {
        Commission {
            id: CommissionId::new(id.to_owned()),
            user_id: UserId::new("u-1".to_owned()),
            order_id: OrderId::new("o-1".to_owned()),
            amount,
            status: CommissionStatus::Pending,
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    /// Creates a view with all three stores empty.
    fn view() -> DashboardView {
        DashboardView::new(
            Arc::new(EntityStore::new()),
            Arc::new(EntityStore::new()),
            Arc::new(EntityStore::new()),
        )
    }

    #[test]
    fn stats_before_any_load_are_zero() {
        let view = view();
        assert_eq!(view.stats(), DashboardStats::default());
        assert!(!view.is_loading());
    }

    #[test]
    fn loading_while_any_store_loads() {
        let view = view();
        let token = view.orders.begin_load();
        assert!(view.is_loading());
        assert!(view.orders.finish_load(token, Ok(Vec::new())));
        assert!(!view.is_loading());
    }

    #[test]
    fn stats_aggregate_loaded_collections() {
        let view = view();
        let users_token = view.users.begin_load();
        assert!(view.users.finish_load(
            users_token,
            Ok(vec![
                test_user("u-1", UserStatus::Active),
                test_user("u-2", UserStatus::Inactive),
            ])
        ));
        let orders_token = view.orders.begin_load();
        assert!(view.orders.finish_load(
            orders_token,
            Ok(vec![test_order("o-1", 100.0), test_order("o-2", 20.0)])
        ));
        let commissions_token = view.commissions.begin_load();
        assert!(view
            .commissions
            .finish_load(commissions_token, Ok(vec![test_commission("c-1", 12.5)])));

        let stats = view.stats();
        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.active_users, 1);
        assert_eq!(stats.total_orders, 2);
        assert!((stats.total_orders_value - 120.0).abs() < f64::EPSILON);
        assert!((stats.total_commissions - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn failed_collection_counts_as_empty() {
        let view = view();
        let users_token = view.users.begin_load();
        assert!(view
            .users
            .finish_load(users_token, Ok(vec![test_user("u-1", UserStatus::Active)])));
        let orders_token = view.orders.begin_load();
        assert!(view
            .orders
            .finish_load(orders_token, Err("failed to load orders".to_owned())));

        let stats = view.stats();
        assert_eq!(stats.total_users, 1);
        assert_eq!(stats.total_orders, 0);
        assert!(stats.total_orders_value.abs() < f64::EPSILON);
    }
}
