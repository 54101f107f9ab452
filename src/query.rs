//! Filter and sort engine.
//!
//! Pure functions over loaded collections: filters keep the matching
//! subsequence in original relative order, and the order sort is
//! stable, so records with equal keys keep their relative position.
//! Nothing here mutates its input or touches shared state.

use crate::models::{Commission, CommissionStatus, Order, OrderStatus, User, UserRole, UserStatus};

/// Composable filter for querying users.
///
/// Use builder-style methods to chain criteria. All conditions are
/// combined — a user must satisfy every set criterion to pass; an
/// unset criterion passes everything.
///
/// # Examples
///
/// ```
/// use backoffice_rs::query::UserFilter;
/// use backoffice_rs::models::{UserRole, UserStatus};
///
/// let filter = UserFilter::new()
///     .search("ana")
///     .status(UserStatus::Active)
///     .role(UserRole::Seller);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UserFilter {
    /// Case-insensitive substring matched against name or email.
    pub search: Option<String>,
    /// Exact activation state.
    pub status: Option<UserStatus>,
    /// Exact role.
    pub role: Option<UserRole>,
}

impl UserFilter {
    /// Creates an empty filter that matches all users.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to users whose name or email contains the given
    /// substring (case-insensitive).
    #[inline]
    #[must_use]
    pub fn search<T: Into<String>>(mut self, term: T) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Restricts to users with the given activation state.
    #[inline]
    #[must_use]
    pub const fn status(mut self, status: UserStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to users with the given role.
    #[inline]
    #[must_use]
    pub const fn role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Returns `true` if the user satisfies all set criteria.
    #[inline]
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        self.matches_search(user) && self.matches_status(user) && self.matches_role(user)
    }

    /// Checks the free-text criterion against name and email.
    fn matches_search(&self, user: &User) -> bool {
        self.search.as_ref().is_none_or(|term| {
            let needle = term.to_lowercase();
            user.name.to_lowercase().contains(&needle)
                || user.email.to_lowercase().contains(&needle)
        })
    }

    /// Checks the status criterion.
    fn matches_status(&self, user: &User) -> bool {
        self.status.is_none_or(|status| user.status == status)
    }

    /// Checks the role criterion.
    fn matches_role(&self, user: &User) -> bool {
        self.role.is_none_or(|role| user.role == role)
    }
}

/// Filter for querying orders by fulfilment state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OrderFilter {
    /// Exact fulfilment state.
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    /// Creates an empty filter that matches all orders.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to orders with the given fulfilment state.
    #[inline]
    #[must_use]
    pub const fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns `true` if the order satisfies the set criteria.
    #[inline]
    #[must_use]
    pub fn matches(&self, order: &Order) -> bool {
        self.status.is_none_or(|status| order.status() == status)
    }
}

/// Filter for querying commissions by payout state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CommissionFilter {
    /// Exact payout state.
    pub status: Option<CommissionStatus>,
}

impl CommissionFilter {
    /// Creates an empty filter that matches all commissions.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to commissions with the given payout state.
    #[inline]
    #[must_use]
    pub const fn status(mut self, status: CommissionStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns `true` if the commission satisfies the set criteria.
    #[inline]
    #[must_use]
    pub fn matches(&self, commission: &Commission) -> bool {
        self.status.is_none_or(|status| commission.status == status)
    }
}

/// Returns the users matching the filter, in original relative order.
#[inline]
#[must_use]
pub fn filter_users(users: Vec<User>, filter: &UserFilter) -> Vec<User> {
    users
        .into_iter()
        .filter(|user| filter.matches(user))
        .collect()
}

/// Returns the orders matching the filter, in original relative order.
#[inline]
#[must_use]
pub fn filter_orders(orders: Vec<Order>, filter: &OrderFilter) -> Vec<Order> {
    orders
        .into_iter()
        .filter(|order| filter.matches(order))
        .collect()
}

/// Returns the commissions matching the filter, in original relative
/// order.
#[inline]
#[must_use]
pub fn filter_commissions(
    commissions: Vec<Commission>,
    filter: &CommissionFilter,
) -> Vec<Commission> {
    commissions
        .into_iter()
        .filter(|commission| filter.matches(commission))
        .collect()
}

/// Sortable key of the orders list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSortKey {
    /// Chronological, by creation timestamp.
    Date,
    /// Numeric, by order total.
    Value,
}

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest (oldest) first.
    Ascending,
    /// Largest (newest) first.
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[inline]
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Active sort of the orders list.
///
/// Defaults to newest-first ([`OrderSortKey::Date`] descending).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSort {
    /// Key being sorted on.
    pub key: OrderSortKey,
    /// Current direction.
    pub direction: SortDirection,
}

impl Default for OrderSort {
    #[inline]
    fn default() -> Self {
        Self {
            key: OrderSortKey::Date,
            direction: SortDirection::Descending,
        }
    }
}

impl OrderSort {
    /// Reacts to the user selecting a sort key.
    ///
    /// Selecting the active key flips the direction; selecting a
    /// different key activates it and resets to descending.
    #[inline]
    pub fn toggle(&mut self, key: OrderSortKey) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = SortDirection::Descending;
        }
    }
}

/// Sorts orders by the given key and direction.
///
/// The sort is stable: orders with equal keys keep their original
/// relative order. Totals are compared with [`f64::total_cmp`].
#[must_use]
pub fn sort_orders(mut orders: Vec<Order>, sort: OrderSort) -> Vec<Order> {
    orders.sort_by(|a, b| {
        let ordering = match sort.key {
            OrderSortKey::Date => a.created_at().cmp(&b.created_at()),
            OrderSortKey::Value => a.total().total_cmp(&b.total()),
        };
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    orders
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderId, OrderItem, OrderItemId, UserId};
    use chrono::{DateTime, Utc};

    /// Creates a test user.
    fn test_user(id: &str, name: &str, email: &str, role: UserRole, status: UserStatus) -> User {
        User {
            id: UserId::new(id.to_owned()),
            name: name.to_owned(),
            email: email.to_owned(),
            role,
            country: "Brazil".to_owned(),
            status,
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    /// Creates an order with a single line summing to `total`.
    fn test_order(id: &str, total: f64, created_at: &str) -> Order {
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
            DateTime::parse_from_rfc3339(created_at)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    /// Creates a test commission.
    fn test_commission(id: &str, amount: f64, status: CommissionStatus) -> Commission {
        Commission {
            id: crate::models::CommissionId::new(id.to_owned()),
            user_id: UserId::new("u-1".to_owned()),
            order_id: OrderId::new("o-1".to_owned()),
            amount,
            status,
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    /// Collects record ids for order assertions.
    fn order_ids(orders: &[Order]) -> Vec<&str> {
        orders.iter().map(|order| order.id().as_inner()).collect()
    }

    #[test]
    fn empty_filter_matches_all() {
        let users = vec![
            test_user(
                "u-1",
                "Ana Silva",
                "ana@example.com",
                UserRole::Seller,
                UserStatus::Active,
            ),
            test_user(
                "u-2",
                "Bruno Costa",
                "bruno@example.com",
                UserRole::Admin,
                UserStatus::Inactive,
            ),
        ];
        let filtered = filter_users(users.clone(), &UserFilter::new());
        assert_eq!(filtered, users);
    }

    #[test]
    fn search_matches_name_or_email_case_insensitive() {
        let users = vec![
            test_user(
                "u-1",
                "Ana Silva",
                "silva@example.com",
                UserRole::Seller,
                UserStatus::Active,
            ),
            test_user(
                "u-2",
                "Bruno Costa",
                "contato@anaempresa.com",
                UserRole::Customer,
                UserStatus::Active,
            ),
            test_user(
                "u-3",
                "Carla Souza",
                "carla@example.com",
                UserRole::Customer,
                UserStatus::Active,
            ),
        ];
        let filter = UserFilter::new().search("ana");
        let filtered = filter_users(users, &filter);
        // Matches "Ana Silva" by name and "contato@anaempresa.com" by email.
        let ids: Vec<&str> = filtered.iter().map(|user| user.id.as_inner()).collect();
        assert_eq!(ids, vec!["u-1", "u-2"]);
    }

    #[test]
    fn status_and_role_filters_combine() {
        let users = vec![
            test_user(
                "u-1",
                "Ana",
                "ana@example.com",
                UserRole::Seller,
                UserStatus::Active,
            ),
            test_user(
                "u-2",
                "Bruno",
                "bruno@example.com",
                UserRole::Seller,
                UserStatus::Inactive,
            ),
            test_user(
                "u-3",
                "Carla",
                "carla@example.com",
                UserRole::Admin,
                UserStatus::Active,
            ),
        ];
        let filter = UserFilter::new()
            .status(UserStatus::Active)
            .role(UserRole::Seller);
        let filtered = filter_users(users, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.first().unwrap().id.as_inner(), "u-1");
    }

    #[test]
    fn filter_preserves_subsequence_order() {
        let users: Vec<User> = (0_u32..6_u32)
            .map(|n| {
                let status = if n % 2 == 0 {
                    UserStatus::Active
                } else {
                    UserStatus::Inactive
                };
                test_user(
                    &format!("u-{n}"),
                    &format!("User {n}"),
                    &format!("user{n}@example.com"),
                    UserRole::Customer,
                    status,
                )
            })
            .collect();
        let filter = UserFilter::new().status(UserStatus::Active);
        let filtered = filter_users(users, &filter);
        let ids: Vec<&str> = filtered.iter().map(|user| user.id.as_inner()).collect();
        assert_eq!(ids, vec!["u-0", "u-2", "u-4"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(filter_users(Vec::new(), &UserFilter::new()).is_empty());
        assert!(filter_orders(Vec::new(), &OrderFilter::new()).is_empty());
        assert!(filter_commissions(Vec::new(), &CommissionFilter::new()).is_empty());
    }

    #[test]
    fn order_status_filter() {
        let orders = vec![
            test_order("o-1", 100.0, "2024-01-01T00:00:00Z"),
            {
                let mut completed = test_order("o-2", 50.0, "2024-02-01T00:00:00Z");
                completed.set_status(OrderStatus::Completed);
                completed
            },
        ];
        let filter = OrderFilter::new().status(OrderStatus::Completed);
        let filtered = filter_orders(orders, &filter);
        assert_eq!(order_ids(&filtered), vec!["o-2"]);
    }

    #[test]
    fn commission_status_filter() {
        let commissions = vec![
            test_commission("c-1", 30.0, CommissionStatus::Pending),
            test_commission("c-2", 70.0, CommissionStatus::Paid),
        ];
        let filter = CommissionFilter::new().status(CommissionStatus::Paid);
        let filtered = filter_commissions(commissions, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.first().unwrap().id.as_inner(), "c-2");
    }

    #[test]
    fn sort_by_value_descending_then_toggle() {
        let orders = vec![
            test_order("o-1", 100.0, "2024-01-01T00:00:00Z"),
            test_order("o-2", 50.0, "2024-02-01T00:00:00Z"),
        ];
        let mut sort = OrderSort::default();
        sort.toggle(OrderSortKey::Value);
        assert_eq!(sort.key, OrderSortKey::Value);
        assert_eq!(sort.direction, SortDirection::Descending);
        let sorted = sort_orders(orders.clone(), sort);
        assert_eq!(order_ids(&sorted), vec!["o-1", "o-2"]);

        // Selecting the same key again flips to ascending.
        sort.toggle(OrderSortKey::Value);
        assert_eq!(sort.direction, SortDirection::Ascending);
        let sorted = sort_orders(orders, sort);
        assert_eq!(order_ids(&sorted), vec!["o-2", "o-1"]);
    }

    #[test]
    fn toggle_different_key_resets_to_descending() {
        let mut sort = OrderSort::default();
        sort.toggle(OrderSortKey::Date);
        assert_eq!(sort.direction, SortDirection::Ascending);
        sort.toggle(OrderSortKey::Value);
        assert_eq!(sort.key, OrderSortKey::Value);
        assert_eq!(sort.direction, SortDirection::Descending);
    }

    #[test]
    fn sort_by_date() {
        let orders = vec![
            test_order("o-1", 10.0, "2024-03-01T00:00:00Z"),
            test_order("o-2", 20.0, "2024-01-01T00:00:00Z"),
            test_order("o-3", 30.0, "2024-02-01T00:00:00Z"),
        ];
        let sorted = sort_orders(orders.clone(), OrderSort::default());
        assert_eq!(order_ids(&sorted), vec!["o-1", "o-3", "o-2"]);

        let ascending = OrderSort {
            key: OrderSortKey::Date,
            direction: SortDirection::Ascending,
        };
        let sorted = sort_orders(orders, ascending);
        assert_eq!(order_ids(&sorted), vec!["o-2", "o-3", "o-1"]);
    }

    #[test]
    fn sort_is_stable_on_equal_totals() {
        let orders = vec![
            test_order("o-1", 100.0, "2024-01-01T00:00:00Z"),
            test_order("o-2", 100.0, "2024-02-01T00:00:00Z"),
            test_order("o-3", 100.0, "2024-03-01T00:00:00Z"),
        ];
        let by_value = OrderSort {
            key: OrderSortKey::Value,
            direction: SortDirection::Descending,
        };
        let sorted = sort_orders(orders, by_value);
        // All totals tie, so original relative order is preserved.
        assert_eq!(order_ids(&sorted), vec!["o-1", "o-2", "o-3"]);
    }

    #[test]
    fn sort_is_stable_on_equal_dates() {
        let orders = vec![
            test_order("o-1", 10.0, "2024-01-01T00:00:00Z"),
            test_order("o-2", 20.0, "2024-01-01T00:00:00Z"),
        ];
        let sorted = sort_orders(orders, OrderSort::default());
        assert_eq!(order_ids(&sorted), vec!["o-1", "o-2"]);
    }
}
