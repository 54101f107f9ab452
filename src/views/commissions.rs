//! Commissions list controller.

use std::sync::Arc;

use crate::models::{Commission, OrderId, User, UserId};
use crate::query::{CommissionFilter, filter_commissions};
use crate::stats::CommissionSummary;
use crate::store::EntityStore;

/// Controller of the commissions list and its summary cards.
#[derive(Debug)]
pub struct CommissionsView {
    /// Shared commissions store.
    commissions: Arc<EntityStore<Commission>>,
    /// Shared users store, for name lookups.
    users: Arc<EntityStore<User>>,
    /// Active status filter.
    filter: CommissionFilter,
}

impl CommissionsView {
    /// Creates the controller over the shared stores.
    #[inline]
    #[must_use]
    pub fn new(commissions: Arc<EntityStore<Commission>>, users: Arc<EntityStore<User>>) -> Self {
        Self {
            commissions,
            users,
            filter: CommissionFilter::new(),
        }
    }

    /// Returns the active status filter.
    #[inline]
    #[must_use]
    pub const fn filter(&self) -> CommissionFilter {
        self.filter
    }

    /// Replaces the active status filter.
    #[inline]
    pub fn set_filter(&mut self, filter: CommissionFilter) {
        self.filter = filter;
    }

    /// Returns `true` while either collection is loading.
    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.commissions.is_loading() || self.users.is_loading()
    }

    /// Returns the user-facing message of a failed commissions load.
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.commissions.error()
    }

    /// Returns `true` once data has loaded but the collection is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commissions
            .snapshot()
            .is_some_and(|commissions| commissions.is_empty())
    }

    /// Returns the commissions matching the active filter, in fixture
    /// order.
    #[inline]
    #[must_use]
    pub fn visible(&self) -> Vec<Commission> {
        filter_commissions(
            self.commissions.snapshot().unwrap_or_default(),
            &self.filter,
        )
    }

    /// Computes the summary totals over the currently filtered subset.
    ///
    /// Recomputed on every call, so a filter change is reflected
    /// immediately.
    #[inline]
    #[must_use]
    pub fn summary(&self) -> CommissionSummary {
        CommissionSummary::from_commissions(&self.visible())
    }

    /// Resolves the display name of the earning seller.
    #[inline]
    #[must_use]
    pub fn user_name(&self, id: &UserId) -> String {
        super::user_name(self.users.snapshot().as_deref(), id)
    }

    /// Returns the order reference of a commission for display.
    ///
    /// The raw identifier is shown as-is; there is deliberately no
    /// lookup against the orders collection.
    #[inline]
    #[must_use]
    pub const fn order_reference<'rec>(&self, commission: &'rec Commission) -> &'rec OrderId {
        &commission.order_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CommissionId, CommissionStatus, UserRole, UserStatus};
    use chrono::DateTime;

    /// Creates a test commission.
    fn test_commission(id: &str, amount: f64, status: CommissionStatus) -> Commission {
        Commission {
            id: CommissionId::new(id.to_owned()),
            user_id: UserId::new("u-1".to_owned()),
            order_id: OrderId::new("o-1".to_owned()),
            amount,
            status,
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    /// Creates a test user.
    fn test_user(id: &str, name: &str) -> User {
        User {
            id: UserId::new(id.to_owned()),
            name: name.to_owned(),
            email: format!("{id}@example.com"),
            role: UserRole::Seller,
            country: "Brazil".to_owned(),
            status: UserStatus::Active,
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    /// Creates a view over pre-loaded commissions and users.
    fn loaded_view(commissions: Vec<Commission>, users: Vec<User>) -> CommissionsView {
        let commissions_store = Arc::new(EntityStore::new());
        let commissions_token = commissions_store.begin_load();
        assert!(commissions_store.finish_load(commissions_token, Ok(commissions)));
        let users_store = Arc::new(EntityStore::new());
        let users_token = users_store.begin_load();
        assert!(users_store.finish_load(users_token, Ok(users)));
        CommissionsView::new(commissions_store, users_store)
    }

    #[test]
    fn summary_over_unfiltered_subset() {
        let view = loaded_view(
            vec![
                test_commission("c-1", 30.0, CommissionStatus::Pending),
                test_commission("c-2", 70.0, CommissionStatus::Paid),
            ],
            Vec::new(),
        );
        let summary = view.summary();
        assert!((summary.total_pending - 30.0).abs() < f64::EPSILON);
        assert!((summary.total_paid - 70.0).abs() < f64::EPSILON);
        assert!((summary.total_all - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_follows_the_filter() {
        let mut view = loaded_view(
            vec![
                test_commission("c-1", 30.0, CommissionStatus::Pending),
                test_commission("c-2", 70.0, CommissionStatus::Paid),
            ],
            Vec::new(),
        );
        view.set_filter(CommissionFilter::new().status(CommissionStatus::Paid));
        assert_eq!(view.visible().len(), 1);
        let summary = view.summary();
        assert!(summary.total_pending.abs() < f64::EPSILON);
        assert!((summary.total_paid - 70.0).abs() < f64::EPSILON);
        assert!((summary.total_all - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn order_reference_is_the_raw_identifier() {
        let view = loaded_view(
            vec![test_commission("c-1", 10.0, CommissionStatus::Pending)],
            Vec::new(),
        );
        let visible = view.visible();
        let commission = visible.first().unwrap();
        assert_eq!(view.order_reference(commission).as_inner(), "o-1");
    }

    #[test]
    fn user_name_lookup() {
        let view = loaded_view(
            vec![test_commission("c-1", 10.0, CommissionStatus::Pending)],
            vec![test_user("u-1", "Ana Silva")],
        );
        assert_eq!(view.user_name(&UserId::new("u-1".to_owned())), "Ana Silva");
    }

    #[test]
    fn empty_collection_is_reported() {
        let view = loaded_view(Vec::new(), Vec::new());
        assert!(view.is_empty());
        assert_eq!(view.summary(), CommissionSummary::default());
    }
}
