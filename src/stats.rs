//! Aggregation engine.
//!
//! Pure reductions over loaded (or still absent) collections. Absent
//! input is treated as empty — a failed fetch must never break the
//! dashboard, it just contributes zeros. Results are recomputed on
//! every call; there is no caching.

use crate::models::{Commission, CommissionStatus, Order, User, UserStatus};

/// Summary figures shown on the dashboard overview.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DashboardStats {
    /// Number of users in the collection.
    pub total_users: usize,
    /// Number of users with an active status.
    pub active_users: usize,
    /// Number of orders in the collection.
    pub total_orders: usize,
    /// Sum of all order totals.
    pub total_orders_value: f64,
    /// Sum of all commission amounts.
    pub total_commissions: f64,
}

impl DashboardStats {
    /// Computes the dashboard figures from the three collections.
    ///
    /// `None` inputs (collection not loaded, or load failed) count as
    /// empty.
    #[must_use]
    pub fn from_collections(
        users: Option<&[User]>,
        orders: Option<&[Order]>,
        commissions: Option<&[Commission]>,
    ) -> Self {
        let users = users.unwrap_or_default();
        let orders = orders.unwrap_or_default();
        let commissions = commissions.unwrap_or_default();

        Self {
            total_users: users.len(),
            active_users: users
                .iter()
                .filter(|user| user.status == UserStatus::Active)
                .count(),
            total_orders: orders.len(),
            total_orders_value: orders.iter().map(Order::total).sum(),
            total_commissions: commissions.iter().map(|commission| commission.amount).sum(),
        }
    }
}

/// Totals shown above the commissions list.
///
/// Computed over the currently *filtered* subset, not the whole
/// collection, and recomputed on every filter change.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CommissionSummary {
    /// Sum of amounts still awaiting payout.
    pub total_pending: f64,
    /// Sum of amounts already paid out.
    pub total_paid: f64,
    /// Sum of all amounts in the subset.
    pub total_all: f64,
}

impl CommissionSummary {
    /// Computes the summary over the given commissions.
    #[must_use]
    pub fn from_commissions(commissions: &[Commission]) -> Self {
        let mut summary = Self::default();
        for commission in commissions {
            summary.total_all += commission.amount;
            match commission.status {
                CommissionStatus::Pending => summary.total_pending += commission.amount,
                CommissionStatus::Paid => summary.total_paid += commission.amount,
            }
        }
        summary
    }
}
