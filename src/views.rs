//! View controllers.
//!
//! Each controller binds one or more shared [`crate::store::EntityStore`]s
//! to per-view transient state (filter selections, sort, edit buffers,
//! success banners). The heavy lifting — filtering, sorting,
//! aggregation — is delegated to the pure engines in [`crate::query`]
//! and [`crate::stats`], so it stays testable without any controller.

mod commissions;
mod dashboard;
mod detail;
mod orders;
mod users;

pub use commissions::CommissionsView;
pub use dashboard::DashboardView;
pub use detail::{DetailPhase, OrderDetailView, UserDetailView};
pub use orders::OrdersListView;
pub use users::UsersListView;

use crate::models::{User, UserId};

/// Fallback label when a weak user reference cannot be resolved.
pub const UNKNOWN_USER: &str = "unknown user";

/// Resolves a user name from a snapshot, falling back to
/// [`UNKNOWN_USER`] when the reference dangles or users are not loaded.
fn user_name(users: Option<&[User]>, id: &UserId) -> String {
    users
        .and_then(|users| users.iter().find(|user| user.id == *id))
        .map_or_else(|| UNKNOWN_USER.to_owned(), |user| user.name.clone())
}
