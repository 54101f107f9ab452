//! Data models for the back-office entities.
//!
//! This module contains strongly-typed representations of the three
//! fixture collections, newtype ID wrappers, and enumeration types for
//! constrained values. The wire format is camelCase JSON.

mod commission;
mod enums;
mod ids;
mod order;
mod user;

pub use commission::Commission;
pub use enums::{CommissionStatus, OrderStatus, UserRole, UserStatus};
pub use ids::{CommissionId, OrderId, OrderItemId, UserId};
pub use order::{Order, OrderItem};
pub use user::User;
