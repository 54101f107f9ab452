//! High-level facade combining the fixture client with the stores.
//!
//! A [`Backoffice`] owns one [`crate::client::FixtureClient`] plus the
//! three shared entity stores and wires the load lifecycle together:
//! fetch errors are absorbed here, converted to a user-facing message
//! on the affected store, and logged — they never propagate to the
//! caller. View controllers are handed `Arc` clones of the stores.

/// Message stored when the users fixture fails to load.
const USERS_LOAD_ERROR: &str = "failed to load users";

/// Message stored when the orders fixture fails to load.
const ORDERS_LOAD_ERROR: &str = "failed to load orders";

/// Message stored when the commissions fixture fails to load.
const COMMISSIONS_LOAD_ERROR: &str = "failed to load commissions";

/// Generates a high-level facade (async or blocking).
macro_rules! define_backoffice {
    (
        facade_name: $facade:ident,
        builder_name: $builder:ident,
        http_client: $http_client:ty,
        facade_doc: $facade_doc:expr,
        builder_doc: $builder_doc:expr,
        $(async_kw: $async_kw:tt,)?
        $(await_kw: $await_ext:tt,)?
    ) => {
        #[doc = $builder_doc]
        #[derive(Debug)]
        pub struct $builder {
            /// Base URL override.
            base_url: Option<String>,
            /// Simulated latency override.
            latency: Option<Duration>,
        }

        impl $builder {
            /// Overrides the fixture base URL.
            #[inline]
            #[must_use]
            pub fn base_url<T: Into<String>>(mut self, url: T) -> Self {
                self.base_url = Some(url.into());
                self
            }

            /// Overrides the simulated network latency.
            #[inline]
            #[must_use]
            pub const fn latency(mut self, latency: Duration) -> Self {
                self.latency = Some(latency);
                self
            }

            /// Builds the facade with fresh, empty stores.
            ///
            /// # Errors
            ///
            /// Returns [`crate::error::BackofficeError::Http`] if the
            /// HTTP client fails to build.
            #[inline]
            pub fn build(self) -> Result<$facade> {
                let mut http_builder = <$http_client>::builder();
                if let Some(url) = self.base_url {
                    http_builder = http_builder.base_url(url);
                }
                if let Some(latency) = self.latency {
                    http_builder = http_builder.latency(latency);
                }
                let client = http_builder.build()?;

                Ok($facade {
                    client,
                    users: Arc::new(EntityStore::new()),
                    orders: Arc::new(EntityStore::new()),
                    commissions: Arc::new(EntityStore::new()),
                })
            }
        }

        #[doc = $facade_doc]
        #[derive(Debug)]
        pub struct $facade {
            /// Low-level fixture client.
            client: $http_client,
            /// Shared users store.
            users: Arc<EntityStore<User>>,
            /// Shared orders store.
            orders: Arc<EntityStore<Order>>,
            /// Shared commissions store.
            commissions: Arc<EntityStore<Commission>>,
        }

        impl $facade {
            /// Creates a new builder for configuring the facade.
            #[inline]
            #[must_use]
            pub const fn builder() -> $builder {
                $builder {
                    base_url: None,
                    latency: None,
                }
            }

            /// Loads the users fixture into the users store.
            ///
            /// A fetch failure is absorbed into the store's error state.
            /// Returns `true` if the outcome was applied, `false` if a
            /// newer load superseded it.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn load_users(&self) -> bool {
                let token = self.users.begin_load();
                let outcome = match self.client.users() $( .$await_ext )? {
                    Ok(data) => Ok(data),
                    Err(err) => {
                        tracing::warn!(error = %err, "users fixture fetch failed");
                        Err(USERS_LOAD_ERROR.to_owned())
                    }
                };
                let applied = self.users.finish_load(token, outcome);
                if !applied {
                    tracing::debug!("discarded stale users load");
                }
                applied
            }

            /// Loads the orders fixture into the orders store.
            ///
            /// A fetch failure is absorbed into the store's error state.
            /// Returns `true` if the outcome was applied, `false` if a
            /// newer load superseded it.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn load_orders(&self) -> bool {
                let token = self.orders.begin_load();
                let outcome = match self.client.orders() $( .$await_ext )? {
                    Ok(data) => Ok(data),
                    Err(err) => {
                        tracing::warn!(error = %err, "orders fixture fetch failed");
                        Err(ORDERS_LOAD_ERROR.to_owned())
                    }
                };
                let applied = self.orders.finish_load(token, outcome);
                if !applied {
                    tracing::debug!("discarded stale orders load");
                }
                applied
            }

            /// Loads the commissions fixture into the commissions store.
            ///
            /// A fetch failure is absorbed into the store's error state.
            /// Returns `true` if the outcome was applied, `false` if a
            /// newer load superseded it.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn load_commissions(&self) -> bool {
                let token = self.commissions.begin_load();
                let outcome = match self.client.commissions() $( .$await_ext )? {
                    Ok(data) => Ok(data),
                    Err(err) => {
                        tracing::warn!(error = %err, "commissions fixture fetch failed");
                        Err(COMMISSIONS_LOAD_ERROR.to_owned())
                    }
                };
                let applied = self.commissions.finish_load(token, outcome);
                if !applied {
                    tracing::debug!("discarded stale commissions load");
                }
                applied
            }

            /// Loads all three fixtures.
            ///
            /// Failures stay confined to the affected store; the other
            /// collections still load.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn load_all(&self) {
                _ = self.load_users() $( .$await_ext )?;
                _ = self.load_orders() $( .$await_ext )?;
                _ = self.load_commissions() $( .$await_ext )?;
            }

            /// Returns a handle to the shared users store.
            #[inline]
            #[must_use]
            pub fn users_store(&self) -> Arc<EntityStore<User>> {
                Arc::clone(&self.users)
            }

            /// Returns a handle to the shared orders store.
            #[inline]
            #[must_use]
            pub fn orders_store(&self) -> Arc<EntityStore<Order>> {
                Arc::clone(&self.orders)
            }

            /// Returns a handle to the shared commissions store.
            #[inline]
            #[must_use]
            pub fn commissions_store(&self) -> Arc<EntityStore<Commission>> {
                Arc::clone(&self.commissions)
            }

            /// Creates a dashboard controller over the shared stores.
            #[inline]
            #[must_use]
            pub fn dashboard_view(&self) -> DashboardView {
                DashboardView::new(
                    self.users_store(),
                    self.orders_store(),
                    self.commissions_store(),
                )
            }

            /// Creates a users list controller over the shared store.
            #[inline]
            #[must_use]
            pub fn users_view(&self) -> UsersListView {
                UsersListView::new(self.users_store())
            }

            /// Creates an orders list controller over the shared stores.
            #[inline]
            #[must_use]
            pub fn orders_view(&self) -> OrdersListView {
                OrdersListView::new(self.orders_store(), self.users_store())
            }

            /// Creates a commissions controller over the shared stores.
            #[inline]
            #[must_use]
            pub fn commissions_view(&self) -> CommissionsView {
                CommissionsView::new(self.commissions_store(), self.users_store())
            }

            /// Creates a user detail controller for the given id.
            #[inline]
            #[must_use]
            pub fn user_detail_view(&self, id: &UserId) -> UserDetailView {
                UserDetailView::new(self.users_store(), id)
            }

            /// Creates an order detail controller for the given id.
            #[inline]
            #[must_use]
            pub fn order_detail_view(&self, id: &OrderId) -> OrderDetailView {
                OrderDetailView::new(self.orders_store(), self.users_store(), id)
            }

            /// Returns a reference to the underlying fixture client.
            #[inline]
            #[must_use]
            pub const fn inner_client(&self) -> &$http_client {
                &self.client
            }
        }

    };
}

// ── Async variant ───────────────────────────────────────────────────────

#[cfg(feature = "async")]
mod async_backoffice {
    //! Async high-level facade.

    use core::time::Duration;
    use std::sync::Arc;

    use crate::client::FixtureClient;
    use crate::error::Result;
    use crate::models::{Commission, Order, OrderId, User, UserId};
    use crate::store::EntityStore;
    use crate::views::{
        CommissionsView, DashboardView, OrderDetailView, OrdersListView, UserDetailView,
        UsersListView,
    };

    use super::{COMMISSIONS_LOAD_ERROR, ORDERS_LOAD_ERROR, USERS_LOAD_ERROR};

    define_backoffice! {
        facade_name: Backoffice,
        builder_name: BackofficeBuilder,
        http_client: FixtureClient,
        facade_doc: "High-level async facade over the fixture client and the shared stores.\n\nUse [`Backoffice::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`Backoffice`] facade.",
        async_kw: async,
        await_kw: await,
    }
}

// ── Blocking variant ────────────────────────────────────────────────────

#[cfg(feature = "blocking")]
mod blocking_backoffice {
    //! Blocking high-level facade.

    use core::time::Duration;
    use std::sync::Arc;

    use crate::client::FixtureBlockingClient;
    use crate::error::Result;
    use crate::models::{Commission, Order, OrderId, User, UserId};
    use crate::store::EntityStore;
    use crate::views::{
        CommissionsView, DashboardView, OrderDetailView, OrdersListView, UserDetailView,
        UsersListView,
    };

    use super::{COMMISSIONS_LOAD_ERROR, ORDERS_LOAD_ERROR, USERS_LOAD_ERROR};

    define_backoffice! {
        facade_name: BackofficeBlocking,
        builder_name: BackofficeBlockingBuilder,
        http_client: FixtureBlockingClient,
        facade_doc: "High-level blocking facade over the fixture client and the shared stores.\n\nUse [`BackofficeBlocking::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`BackofficeBlocking`] facade.",
    }
}

#[cfg(feature = "async")]
pub use async_backoffice::{Backoffice, BackofficeBuilder};
#[cfg(feature = "blocking")]
pub use blocking_backoffice::{BackofficeBlocking, BackofficeBlockingBuilder};
