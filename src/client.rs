//! HTTP client for the static fixture endpoints.
//!
//! Provides both async and blocking client variants behind feature
//! flags. Each fetch simulates network latency with a fixed delay
//! before issuing the request, matching the behaviour of the backend
//! the fixtures stand in for.

use core::time::Duration;

/// Default base URL where the fixture documents are served.
const DEFAULT_BASE_URL: &str = "http://localhost:5173";

/// Users fixture path.
const USERS_PATH: &str = "/data/users.json";

/// Orders fixture path.
const ORDERS_PATH: &str = "/data/orders.json";

/// Commissions fixture path.
const COMMISSIONS_PATH: &str = "/data/commissions.json";

/// Default simulated network latency.
const DEFAULT_LATENCY: Duration = Duration::from_millis(500);

/// Generates a fixture client (async or blocking) with builder,
/// methods, and tests.
macro_rules! define_client {
    (
        client_name: $client:ident,
        builder_name: $builder:ident,
        http_type: $http_type:ty,
        client_doc: $client_doc:expr,
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
            /// Overrides the base URL (useful for testing with a mock
            /// server).
            #[inline]
            #[must_use]
            pub fn base_url<T: Into<String>>(mut self, url: T) -> Self {
                self.base_url = Some(url.into());
                self
            }

            /// Overrides the simulated network latency. Pass
            /// [`Duration::ZERO`] to disable the delay entirely.
            #[inline]
            #[must_use]
            pub const fn latency(mut self, latency: Duration) -> Self {
                self.latency = Some(latency);
                self
            }

            /// Builds the client.
            ///
            /// # Errors
            ///
            /// Returns [`BackofficeError::Http`] if the HTTP client
            /// fails to build.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub fn build(self) -> Result<$client> {
                let base_url = self
                    .base_url
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
                let latency = self.latency.unwrap_or(DEFAULT_LATENCY);
                tracing::debug!(base_url = %base_url, latency_ms = %latency.as_millis(), "building client");
                let http = <$http_type>::builder().build()?;

                Ok($client {
                    http,
                    base_url,
                    latency,
                })
            }
        }

        #[doc = $client_doc]
        #[derive(Debug)]
        pub struct $client {
            /// Underlying HTTP client.
            http: $http_type,
            /// Fixture base URL.
            base_url: String,
            /// Simulated latency applied before every request.
            latency: Duration,
        }

        impl $client {
            /// Creates a new builder for configuring the client.
            #[inline]
            #[must_use]
            pub const fn builder() -> $builder {
                $builder {
                    base_url: None,
                    latency: None,
                }
            }

            /// Fetches the users fixture.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server
            /// returns a non-success status, or the body cannot be
            /// deserialized.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn users(&self) -> Result<Vec<User>> {
                tracing::debug!("fetching users fixture");
                self.get_json(USERS_PATH) $( .$await_ext )?
            }

            /// Fetches the orders fixture.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server
            /// returns a non-success status, or the body cannot be
            /// deserialized.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn orders(&self) -> Result<Vec<Order>> {
                tracing::debug!("fetching orders fixture");
                self.get_json(ORDERS_PATH) $( .$await_ext )?
            }

            /// Fetches the commissions fixture.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server
            /// returns a non-success status, or the body cannot be
            /// deserialized.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn commissions(&self) -> Result<Vec<Commission>> {
                tracing::debug!("fetching commissions fixture");
                self.get_json(COMMISSIONS_PATH) $( .$await_ext )?
            }

            /// Sends a GET request after the simulated latency and
            /// deserializes the JSON response.
            #[tracing::instrument(skip_all, fields(path = %path))]
            $($async_kw)? fn get_json<Resp: serde::de::DeserializeOwned>(
                &self,
                path: &str,
            ) -> Result<Resp> {
                pause(self.latency) $( .$await_ext )?;

                let url = format!("{}{path}", self.base_url);
                tracing::trace!(url = %url, "sending GET request");
                let response = self.http.get(&url).send() $( .$await_ext )? ?;

                let status = response.status();
                tracing::debug!(status = %status, "received response");
                if status.is_success() {
                    let body = response.text() $( .$await_ext )? ?;
                    tracing::trace!(body_len = body.len(), "parsing response body");
                    serde_json::from_str(&body).map_err(BackofficeError::from)
                } else {
                    let message = response
                        .text()
                        $( .$await_ext )?
                        .unwrap_or_else(|_| "unknown error".to_owned());
                    tracing::debug!(status = status.as_u16(), message = %message, "fixture fetch failed");
                    Err(BackofficeError::Fetch {
                        status: status.as_u16(),
                        message,
                    })
                }
            }
        }

        #[cfg(test)]
        mod tests {
            use super::*;

            #[test]
            fn builder_defaults() {
                let client = $client::builder().build().unwrap();
                assert_eq!(client.base_url, DEFAULT_BASE_URL);
                assert_eq!(client.latency, DEFAULT_LATENCY);
            }

            #[test]
            fn builder_custom_base_url() {
                let client = $client::builder()
                    .base_url("http://localhost:8080")
                    .build()
                    .unwrap();
                assert_eq!(client.base_url, "http://localhost:8080");
            }

            #[test]
            fn builder_zero_latency() {
                let client = $client::builder()
                    .latency(Duration::ZERO)
                    .build()
                    .unwrap();
                assert!(client.latency.is_zero());
            }
        }
    };
}

#[cfg(feature = "async")]
mod async_client {
    //! Async fixture client.

    use core::time::Duration;

    use super::{COMMISSIONS_PATH, DEFAULT_BASE_URL, DEFAULT_LATENCY, ORDERS_PATH, USERS_PATH};
    use crate::error::{BackofficeError, Result};
    use crate::models::{Commission, Order, User};

    /// Sleeps for the simulated latency, if any.
    async fn pause(latency: Duration) {
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    define_client! {
        client_name: FixtureClient,
        builder_name: FixtureClientBuilder,
        http_type: reqwest::Client,
        client_doc: "Async client for the fixture endpoints.\n\nUse [`FixtureClient::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`FixtureClient`].",
        async_kw: async,
        await_kw: await,
    }
}

#[cfg(feature = "blocking")]
mod blocking_client {
    //! Blocking (synchronous) fixture client.

    use core::time::Duration;

    use super::{COMMISSIONS_PATH, DEFAULT_BASE_URL, DEFAULT_LATENCY, ORDERS_PATH, USERS_PATH};
    use crate::error::{BackofficeError, Result};
    use crate::models::{Commission, Order, User};

    /// Sleeps for the simulated latency, if any.
    fn pause(latency: Duration) {
        if !latency.is_zero() {
            std::thread::sleep(latency);
        }
    }

    define_client! {
        client_name: FixtureBlockingClient,
        builder_name: FixtureBlockingClientBuilder,
        http_type: reqwest::blocking::Client,
        client_doc: "Blocking (synchronous) client for the fixture endpoints.\n\nUse [`FixtureBlockingClient::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`FixtureBlockingClient`].",
    }
}

#[cfg(feature = "async")]
pub use async_client::{FixtureClient, FixtureClientBuilder};
#[cfg(feature = "blocking")]
pub use blocking_client::{FixtureBlockingClient, FixtureBlockingClientBuilder};
