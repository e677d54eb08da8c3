//! # Openroot Testing
//!
//! Testing utilities for the Openroot workspace.
//!
//! This crate provides:
//! - Mock implementations of environment traits (`FixedClock`)
//! - A scriptable order gateway (`MockOrderGateway`)
//! - The `ReducerTest` Given/When/Then harness and effect assertions
//!
//! ## Example
//!
//! ```ignore
//! use openroot_testing::{test_clock, MockOrderGateway};
//!
//! let gateway = MockOrderGateway::new();
//! let service = OrderService::new(Arc::new(gateway.clone()), secret, Arc::new(test_clock()));
//! service.create_order(Some(&json!(1769))).await?;
//! assert_eq!(gateway.requests()[0].amount, 176_900);
//! ```

use chrono::{DateTime, Utc};
use openroot_core::environment::Clock;


pub use reducer_test::{assertions, ReducerTest};

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use openroot_razorpay::{CreateOrderRequest, GatewayFuture, Order, OrderGateway, RazorpayError};
    use serde_json::{json, Map};
    use std::sync::{Arc, Mutex, PoisonError};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use openroot_testing::mocks::FixedClock;
    /// use openroot_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// Unix millis at that instant: `1_735_689_600_000`.
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::seconds(1_735_689_600))
    }

    #[derive(Debug, Clone)]
    enum Behaviour {
        Echo { order_id: String },
        Fail { status: u16, message: String },
        Panic,
    }

    #[derive(Debug)]
    struct GatewayState {
        behaviour: Behaviour,
        requests: Vec<CreateOrderRequest>,
    }

    /// Order gateway fake
    ///
    /// Records every request. By default it answers with a gateway-shaped
    /// order echoing the requested amount, currency and receipt. Clones share
    /// the same recording.
    #[derive(Debug, Clone)]
    pub struct MockOrderGateway {
        state: Arc<Mutex<GatewayState>>,
    }

    impl MockOrderGateway {
        /// Gateway that succeeds with order id `order_mock_1`
        #[must_use]
        pub fn new() -> Self {
            Self::with_behaviour(Behaviour::Echo {
                order_id: "order_mock_1".to_string(),
            })
        }

        /// Gateway that succeeds with the given order id
        #[must_use]
        pub fn with_order_id(order_id: impl Into<String>) -> Self {
            Self::with_behaviour(Behaviour::Echo {
                order_id: order_id.into(),
            })
        }

        /// Gateway whose every call fails with an API error
        #[must_use]
        pub fn failing(status: u16, message: impl Into<String>) -> Self {
            Self::with_behaviour(Behaviour::Fail {
                status,
                message: message.into(),
            })
        }

        /// Gateway whose every call panics (for panic-boundary tests)
        #[must_use]
        pub fn panicking() -> Self {
            Self::with_behaviour(Behaviour::Panic)
        }

        fn with_behaviour(behaviour: Behaviour) -> Self {
            Self {
                state: Arc::new(Mutex::new(GatewayState {
                    behaviour,
                    requests: Vec::new(),
                })),
            }
        }

        /// Requests received so far
        #[must_use]
        pub fn requests(&self) -> Vec<CreateOrderRequest> {
            self.state
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .requests
                .clone()
        }

        /// Number of calls received so far
        #[must_use]
        pub fn call_count(&self) -> usize {
            self.state
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .requests
                .len()
        }
    }

    impl Default for MockOrderGateway {
        fn default() -> Self {
            Self::new()
        }
    }

    impl OrderGateway for MockOrderGateway {
        fn create_order(&self, request: CreateOrderRequest) -> GatewayFuture<Order> {
            let behaviour = {
                let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
                state.requests.push(request.clone());
                state.behaviour.clone()
            };

            Box::pin(async move {
                match behaviour {
                    Behaviour::Echo { order_id } => {
                        tracing::info!(order_id = %order_id, amount = request.amount, "Mock order created");
                        let mut extra = Map::new();
                        extra.insert("entity".to_string(), json!("order"));
                        extra.insert("receipt".to_string(), json!(request.receipt));
                        extra.insert("status".to_string(), json!("created"));
                        extra.insert("attempts".to_string(), json!(0));
                        Ok(Order {
                            id: order_id,
                            amount: request.amount,
                            currency: request.currency,
                            extra,
                        })
                    },
                    Behaviour::Fail { status, message } => {
                        Err(RazorpayError::ApiError { status, message })
                    },
                    #[allow(clippy::panic)] // Scripted failure for panic-boundary tests
                    Behaviour::Panic => panic!("mock gateway panicked"),
                }
            })
        }
    }
}

// Re-export commonly used items
pub use mocks::{test_clock, FixedClock, MockOrderGateway};
