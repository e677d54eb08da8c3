//! # Openroot Checkout
//!
//! Client-side course checkout as a reducer, independent of any rendering
//! layer. A view sends user intents (`SelectCourse`, `Pay`, `Back`) to a
//! [`Store`] and renders [`CheckoutState`]; the reducer drives the order
//! service and the gateway's hosted checkout through effects.
//!
//! ```text
//! List ──SelectCourse──► Details ──Pay──► Paying ──verified──► Unlocked
//!  ▲                       │  ▲             │
//!  └─────────Back──────────┘  └──failed / dismissed / back
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use openroot_checkout::{
//!     new_store, CheckoutAction, CheckoutEnvironment, CheckoutSettings, CourseId, HttpOrderApi,
//! };
//! use openroot_checkout::mocks::MockHostedCheckout;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = HttpOrderApi::new("http://localhost:5000", Duration::from_secs(10))?;
//! let env = CheckoutEnvironment::new(
//!     Arc::new(api),
//!     Arc::new(MockHostedCheckout::dismissing()),
//!     CheckoutSettings::new("rzp_test_key"),
//! );
//!
//! let store = new_store(env);
//! store.send(CheckoutAction::SelectCourse { course_id: CourseId::new(1) }).await;
//! store.send(CheckoutAction::Pay).await;
//! let paying = store.state(|s| s.is_paying()).await;
//! # let _ = paying;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod environment;
pub mod mocks;
pub mod reducer;
pub mod types;

pub use client::{HttpOrderApi, OrderApiError, DEFAULT_BASE_URL};
pub use environment::{
    ApiFuture, CheckoutEnvironment, CheckoutSettings, HostedCheckout, OrderApi, WidgetFuture,
};
pub use reducer::CheckoutReducer;
pub use types::{
    Catalog, CheckoutAction, CheckoutOptions, CheckoutState, Course, CourseId, Money, Notice,
    PaymentStage, Screen, Theme, VerificationStatus, WidgetOutcome, CURRENCY,
};

use openroot_runtime::Store;

/// A store running the checkout reducer
pub type CheckoutStore = Store<CheckoutState, CheckoutAction, CheckoutEnvironment, CheckoutReducer>;

/// Store on the course list
#[must_use]
pub fn new_store(environment: CheckoutEnvironment) -> CheckoutStore {
    Store::new(CheckoutState::new(), CheckoutReducer::new(), environment)
}
