//! Injected dependencies of the checkout reducer.

use crate::client::OrderApiError;
use crate::types::{Catalog, CheckoutOptions, VerificationStatus, WidgetOutcome};
use openroot_razorpay::{Order, PaymentCallback};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

/// Boxed future returned by [`OrderApi`] methods
pub type ApiFuture<T> = Pin<Box<dyn Future<Output = Result<T, OrderApiError>> + Send>>;

/// Boxed future resolving when the hosted checkout closes
pub type WidgetFuture = Pin<Box<dyn Future<Output = WidgetOutcome> + Send>>;

/// The order service as seen from the client
pub trait OrderApi: Send + Sync {
    /// Ask the service to mint an order for `amount` whole rupees.
    ///
    /// Implementations must fail with [`OrderApiError::MissingOrderId`] when
    /// the response carries no order id.
    fn create_order(&self, amount: u64) -> ApiFuture<Order>;

    /// Forward a payment callback for signature verification
    fn verify_payment(&self, callback: PaymentCallback) -> ApiFuture<VerificationStatus>;
}

/// The gateway's hosted checkout widget
pub trait HostedCheckout: Send + Sync {
    /// Open the widget; resolves once the buyer pays or closes it
    fn open(&self, options: CheckoutOptions) -> WidgetFuture;
}

/// Presentation settings for the hosted checkout
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutSettings {
    /// Public gateway key id
    pub key_id: String,
    /// Merchant name shown in the widget
    pub merchant_name: String,
    /// Widget accent colour
    pub theme_color: String,
    /// How long the success celebration shows
    pub celebration: Duration,
}

impl CheckoutSettings {
    /// Default merchant name
    pub const DEFAULT_MERCHANT_NAME: &'static str = "Openroot Classes";
    /// Default accent colour
    pub const DEFAULT_THEME_COLOR: &'static str = "#7c3aed";
    /// Default celebration length
    pub const DEFAULT_CELEBRATION: Duration = Duration::from_secs(6);

    /// Settings with the default presentation for the given key id
    #[must_use]
    pub fn new(key_id: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            merchant_name: Self::DEFAULT_MERCHANT_NAME.to_string(),
            theme_color: Self::DEFAULT_THEME_COLOR.to_string(),
            celebration: Self::DEFAULT_CELEBRATION,
        }
    }

    /// Override the celebration length
    #[must_use]
    pub const fn with_celebration(mut self, celebration: Duration) -> Self {
        self.celebration = celebration;
        self
    }
}

/// Environment for the checkout reducer
#[derive(Clone)]
pub struct CheckoutEnvironment {
    /// Order service client
    pub api: Arc<dyn OrderApi>,
    /// Hosted checkout widget
    pub checkout: Arc<dyn HostedCheckout>,
    /// Courses on sale
    pub catalog: Arc<Catalog>,
    /// Widget presentation
    pub settings: CheckoutSettings,
}

impl CheckoutEnvironment {
    /// Creates an environment over the built-in catalog
    pub fn new(
        api: Arc<dyn OrderApi>,
        checkout: Arc<dyn HostedCheckout>,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            api,
            checkout,
            catalog: Arc::new(Catalog::builtin()),
            settings,
        }
    }

    /// Replace the catalog
    #[must_use]
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }
}

impl std::fmt::Debug for CheckoutEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutEnvironment")
            .field("catalog", &self.catalog)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
