//! Test doubles for the checkout environment.

use crate::client::OrderApiError;
use crate::environment::{ApiFuture, HostedCheckout, OrderApi, WidgetFuture};
use crate::types::{CheckoutOptions, VerificationStatus, WidgetOutcome, CURRENCY};
use openroot_razorpay::{KeySecret, Order, PaymentCallback};
use serde_json::Map;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone)]
enum CreateBehaviour {
    Succeed { order_id: String },
    Fail { message: String },
}

#[derive(Debug, Clone)]
enum VerifyBehaviour {
    Answer(VerificationStatus),
    Fail { message: String },
}

#[derive(Debug)]
struct ApiState {
    create: CreateBehaviour,
    verify: VerifyBehaviour,
    created_amounts: Vec<u64>,
    verifications: Vec<PaymentCallback>,
}

/// Order service fake
///
/// Succeeds by default: orders get id `order_mock_1` and every verification
/// reports success. Clones share the same recording.
#[derive(Debug, Clone)]
pub struct MockOrderApi {
    state: Arc<Mutex<ApiState>>,
}

impl MockOrderApi {
    /// Fake that mints `order_mock_1` and accepts every payment
    #[must_use]
    pub fn new() -> Self {
        Self::with_order_id("order_mock_1")
    }

    /// Fake that mints orders with the given id
    #[must_use]
    pub fn with_order_id(order_id: impl Into<String>) -> Self {
        Self::with(
            CreateBehaviour::Succeed {
                order_id: order_id.into(),
            },
            VerifyBehaviour::Answer(VerificationStatus::Success),
        )
    }

    /// Fake whose order creation always fails
    #[must_use]
    pub fn failing_orders(message: impl Into<String>) -> Self {
        Self::with(
            CreateBehaviour::Fail {
                message: message.into(),
            },
            VerifyBehaviour::Answer(VerificationStatus::Success),
        )
    }

    /// Fake that mints orders but reports every verification as failed
    #[must_use]
    pub fn rejecting_payments() -> Self {
        Self::new().verifying_with(VerifyBehaviour::Answer(VerificationStatus::Failed))
    }

    /// Fake whose verification requests fail in transport
    #[must_use]
    pub fn failing_verification(message: impl Into<String>) -> Self {
        Self::new().verifying_with(VerifyBehaviour::Fail {
            message: message.into(),
        })
    }

    fn with(create: CreateBehaviour, verify: VerifyBehaviour) -> Self {
        Self {
            state: Arc::new(Mutex::new(ApiState {
                create,
                verify,
                created_amounts: Vec::new(),
                verifications: Vec::new(),
            })),
        }
    }

    fn verifying_with(self, verify: VerifyBehaviour) -> Self {
        self.lock().verify = verify;
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ApiState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Rupee amounts of every order request so far
    #[must_use]
    pub fn created_amounts(&self) -> Vec<u64> {
        self.lock().created_amounts.clone()
    }

    /// Every verification request so far
    #[must_use]
    pub fn verifications(&self) -> Vec<PaymentCallback> {
        self.lock().verifications.clone()
    }
}

impl Default for MockOrderApi {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderApi for MockOrderApi {
    fn create_order(&self, amount: u64) -> ApiFuture<Order> {
        let behaviour = {
            let mut state = self.lock();
            state.created_amounts.push(amount);
            state.create.clone()
        };

        Box::pin(async move {
            match behaviour {
                CreateBehaviour::Succeed { order_id } => Ok(Order {
                    id: order_id,
                    amount: amount * 100,
                    currency: CURRENCY.to_string(),
                    extra: Map::new(),
                }),
                CreateBehaviour::Fail { message } => Err(OrderApiError::Server {
                    status: 500,
                    message,
                }),
            }
        })
    }

    fn verify_payment(&self, callback: PaymentCallback) -> ApiFuture<VerificationStatus> {
        let behaviour = {
            let mut state = self.lock();
            state.verifications.push(callback);
            state.verify.clone()
        };

        Box::pin(async move {
            match behaviour {
                VerifyBehaviour::Answer(status) => Ok(status),
                VerifyBehaviour::Fail { message } => Err(OrderApiError::InvalidResponse(message)),
            }
        })
    }
}

#[derive(Debug, Clone)]
enum WidgetBehaviour {
    /// Sign the callback with the merchant secret, as the gateway would
    Sign { payment_id: String, secret: KeySecret },
    /// Return a fixed signature
    Fixed { payment_id: String, signature: String },
    Dismiss,
    /// Never close
    Hang,
}

#[derive(Debug)]
struct WidgetState {
    behaviour: WidgetBehaviour,
    opened: Vec<CheckoutOptions>,
}

/// Hosted checkout fake
///
/// Records the options of every opening. Clones share the same recording.
#[derive(Debug, Clone)]
pub struct MockHostedCheckout {
    state: Arc<Mutex<WidgetState>>,
}

impl MockHostedCheckout {
    /// Widget that completes payment `payment_id` with a genuine signature
    #[must_use]
    pub fn authorizing(payment_id: impl Into<String>, secret: KeySecret) -> Self {
        Self::with(WidgetBehaviour::Sign {
            payment_id: payment_id.into(),
            secret,
        })
    }

    /// Widget that completes payment `payment_id` with the given signature
    #[must_use]
    pub fn with_signature(payment_id: impl Into<String>, signature: impl Into<String>) -> Self {
        Self::with(WidgetBehaviour::Fixed {
            payment_id: payment_id.into(),
            signature: signature.into(),
        })
    }

    /// Widget the buyer closes without paying
    #[must_use]
    pub fn dismissing() -> Self {
        Self::with(WidgetBehaviour::Dismiss)
    }

    /// Widget that stays open forever
    #[must_use]
    pub fn hanging() -> Self {
        Self::with(WidgetBehaviour::Hang)
    }

    fn with(behaviour: WidgetBehaviour) -> Self {
        Self {
            state: Arc::new(Mutex::new(WidgetState {
                behaviour,
                opened: Vec::new(),
            })),
        }
    }

    /// Options of every opening so far
    #[must_use]
    pub fn opened(&self) -> Vec<CheckoutOptions> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .opened
            .clone()
    }
}

impl HostedCheckout for MockHostedCheckout {
    fn open(&self, options: CheckoutOptions) -> WidgetFuture {
        let behaviour = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.opened.push(options.clone());
            state.behaviour.clone()
        };

        Box::pin(async move {
            let (payment_id, signature) = match behaviour {
                WidgetBehaviour::Sign { payment_id, secret } => {
                    let signature = secret
                        .sign(&options.order_id, &payment_id)
                        .unwrap_or_default();
                    (payment_id, signature)
                },
                WidgetBehaviour::Fixed {
                    payment_id,
                    signature,
                } => (payment_id, signature),
                WidgetBehaviour::Dismiss => return WidgetOutcome::Dismissed,
                WidgetBehaviour::Hang => std::future::pending().await,
            };

            WidgetOutcome::Authorized(PaymentCallback {
                razorpay_order_id: options.order_id,
                razorpay_payment_id: payment_id,
                razorpay_signature: signature,
            })
        })
    }
}
