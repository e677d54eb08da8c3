//! Checkout reducer.
//!
//! Transitions are pure; every call to the order service or the hosted
//! checkout is returned as an effect whose result comes back as an action.
//! Actions that do not fit the current screen (a late `OrderCreated`, a
//! second `Pay` while paying) are ignored. `Back` abandons a payment only
//! while the hosted checkout is open; the widget may never report back.

use crate::environment::CheckoutEnvironment;
use crate::types::{
    CheckoutAction, CheckoutOptions, CheckoutState, Course, Notice, PaymentStage, Screen, Theme,
    VerificationStatus, WidgetOutcome,
};
use openroot_core::effect::Effect;
use openroot_core::reducer::Reducer;
use openroot_core::{async_effect, delay, smallvec, SmallVec};
use openroot_razorpay::{Order, PaymentCallback};
use std::sync::Arc;

/// Reducer for the course checkout
#[derive(Clone, Copy, Debug, Default)]
pub struct CheckoutReducer;

impl CheckoutReducer {
    /// Creates a new checkout reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Options for the hosted checkout of `order`
    #[must_use]
    pub fn checkout_options(
        env: &CheckoutEnvironment,
        course: &Course,
        order: &Order,
    ) -> CheckoutOptions {
        CheckoutOptions {
            key: env.settings.key_id.clone(),
            amount: order.amount,
            currency: order.currency.clone(),
            name: env.settings.merchant_name.clone(),
            description: course.name.clone(),
            order_id: order.id.clone(),
            theme: Theme {
                color: env.settings.theme_color.clone(),
            },
        }
    }

    fn create_order(env: &CheckoutEnvironment, course: &Course) -> Effect<CheckoutAction> {
        let api = Arc::clone(&env.api);
        let amount = course.price.major();

        async_effect! {
            match api.create_order(amount).await {
                Ok(order) => Some(CheckoutAction::OrderCreated { order }),
                Err(error) => Some(CheckoutAction::OrderFailed {
                    reason: error.to_string(),
                }),
            }
        }
    }

    fn open_checkout(env: &CheckoutEnvironment, options: CheckoutOptions) -> Effect<CheckoutAction> {
        let checkout = Arc::clone(&env.checkout);

        async_effect! {
            match checkout.open(options).await {
                WidgetOutcome::Authorized(callback) => Some(CheckoutAction::PaymentAuthorized {
                    payment_id: callback.razorpay_payment_id,
                    signature: callback.razorpay_signature,
                }),
                WidgetOutcome::Dismissed => Some(CheckoutAction::CheckoutDismissed),
            }
        }
    }

    fn verify_payment(env: &CheckoutEnvironment, callback: PaymentCallback) -> Effect<CheckoutAction> {
        let api = Arc::clone(&env.api);

        async_effect! {
            match api.verify_payment(callback).await {
                Ok(status) => Some(CheckoutAction::PaymentVerified { status }),
                Err(error) => Some(CheckoutAction::VerificationFailed {
                    reason: error.to_string(),
                }),
            }
        }
    }

    /// Back to the details screen with a notice
    fn fail(state: &mut CheckoutState, course: Course, notice: Notice) -> SmallVec<[Effect<CheckoutAction>; 4]> {
        tracing::info!(course_id = %course.id, %notice, "Payment attempt ended");
        state.screen = Screen::Details { course };
        state.notice = Some(notice);
        smallvec![Effect::None]
    }
}

impl Reducer for CheckoutReducer {
    type State = CheckoutState;
    type Action = CheckoutAction;
    type Environment = CheckoutEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per transition
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        // Every arm either installs a new screen or restores this one
        let screen = std::mem::take(&mut state.screen);

        match (screen, action) {
            (Screen::List, CheckoutAction::SelectCourse { course_id }) => {
                if let Some(course) = env.catalog.get(course_id) {
                    tracing::debug!(%course_id, "Course selected");
                    state.screen = Screen::Details {
                        course: course.clone(),
                    };
                    state.notice = None;
                } else {
                    tracing::warn!(%course_id, "Course not found");
                    state.notice = Some(Notice::CourseNotFound);
                }
                smallvec![Effect::None]
            },

            (Screen::Details { .. }, CheckoutAction::Back) => {
                state.notice = None;
                smallvec![Effect::None]
            },

            (Screen::Unlocked { course, .. }, CheckoutAction::Back) => {
                state.screen = Screen::Details { course };
                state.notice = None;
                smallvec![Effect::None]
            },

            (
                Screen::Paying {
                    course,
                    stage: PaymentStage::AwaitingPayment { order },
                },
                CheckoutAction::Back,
            ) => {
                tracing::info!(order_id = %order.id, "Payment abandoned");
                state.screen = Screen::Details { course };
                state.notice = None;
                smallvec![Effect::None]
            },

            (Screen::Details { course }, CheckoutAction::Pay) => {
                tracing::info!(course_id = %course.id, price = %course.price, "Starting payment");
                let effect = Self::create_order(env, &course);
                state.screen = Screen::Paying {
                    course,
                    stage: PaymentStage::CreatingOrder,
                };
                state.notice = None;
                smallvec![effect]
            },

            (
                Screen::Paying {
                    course,
                    stage: PaymentStage::CreatingOrder,
                },
                CheckoutAction::OrderCreated { order },
            ) => {
                if order.id.is_empty() {
                    tracing::warn!("Order response without id");
                    return Self::fail(state, course, Notice::PaymentInitFailed);
                }

                tracing::info!(order_id = %order.id, amount = order.amount, "Opening hosted checkout");
                let options = Self::checkout_options(env, &course, &order);
                state.screen = Screen::Paying {
                    course,
                    stage: PaymentStage::AwaitingPayment { order },
                };
                smallvec![Self::open_checkout(env, options)]
            },

            (
                Screen::Paying {
                    course,
                    stage: PaymentStage::CreatingOrder,
                },
                CheckoutAction::OrderFailed { reason },
            ) => {
                tracing::warn!(%reason, "Order creation failed");
                Self::fail(state, course, Notice::PaymentInitFailed)
            },

            (
                Screen::Paying {
                    course,
                    stage: PaymentStage::AwaitingPayment { order },
                },
                CheckoutAction::PaymentAuthorized {
                    payment_id,
                    signature,
                },
            ) => {
                tracing::info!(order_id = %order.id, %payment_id, "Verifying payment");
                let callback = PaymentCallback {
                    razorpay_order_id: order.id.clone(),
                    razorpay_payment_id: payment_id,
                    razorpay_signature: signature,
                };
                state.screen = Screen::Paying {
                    course,
                    stage: PaymentStage::Verifying { order },
                };
                smallvec![Self::verify_payment(env, callback)]
            },

            (
                Screen::Paying {
                    course,
                    stage: PaymentStage::AwaitingPayment { .. },
                },
                CheckoutAction::CheckoutDismissed,
            ) => Self::fail(state, course, Notice::PaymentCancelled),

            (
                Screen::Paying {
                    course,
                    stage: PaymentStage::Verifying { order },
                },
                CheckoutAction::PaymentVerified { status },
            ) => match status {
                VerificationStatus::Success => {
                    tracing::info!(course_id = %course.id, order_id = %order.id, "Course unlocked");
                    state.screen = Screen::Unlocked {
                        course,
                        celebrating: true,
                    };
                    state.notice = None;
                    smallvec![delay! {
                        duration: env.settings.celebration,
                        action: CheckoutAction::CelebrationFinished
                    }]
                },
                VerificationStatus::Failed => Self::fail(state, course, Notice::PaymentFailed),
            },

            (
                Screen::Paying {
                    course,
                    stage: PaymentStage::Verifying { .. },
                },
                CheckoutAction::VerificationFailed { reason },
            ) => {
                tracing::warn!(%reason, "Verification request failed");
                Self::fail(state, course, Notice::PaymentFailed)
            },

            (Screen::Unlocked { course, .. }, CheckoutAction::CelebrationFinished) => {
                state.screen = Screen::Unlocked {
                    course,
                    celebrating: false,
                };
                smallvec![Effect::None]
            },

            (screen, CheckoutAction::DismissNotice) => {
                state.screen = screen;
                state.notice = None;
                smallvec![Effect::None]
            },

            (screen, action) => {
                tracing::debug!(screen = screen.name(), ?action, "Ignored action");
                state.screen = screen;
                smallvec![Effect::None]
            },
        }
    }
}
