//! Declarative macros for ergonomic effect construction
//!
//! Reducers in this workspace mostly emit two kinds of effects: async calls
//! to a collaborator (order API, hosted checkout) and timers. These macros
//! keep the boxing and pinning out of reducer bodies.

/// Create an `Effect::Future` from an async block
///
/// The block must evaluate to `Option<Action>`.
///
/// # Example
///
/// ```rust,ignore
/// use openroot_core::async_effect;
///
/// async_effect! {
///     match api.create_order(amount).await {
///         Ok(order) => Some(CheckoutAction::OrderCreated { order }),
///         Err(error) => Some(CheckoutAction::OrderFailed { reason: error.to_string() }),
///     }
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Delay` for scheduling delayed actions
///
/// # Example
///
/// ```rust,ignore
/// use openroot_core::delay;
/// use std::time::Duration;
///
/// delay! {
///     duration: Duration::from_secs(6),
///     action: CheckoutAction::CelebrationFinished
/// }
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}
