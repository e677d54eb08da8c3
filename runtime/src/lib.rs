//! # Openroot Runtime
//!
//! The [`Store`] owns a reducer's state, runs the effects the reducer
//! returns and feeds the actions those effects produce back into it.
//!
//! ```ignore
//! use openroot_runtime::Store;
//!
//! let store = Store::new(CheckoutState::default(), CheckoutReducer, environment);
//!
//! store.send(CheckoutAction::SelectCourse { course_id }).await;
//!
//! // Resolves once the reducer has applied the verification result
//! let outcome = store
//!     .send_and_wait_for(
//!         CheckoutAction::Pay,
//!         |a| matches!(a, CheckoutAction::PaymentVerified { .. }),
//!         Duration::from_secs(30),
//!     )
//!     .await?;
//! ```

use openroot_core::{effect::Effect, reducer::Reducer};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{RwLock, watch};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors from waiting on a [`Store`](crate::Store)
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// No matching action arrived before the deadline
        #[error("Timeout waiting for action")]
        Timeout,

        /// Action broadcast channel closed
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;

/// Completion handle for the effects started by one [`Store::send`]
///
/// Only the effects of that action are counted. An action an effect feeds
/// back is sent on its own and is not waited for here.
#[derive(Clone)]
pub struct EffectHandle {
    running: Arc<AtomicUsize>,
    done: watch::Receiver<()>,
}

impl EffectHandle {
    fn new() -> (Self, EffectTracking) {
        let running = Arc::new(AtomicUsize::new(0));
        let (notifier, done) = watch::channel(());

        let handle = Self {
            running: Arc::clone(&running),
            done,
        };
        (handle, EffectTracking {
            running,
            notifier: Arc::new(notifier),
        })
    }

    /// Wait until every tracked effect has finished
    pub async fn wait(&mut self) {
        while self.running.load(Ordering::SeqCst) > 0 {
            if self.done.changed().await.is_err() {
                break;
            }
        }
    }

    /// [`wait`](Self::wait) with a deadline
    ///
    /// # Errors
    ///
    /// [`StoreError::Timeout`] if effects are still running at the deadline.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("running", &self.running.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
struct EffectTracking {
    running: Arc<AtomicUsize>,
    notifier: Arc<watch::Sender<()>>,
}

/// Counts one running effect; the count drops even if the effect panics
struct RunningEffect(EffectTracking);

impl RunningEffect {
    fn start(tracking: &EffectTracking) -> Self {
        tracking.running.fetch_add(1, Ordering::SeqCst);
        Self(tracking.clone())
    }
}

impl Drop for RunningEffect {
    fn drop(&mut self) {
        if self.0.running.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.0.notifier.send(());
        }
    }
}

/// Store runtime for coordinating reducer execution and effect handling.
pub mod store {
    use super::{
        Arc, Effect, EffectHandle, EffectTracking, Reducer, RunningEffect, RwLock, StoreError,
    };
    use std::time::Duration;
    use tokio::sync::broadcast;

    const ACTION_BROADCAST_CAPACITY: usize = 16;

    /// Runtime for one reducer
    ///
    /// State sits behind an `RwLock`; every action is reduced under the
    /// write lock, so actions apply one at a time. Clones share state.
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        /// Actions produced by effects, published after they are reduced
        applied: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Clone + std::fmt::Debug + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            let (applied, _) = broadcast::channel(ACTION_BROADCAST_CAPACITY);

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                applied,
            }
        }

        /// Reduce `action` and start the effects it returns
        ///
        /// Returns once the state is updated and the effects are spawned.
        /// The handle waits for those effects.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> EffectHandle
        where
            R: Clone,
            E: Clone,
        {
            tracing::debug!(?action, "Reducing action");
            metrics::counter!("store.actions.total").increment(1);

            let (handle, tracking) = EffectHandle::new();

            let effects = {
                let mut state = self.state.write().await;

                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut *state, action, &self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());

                effects
            };

            for effect in effects {
                self.execute(effect, &tracking);
            }

            handle
        }

        /// Send `action`, then wait for an effect-produced action matching
        /// `predicate`
        ///
        /// The subscription is taken before sending and covers the whole
        /// feedback chain, so the match may be several effects downstream.
        /// The matching action has already been reduced when this returns.
        /// `action` itself is never matched.
        ///
        /// # Errors
        ///
        /// - [`StoreError::Timeout`]: nothing matched before `timeout`
        /// - [`StoreError::ChannelClosed`]: the broadcast channel closed
        pub async fn send_and_wait_for<F>(
            &self,
            action: A,
            predicate: F,
            timeout: Duration,
        ) -> Result<A, StoreError>
        where
            R: Clone,
            E: Clone,
            F: Fn(&A) -> bool,
        {
            let mut rx = self.applied.subscribe();

            self.send(action).await;

            tokio::time::timeout(timeout, async {
                loop {
                    match rx.recv().await {
                        Ok(action) if predicate(&action) => return Ok(action),
                        Ok(_) => {},
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "Action observer lagged");
                        },
                        Err(broadcast::error::RecvError::Closed) => {
                            return Err(StoreError::ChannelClosed);
                        },
                    }
                }
            })
            .await
            .map_err(|_| StoreError::Timeout)?
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let paying = store.state(|s| s.is_paying()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        fn execute(&self, effect: Effect<A>, tracking: &EffectTracking)
        where
            R: Clone,
            E: Clone,
        {
            match effect {
                Effect::None => {},
                Effect::Future(work) => {
                    metrics::counter!("store.effects.executed", "type" => "future").increment(1);
                    self.spawn_feedback(tracking, work);
                },
                Effect::Delay { duration, action } => {
                    tracing::trace!(?duration, "Scheduling delayed action");
                    metrics::counter!("store.effects.executed", "type" => "delay").increment(1);
                    self.spawn_feedback(tracking, async move {
                        tokio::time::sleep(duration).await;
                        Some(*action)
                    });
                },
            }
        }

        /// Run `work` on its own task and send whatever action it yields
        fn spawn_feedback<Fut>(&self, tracking: &EffectTracking, work: Fut)
        where
            R: Clone,
            E: Clone,
            Fut: std::future::Future<Output = Option<A>> + Send + 'static,
        {
            let running = RunningEffect::start(tracking);
            let store = self.clone();

            tokio::spawn(async move {
                let _running = running;

                if let Some(action) = work.await {
                    store.send(action.clone()).await;
                    // No subscribers is the normal case
                    let _ = store.applied.send(action);
                }
            });
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                applied: self.applied.clone(),
            }
        }
    }
}

pub use store::Store;
