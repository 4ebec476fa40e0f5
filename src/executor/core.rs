use super::handle::{Handle, Invocation, TypedSubscription};
use crate::context::ExecutionContext;
use crate::error::{ExecutorError, Result};
use crate::source::{Subscription, Timer, Waitable};
use crate::wait::{ReadinessProvider, SlotKind, WaitCapacities, WaitSet};

use log::debug;

use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

/// Default bound for one round's blocking wait.
pub(crate) const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_millis(100);

/// Deterministic logical-execution-time executor.
///
/// The `Executor` is responsible for:
/// - registering a bounded set of event sources (the handle table),
/// - keeping a correctly-sized wait set alive across rounds,
/// - running the two-phase read-then-execute scheduling round,
/// - driving rounds via the spin entry points.
///
/// It owns the handle table and the wait set exclusively; everything runs
/// on the caller's thread.
///
/// The handle table is append-only and its order is the execution order:
/// callbacks run in registration order every round, regardless of which
/// subset of sources is ready. That ordering is the central determinism
/// guarantee.
pub struct Executor<P: ReadinessProvider> {
    /// Factory for wait sets.
    pub(super) provider: P,

    /// Liveness back-reference to the process-wide context. Never owned.
    pub(super) context: Weak<dyn ExecutionContext>,

    /// Registered handles in registration order.
    pub(super) handles: Vec<Handle>,

    /// Table capacity, fixed at construction.
    pub(super) max_handles: usize,

    /// Per-kind tallies used to size the wait set exactly.
    pub(super) counts: WaitCapacities,

    /// `None` until first use and after every registration; rebuilt by
    /// [`prepare_wait_set`](Self::prepare_wait_set).
    pub(super) wait_set: Option<P::WaitSet>,

    /// Default bound for one round's blocking wait.
    pub(super) timeout: Duration,

    /// Last period boundary of the periodic driver; `None` until the
    /// first `spin_one_period` call.
    pub(super) invocation_time: Option<Instant>,
}

impl<P: ReadinessProvider> Executor<P> {
    /// Creates an executor with a handle table of capacity `max_handles`.
    ///
    /// The capacity is fixed for the executor's lifetime and the default
    /// wait timeout starts at 100 ms.
    ///
    /// # Arguments
    ///
    /// * `provider` - Factory for wait sets.
    /// * `context` - Process-wide context; only its liveness is consulted.
    /// * `max_handles` - Handle table capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::InvalidArgument`] if `max_handles` is zero.
    pub fn new<C>(provider: P, context: &Arc<C>, max_handles: usize) -> Result<Self>
    where
        C: ExecutionContext + 'static,
    {
        if max_handles == 0 {
            return Err(ExecutorError::InvalidArgument(
                "max_handles must be >= 1",
            ));
        }

        let context_weak = Arc::downgrade(context);
        let context: Weak<dyn ExecutionContext> = context_weak;

        Ok(Self {
            provider,
            context,
            handles: Vec::with_capacity(max_handles),
            max_handles,
            counts: WaitCapacities::default(),
            wait_set: None,
            timeout: DEFAULT_WAIT_TIMEOUT,
            invocation_time: None,
        })
    }

    /// Sets the default bound for one round's blocking wait.
    ///
    /// Used by [`spin`](Self::spin), [`spin_one_period`](Self::spin_one_period)
    /// and [`spin_period`](Self::spin_period); `spin_some` takes its bound
    /// per call.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// The current default wait bound.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Registers a subscription handle.
    ///
    /// `slot` is the message buffer the intake phase writes into; the
    /// callback receives a reference to it whenever the handle is invoked.
    /// The slot is owned by the executor from here on, so no concurrent
    /// mutation is possible while a round is in progress.
    ///
    /// Registration order is execution order.
    ///
    /// # Arguments
    ///
    /// * `source` - The externally-owned subscription.
    /// * `slot` - Initial contents of the message buffer.
    /// * `callback` - Invoked with the buffer's contents.
    /// * `invocation` - Whether readiness is required to invoke.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::CapacityExceeded`] if the table is full;
    /// no state is mutated in that case.
    pub fn add_subscription<S, F>(
        &mut self,
        source: Arc<S>,
        slot: S::Message,
        callback: F,
        invocation: Invocation,
    ) -> Result<()>
    where
        S: Subscription + 'static,
        S::Message: 'static,
        F: FnMut(&S::Message) + 'static,
    {
        self.check_capacity()?;

        let waitable: Arc<dyn Waitable> = source.clone();
        let entry = Box::new(TypedSubscription {
            source,
            slot,
            callback,
        });

        self.handles
            .push(Handle::subscription(entry, waitable, invocation));
        self.counts.subscriptions += 1;
        self.invalidate_wait_set();

        debug!("added a subscription");
        Ok(())
    }

    /// Registers a timer handle.
    ///
    /// With [`Invocation::OnNewData`] the timer is called only in rounds
    /// where its expiry was confirmed; with [`Invocation::Always`] it is
    /// called every round and its own call primitive decides what that
    /// means.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::CapacityExceeded`] if the table is full;
    /// no state is mutated in that case.
    pub fn add_timer<T>(&mut self, timer: Arc<T>, invocation: Invocation) -> Result<()>
    where
        T: Timer + 'static,
    {
        self.check_capacity()?;

        let waitable: Arc<dyn Waitable> = timer.clone();

        self.handles
            .push(Handle::timer(timer, waitable, invocation));
        self.counts.timers += 1;
        self.invalidate_wait_set();

        debug!("added a timer");
        Ok(())
    }

    /// Releases the handle table and the wait set.
    ///
    /// After this the executor holds no handles and no capacity; further
    /// registrations fail with [`ExecutorError::CapacityExceeded`].
    /// Calling `fini` repeatedly, or on an executor that never ran, is a
    /// no-op.
    pub fn fini(&mut self) {
        self.handles = Vec::new();
        self.max_handles = 0;
        self.counts = WaitCapacities::default();
        self.wait_set = None;
        self.timeout = DEFAULT_WAIT_TIMEOUT;
        self.invocation_time = None;
    }

    /// Rejects registrations into a full table.
    fn check_capacity(&self) -> Result<()> {
        if self.handles.len() >= self.max_handles {
            return Err(ExecutorError::CapacityExceeded {
                max_handles: self.max_handles,
            });
        }
        Ok(())
    }

    /// Drops the wait set so the next round rebuilds it.
    ///
    /// Called after every registration: the table's composition changed,
    /// so every `wait_set_index` is stale.
    fn invalidate_wait_set(&mut self) {
        self.wait_set = None;
    }

    /// Ensures a live, correctly-sized wait set exists.
    ///
    /// If one is held it is only cleared of the previous round's
    /// readiness flags. Otherwise a fresh one is created sized exactly to
    /// the current counts, and every handle is registered in table order,
    /// recording its slot index.
    ///
    /// On a creation or registration failure the executor holds no wait
    /// set, so the next round starts from a clean rebuild.
    pub(super) fn prepare_wait_set(&mut self) -> Result<()> {
        if let Some(wait_set) = self.wait_set.as_mut() {
            wait_set.clear();
            return Ok(());
        }

        let mut wait_set = self.provider.create(&self.counts)?;

        for handle in &mut self.handles {
            let index = match handle.slot_kind() {
                SlotKind::Subscription => wait_set.add_subscription(handle.waitable.clone())?,
                SlotKind::Timer => wait_set.add_timer(handle.waitable.clone())?,
            };
            handle.wait_set_index = index;
        }

        debug!(
            "wait set rebuilt: {} subscriptions, {} timers",
            self.counts.subscriptions, self.counts.timers
        );

        self.wait_set = Some(wait_set);
        Ok(())
    }

    /// Whether the execution context still reports itself live.
    ///
    /// A dropped context counts as dead.
    pub(super) fn context_is_valid(&self) -> bool {
        self.context
            .upgrade()
            .is_some_and(|context| context.is_valid())
    }
}
