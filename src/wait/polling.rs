//! Built-in probing readiness provider.
//!
//! This provider backs hosts that have no blocking middleware wait
//! primitive: it polls the registered sources' readiness probes at a fixed
//! interval until one reports ready or the timeout elapses.
//!
//! Responsibilities:
//! - Enforce the exact per-kind capacities the wait set was created with
//! - Latch per-slot readiness flags at the moment the wait returns
//! - Keep the flags frozen until the next `clear`
//!
//! The probe interval bounds both the wake-up latency and the idle CPU
//! cost; embedded deployments with a real blocking primitive should
//! implement [`ReadinessProvider`] over it instead.

use super::{ReadinessProvider, SlotKind, WaitCapacities, WaitOutcome, WaitSet};
use crate::error::WaitSetError;
use crate::source::Waitable;

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Interval between readiness probes while waiting.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// One registered source and its latched readiness flag.
struct Slot {
    /// The source's readiness probe.
    source: Arc<dyn Waitable>,

    /// Flag latched by the last wait; reset by `clear`.
    ready: bool,
}

/// Factory for [`PollingWaitSet`]s.
///
/// # Examples
///
/// ```rust,ignore
/// let executor = ExecutorBuilder::new(PollingProvider::new(), 4)
///     .build(&context)?;
/// ```
pub struct PollingProvider {
    /// Probe interval handed to every created wait set.
    poll_interval: Duration,
}

impl PollingProvider {
    /// Creates a provider with the default 1 ms probe interval.
    pub fn new() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Creates a provider probing at a custom interval.
    ///
    /// # Panics
    ///
    /// Panics if `poll_interval` is zero.
    pub fn with_poll_interval(poll_interval: Duration) -> Self {
        assert!(!poll_interval.is_zero(), "poll interval must be > 0");

        Self { poll_interval }
    }
}

impl Default for PollingProvider {
    /// Creates a provider with the default probe interval.
    fn default() -> Self {
        Self::new()
    }
}

impl ReadinessProvider for PollingProvider {
    type WaitSet = PollingWaitSet;

    fn create(&self, capacities: &WaitCapacities) -> Result<PollingWaitSet, WaitSetError> {
        Ok(PollingWaitSet {
            subscriptions: Vec::with_capacity(capacities.subscriptions),
            timers: Vec::with_capacity(capacities.timers),
            subscription_capacity: capacities.subscriptions,
            timer_capacity: capacities.timers,
            poll_interval: self.poll_interval,
        })
    }
}

/// Probing wait set produced by [`PollingProvider`].
///
/// Slots are allocated up front from the creation capacities; registering
/// past them fails with [`WaitSetError::SlotsExhausted`] rather than
/// growing, mirroring providers whose resources are sized once.
pub struct PollingWaitSet {
    /// Subscription slots in registration order.
    subscriptions: Vec<Slot>,

    /// Timer slots in registration order.
    timers: Vec<Slot>,

    /// Capacity fixed at creation.
    subscription_capacity: usize,

    /// Capacity fixed at creation.
    timer_capacity: usize,

    /// Interval between readiness probes while waiting.
    poll_interval: Duration,
}

impl PollingWaitSet {
    /// Probes every slot once, latching the flags.
    ///
    /// Returns `true` if any slot is ready.
    fn probe(&mut self) -> bool {
        let mut any = false;

        for slot in self.subscriptions.iter_mut().chain(self.timers.iter_mut()) {
            slot.ready = slot.source.ready();
            any |= slot.ready;
        }

        any
    }
}

impl WaitSet for PollingWaitSet {
    fn clear(&mut self) {
        for slot in self.subscriptions.iter_mut().chain(self.timers.iter_mut()) {
            slot.ready = false;
        }
    }

    fn add_subscription(&mut self, source: Arc<dyn Waitable>) -> Result<usize, WaitSetError> {
        if self.subscriptions.len() == self.subscription_capacity {
            return Err(WaitSetError::SlotsExhausted {
                kind: SlotKind::Subscription,
            });
        }

        self.subscriptions.push(Slot {
            source,
            ready: false,
        });

        Ok(self.subscriptions.len() - 1)
    }

    fn add_timer(&mut self, source: Arc<dyn Waitable>) -> Result<usize, WaitSetError> {
        if self.timers.len() == self.timer_capacity {
            return Err(WaitSetError::SlotsExhausted {
                kind: SlotKind::Timer,
            });
        }

        self.timers.push(Slot {
            source,
            ready: false,
        });

        Ok(self.timers.len() - 1)
    }

    /// Polls the registered sources until one is ready or `timeout`
    /// elapses.
    ///
    /// The sources are probed at least once, so a zero timeout still takes
    /// a readiness snapshot.
    fn wait(&mut self, timeout: Duration) -> Result<WaitOutcome, WaitSetError> {
        let deadline = Instant::now() + timeout;

        loop {
            if self.probe() {
                return Ok(WaitOutcome::Ready);
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(WaitOutcome::TimedOut);
            }

            thread::sleep(self.poll_interval.min(deadline - now));
        }
    }

    fn subscription_ready(&self, index: usize) -> bool {
        self.subscriptions.get(index).is_some_and(|slot| slot.ready)
    }

    fn timer_ready(&self, index: usize) -> bool {
        self.timers.get(index).is_some_and(|slot| slot.ready)
    }
}
