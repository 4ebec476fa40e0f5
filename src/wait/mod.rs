//! Readiness-provider abstraction.
//!
//! This module provides a unified interface over readiness-polling
//! backends (a middleware wait primitive, or the built-in polling
//! provider).
//!
//! A wait set is used by the executor to:
//! - block until at least one registered source becomes ready,
//! - expose per-slot readiness flags afterwards,
//! - keep those flags frozen for the duration of one scheduling round.
//!
//! The executor rebuilds its wait set whenever the handle table changes
//! shape, so a [`ReadinessProvider`] must be able to produce fresh,
//! exactly-sized wait sets on demand.

mod polling;

#[doc(inline)]
pub use polling::{PollingProvider, PollingWaitSet};

use crate::error::WaitSetError;
use crate::source::Waitable;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// The kind of slot a wait set entry occupies.
///
/// Subscription and timer slots are indexed independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// A data-subscription slot.
    Subscription,
    /// A timer slot.
    Timer,
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotKind::Subscription => write!(f, "subscription"),
            SlotKind::Timer => write!(f, "timer"),
        }
    }
}

/// Outcome of a bounded [`WaitSet::wait`].
///
/// A wait that elapses with nothing ready is an expected, non-fatal
/// outcome: the scheduling round still runs (handles with an `Always`
/// invocation policy execute regardless of readiness).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// At least one registered source became ready.
    Ready,

    /// The timeout elapsed with no source ready.
    TimedOut,
}

/// Per-kind slot counts used to size a wait set exactly.
///
/// The executor tallies these as handles are registered and passes them to
/// [`ReadinessProvider::create`]. Undersizing is a provider error;
/// oversizing wastes slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaitCapacities {
    /// Number of subscription slots.
    pub subscriptions: usize,

    /// Number of timer slots.
    pub timers: usize,

    /// Guard-condition slots. Reserved; the executor registers none.
    pub guard_conditions: usize,

    /// Service-client slots. Reserved; the executor registers none.
    pub clients: usize,

    /// Service-server slots. Reserved; the executor registers none.
    pub services: usize,

    /// Event slots. Reserved; the executor registers none.
    pub events: usize,
}

/// A readiness-polling resource over a fixed set of registered sources.
///
/// Lifecycle, driven by the executor:
/// 1. created exactly-sized via [`ReadinessProvider::create`],
/// 2. every handle registered once, in table order,
/// 3. per round: [`clear`](Self::clear), [`wait`](Self::wait), then the
///    per-slot readiness queries,
/// 4. dropped whenever the handle table changes shape.
///
/// Readiness flags are latched by `wait` and reset only by `clear`, so
/// both phases of a scheduling round observe one frozen snapshot.
pub trait WaitSet {
    /// Resets all per-slot readiness flags.
    ///
    /// Registrations persist; only the flags from the previous wait are
    /// discarded.
    fn clear(&mut self);

    /// Registers a subscription source and returns its slot index.
    fn add_subscription(&mut self, source: Arc<dyn Waitable>) -> Result<usize, WaitSetError>;

    /// Registers a timer source and returns its slot index.
    fn add_timer(&mut self, source: Arc<dyn Waitable>) -> Result<usize, WaitSetError>;

    /// Blocks until a registered source is ready or `timeout` elapses.
    ///
    /// On return the per-slot readiness flags reflect what was observed;
    /// they stay frozen until the next [`clear`](Self::clear).
    fn wait(&mut self, timeout: Duration) -> Result<WaitOutcome, WaitSetError>;

    /// Readiness flag of the subscription slot at `index`.
    ///
    /// Returns `false` for out-of-range indices.
    fn subscription_ready(&self, index: usize) -> bool;

    /// Readiness flag of the timer slot at `index`.
    ///
    /// Returns `false` for out-of-range indices.
    fn timer_ready(&self, index: usize) -> bool;
}

/// Factory for wait sets.
///
/// The executor owns one provider and asks it for a fresh wait set
/// whenever the current one has been invalidated by a registration.
pub trait ReadinessProvider {
    /// The wait-set resource this provider produces.
    type WaitSet: WaitSet;

    /// Creates a wait set sized exactly to `capacities`.
    fn create(&self, capacities: &WaitCapacities) -> Result<Self::WaitSet, WaitSetError>;
}
