//! Event sources and their contracts.
//!
//! An executor dispatches two kinds of event sources: data subscriptions
//! and timers. Both are owned by the embedding application and shared with
//! the executor through `Arc`; the traits below are the seam between the
//! executor core and whatever middleware actually produces the events.
//!
//! It includes:
//! - [`Subscription`] and [`Timer`], the per-kind primitives,
//! - [`Waitable`], the readiness probe wait sets are built from,
//! - [`Mailbox`] and [`PeriodicTimer`], ready-made in-process sources.

mod mailbox;
mod timer;

#[doc(inline)]
pub use mailbox::Mailbox;

#[doc(inline)]
pub use timer::PeriodicTimer;

use crate::error::SourceError;

/// A source that a wait set can poll for readiness.
///
/// The probe must be cheap and non-blocking: a subscription is ready when
/// it has at least one queued message, a timer when its deadline has
/// passed. Wait sets call this repeatedly while waiting, so the answer may
/// flip from `false` to `true` between calls.
pub trait Waitable {
    /// Returns `true` if the source currently has work available.
    fn ready(&self) -> bool;
}

/// Outcome of a successful [`Subscription::take`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TakeOutcome {
    /// A message was written into the output slot.
    Taken,

    /// No message was available.
    ///
    /// This can legitimately occur even after a positive readiness
    /// signal and is never treated as a failure by the executor.
    NoData,
}

/// A data subscription: a typed message queue fed by an external
/// publisher.
pub trait Subscription: Waitable {
    /// The message type delivered by this subscription.
    type Message;

    /// Moves the next available message into `out`.
    ///
    /// Returns [`TakeOutcome::NoData`] when the queue is empty; any actual
    /// transport failure is reported through the error.
    fn take(&self, out: &mut Self::Message) -> Result<TakeOutcome, SourceError>;
}

/// A timer: an externally computed expiry plus a call primitive.
///
/// The executor never computes expiry itself. It trusts the wait set's
/// readiness signal, double-checks it against [`is_ready`](Self::is_ready),
/// and delegates the actual invocation to [`call`](Self::call).
pub trait Timer: Waitable {
    /// Returns `true` if the timer's deadline has passed.
    fn is_ready(&self) -> Result<bool, SourceError>;

    /// Invokes the timer.
    ///
    /// What this does exactly (run a callback, advance the deadline,
    /// record the call time) is owned by the timer implementation.
    fn call(&self) -> Result<(), SourceError>;
}
