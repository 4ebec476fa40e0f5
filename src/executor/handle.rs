//! Handle table entries.

use crate::error::SourceError;
use crate::source::{Subscription, TakeOutcome, Timer, Waitable};
use crate::wait::SlotKind;

use std::sync::Arc;

/// Rule determining whether a handle's callback runs in a given round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// Invoke only in rounds where the intake phase captured new data
    /// (a taken message, or a confirmed timer expiry).
    OnNewData,

    /// Invoke every round, regardless of readiness.
    Always,
}

/// Type-erased subscription bundle: the source, the owned message slot,
/// and the callback.
///
/// Erasing the message type here keeps the handle table homogeneous while
/// each subscription stays fully typed internally.
pub(crate) trait SubscriptionEntry {
    /// Moves the next available message into the owned slot.
    fn take(&mut self) -> Result<TakeOutcome, SourceError>;

    /// Invokes the callback with the slot's current contents.
    fn invoke(&mut self);
}

/// The typed implementation behind a `Box<dyn SubscriptionEntry>`.
pub(crate) struct TypedSubscription<S: Subscription, F> {
    /// Shared handle to the externally-owned source.
    pub(crate) source: Arc<S>,

    /// Message slot written by intake, read by the callback.
    pub(crate) slot: S::Message,

    /// Invoked with a reference to the slot.
    pub(crate) callback: F,
}

impl<S, F> SubscriptionEntry for TypedSubscription<S, F>
where
    S: Subscription,
    F: FnMut(&S::Message),
{
    fn take(&mut self) -> Result<TakeOutcome, SourceError> {
        self.source.take(&mut self.slot)
    }

    fn invoke(&mut self) {
        (self.callback)(&self.slot)
    }
}

/// The kind-specific payload of a handle.
pub(crate) enum Entry {
    /// A subscription with its slot and callback.
    Subscription(Box<dyn SubscriptionEntry>),

    /// A timer; invocation is delegated to its own call primitive.
    Timer(Arc<dyn Timer>),
}

/// One registered event source.
pub(crate) struct Handle {
    /// Kind-specific payload.
    pub(crate) entry: Entry,

    /// Registration identity handed to wait sets.
    pub(crate) waitable: Arc<dyn Waitable>,

    /// Whether readiness is required to trigger execution.
    pub(crate) invocation: Invocation,

    /// Slot this handle occupies in the current wait set.
    ///
    /// Assigned fresh on every rebuild; meaningless while the executor
    /// holds no wait set.
    pub(crate) wait_set_index: usize,

    /// Set by the current round's intake phase, consumed by its execution
    /// phase. Never carried across rounds.
    pub(crate) data_available: bool,
}

impl Handle {
    /// Creates a subscription handle.
    pub(crate) fn subscription(
        entry: Box<dyn SubscriptionEntry>,
        waitable: Arc<dyn Waitable>,
        invocation: Invocation,
    ) -> Self {
        Self {
            entry: Entry::Subscription(entry),
            waitable,
            invocation,
            wait_set_index: 0,
            data_available: false,
        }
    }

    /// Creates a timer handle.
    pub(crate) fn timer(
        timer: Arc<dyn Timer>,
        waitable: Arc<dyn Waitable>,
        invocation: Invocation,
    ) -> Self {
        Self {
            entry: Entry::Timer(timer),
            waitable,
            invocation,
            wait_set_index: 0,
            data_available: false,
        }
    }

    /// The wait-set slot kind this handle registers under.
    pub(crate) fn slot_kind(&self) -> SlotKind {
        match self.entry {
            Entry::Subscription(_) => SlotKind::Subscription,
            Entry::Timer(_) => SlotKind::Timer,
        }
    }
}
