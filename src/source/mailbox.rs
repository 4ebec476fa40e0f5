//! In-process subscription backed by a FIFO queue.

use super::{Subscription, TakeOutcome, Waitable};
use crate::error::SourceError;

use std::collections::VecDeque;
use std::sync::Mutex;

/// A ready-made [`Subscription`] with an in-process publish side.
///
/// A `Mailbox` queues published messages in FIFO order; each
/// [`take`](Subscription::take) pops the oldest one. It is the reference
/// source for hosts that have no external middleware, and the publish side
/// may be driven from any thread.
///
/// An optional bound caps the queue depth: when a bounded mailbox is full,
/// publishing drops the oldest queued message, so the queue always holds
/// the most recent `bound` messages.
///
/// # Examples
///
/// ```rust,ignore
/// let mailbox = Arc::new(Mailbox::<u32>::new());
///
/// mailbox.publish(7);
/// executor.add_subscription(mailbox.clone(), 0, |n| println!("{n}"), Invocation::OnNewData)?;
/// ```
pub struct Mailbox<M> {
    /// Queued messages, oldest first.
    queue: Mutex<VecDeque<M>>,

    /// Maximum queue depth; `None` means unbounded.
    bound: Option<usize>,
}

impl<M> Mailbox<M> {
    /// Creates an unbounded mailbox.
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            bound: None,
        }
    }

    /// Creates a mailbox holding at most `bound` messages.
    ///
    /// When full, publishing drops the oldest queued message.
    ///
    /// # Panics
    ///
    /// Panics if `bound == 0`.
    pub fn bounded(bound: usize) -> Self {
        assert!(bound > 0, "mailbox bound must be > 0");

        Self {
            queue: Mutex::new(VecDeque::with_capacity(bound)),
            bound: Some(bound),
        }
    }

    /// Queues a message for the subscriber.
    pub fn publish(&self, message: M) {
        let mut queue = self.queue.lock().expect("mailbox queue poisoned");

        if let Some(bound) = self.bound {
            if queue.len() == bound {
                queue.pop_front();
            }
        }

        queue.push_back(message);
    }

    /// Number of currently queued messages.
    pub fn len(&self) -> usize {
        self.queue.lock().expect("mailbox queue poisoned").len()
    }

    /// Returns `true` if no message is queued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<M> Default for Mailbox<M> {
    /// Creates an unbounded mailbox.
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Waitable for Mailbox<M> {
    fn ready(&self) -> bool {
        !self.is_empty()
    }
}

impl<M> Subscription for Mailbox<M> {
    type Message = M;

    /// Pops the oldest queued message into `out`.
    fn take(&self, out: &mut M) -> Result<TakeOutcome, SourceError> {
        let mut queue = self.queue.lock().expect("mailbox queue poisoned");

        match queue.pop_front() {
            Some(message) => {
                *out = message;
                Ok(TakeOutcome::Taken)
            }
            None => Ok(TakeOutcome::NoData),
        }
    }
}
