//! Structured error values for executor operations.
//!
//! Every fallible operation in this crate reports failures through the
//! types below instead of a process-global error channel. [`ExecutorError`]
//! is the top-level type produced by the executor itself; it wraps
//! [`WaitSetError`] and [`SourceError`] values reported by the external
//! collaborators (the readiness provider and the event sources).
//!
//! A bounded wait that elapses with nothing ready is *not* an error: it is
//! reported as [`WaitOutcome::TimedOut`](crate::wait::WaitOutcome) so the
//! unbounded spin drivers can keep looping without inspecting error values.

use crate::wait::SlotKind;

use std::error::Error;
use std::fmt;

/// Convenience alias for results produced by executor operations.
pub type Result<T> = std::result::Result<T, ExecutorError>;

/// An error reported by an executor operation.
#[derive(Debug)]
pub enum ExecutorError {
    /// A configuration argument was out of range.
    ///
    /// No executor state is mutated when this is returned.
    InvalidArgument(&'static str),

    /// The handle table is full.
    ///
    /// The table capacity is fixed at construction; the rejected
    /// registration leaves all prior state untouched.
    CapacityExceeded {
        /// Capacity the executor was constructed with.
        max_handles: usize,
    },

    /// The wait set reported a timer as expired, but the timer's own
    /// expiry check denied it.
    ///
    /// The two checks must never legitimately disagree, so the round is
    /// aborted rather than the signal being second-guessed.
    TimerNotReady,

    /// The readiness provider failed while building, registering into,
    /// or waiting on a wait set.
    WaitSet(WaitSetError),

    /// A subscription take or timer primitive failed.
    Source(SourceError),
}

impl fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutorError::InvalidArgument(what) => {
                write!(f, "invalid argument: {what}")
            }
            ExecutorError::CapacityExceeded { max_handles } => {
                write!(f, "handle table full ({max_handles} handles)")
            }
            ExecutorError::TimerNotReady => {
                write!(f, "wait set signaled a timer that denies being expired")
            }
            ExecutorError::WaitSet(err) => write!(f, "wait set failure: {err}"),
            ExecutorError::Source(err) => write!(f, "source failure: {err}"),
        }
    }
}

impl Error for ExecutorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ExecutorError::WaitSet(err) => Some(err),
            ExecutorError::Source(err) => Some(err),
            _ => None,
        }
    }
}

impl From<WaitSetError> for ExecutorError {
    fn from(err: WaitSetError) -> Self {
        ExecutorError::WaitSet(err)
    }
}

impl From<SourceError> for ExecutorError {
    fn from(err: SourceError) -> Self {
        ExecutorError::Source(err)
    }
}

/// An error reported by a [`WaitSet`](crate::wait::WaitSet) or by
/// [`ReadinessProvider::create`](crate::wait::ReadinessProvider::create).
#[derive(Debug)]
pub enum WaitSetError {
    /// A registration exceeded the capacity the wait set was created with.
    ///
    /// Wait sets are sized exactly from the executor's per-kind counts, so
    /// this indicates a provider that did not honor the requested
    /// capacities.
    SlotsExhausted {
        /// The kind of slot that ran out.
        kind: SlotKind,
    },

    /// A failure reported by the provider backend.
    Backend(Box<dyn Error + Send + Sync>),
}

impl WaitSetError {
    /// Wraps a backend failure.
    pub fn backend(err: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        WaitSetError::Backend(err.into())
    }
}

impl fmt::Display for WaitSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitSetError::SlotsExhausted { kind } => {
                write!(f, "no free {kind} slot in the wait set")
            }
            WaitSetError::Backend(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WaitSetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WaitSetError::Backend(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

/// An opaque failure reported by an event-source primitive
/// (a subscription take, or a timer expiry check or call).
#[derive(Debug)]
pub struct SourceError(Box<dyn Error + Send + Sync>);

impl SourceError {
    /// Wraps an arbitrary source failure.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// return Err(SourceError::new("transport disconnected"));
    /// ```
    pub fn new(err: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        SourceError(err.into())
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.0.as_ref())
    }
}
