//! Execution-context liveness.
//!
//! The unbounded spin drivers keep running only while the process-wide
//! execution context reports itself live. The executor never owns the
//! context; it holds a weak back-reference and checks liveness once per
//! round boundary.

use std::sync::atomic::{AtomicBool, Ordering};

/// Liveness flag shared between an embedding application and its
/// executors.
///
/// Implementations are queried once per round boundary by
/// [`spin`](crate::Executor::spin) and
/// [`spin_period`](crate::Executor::spin_period); there is no mid-round
/// cancellation.
pub trait ExecutionContext {
    /// Returns `true` while the context is live.
    ///
    /// Once this returns `false`, the unbounded spin drivers finish their
    /// current round and return.
    fn is_valid(&self) -> bool;
}

/// Default execution context backed by an atomic shutdown flag.
///
/// A fresh context is live; [`shutdown`](Self::shutdown) flips it dead
/// permanently. The flag may be flipped from any thread, which is how an
/// embedding application stops a spin loop running on its main thread.
///
/// # Examples
///
/// ```rust,ignore
/// let context = Arc::new(Context::new());
///
/// let ctx = context.clone();
/// thread::spawn(move || {
///     thread::sleep(Duration::from_secs(1));
///     ctx.shutdown();
/// });
///
/// executor.spin()?; // returns once the context is shut down
/// ```
pub struct Context {
    /// Cleared on shutdown; never set again.
    valid: AtomicBool,
}

impl Context {
    /// Creates a live context.
    pub fn new() -> Self {
        Self {
            valid: AtomicBool::new(true),
        }
    }

    /// Marks the context dead.
    ///
    /// Spin loops observe the flag at their next round boundary.
    pub fn shutdown(&self) {
        self.valid.store(false, Ordering::Release);
    }
}

impl ExecutionContext for Context {
    fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Acquire)
    }
}

impl Default for Context {
    /// Creates a live context.
    fn default() -> Self {
        Self::new()
    }
}
