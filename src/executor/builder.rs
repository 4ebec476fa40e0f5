use super::core::{DEFAULT_WAIT_TIMEOUT, Executor};
use crate::context::ExecutionContext;
use crate::error::Result;
use crate::wait::ReadinessProvider;

use std::sync::Arc;
use std::time::Duration;

/// Builder for configuring and creating an executor.
///
/// `ExecutorBuilder` allows customizing executor parameters before
/// construction: the handle table capacity is mandatory, the default wait
/// timeout optional.
///
/// # Examples
///
/// ```rust,ignore
/// let executor = ExecutorBuilder::new(PollingProvider::new(), 4)
///     .timeout(Duration::from_millis(10))
///     .build(&context)?;
/// ```
pub struct ExecutorBuilder<P> {
    /// Factory for wait sets.
    provider: P,

    /// Handle table capacity.
    max_handles: usize,

    /// Default bound for one round's blocking wait.
    timeout: Duration,
}

impl<P: ReadinessProvider> ExecutorBuilder<P> {
    /// Creates a builder for an executor with `max_handles` capacity.
    ///
    /// By default the wait timeout is 100 ms.
    pub fn new(provider: P, max_handles: usize) -> Self {
        Self {
            provider,
            max_handles,
            timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }

    /// Sets the default bound for one round's blocking wait.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the executor with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::InvalidArgument`] if the configured
    /// capacity is zero.
    ///
    /// [`ExecutorError::InvalidArgument`]: crate::error::ExecutorError::InvalidArgument
    pub fn build<C>(self, context: &Arc<C>) -> Result<Executor<P>>
    where
        C: ExecutionContext + 'static,
    {
        let mut executor = Executor::new(self.provider, context, self.max_handles)?;
        executor.set_timeout(self.timeout);
        Ok(executor)
    }
}
