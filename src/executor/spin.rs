//! Spin drivers: single-shot, continuous, and fixed-period round loops.

use super::core::Executor;
use super::scheduling::let_scheduling;
use crate::error::{ExecutorError, Result};
use crate::wait::{ReadinessProvider, WaitOutcome, WaitSet};

use log::{debug, info, warn};

use std::thread;
use std::time::{Duration, Instant};

impl<P: ReadinessProvider> Executor<P> {
    /// Runs exactly one scheduling round.
    ///
    /// Ensures the wait set is live, blocks up to `timeout` for readiness,
    /// then runs the two-phase round. The round runs even when the wait
    /// timed out with nothing ready — handles with
    /// [`Invocation::Always`](super::Invocation::Always) still execute —
    /// and the timeout is reported as `Ok(WaitOutcome::TimedOut)`, not as
    /// an error.
    ///
    /// # Errors
    ///
    /// Wait-set construction or wait failures, intake failures, and
    /// callback failures abort the round and are surfaced here.
    pub fn spin_some(&mut self, timeout: Duration) -> Result<WaitOutcome> {
        debug!("spin_some");

        self.prepare_wait_set()?;

        let Self {
            handles, wait_set, ..
        } = self;
        let wait_set = wait_set
            .as_mut()
            .expect("prepare_wait_set leaves a wait set in place");

        let outcome = wait_set.wait(timeout).map_err(ExecutorError::WaitSet)?;

        let_scheduling(handles, &*wait_set)?;

        Ok(outcome)
    }

    /// Runs rounds with the default timeout while the execution context
    /// is live.
    ///
    /// Returns `Ok(())` once the context goes dead. Any round error is
    /// fatal for the loop and surfaced to the caller.
    pub fn spin(&mut self) -> Result<()> {
        info!("spin: wait timeout {:?}", self.timeout);

        while self.context_is_valid() {
            self.spin_some(self.timeout)?;
        }

        Ok(())
    }

    /// Runs one round of a fixed-period loop.
    ///
    /// The first call latches the period's start. Each call runs
    /// [`spin_some`](Self::spin_some) with the default timeout, sleeps
    /// until one period after the latched boundary, then advances the
    /// boundary by exactly one period. The next boundary is computed from
    /// the previous boundary, not from the wake-up time, so wake-up
    /// jitter does not accumulate; a round that overruns its period skips
    /// the sleep and the next round starts immediately.
    ///
    /// Split out from [`spin_period`](Self::spin_period) so a single
    /// iteration can be driven under test.
    ///
    /// # Errors
    ///
    /// Round errors are surfaced before the sleep; the boundary is not
    /// advanced in that case.
    pub fn spin_one_period(&mut self, period: Duration) -> Result<WaitOutcome> {
        let invocation_time = *self.invocation_time.get_or_insert_with(Instant::now);

        let outcome = self.spin_some(self.timeout)?;

        let boundary = invocation_time + period;
        let now = Instant::now();
        if boundary > now {
            thread::sleep(boundary - now);
        }
        self.invocation_time = Some(boundary);

        Ok(outcome)
    }

    /// Runs a fixed-period loop while the execution context is live.
    ///
    /// Errors from individual rounds are logged at warn level and
    /// swallowed: a periodic control loop prefers a degraded round over
    /// stopping.
    pub fn spin_period(&mut self, period: Duration) {
        while self.context_is_valid() {
            if let Err(err) = self.spin_one_period(period) {
                warn!("spin_period: round failed: {err}");
            }
        }
    }
}
