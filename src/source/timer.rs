//! Periodic timer with deadline bookkeeping and an owned callback.

use super::{Timer, Waitable};
use crate::error::SourceError;

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// State guarded together so the deadline and the callback cannot be
/// observed out of step.
struct TimerState {
    /// The time at which the timer next fires.
    next_deadline: Instant,

    /// Invoked on every [`Timer::call`].
    callback: Box<dyn FnMut() + Send>,
}

/// A ready-made [`Timer`] firing at a fixed period.
///
/// The first deadline is one period after construction. [`call`] runs the
/// callback and, if the deadline has passed, advances it by whole periods
/// until it lies in the future again — so a timer that missed several
/// periods fires once and resynchronizes instead of replaying the backlog.
/// Calling early (an `Always`-policy handle does this every round) leaves
/// the schedule untouched.
///
/// [`call`]: Timer::call
///
/// # Examples
///
/// ```rust,ignore
/// let timer = Arc::new(PeriodicTimer::new(Duration::from_millis(100), || {
///     println!("tick");
/// }));
///
/// executor.add_timer(timer, Invocation::OnNewData)?;
/// ```
pub struct PeriodicTimer {
    /// Interval between deadlines.
    period: Duration,

    /// Deadline and callback, guarded together.
    state: Mutex<TimerState>,
}

impl PeriodicTimer {
    /// Creates a timer firing every `period`, starting one period from
    /// now.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn new(period: Duration, callback: impl FnMut() + Send + 'static) -> Self {
        assert!(!period.is_zero(), "timer period must be > 0");

        Self {
            period,
            state: Mutex::new(TimerState {
                next_deadline: Instant::now() + period,
                callback: Box::new(callback),
            }),
        }
    }

    /// Interval between deadlines.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time remaining until the next deadline; zero if it has passed.
    pub fn time_until_next_call(&self) -> Duration {
        let state = self.state.lock().expect("timer state poisoned");
        state.next_deadline.saturating_duration_since(Instant::now())
    }
}

impl Waitable for PeriodicTimer {
    fn ready(&self) -> bool {
        let state = self.state.lock().expect("timer state poisoned");
        Instant::now() >= state.next_deadline
    }
}

impl Timer for PeriodicTimer {
    fn is_ready(&self) -> Result<bool, SourceError> {
        Ok(self.ready())
    }

    /// Runs the callback, then advances an expired deadline by whole
    /// periods until it lies in the future.
    fn call(&self) -> Result<(), SourceError> {
        let mut state = self.state.lock().expect("timer state poisoned");

        (state.callback)();

        let now = Instant::now();
        while state.next_deadline <= now {
            state.next_deadline += self.period;
        }

        Ok(())
    }
}
