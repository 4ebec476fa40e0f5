//! The logical-execution-time scheduling round.
//!
//! One round is two strict phases over the same snapshot of the handle
//! table, in table order:
//!
//! 1. **Intake** — every handle's readiness flag is consumed and any
//!    available input is copied into its slot. No callback runs here.
//! 2. **Execution** — every due callback runs, in the same order.
//!
//! Splitting the full-table scans (instead of interleaving read and
//! execute per handle) is what decouples "what data a round sees" from
//! "when callbacks run within the round": a message produced by an
//! earlier handle's callback cannot reach a later handle until the next
//! round, because all input was captured before any callback ran.

use super::handle::{Entry, Handle, Invocation};
use crate::error::{ExecutorError, Result};
use crate::source::TakeOutcome;
use crate::wait::WaitSet;

use log::error;

/// Runs one full round over `handles` against the latched readiness flags
/// in `wait_set`.
///
/// An intake failure aborts the round before any callback has run; an
/// execution failure aborts the remaining callbacks, and the ones already
/// run are not rolled back.
pub(super) fn let_scheduling<W: WaitSet>(handles: &mut [Handle], wait_set: &W) -> Result<()> {
    for handle in handles.iter_mut() {
        read_input_data(handle, wait_set)?;
    }

    for handle in handles.iter_mut() {
        execute_handle(handle)?;
    }

    Ok(())
}

/// Phase 1 for one handle: consume its readiness flag and capture input.
///
/// Mutates only the handle's `data_available` flag and (for
/// subscriptions) its message slot.
fn read_input_data<W: WaitSet>(handle: &mut Handle, wait_set: &W) -> Result<()> {
    handle.data_available = false;

    match &mut handle.entry {
        Entry::Subscription(subscription) => {
            if wait_set.subscription_ready(handle.wait_set_index) {
                // A drained queue despite a positive readiness signal is
                // expected; anything else aborts the round.
                match subscription.take()? {
                    TakeOutcome::Taken => handle.data_available = true,
                    TakeOutcome::NoData => {}
                }
            }
        }

        Entry::Timer(timer) => {
            if wait_set.timer_ready(handle.wait_set_index) {
                // The timer's own expiry check must agree with the wait
                // set's signal.
                if timer.is_ready()? {
                    handle.data_available = true;
                } else {
                    error!("wait set signaled a timer that denies being expired");
                    return Err(ExecutorError::TimerNotReady);
                }
            }
        }
    }

    Ok(())
}

/// Phase 2 for one handle: invoke its callback if it is due.
fn execute_handle(handle: &mut Handle) -> Result<()> {
    let invoke = match handle.invocation {
        Invocation::Always => true,
        Invocation::OnNewData => handle.data_available,
    };

    if !invoke {
        return Ok(());
    }

    match &mut handle.entry {
        Entry::Subscription(subscription) => subscription.invoke(),
        Entry::Timer(timer) => timer.call()?,
    }

    Ok(())
}
