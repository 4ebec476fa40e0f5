//! Executor core: handle table, wait-set lifecycle, scheduling, drivers.
//!
//! This module implements the logical-execution-time executor.
//! The executor is responsible for:
//! - storing registered event sources in a fixed-capacity handle table,
//! - rebuilding the wait set exactly when the table changes shape,
//! - running read-then-execute scheduling rounds in registration order,
//! - driving rounds single-shot, continuously, or at a fixed period.
//!
//! Rounds run entirely on the caller's thread; the only suspension points
//! are the bounded wait and the periodic driver's sleep.

mod builder;
mod core;
mod handle;
mod scheduling;
mod spin;

pub use builder::ExecutorBuilder;
pub use core::Executor;
pub use handle::Invocation;
