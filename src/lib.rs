//! # Tactus
//!
//! **Tactus** is a deterministic task executor for Rust, implementing
//! logical-execution-time (LET) scheduling over a bounded set of event
//! sources, designed as the dispatch core for real-time middleware
//! clients in the **Nebula** ecosystem.
//!
//! Unlike general-purpose schedulers, Tactus executes single-threaded and
//! trades throughput tricks for guarantees a control loop can rely on:
//! callbacks always run in registration order, every round's inputs are
//! captured before any callback runs, and polling is time-bounded.
//!
//! Tactus is built from the ground up for embedded middleware use,
//! offering:
//!
//! - A **fixed-capacity handle table** for timers and data subscriptions,
//!   each with its own invocation policy
//! - **LET rounds**: a strict read-all-inputs phase followed by an
//!   execute-all-callbacks phase, so outputs never influence inputs
//!   within the same round
//! - **Three spin drivers**: single-shot, continuous, and fixed-period
//!   with drift-compensating sleep
//! - **Pluggable readiness**: any middleware wait primitive fits behind
//!   the [`wait::ReadinessProvider`] trait, with a built-in polling
//!   provider for hosts without one
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tactus::source::Mailbox;
//! use tactus::wait::PollingProvider;
//! use tactus::{Context, ExecutorBuilder, Invocation};
//!
//! let context = Arc::new(Context::new());
//! let mut executor = ExecutorBuilder::new(PollingProvider::new(), 2)
//!     .timeout(Duration::from_millis(10))
//!     .build(&context)?;
//!
//! let sensor = Arc::new(Mailbox::<f32>::new());
//! executor.add_subscription(
//!     sensor.clone(),
//!     0.0,
//!     |reading| println!("sensor: {reading}"),
//!     Invocation::OnNewData,
//! )?;
//!
//! sensor.publish(21.5);
//! executor.spin_some(Duration::from_millis(10))?;
//! ```
//!
//! ## Modules
//!
//! - [`error`] — Structured error values for all fallible operations
//! - [`source`] — Event-source contracts and ready-made in-process sources
//! - [`wait`] — Readiness-provider abstraction and the polling provider
//!
//! ## Getting Started
//!
//! Add Tactus to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! tactus = { git = "https://github.com/Nebula-ecosystem/Tactus" }
//! ```

mod context;
mod executor;

pub mod error;
pub mod source;
pub mod wait;

pub use context::{Context, ExecutionContext};
pub use error::{ExecutorError, Result};
pub use executor::{Executor, ExecutorBuilder, Invocation};
