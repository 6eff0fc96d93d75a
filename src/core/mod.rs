//! Generic concurrent staged-pipeline runtime.
//!
//! A stage is any function from a stream of `T` to a stream of `T`, running
//! under a shared [`cancel::CancelScope`]. [`stage`] provides the five
//! composition primitives (map, filter, parallelize, tee, discard/wait);
//! [`pipeline`] links a source and an ordered list of stages into one run.

pub mod cancel;
pub mod channel;
pub mod pipeline;
pub mod stage;

pub use cancel::{CancelScope, StopLatch};
pub use pipeline::{Source, run_pipeline};
pub use stage::{discard, filter, map, parallelize, tee, wait};
