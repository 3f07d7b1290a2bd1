//! Core primitives shared by the kernel: slot access, atomics, barrier, errors.

#[macro_use]
pub mod utils;
pub mod atomic;
pub mod barrier;
pub mod error;

pub use atomic::AtomicF64;
pub use barrier::GroupBarrier;
pub use error::HistogramError;
