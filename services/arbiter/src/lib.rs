//! Frame arbiter (component F): enforces that at most one of {local
//! animation, Art-Net stream} drives the strip at a time, and that
//! transitions between them are glitch-free.

mod arbiter;

pub use arbiter::{ArbiterState, FrameArbiter};
