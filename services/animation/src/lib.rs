//! Animation controller (component D): the per-frame loop, group
//! evaluation, the shared animation clock, and the shared settings
//! snapshot both the animation thread and the Art-Net receiver read.

mod clock;
mod controller;
mod error_sink;
mod fps;
mod shared_settings;
mod sink;

pub use clock::AnimationClock;
pub use controller::AnimationController;
pub use error_sink::{ErrorSink, LogErrorSink, NullErrorSink};
pub use fps::FpsCounter;
pub use shared_settings::SharedSettings;
pub use sink::{FrameSink, NullSink, ThrottledSink};
