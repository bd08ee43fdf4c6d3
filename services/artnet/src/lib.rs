//! ArtDMX (Art-Net) UDP receiver (component E): packet parsing, the
//! per-LED temporal ring buffer, the spatial smoothing kernel, and the
//! receiver thread itself.

mod packet;
mod receiver;
mod spatial;
mod stats;
mod temporal;

pub use packet::{parse_art_dmx, ArtDmxPacket, ArtDmxRejection, OpCode, ARTNET_PORT};
pub use receiver::ArtnetReceiver;
pub use spatial::convolve;
pub use stats::{ArtnetStats, IntervalSummary};
pub use temporal::TemporalFilter;
