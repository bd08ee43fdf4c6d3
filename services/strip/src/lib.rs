//! Strip abstraction (component B): owns the wire-ready pixel buffer,
//! the channel order, and the hardware transport handle.

mod channel_order;
mod strip;
mod transport;

pub use channel_order::ChannelOrder;
pub use strip::Strip;
pub use transport::{NullTransport, StripTransport, TransportError};
