//! Animation-clock synchronization (component G): a broadcast UDP
//! protocol that distributes the master's animation time so slave
//! nodes align their phase.

mod component;
mod master;
mod packet;
mod slave;

pub use component::SyncComponent;
pub use master::SyncMaster;
pub use packet::{decode, encode, SYNC_PORT};
pub use slave::SyncSlave;
