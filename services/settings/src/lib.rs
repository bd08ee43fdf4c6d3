//! Configuration snapshots and partial-update deltas shared by the
//! animation, Art-Net, and sync components (component H, partial).

mod artnet_settings;
mod delta;
mod group;
mod settings;
mod sync_settings;

pub use artnet_settings::{ArtnetSettings, ArtnetSettingsDelta, FrameInterpolation, SpatialSmoothing};
pub use delta::SettingsDelta;
pub use group::{Group, GroupDelta};
pub use settings::Settings;
pub use sync_settings::{SyncSettings, SyncSettingsDelta};
