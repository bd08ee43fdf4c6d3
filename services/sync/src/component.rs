use std::sync::Arc;

use ledcontrol_animation::AnimationClock;

use crate::master::SyncMaster;
use crate::slave::SyncSlave;

enum Mode {
    Master(SyncMaster),
    Slave(SyncSlave),
}

/// Animation-clock synchronization (component G): a single component
/// that is either a broadcaster or a listener depending on
/// `sync_master_mode`, mirroring `AnimationSyncServer`'s mode switch in
/// the original driver.
pub struct SyncComponent {
    mode: Mode,
}

impl SyncComponent {
    pub fn new(clock: Arc<AnimationClock>, master_mode: bool, sync_interval: f64) -> SyncComponent {
        let mode = if master_mode {
            Mode::Master(SyncMaster::new(clock, sync_interval))
        } else {
            Mode::Slave(SyncSlave::new(clock))
        };
        SyncComponent { mode }
    }

    pub fn begin(&mut self) -> bool {
        match &mut self.mode {
            Mode::Master(master) => {
                master.begin();
                true
            }
            Mode::Slave(slave) => slave.begin(),
        }
    }

    pub fn end(&mut self) {
        match &mut self.mode {
            Mode::Master(master) => master.end(),
            Mode::Slave(slave) => slave.end(),
        }
    }

    pub fn is_running(&self) -> bool {
        match &self.mode {
            Mode::Master(master) => master.is_running(),
            Mode::Slave(slave) => slave.is_running(),
        }
    }

    pub fn is_master(&self) -> bool {
        matches!(self.mode, Mode::Master(_))
    }
}
