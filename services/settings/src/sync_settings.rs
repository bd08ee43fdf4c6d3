use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncSettings {
    pub enable_sync: bool,
    pub sync_master_mode: bool,
    pub sync_interval: f64,
}

impl Default for SyncSettings {
    fn default() -> SyncSettings {
        SyncSettings {
            enable_sync: false,
            sync_master_mode: false,
            sync_interval: 0.5,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncSettingsDelta {
    #[serde(default)]
    pub enable_sync: Option<bool>,
    #[serde(default)]
    pub sync_master_mode: Option<bool>,
    #[serde(default)]
    pub sync_interval: Option<f64>,
}

impl SyncSettingsDelta {
    pub fn apply(&self, base: &SyncSettings) -> SyncSettings {
        SyncSettings {
            enable_sync: self.enable_sync.unwrap_or(base.enable_sync),
            sync_master_mode: self.sync_master_mode.unwrap_or(base.sync_master_mode),
            sync_interval: self.sync_interval.unwrap_or(base.sync_interval),
        }
    }
}
