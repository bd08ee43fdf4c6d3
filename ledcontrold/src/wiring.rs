//! Builds the `Settings` snapshot and every long-lived component from
//! parsed CLI flags: the strip, the animation controller, the frame
//! arbiter, and (optionally) the animation-clock sync component.

use std::fs;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};

use ledcontrol_animation::{AnimationClock, AnimationController, LogErrorSink, SharedSettings};
use ledcontrol_arbiter::FrameArbiter;
use ledcontrol_settings::{ArtnetSettings, Group, Settings, SettingsDelta, SyncSettings};
use ledcontrol_strip::{NullTransport, Strip};
use ledcontrol_sync::SyncComponent;

use crate::cli::Cli;
use crate::patterns::{self, builtin_palettes, builtin_patterns};

const METRICS_INTERVAL: Duration = Duration::from_secs(10);

/// Everything the main loop needs to hold onto for the life of the
/// process.
pub struct Runtime {
    pub arbiter: Arc<FrameArbiter>,
    pub animation: Arc<AnimationController>,
    pub sync: Option<Mutex<SyncComponent>>,
}

/// Assembles the default `Settings` snapshot: global brightness from
/// the CLI, a single group spanning the whole strip driving the
/// rainbow-wave pattern, and the Art-Net/sync subsystem settings taken
/// from the CLI flags. A `--settings-json` file, if given, is applied
/// on top as a `SettingsDelta` (spec 4.H's CLI-only reconfiguration
/// stand-in).
pub fn build_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings {
        global_brightness: cli.brightness.clamp(0.0, 1.0),
        groups: vec![Group {
            start: 0,
            end: cli.led_count,
            pattern_id: patterns::PATTERN_RAINBOW_WAVE,
            palette_id: patterns::PALETTE_RAINBOW,
            ..Group::default()
        }],
        artnet: ArtnetSettings {
            enable_artnet: cli.enable_artnet,
            universe: cli.artnet_universe,
            channel_offset: cli.artnet_channel_offset,
            group_size: cli.artnet_group_size.max(1),
            frame_interpolation: cli.frame_interpolation.into(),
            frame_interp_size: cli.frame_interp_size.max(1),
            spatial_smoothing: cli.spatial_smoothing.into(),
            spatial_size: cli.spatial_size,
        },
        sync: SyncSettings {
            enable_sync: cli.enable_sync,
            sync_master_mode: cli.sync_master,
            sync_interval: cli.sync_interval,
        },
        ..Settings::default()
    };

    if let Some(path) = &cli.settings_json {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        let delta: SettingsDelta = serde_json::from_str(&raw)
            .with_context(|| format!("parsing settings file {}", path.display()))?;
        settings = delta.apply(&settings);
    }

    Ok(settings)
}

/// Constructs the strip, animation controller, and frame arbiter, then
/// starts whichever of {animation, Art-Net} the initial settings call
/// for (spec 4.F: the arbiter always starts `Animating`, so an initial
/// `enable_artnet` transitions immediately).
pub fn build_runtime(cli: &Cli, settings: Settings) -> Result<Runtime> {
    let order: ledcontrol_strip::ChannelOrder = cli.channel_order.into();
    let transport = NullTransport::new(cli.led_count, order.channels_per_led());
    log::warn!("no hardware transport attached; using NullTransport (development/test stand-in)");
    let strip = Arc::new(Mutex::new(Strip::new(cli.led_count, order, Box::new(transport))));

    let artnet_settings = settings.artnet.clone();
    let sync_settings = settings.sync.clone();

    let shared_settings = Arc::new(SharedSettings::new(settings));
    let clock = Arc::new(AnimationClock::new());
    let patterns = Arc::new(builtin_patterns());
    let palettes = Arc::new(builtin_palettes());

    let animation = Arc::new(
        AnimationController::new(
            Arc::clone(&strip),
            Arc::clone(&shared_settings),
            patterns,
            palettes,
            Arc::clone(&clock),
            cli.refresh_rate,
        )
        .with_error_sink(Arc::new(LogErrorSink)),
    );

    let arbiter = Arc::new(FrameArbiter::new(Arc::clone(&strip), Arc::clone(&animation), METRICS_INTERVAL));
    if artnet_settings.enable_artnet {
        arbiter.enable_artnet(artnet_settings);
    }

    let sync = if sync_settings.enable_sync {
        let mut component = SyncComponent::new(Arc::clone(&clock), sync_settings.sync_master_mode, sync_settings.sync_interval);
        component.begin();
        Some(Mutex::new(component))
    } else {
        None
    };

    Ok(Runtime { arbiter, animation, sync })
}

impl Runtime {
    /// Stops every running thread, in arbiter-then-sync order, and
    /// clears the strip (spec 4.F transition discipline applies to
    /// shutdown too: the strip should not be left mid-frame).
    pub fn shutdown(&self) {
        if let Some(sync) = &self.sync {
            sync.lock().unwrap().end();
        }
        match self.arbiter.state() {
            ledcontrol_arbiter::ArbiterState::ReceivingArtNet => self.arbiter.disable_artnet(),
            ledcontrol_arbiter::ArbiterState::Animating => self.animation.end(),
            ledcontrol_arbiter::ArbiterState::Idle => {}
        }
    }
}
