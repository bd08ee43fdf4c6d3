//! Command-line argument parsing.

use clap::{Parser, ValueEnum};

use ledcontrol_settings::{FrameInterpolation, SpatialSmoothing};
use ledcontrol_strip::ChannelOrder;

/// Drives an addressable LED strip: a local animation pipeline that can
/// surrender the frame source to an Art-Net (DMX-over-UDP) controller,
/// with an optional animation-clock sync broadcaster/listener so
/// multiple nodes stay phase-locked.
#[derive(Debug, Parser)]
#[command(name = "ledcontrold", about, long_about = None)]
pub struct Cli {
    /// Number of physical LEDs on the strip.
    #[arg(long, default_value_t = 150)]
    pub led_count: usize,

    /// Wire channel order.
    #[arg(long, value_enum, default_value_t = CliChannelOrder::Grb)]
    pub channel_order: CliChannelOrder,

    /// Animation frame rate, in Hz.
    #[arg(long, default_value_t = 60.0)]
    pub refresh_rate: f64,

    /// Initial global brightness, in [0, 1].
    #[arg(long, default_value_t = 1.0)]
    pub brightness: f32,

    /// Optional path to a JSON-encoded `SettingsDelta`, applied over the
    /// built-in defaults at startup. There is no hot-reload transport
    /// here (that's the out-of-scope HTTP/JSON-store surface); this is
    /// a one-shot load.
    #[arg(long)]
    pub settings_json: Option<std::path::PathBuf>,

    /// Start with the Art-Net receiver driving the strip instead of the
    /// local animation pipeline.
    #[arg(long)]
    pub enable_artnet: bool,

    /// ArtDMX universe to accept.
    #[arg(long, default_value_t = 0)]
    pub artnet_universe: u16,

    /// Offset into the DMX payload where LED data begins.
    #[arg(long, default_value_t = 0)]
    pub artnet_channel_offset: usize,

    /// Number of physical LEDs each DMX pixel expands to.
    #[arg(long, default_value_t = 1)]
    pub artnet_group_size: usize,

    /// Temporal conditioning applied to incoming tuples.
    #[arg(long, value_enum, default_value_t = CliFrameInterpolation::None)]
    pub frame_interpolation: CliFrameInterpolation,

    /// Ring buffer depth for temporal conditioning.
    #[arg(long, default_value_t = 1)]
    pub frame_interp_size: usize,

    /// Spatial conditioning applied across physical LEDs.
    #[arg(long, value_enum, default_value_t = CliSpatialSmoothing::None)]
    pub spatial_smoothing: CliSpatialSmoothing,

    /// Spatial kernel width, in LEDs (forced odd).
    #[arg(long, default_value_t = 1)]
    pub spatial_size: usize,

    /// Start the animation-clock sync component.
    #[arg(long)]
    pub enable_sync: bool,

    /// Broadcast as the sync master rather than listening as a slave.
    #[arg(long)]
    pub sync_master: bool,

    /// Master broadcast interval, in seconds.
    #[arg(long, default_value_t = 0.5)]
    pub sync_interval: f64,

    /// How often the hosting loop checks thread health and prints the
    /// achieved frame rate, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    pub health_poll_interval_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliChannelOrder {
    Rgb,
    Rbg,
    Grb,
    Gbr,
    Brg,
    Bgr,
    Rgbw,
    Rbgw,
    Grbw,
    Gbrw,
    Brgw,
    Bgrw,
}

impl From<CliChannelOrder> for ChannelOrder {
    fn from(order: CliChannelOrder) -> ChannelOrder {
        match order {
            CliChannelOrder::Rgb => ChannelOrder::Rgb,
            CliChannelOrder::Rbg => ChannelOrder::Rbg,
            CliChannelOrder::Grb => ChannelOrder::Grb,
            CliChannelOrder::Gbr => ChannelOrder::Gbr,
            CliChannelOrder::Brg => ChannelOrder::Brg,
            CliChannelOrder::Bgr => ChannelOrder::Bgr,
            CliChannelOrder::Rgbw => ChannelOrder::Rgbw,
            CliChannelOrder::Rbgw => ChannelOrder::Rbgw,
            CliChannelOrder::Grbw => ChannelOrder::Grbw,
            CliChannelOrder::Gbrw => ChannelOrder::Gbrw,
            CliChannelOrder::Brgw => ChannelOrder::Brgw,
            CliChannelOrder::Bgrw => ChannelOrder::Bgrw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliFrameInterpolation {
    None,
    Average,
    Lerp,
}

impl From<CliFrameInterpolation> for FrameInterpolation {
    fn from(mode: CliFrameInterpolation) -> FrameInterpolation {
        match mode {
            CliFrameInterpolation::None => FrameInterpolation::None,
            CliFrameInterpolation::Average => FrameInterpolation::Average,
            CliFrameInterpolation::Lerp => FrameInterpolation::Lerp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliSpatialSmoothing {
    None,
    Average,
    Lerp,
    Gaussian,
}

impl From<CliSpatialSmoothing> for SpatialSmoothing {
    fn from(mode: CliSpatialSmoothing) -> SpatialSmoothing {
        match mode {
            CliSpatialSmoothing::None => SpatialSmoothing::None,
            CliSpatialSmoothing::Average => SpatialSmoothing::Average,
            CliSpatialSmoothing::Lerp => SpatialSmoothing::Lerp,
            CliSpatialSmoothing::Gaussian => SpatialSmoothing::Gaussian,
        }
    }
}
