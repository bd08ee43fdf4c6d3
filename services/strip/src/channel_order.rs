/// Wire channel order for a strip, one of the 12 permutations the
/// original driver exposed as `WS2811_STRIP_*`/`SK6812_STRIP_*`
/// constants: any ordering of R, G, B, optionally followed by W.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelOrder {
    Rgb,
    Rbg,
    #[default]
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

impl ChannelOrder {
    pub fn has_white(self) -> bool {
        matches!(
            self,
            Self::Rgbw | Self::Rbgw | Self::Grbw | Self::Gbrw | Self::Brgw | Self::Bgrw
        )
    }

    /// Bytes per LED on the wire: 4 when a white channel is present, else 3.
    pub fn channels_per_led(self) -> usize {
        if self.has_white() {
            4
        } else {
            3
        }
    }

    /// Reorder a natural `(r, g, b, w)` tuple into wire order. Only the
    /// first [`ChannelOrder::channels_per_led`] bytes of the result are
    /// meaningful.
    pub fn reorder(self, r: u8, g: u8, b: u8, w: u8) -> [u8; 4] {
        match self {
            Self::Rgb => [r, g, b, 0],
            Self::Rbg => [r, b, g, 0],
            Self::Grb => [g, r, b, 0],
            Self::Gbr => [g, b, r, 0],
            Self::Brg => [b, r, g, 0],
            Self::Bgr => [b, g, r, 0],
            Self::Rgbw => [r, g, b, w],
            Self::Rbgw => [r, b, g, w],
            Self::Grbw => [g, r, b, w],
            Self::Gbrw => [g, b, r, w],
            Self::Brgw => [b, r, g, w],
            Self::Bgrw => [b, g, r, w],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgbw_variants_report_four_channels() {
        for order in [
            ChannelOrder::Rgbw,
            ChannelOrder::Rbgw,
            ChannelOrder::Grbw,
            ChannelOrder::Gbrw,
            ChannelOrder::Brgw,
            ChannelOrder::Bgrw,
        ] {
            assert_eq!(order.channels_per_led(), 4);
            assert!(order.has_white());
        }
    }

    #[test]
    fn rgb_variants_report_three_channels() {
        for order in [
            ChannelOrder::Rgb,
            ChannelOrder::Rbg,
            ChannelOrder::Grb,
            ChannelOrder::Gbr,
            ChannelOrder::Brg,
            ChannelOrder::Bgr,
        ] {
            assert_eq!(order.channels_per_led(), 3);
            assert!(!order.has_white());
        }
    }

    #[test]
    fn grb_reorders_as_expected() {
        let out = ChannelOrder::Grb.reorder(1, 2, 3, 4);
        assert_eq!(&out[..3], &[2, 1, 3]);
    }
}
