use ledcontrol_color::{unpack_rgbw, ConversionParams, Pixel};

use crate::{ChannelOrder, StripTransport, TransportError};

/// Owns the strip's wire-ready pixel buffer, its channel order, and the
/// hardware transport handle (spec 4.B). `commit()` presents the buffer
/// to the LEDs atomically from the LEDs' point of view: partial updates
/// between commits are never visible.
pub struct Strip {
    /// Wire-ready bytes, `len() == count * channels_per_led()`.
    buffer: Vec<u8>,
    order: ChannelOrder,
    count: usize,
    transport: Box<dyn StripTransport>,
}

impl Strip {
    pub fn new(count: usize, order: ChannelOrder, transport: Box<dyn StripTransport>) -> Strip {
        Strip {
            buffer: vec![0u8; count * order.channels_per_led()],
            order,
            count,
            transport,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn has_white(&self) -> bool {
        self.order.has_white()
    }

    pub fn channel_order(&self) -> ChannelOrder {
        self.order
    }

    /// Wire-ready bytes as currently buffered, not yet necessarily
    /// committed to hardware. Exposed for testing and for transports that
    /// need to inspect the frame outside of `render()`.
    pub fn wire_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Write one already-packed RGBW pixel (`0xWWRRGGBB`) at `index`.
    /// Fails silently if `index >= len()`.
    pub fn set_pixel(&mut self, index: usize, packed: u32) {
        if index >= self.count {
            return;
        }
        let (r, g, b, w) = unpack_rgbw(packed);
        self.write_reordered(index, r, g, b, w);
    }

    /// Evaluate a slice of float pixels through the color pipeline and
    /// write the results starting at `start`. Indices at or beyond
    /// `len()` are skipped rather than causing an error.
    pub fn set_range(&mut self, start: usize, pixels: &[Pixel], params: &ConversionParams) {
        for (i, pixel) in pixels.iter().enumerate() {
            let index = start + i;
            if index >= self.count {
                break;
            }
            let packed = ledcontrol_color::evaluate(*pixel, params);
            self.set_pixel(index, packed);
        }
    }

    /// Write already-8-bit-quantized bytes, one tuple of
    /// `channels_per_led()` bytes per physical LED, starting at physical
    /// LED `start`. Used by the Art-Net path, which has already done its
    /// own temporal/spatial filtering and has no need to re-enter the
    /// float conversion pipeline. Channel reordering still happens here,
    /// so `bytes` is in natural `(r, g, b[, w])` order regardless of the
    /// strip's wire order. Trailing bytes that don't form a full tuple
    /// are discarded.
    pub fn set_bulk_bytes(&mut self, bytes: &[u8], start: usize) {
        let cpl = if self.has_white() { 4 } else { 3 };
        let full_tuples = bytes.len() / cpl;
        for i in 0..full_tuples {
            let index = start + i;
            if index >= self.count {
                break;
            }
            let base = i * cpl;
            let r = bytes[base];
            let g = bytes[base + 1];
            let b = bytes[base + 2];
            let w = if cpl == 4 { bytes[base + 3] } else { 0 };
            self.write_reordered(index, r, g, b, w);
        }
    }

    fn write_reordered(&mut self, index: usize, r: u8, g: u8, b: u8, w: u8) {
        let cpl = self.order.channels_per_led();
        let reordered = self.order.reorder(r, g, b, w);
        let base = index * cpl;
        self.buffer[base..base + cpl].copy_from_slice(&reordered[..cpl]);
    }

    /// Zero the buffer. Does not commit; call [`Strip::commit`] to push
    /// the cleared frame to hardware.
    pub fn clear(&mut self) {
        self.buffer.iter_mut().for_each(|b| *b = 0);
    }

    /// Push the current buffer to hardware atomically.
    pub fn commit(&mut self) -> Result<(), TransportError> {
        self.transport.set_bulk(&self.buffer, 0);
        self.transport.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NullTransport;
    use ledcontrol_color::{Rgb, RgbwAlgorithm};

    fn strip(n: usize, order: ChannelOrder) -> Strip {
        let transport = NullTransport::new(n, order.channels_per_led());
        Strip::new(n, order, Box::new(transport))
    }

    #[test]
    fn clear_then_commit_zeroes_wire_buffer() {
        let mut s = strip(8, ChannelOrder::Grbw);
        s.set_pixel(3, 0xFFFFFFFF);
        s.clear();
        s.commit().unwrap();
        assert!(s.wire_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn set_pixel_is_silently_ignored_out_of_range() {
        let mut s = strip(4, ChannelOrder::Rgb);
        s.set_pixel(100, 0x00112233);
        assert!(s.wire_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn set_bulk_bytes_reorders_and_discards_partial_trailing_tuple() {
        let mut s = strip(2, ChannelOrder::Bgr);
        // two full RGB tuples + one stray byte
        s.set_bulk_bytes(&[10, 20, 30, 40, 50, 60, 99], 0);
        assert_eq!(&s.wire_bytes()[0..3], &[30, 20, 10]);
        assert_eq!(&s.wire_bytes()[3..6], &[60, 50, 40]);
    }

    #[test]
    fn set_range_runs_pixels_through_color_pipeline() {
        let mut s = strip(1, ChannelOrder::Rgb);
        let params = ConversionParams {
            saturation: 1.0,
            brightness: 1.0,
            color_temp_kelvin: 6500.0,
            correction: Rgb { r: 1.0, g: 1.0, b: 1.0 },
            rgbw_algorithm: RgbwAlgorithm::Legacy,
            has_white: false,
            white_tint: Rgb { r: 1.0, g: 1.0, b: 1.0 },
        };
        s.set_range(0, &[Pixel::Rgb(Rgb { r: 1.0, g: 0.0, b: 0.0 })], &params);
        assert_eq!(s.wire_bytes(), &[255, 0, 0]);
    }
}
