use std::fmt;

/// The hardware collaborator the core consumes (spec 6 "Strip
/// transport"). Any real implementation (SPI, PWM, memory-mapped DMA) is
/// out of scope for the core; it is enough that it accept pixel writes
/// and an atomic render/commit.
pub trait StripTransport: Send {
    fn channels_per_led(&self) -> usize;
    fn set_pixel(&mut self, index: usize, r: u8, g: u8, b: u8, w: u8);
    fn set_bulk(&mut self, bytes: &[u8], offset: usize);
    fn render(&mut self) -> Result<(), TransportError>;
}

#[derive(Debug)]
pub struct TransportError(pub String);

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "strip transport error: {}", self.0)
    }
}

impl std::error::Error for TransportError {}

/// A transport that records writes in memory and never touches hardware.
/// Stands in for the out-of-scope SPI/PWM/DMA backend during development
/// and in tests.
pub struct NullTransport {
    channels_per_led: usize,
    buffer: Vec<u8>,
    render_count: u64,
}

impl NullTransport {
    pub fn new(led_count: usize, channels_per_led: usize) -> Self {
        NullTransport {
            channels_per_led,
            buffer: vec![0u8; led_count * channels_per_led],
            render_count: 0,
        }
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn render_count(&self) -> u64 {
        self.render_count
    }
}

impl StripTransport for NullTransport {
    fn channels_per_led(&self) -> usize {
        self.channels_per_led
    }

    fn set_pixel(&mut self, index: usize, r: u8, g: u8, b: u8, w: u8) {
        let cpl = self.channels_per_led;
        let base = index * cpl;
        if base + cpl > self.buffer.len() {
            return;
        }
        self.buffer[base] = r;
        self.buffer[base + 1] = g;
        self.buffer[base + 2] = b;
        if cpl == 4 {
            self.buffer[base + 3] = w;
        }
    }

    fn set_bulk(&mut self, bytes: &[u8], offset: usize) {
        let end = (offset + bytes.len()).min(self.buffer.len());
        if offset >= end {
            return;
        }
        let n = end - offset;
        self.buffer[offset..end].copy_from_slice(&bytes[..n]);
    }

    fn render(&mut self) -> Result<(), TransportError> {
        self.render_count += 1;
        Ok(())
    }
}
