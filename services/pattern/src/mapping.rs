/// Maps a physical LED index onto a user-defined coordinate space. The
/// default mapping is the one named in the spec's pattern data model:
/// `x = i/N`, `y = z = 0`.
#[derive(Debug, Clone)]
pub struct PixelMapping {
    coords: Vec<(f32, f32, f32)>,
}

impl PixelMapping {
    pub fn default_linear(count: usize) -> PixelMapping {
        let coords = (0..count)
            .map(|i| {
                let x = if count > 1 {
                    i as f32 / count as f32
                } else {
                    0.0
                };
                (x, 0.0, 0.0)
            })
            .collect();
        PixelMapping { coords }
    }

    pub fn from_coords(coords: Vec<(f32, f32, f32)>) -> PixelMapping {
        PixelMapping { coords }
    }

    pub fn get(&self, index: usize) -> (f32, f32, f32) {
        self.coords.get(index).copied().unwrap_or((0.0, 0.0, 0.0))
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}
