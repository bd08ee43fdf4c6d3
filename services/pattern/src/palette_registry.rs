use std::collections::HashMap;

use crate::Palette;

/// Holds every palette available to a group, keyed by the numeric id
/// groups reference in their settings (spec 3 "Group", field
/// `palette_id`). Mirrors [`crate::PatternRegistry`]'s shape since
/// palettes and patterns are looked up the same way, by group.
#[derive(Default)]
pub struct PaletteRegistry {
    palettes: HashMap<u32, Palette>,
}

impl PaletteRegistry {
    pub fn new() -> PaletteRegistry {
        PaletteRegistry::default()
    }

    pub fn register(&mut self, id: u32, palette: Palette) {
        self.palettes.insert(id, palette);
    }

    pub fn get(&self, id: u32) -> Option<&Palette> {
        self.palettes.get(&id)
    }

    pub fn remove(&mut self, id: u32) -> Option<Palette> {
        self.palettes.remove(&id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.palettes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledcontrol_color::Hsv;

    #[test]
    fn register_then_get_roundtrips() {
        let mut reg = PaletteRegistry::new();
        reg.register(0, Palette::new(vec![(0.0, Hsv::default())]));
        assert!(reg.contains(0));
        assert!(reg.get(0).is_some());
        assert!(reg.get(1).is_none());
    }
}
