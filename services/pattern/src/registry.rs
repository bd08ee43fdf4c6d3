use std::collections::HashMap;

use crate::pattern::Pattern;

/// Holds every pattern available to a group, keyed by the numeric id
/// groups reference in their settings (spec 3 "Group", field
/// `pattern_id`). Built-ins are registered at startup; user-compiled
/// patterns (see [`crate::compile`]) are inserted under ids above the
/// built-in range.
#[derive(Default)]
pub struct PatternRegistry {
    patterns: HashMap<u32, Box<dyn Pattern>>,
}

impl PatternRegistry {
    pub fn new() -> PatternRegistry {
        PatternRegistry::default()
    }

    pub fn register(&mut self, id: u32, pattern: Box<dyn Pattern>) {
        self.patterns.insert(id, pattern);
    }

    pub fn get(&self, id: u32) -> Option<&dyn Pattern> {
        self.patterns.get(&id).map(|boxed| boxed.as_ref())
    }

    pub fn contains(&self, id: u32) -> bool {
        self.patterns.contains_key(&id)
    }

    pub fn remove(&mut self, id: u32) -> Option<Box<dyn Pattern>> {
        self.patterns.remove(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &u32> {
        self.patterns.keys()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::Solid;
    use ledcontrol_color::Hsv;

    #[test]
    fn register_then_get_roundtrips() {
        let mut reg = PatternRegistry::new();
        reg.register(0, Box::new(Solid { color: Hsv::default() }));
        assert!(reg.contains(0));
        assert!(reg.get(0).is_some());
        assert!(reg.get(1).is_none());
    }

    #[test]
    fn remove_drops_entry() {
        let mut reg = PatternRegistry::new();
        reg.register(5, Box::new(Solid { color: Hsv::default() }));
        assert!(reg.remove(5).is_some());
        assert!(!reg.contains(5));
    }
}
