use atelier_types::HexColor;
use serde::{Deserialize, Serialize};

/// One color override, keyed by part name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintEntry {
    pub part: String,
    pub color: HexColor,
}

/// Per-part color overrides, in capture order.
///
/// Behaves as a map with one entry per part name; the underlying sequence
/// keeps the order parts were first captured in, which is the order the UI
/// lists them. Serializes as a plain entry array so draft files stay
/// readable and order survives a round-trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaintConfig {
    entries: Vec<PaintEntry>,
}

impl PaintConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, part: &str) -> Option<HexColor> {
        self.entries
            .iter()
            .find(|e| e.part == part)
            .map(|e| e.color)
    }

    pub fn contains(&self, part: &str) -> bool {
        self.entries.iter().any(|e| e.part == part)
    }

    /// Insert or overwrite the entry for `part`. Overwriting keeps the
    /// entry's position.
    pub fn set(&mut self, part: impl Into<String>, color: HexColor) {
        let part = part.into();
        match self.entries.iter_mut().find(|e| e.part == part) {
            Some(entry) => entry.color = color,
            None => self.entries.push(PaintEntry { part, color }),
        }
    }

    pub fn remove(&mut self, part: &str) -> Option<HexColor> {
        let index = self.entries.iter().position(|e| e.part == part)?;
        Some(self.entries.remove(index).color)
    }

    /// Keep only entries whose part name passes `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.entries.retain(|e| keep(&e.part));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, HexColor)> {
        self.entries.iter().map(|e| (e.part.as_str(), e.color))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, HexColor)> for PaintConfig {
    fn from_iter<I: IntoIterator<Item = (String, HexColor)>>(iter: I) -> Self {
        let mut config = Self::new();
        for (part, color) in iter {
            config.set(part, color);
        }
        config
    }
}
