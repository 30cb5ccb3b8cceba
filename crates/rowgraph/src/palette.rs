//! Color assignment for entity types.
//!
//! The builder asks its [`Palette`] for a color whenever a class has no
//! explicit color. Assignments are memoized per palette instance, so two
//! builders never see each other's choices.

use std::collections::HashMap;

/// Default color cycle (Tableau 10).
pub const DEFAULT_COLORS: [&str; 10] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#ff9da7",
    "#9c755f", "#bab0ac",
];

/// Source of display colors for entity types.
pub trait Palette {
    /// Color for `entity_type`. Repeated calls with the same type return the
    /// same color.
    fn color_for(&mut self, entity_type: &str) -> String;
}

/// Palette that hands out colors from a fixed list in first-request order,
/// wrapping around when the list is exhausted.
#[derive(Debug, Clone)]
pub struct CyclingPalette {
    colors: Vec<String>,
    assigned: HashMap<String, String>,
}

impl CyclingPalette {
    /// Create a palette cycling through `colors`.
    ///
    /// An empty list falls back to [`DEFAULT_COLORS`].
    #[must_use]
    pub fn new(colors: Vec<String>) -> Self {
        let colors = if colors.is_empty() {
            DEFAULT_COLORS.iter().map(ToString::to_string).collect()
        } else {
            colors
        };
        Self {
            colors,
            assigned: HashMap::new(),
        }
    }

    /// Number of types that have been assigned a color.
    #[must_use]
    pub fn assigned_count(&self) -> usize {
        self.assigned.len()
    }
}

impl Default for CyclingPalette {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Palette for CyclingPalette {
    fn color_for(&mut self, entity_type: &str) -> String {
        if let Some(color) = self.assigned.get(entity_type) {
            return color.clone();
        }
        let color = self.colors[self.assigned.len() % self.colors.len()].clone();
        self.assigned.insert(entity_type.to_string(), color.clone());
        color
    }
}
