//! Font size statistics for a line stream.

use std::collections::HashMap;

use crate::model::Line;

/// Font size histogram of one document.
///
/// Sizes are keyed by their exact bit pattern: two lines share a size only
/// when the extractor reported the identical value.
#[derive(Debug, Clone, Default)]
pub struct FontStatistics {
    counts: HashMap<u32, usize>,
    /// Distinct sizes in first-seen order
    order: Vec<f32>,
}

impl FontStatistics {
    /// Build statistics from a line stream.
    pub fn from_lines(lines: &[Line]) -> Self {
        let mut stats = Self::default();
        for line in lines {
            stats.add_size(line.font_size);
        }
        stats
    }

    /// Add a font size observation.
    pub fn add_size(&mut self, size: f32) {
        let count = self.counts.entry(size.to_bits()).or_insert(0);
        if *count == 0 {
            self.order.push(size);
        }
        *count += 1;
    }

    /// Number of lines observed with `size`.
    pub fn count(&self, size: f32) -> usize {
        self.counts.get(&size.to_bits()).copied().unwrap_or(0)
    }

    /// Distinct sizes in first-seen order.
    pub fn sizes(&self) -> &[f32] {
        &self.order
    }

    /// Check if no size was observed.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Most frequent size, ties going to the size seen first.
    pub fn body_size(&self) -> Option<f32> {
        let mut best: Option<(f32, usize)> = None;
        for &size in &self.order {
            let count = self.count(size);
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((size, count)),
            }
        }
        best.map(|(size, _)| size)
    }

    /// Most frequent size, or `fallback` when nothing was observed.
    pub fn body_size_or(&self, fallback: f32) -> f32 {
        self.body_size().unwrap_or(fallback)
    }
}
