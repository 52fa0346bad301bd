//! Nesting level assignment.
//!
//! Font size alone is not monotonic with depth across a whole document, so
//! the assigner keeps a stack of the sizes that occupy levels 1..=3 in the
//! current branch. The stack resets whenever two headings follow each other
//! with no body text in between, and whenever a larger size appears that the
//! current branch has not seen.

use std::collections::HashSet;

use crate::model::{DocumentOutline, Heading, HeadingLevel, Line, OutlineEntry};

const MAX_DEPTH: u8 = HeadingLevel::MAX_DEPTH;

/// Per-document state threaded through the heading sequence.
#[derive(Debug, Clone)]
struct LevelState {
    prev_size: f32,
    prev_depth: u8,
    prev_index: usize,
    /// Font sizes of the open levels; `stack[0]` is level 1
    stack: Vec<f32>,
}

impl LevelState {
    fn start(title: &Heading) -> Self {
        Self {
            prev_size: title.font_size,
            prev_depth: 1,
            prev_index: title.line_index,
            stack: Vec::new(),
        }
    }

    fn reset(&mut self, size: f32) -> u8 {
        self.stack.clear();
        self.stack.push(size);
        1
    }

    /// Depth for a heading that is not adjacent to its predecessor.
    fn step(&mut self, size: f32) -> u8 {
        if size == self.prev_size {
            self.prev_depth
        } else if size < self.prev_size {
            if self.prev_depth < MAX_DEPTH {
                self.stack.push(size);
                self.prev_depth + 1
            } else {
                if self.stack.len() < MAX_DEPTH as usize {
                    self.stack.push(size);
                }
                MAX_DEPTH
            }
        } else {
            match self.stack.iter().position(|&open| open == size) {
                Some(pos) => {
                    self.stack.truncate(pos + 1);
                    (pos + 1) as u8
                }
                None => self.reset(size),
            }
        }
    }

    fn advance(&mut self, heading: &Heading, depth: u8) {
        self.prev_size = heading.font_size;
        self.prev_depth = depth;
        self.prev_index = heading.line_index;
    }
}

/// Assign a level to every heading after the first and package the outline.
///
/// The first heading becomes the title. `lines` is the stream the headings
/// were detected in; headings carry their position in it.
pub fn assign_levels(headings: &[Heading], lines: &[Line]) -> DocumentOutline {
    let Some((title, rest)) = headings.split_first() else {
        return DocumentOutline::new();
    };

    let heading_lines: HashSet<usize> = headings.iter().map(|h| h.line_index).collect();
    let mut state = LevelState::start(title);
    let mut outline = Vec::with_capacity(rest.len());

    for (i, heading) in rest.iter().enumerate() {
        let size = heading.font_size;
        let depth = if i == 0 || adjacent(&heading_lines, lines, state.prev_index, heading.line_index)
        {
            state.reset(size)
        } else {
            state.step(size)
        };

        outline.push(OutlineEntry::new(
            HeadingLevel::from_depth(depth),
            heading.text.trim(),
            heading.page,
        ));
        state.advance(heading, depth);
    }

    log::debug!(
        "Assigned levels to {} headings (title: {:?})",
        outline.len(),
        title.text.trim()
    );

    DocumentOutline {
        title: Some(title.text.trim().to_string()),
        outline,
    }
}

/// Check if every line strictly between `prev` and `curr` is a heading line.
fn adjacent(heading_lines: &HashSet<usize>, lines: &[Line], prev: usize, curr: usize) -> bool {
    let start = prev + 1;
    if start >= curr {
        return true;
    }
    let end = curr.min(lines.len());
    (start..end).all(|i| heading_lines.contains(&i))
}
