//! Data model shared by line extraction, heading detection and rendering.
//!
//! A document enters as a flat, reading-ordered sequence of [`Line`]s and
//! leaves as a [`DocumentOutline`]. [`Heading`] is the intermediate form
//! produced after classification and fragment merging.

mod heading;
mod line;
mod outline;

pub use heading::{Heading, HeadingLevel};
pub use line::{BoundingBox, Line};
pub use outline::{DocumentOutline, OutlineEntry};
