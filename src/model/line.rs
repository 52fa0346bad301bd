//! Positioned text lines, the input of heading detection.

use serde::{Deserialize, Serialize};

/// One reading-order line of extracted text with its typographic metadata.
///
/// Lines are produced page-major, top to bottom. Heading detection relies on
/// that order and never re-sorts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Trimmed rendered text
    pub text: String,

    /// Dominant font size in points
    #[serde(alias = "size")]
    pub font_size: f32,

    /// Dominant font name (e.g., "Helvetica-Bold")
    #[serde(alias = "font", default)]
    pub font_name: String,

    /// Whether every span of the line is set in a bold face
    #[serde(alias = "bold", default)]
    pub is_bold: bool,

    /// 1-indexed page number
    pub page: u32,

    /// Distance of the baseline from the top of the page
    #[serde(default)]
    pub top: f32,

    /// Leftmost X position
    #[serde(default)]
    pub left: f32,

    /// Bounding box in top-down page coordinates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,

    /// Leading list marker such as "1.2." or "(a)"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numbering: Option<String>,
}

impl Line {
    /// Create a line with the fields heading detection looks at.
    pub fn new(
        text: impl Into<String>,
        font_size: f32,
        font_name: impl Into<String>,
        is_bold: bool,
        page: u32,
    ) -> Self {
        Self {
            text: text.into(),
            font_size,
            font_name: font_name.into(),
            is_bold,
            page,
            top: 0.0,
            left: 0.0,
            bbox: None,
            numbering: None,
        }
    }

    /// Set the position of the line on its page.
    pub fn with_position(mut self, left: f32, top: f32) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    /// Set the bounding box.
    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    /// Trimmed text of the line.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }
}

/// Axis-aligned rectangle in top-down page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BoundingBox {
    /// Create a bounding box from its edges.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}
