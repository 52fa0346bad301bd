//! Content stream analysis: positioned text spans and baseline grouping.

use std::collections::HashMap;

use lopdf::{Document as LopdfDocument, Encoding, Object, ObjectId};

use crate::error::{Error, Result};

/// Leading used by `T*`, `'` and `"` when the stream never sets `TL`.
const DEFAULT_LEADING: f32 = 12.0;

/// A text span with position and style information.
#[derive(Debug, Clone)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline, PDF user space, bottom-up)
    pub y: f32,
    /// Estimated width of the text
    pub width: f32,
    /// Effective font size in points, rounded to two decimals
    pub font_size: f32,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Whether the font appears to be bold
    pub is_bold: bool,
}

impl TextSpan {
    /// Create a new text span; weight is inferred from the font name.
    pub fn new(text: String, x: f32, y: f32, font_size: f32, font_name: String) -> Self {
        let lower = font_name.to_lowercase();
        let is_bold = lower.contains("bold") || lower.contains("black") || lower.contains("heavy");
        let font_size = round_size(font_size);
        let width = text.chars().count() as f32 * font_size * 0.5;

        Self {
            text,
            x,
            y,
            width,
            font_size,
            font_name,
            is_bold,
        }
    }

    /// Right edge of the span.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Spans sharing one baseline, sorted left to right.
#[derive(Debug, Clone)]
pub struct TextLine {
    /// The spans in this line, sorted by X position
    pub spans: Vec<TextSpan>,
    /// Y position (baseline)
    pub y: f32,
}

impl TextLine {
    /// Create a line from spans.
    pub fn from_spans(mut spans: Vec<TextSpan>) -> Self {
        spans.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
        let y = spans.first().map(|s| s.y).unwrap_or(0.0);
        Self { spans, y }
    }

    /// Combined text of all spans.
    ///
    /// A space is inserted where the gap between spans exceeds a fifth of a
    /// character width, except between characters of scripts written without
    /// word spaces.
    pub fn text(&self) -> String {
        let mut result = String::new();

        for (i, span) in self.spans.iter().enumerate() {
            if i > 0 {
                let prev = &self.spans[i - 1];
                let gap = span.x - prev.right();
                let char_width = span.font_size * 0.5;

                let spaceless = matches!(
                    (prev.text.chars().last(), span.text.chars().next()),
                    (Some(a), Some(b)) if is_spaceless_script_char(a) && is_spaceless_script_char(b)
                );
                let has_space = prev.text.ends_with(char::is_whitespace)
                    || span.text.starts_with(char::is_whitespace);

                if gap > char_width * 0.2 && !spaceless && !has_space {
                    result.push(' ');
                }
            }
            result.push_str(&span.text);
        }

        result
    }

    /// Leftmost X position.
    pub fn left(&self) -> f32 {
        self.spans.first().map(|s| s.x).unwrap_or(0.0)
    }

    /// Rightmost X position.
    pub fn right(&self) -> f32 {
        self.spans
            .iter()
            .map(TextSpan::right)
            .fold(f32::MIN, f32::max)
            .max(self.left())
    }

    /// Largest span font size.
    pub fn max_font_size(&self) -> f32 {
        self.spans.iter().map(|s| s.font_size).fold(0.0, f32::max)
    }

    /// Check if every span is bold.
    pub fn is_bold(&self) -> bool {
        !self.spans.is_empty() && self.spans.iter().all(|s| s.is_bold)
    }

    /// Most frequent span font size, ties going to the first span's size.
    pub fn dominant_size(&self) -> f32 {
        most_common(self.spans.iter().map(|s| s.font_size.to_bits()))
            .map(f32::from_bits)
            .unwrap_or(0.0)
    }

    /// Most frequent span font name, ties going to the first span's font.
    pub fn dominant_font(&self) -> String {
        most_common(self.spans.iter().map(|s| s.font_name.as_str()))
            .map(str::to_string)
            .unwrap_or_default()
    }
}

/// Most frequent item, ties going to the item seen first.
fn most_common<T: Eq + std::hash::Hash + Copy>(items: impl Iterator<Item = T>) -> Option<T> {
    let mut counts: HashMap<T, usize> = HashMap::new();
    let mut order = Vec::new();
    for item in items {
        let count = counts.entry(item).or_insert(0);
        if *count == 0 {
            order.push(item);
        }
        *count += 1;
    }

    let mut best: Option<(T, usize)> = None;
    for item in order {
        let count = counts[&item];
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((item, count));
        }
    }
    best.map(|(item, _)| item)
}

/// Round a font size to the two decimals used for exact size comparisons.
pub fn round_size(size: f32) -> f32 {
    (size * 100.0).round() / 100.0
}

/// Extracts positioned text spans from the pages of a loaded document.
pub struct LayoutAnalyzer<'a> {
    doc: &'a LopdfDocument,
}

impl<'a> LayoutAnalyzer<'a> {
    /// Create a new layout analyzer.
    pub fn new(doc: &'a LopdfDocument) -> Self {
        Self { doc }
    }

    /// Extract text spans from a page with position and font information.
    pub fn page_spans(&self, page_id: ObjectId) -> Result<Vec<TextSpan>> {
        let page_fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut fonts: HashMap<Vec<u8>, FontInfo<'_>> = HashMap::new();
        for (name, font) in &page_fonts {
            let base_font = font
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).to_string())
                .unwrap_or_else(|| String::from_utf8_lossy(name).to_string());
            let encoding = font.get_font_encoding(self.doc).ok();
            fonts.insert(name.clone(), FontInfo { base_font, encoding });
        }

        let content = self
            .doc
            .get_page_content(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;
        self.parse_content_stream(&content, &fonts)
    }

    fn parse_content_stream(
        &self,
        content: &[u8],
        fonts: &HashMap<Vec<u8>, FontInfo<'_>>,
    ) -> Result<Vec<TextSpan>> {
        let content =
            lopdf::content::Content::decode(content).map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut spans = Vec::new();
        let mut state = TextState::default();

        for op in content.operations {
            match op.operator.as_str() {
                "BT" => {
                    state.in_text = true;
                    state.matrix = TextMatrix::default();
                }
                "ET" => state.in_text = false,
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(name) = &op.operands[0] {
                            state.font_key = name.clone();
                        }
                        state.font_size = get_number(&op.operands[1]).unwrap_or(12.0);
                    }
                }
                "TL" => {
                    if let Some(leading) = op.operands.first().and_then(get_number) {
                        state.leading = leading;
                    }
                }
                "Td" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                        state.matrix.translate(tx, ty);
                    }
                }
                "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                        state.leading = -ty;
                        state.matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        let n: Vec<f32> = op
                            .operands
                            .iter()
                            .take(6)
                            .map(|o| get_number(o).unwrap_or(0.0))
                            .collect();
                        state.matrix.set(n[0], n[1], n[2], n[3], n[4], n[5]);
                    }
                }
                "T*" => state.matrix.translate(0.0, -state.leading),
                "Tj" => {
                    if let Some(Object::String(bytes, _)) = op.operands.first() {
                        let text = decode(fonts.get(&state.font_key), bytes);
                        state.emit(text, fonts, &mut spans);
                    }
                }
                "TJ" => {
                    if let Some(Object::Array(items)) = op.operands.first() {
                        let text = decode_array(fonts.get(&state.font_key), items);
                        state.emit(text, fonts, &mut spans);
                    }
                }
                "'" | "\"" => {
                    state.matrix.translate(0.0, -state.leading);
                    let text_idx = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                        let text = decode(fonts.get(&state.font_key), bytes);
                        state.emit(text, fonts, &mut spans);
                    }
                }
                _ => {}
            }
        }

        Ok(spans)
    }
}

/// Group spans into lines by baseline, top to bottom.
///
/// Spans whose baselines differ by at most 30% of their font size share a
/// line.
pub fn group_spans_into_lines(mut spans: Vec<TextSpan>) -> Vec<TextLine> {
    // PDF Y grows upwards, so descending Y is top to bottom
    spans.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut lines = Vec::new();
    let mut current: Vec<TextSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        let tolerance = span.font_size * 0.3;
        match current_y {
            Some(y) if (span.y - y).abs() <= tolerance => current.push(span),
            _ => {
                if !current.is_empty() {
                    lines.push(TextLine::from_spans(std::mem::take(&mut current)));
                }
                current_y = Some(span.y);
                current.push(span);
            }
        }
    }

    if !current.is_empty() {
        lines.push(TextLine::from_spans(current));
    }

    lines
}

/// Font information resolved from the page resources.
struct FontInfo<'a> {
    base_font: String,
    encoding: Option<Encoding<'a>>,
}

/// Graphics-independent text state tracked while walking a content stream.
#[derive(Debug, Clone)]
struct TextState {
    in_text: bool,
    font_key: Vec<u8>,
    font_size: f32,
    leading: f32,
    matrix: TextMatrix,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            in_text: false,
            font_key: Vec::new(),
            font_size: 12.0,
            leading: DEFAULT_LEADING,
            matrix: TextMatrix::default(),
        }
    }
}

impl TextState {
    fn emit(&self, text: String, fonts: &HashMap<Vec<u8>, FontInfo<'_>>, spans: &mut Vec<TextSpan>) {
        if !self.in_text || text.trim().is_empty() {
            return;
        }
        let font_name = fonts
            .get(&self.font_key)
            .map(|f| f.base_font.clone())
            .unwrap_or_else(|| String::from_utf8_lossy(&self.font_key).to_string());
        let (x, y) = self.matrix.position();
        let size = self.font_size * self.matrix.scale();
        spans.push(TextSpan::new(text, x, y, size, font_name));
    }
}

/// Text matrix for tracking position in a content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        *self = Self { a, b, c, d, e, f };
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    /// Vertical scale factor.
    fn scale(&self) -> f32 {
        let scale = (self.c * self.c + self.d * self.d).sqrt();
        if scale > 0.0 {
            scale
        } else {
            1.0
        }
    }
}

fn decode(font: Option<&FontInfo<'_>>, bytes: &[u8]) -> String {
    match font.and_then(|f| f.encoding.as_ref()) {
        Some(encoding) => LopdfDocument::decode_text(encoding, bytes)
            .unwrap_or_else(|_| decode_text_simple(bytes)),
        None => decode_text_simple(bytes),
    }
}

/// Decode a `TJ` array; large negative adjustments become word spaces.
fn decode_array(font: Option<&FontInfo<'_>>, items: &[Object]) -> String {
    // In thousandths of a text space unit
    const SPACE_THRESHOLD: f32 = 200.0;

    let mut combined = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => combined.push_str(&decode(font, bytes)),
            other => {
                let Some(n) = get_number(other) else { continue };
                let ends_in_space = combined.ends_with(char::is_whitespace);
                let last_spaceless = combined
                    .chars()
                    .last()
                    .map(is_spaceless_script_char)
                    .unwrap_or(true);
                if -n > SPACE_THRESHOLD && !ends_in_space && !last_spaceless {
                    combined.push(' ');
                }
            }
        }
    }
    combined
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Check if a character belongs to a script written without word spaces
/// (Han, Hiragana, Katakana, CJK punctuation). Hangul uses spaces.
fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF
        | 0x3400..=0x4DBF
        | 0x20000..=0x2EBEF
        | 0x3040..=0x309F
        | 0x30A0..=0x30FF
        | 0x3000..=0x303F)
}

/// Decode a PDF string without font information: UTF-16BE with BOM, then
/// UTF-8, then Latin-1.
pub(crate) fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, x: f32, y: f32, size: f32, font: &str) -> TextSpan {
        TextSpan::new(text.to_string(), x, y, size, font.to_string())
    }

    #[test]
    fn test_text_span_bold_detection() {
        assert!(span("Test", 0.0, 0.0, 12.0, "Helvetica-Bold").is_bold);
        assert!(span("Test", 0.0, 0.0, 12.0, "Arial-Black").is_bold);
        assert!(!span("Test", 0.0, 0.0, 12.0, "Helvetica-Oblique").is_bold);
    }

    #[test]
    fn test_span_size_is_rounded() {
        let s = span("Test", 0.0, 0.0, 11.9999, "Helvetica");
        assert_eq!(s.font_size, 12.0);
        assert_eq!(round_size(10.456), 10.46);
    }

    #[test]
    fn test_group_spans_into_lines() {
        let spans = vec![
            span("world", 60.0, 700.0, 12.0, "Helvetica"),
            span("Second", 10.0, 680.0, 12.0, "Helvetica"),
            span("Hello", 10.0, 701.0, 12.0, "Helvetica"),
        ];
        let lines = group_spans_into_lines(spans);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "Hello world");
        assert_eq!(lines[1].text(), "Second");
    }

    #[test]
    fn test_adjacent_spans_without_gap() {
        let first = span("Head", 10.0, 700.0, 10.0, "Helvetica");
        let second = span("ing", first.right(), 700.0, 10.0, "Helvetica");
        let line = TextLine::from_spans(vec![first, second]);
        assert_eq!(line.text(), "Heading");
    }

    #[test]
    fn test_dominant_size_and_font() {
        let line = TextLine::from_spans(vec![
            span("A", 0.0, 0.0, 14.0, "Times-Bold"),
            span("B", 20.0, 0.0, 10.0, "Times-Roman"),
            span("C", 40.0, 0.0, 10.0, "Times-Roman"),
        ]);
        assert_eq!(line.dominant_size(), 10.0);
        assert_eq!(line.dominant_font(), "Times-Roman");
        assert_eq!(line.max_font_size(), 14.0);
        assert!(!line.is_bold());
    }

    #[test]
    fn test_decode_text_simple() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
        assert_eq!(decode_text_simple(&[0xFE, 0xFF, 0x00, 0x41, 0x00, 0x42]), "AB");
        assert_eq!(decode_text_simple(&[0x63, 0x61, 0x66, 0xE9]), "caf\u{00E9}");
    }

    #[test]
    fn test_spaceless_scripts() {
        assert!(is_spaceless_script_char('中'));
        assert!(is_spaceless_script_char('カ'));
        assert!(!is_spaceless_script_char('한'));
        assert!(!is_spaceless_script_char('a'));
    }

    #[test]
    fn test_text_matrix_translate() {
        let mut m = TextMatrix::default();
        m.set(2.0, 0.0, 0.0, 2.0, 100.0, 700.0);
        m.translate(10.0, -5.0);
        assert_eq!(m.position(), (120.0, 690.0));
        assert_eq!(m.scale(), 2.0);
    }
}
