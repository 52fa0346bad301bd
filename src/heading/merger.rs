//! Merging of heading fragments wrapped across several lines.

use crate::model::Heading;

use super::HeadingCandidate;

/// Fold adjacent candidates with identical font, size, weight and page into
/// one heading each.
///
/// Only consecutive candidates merge, and never across a page boundary.
pub fn merge(candidates: &[HeadingCandidate<'_>]) -> Vec<Heading> {
    let mut headings: Vec<Heading> = Vec::new();
    let mut current: Option<Heading> = None;

    for candidate in candidates {
        match current.as_mut() {
            Some(heading) if heading.accepts(candidate.line) => {
                heading.append(&candidate.line.text);
            }
            _ => {
                if let Some(done) = current.take() {
                    headings.push(done);
                }
                current = Some(Heading::from_line(candidate.line, candidate.index));
            }
        }
    }

    headings.extend(current);
    headings
}

/// Turn every candidate into its own heading.
pub fn unmerged(candidates: &[HeadingCandidate<'_>]) -> Vec<Heading> {
    candidates
        .iter()
        .map(|c| Heading::from_line(c.line, c.index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Line;

    fn candidates(lines: &[Line]) -> Vec<HeadingCandidate<'_>> {
        lines
            .iter()
            .enumerate()
            .map(|(index, line)| HeadingCandidate { index, line })
            .collect()
    }

    #[test]
    fn test_merge_wrapped_heading() {
        let lines = vec![
            Line::new("Intro", 18.0, "Arial-Bold", true, 1),
            Line::new("duction", 18.0, "Arial-Bold", true, 1),
        ];
        let headings = merge(&candidates(&lines));
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].text, "Intro duction");
        assert_eq!(headings[0].line_index, 0);
        assert_eq!(headings[0].fragments, 2);
    }

    #[test]
    fn test_style_change_flushes() {
        let lines = vec![
            Line::new("Part One", 20.0, "Arial-Bold", true, 1),
            Line::new("Overview", 16.0, "Arial-Bold", true, 1),
            Line::new("Scope", 16.0, "Arial", false, 1),
            Line::new("Limits", 16.0, "Arial", false, 1),
        ];
        let headings = merge(&candidates(&lines));
        let texts: Vec<&str> = headings.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, vec!["Part One", "Overview", "Scope Limits"]);
        assert_eq!(headings[2].line_index, 2);
    }

    #[test]
    fn test_no_merge_across_pages() {
        let lines = vec![
            Line::new("A Long Heading That", 18.0, "Arial-Bold", true, 3),
            Line::new("Continues", 18.0, "Arial-Bold", true, 4),
        ];
        let headings = merge(&candidates(&lines));
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[1].page, 4);
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge(&[]).is_empty());
    }

    #[test]
    fn test_unmerged_keeps_every_candidate() {
        let lines = vec![
            Line::new("Intro", 18.0, "Arial-Bold", true, 1),
            Line::new("duction", 18.0, "Arial-Bold", true, 1),
        ];
        let headings = unmerged(&candidates(&lines));
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[1].line_index, 1);
    }
}
