//! Feedback Segmenter — splits one block of AI feedback into analysis and suggestions.
//!
//! Some backend configurations answer with the same undifferentiated text in both the
//! `analysis` and `suggestions` fields. This module recovers the two parts heuristically:
//!
//! 1. Keyword boundary: the earliest line-leading heading that announces a suggestions
//!    section ("3. Sugestões", "### Melhorias", "**Recommendations**", ...). Ties on the
//!    same offset go to the pattern declared first.
//! 2. Numbered fallback: with two or more line-leading list markers (`1.`, `2)`), split
//!    before the marker at index `count / 2`.
//! 3. Otherwise everything is analysis.
//!
//! Never fails, never drops content, and both parts are trimmed slices of the input.

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Headings that open a suggestions section, in priority order for ties.
/// Every pattern is anchored at the start of the text or right after a newline.
const BOUNDARY_PATTERNS: &[(&str, &str)] = &[
    ("numbered_sugestoes", r"(?:^|\n)\s*\d+[.)]\s*[Ss]ugest[õo]es"),
    ("markdown_sugestoes", r"(?:^|\n)\s*#+\s*[Ss]ugest[õo]es"),
    ("sugestoes_de", r"(?:^|\n)\s*\*{0,2}[Ss]ugest[õo]es\s*de\s+"),
    ("label_sugestoes", r"(?:^|\n)\s*\*{0,2}[Ss]ugest[õo]es\*{0,2}\s*:?"),
    ("numbered_melhorias", r"(?:^|\n)\s*\d+[.)]\s*[Mm]elhorias"),
    ("markdown_melhorias", r"(?:^|\n)\s*#+\s*[Mm]elhorias"),
    ("label_recomendacoes", r"(?:^|\n)\s*\*{0,2}[Rr]ecomenda[çc][õo]es\*{0,2}"),
    ("numbered_recomendacoes", r"(?:^|\n)\s*\d+[.)]\s*[Rr]ecomenda[çc][õo]es"),
    ("markdown_recomendacoes", r"(?:^|\n)\s*#+\s*[Rr]ecomenda[çc][õo]es"),
    ("o_que_melhorar", r"(?:^|\n)\s*\*{0,2}[Oo]\s+que\s+melhorar\*{0,2}"),
    ("pontos_a_melhorar", r"(?:^|\n)\s*\*{0,2}[Pp]ontos\s+a\s+melhorar\*{0,2}"),
    ("numbered_suggestions", r"(?:^|\n)\s*\d+[.)]\s*[Ss]uggestions"),
    ("markdown_suggestions", r"(?:^|\n)\s*#+\s*[Ss]uggestions"),
    ("label_suggestions", r"(?:^|\n)\s*\*{0,2}[Ss]uggestions\*{0,2}\s*:?"),
    ("numbered_improvements", r"(?:^|\n)\s*\d+[.)]\s*[Ii]mprovements"),
    ("markdown_improvements", r"(?:^|\n)\s*#+\s*[Ii]mprovements"),
    ("label_recommendations", r"(?:^|\n)\s*\*{0,2}[Rr]ecommendations\*{0,2}"),
    ("numbered_recommendations", r"(?:^|\n)\s*\d+[.)]\s*[Rr]ecommendations"),
    ("markdown_recommendations", r"(?:^|\n)\s*#+\s*[Rr]ecommendations"),
    ("what_to_improve", r"(?:^|\n)\s*\*{0,2}[Ww]hat\s+to\s+improve\*{0,2}"),
    ("points_to_improve", r"(?:^|\n)\s*\*{0,2}[Pp]oints\s+to\s+improve\*{0,2}"),
];

const NUMBERED_MARKER: &str = r"(?:^|\n)\s*\d+[.)]";

/// Analysis and suggestions recovered from one block of feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segmentation<'a> {
    pub analysis: &'a str,
    pub suggestions: &'a str,
}

/// A keyword heading found in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    /// Byte offset where the match starts (may point at the preceding newline).
    pub offset: usize,
    pub pattern: &'static str,
}

fn boundary_patterns() -> &'static [(&'static str, Regex)] {
    static PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        BOUNDARY_PATTERNS
            .iter()
            .map(|(name, pattern)| (*name, Regex::new(pattern).expect("boundary regex")))
            .collect()
    })
}

fn numbered_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(NUMBERED_MARKER).expect("numbered marker regex"))
}

/// Earliest keyword heading across all patterns.
pub fn find_boundary(text: &str) -> Option<Boundary> {
    boundary_patterns()
        .iter()
        .filter_map(|(name, re)| {
            re.find(text).map(|m| Boundary {
                offset: m.start(),
                pattern: *name,
            })
        })
        // min_by_key keeps the first of equal offsets, i.e. the earliest-declared pattern
        .min_by_key(|b| b.offset)
}

/// Splits mixed feedback into `(analysis, suggestions)`.
pub fn segment(text: &str) -> Segmentation<'_> {
    if let Some(boundary) = find_boundary(text) {
        debug!(
            offset = boundary.offset,
            pattern = boundary.pattern,
            "Feedback split on keyword heading"
        );
        return split_at(text, boundary.offset);
    }

    let markers: Vec<usize> = numbered_marker_re()
        .find_iter(text)
        .map(|m| m.start())
        .collect();
    if markers.len() >= 2 {
        let mid = markers.len() / 2;
        debug!(
            markers = markers.len(),
            split_index = mid,
            "Feedback split on numbered list midpoint"
        );
        return split_at(text, markers[mid]);
    }

    Segmentation {
        analysis: text.trim(),
        suggestions: "",
    }
}

fn split_at(text: &str, offset: usize) -> Segmentation<'_> {
    let (before, after) = text.split_at(offset);
    Segmentation {
        analysis: before.trim(),
        suggestions: after.trim(),
    }
}
