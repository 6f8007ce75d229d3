//! Turns an `AnalysisResult` into what the user sees: the analysis/suggestions
//! pair, the score card and the downloadable `.txt` report.

use tracing::debug;

use crate::feedback::segmenter::segment;
use crate::models::{AnalysisResult, Suggestions};

const RULE_WIDTH: usize = 40;
const BAR_CELLS: usize = 20;

/// Score bands used to color the score card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    High,
    Mid,
    Low,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 7.0 {
            ScoreBand::High
        } else if score >= 4.0 {
            ScoreBand::Mid
        } else {
            ScoreBand::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::High => "🟢 Alto",
            ScoreBand::Mid => "🟡 Médio",
            ScoreBand::Low => "🔴 Baixo",
        }
    }
}

/// Fill percentage of the score bar, clamped to 0 – 100.
pub fn score_percent(score: f64) -> f64 {
    (score * 10.0).clamp(0.0, 100.0)
}

/// Analysis and suggestions ready to display in their own sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackView {
    pub analysis: String,
    pub suggestions: String,
}

impl FeedbackView {
    /// Splits the analysis with the segmenter when the backend sent the same
    /// text in both fields; otherwise passes both through.
    pub fn from_result(result: &AnalysisResult) -> Self {
        let suggestions = flatten_suggestions(&normalize_suggestions(&result.suggestions));
        let analysis = result.analysis.as_str();

        if !analysis.is_empty() && analysis.trim() == suggestions.trim() {
            debug!("Analysis and suggestions are identical; segmenting");
            let parts = segment(analysis);
            return FeedbackView {
                analysis: parts.analysis.to_string(),
                suggestions: parts.suggestions.to_string(),
            };
        }

        FeedbackView {
            analysis: analysis.to_string(),
            suggestions,
        }
    }
}

/// A text value holding a JSON-encoded list of strings becomes a real list.
pub fn normalize_suggestions(suggestions: &Suggestions) -> Suggestions {
    match suggestions {
        Suggestions::Text(text) => match serde_json::from_str::<Vec<String>>(text) {
            Ok(items) => Suggestions::List(items),
            Err(_) => suggestions.clone(),
        },
        Suggestions::List(_) => suggestions.clone(),
    }
}

pub fn flatten_suggestions(suggestions: &Suggestions) -> String {
    match suggestions {
        Suggestions::Text(text) => text.clone(),
        Suggestions::List(items) => items.join("\n"),
    }
}

/// Text block shown above the analysis, e.g. `8.5/10  🟢 Alto` plus a bar.
pub fn render_score_card(score: f64) -> String {
    let filled = ((score_percent(score) / 100.0) * BAR_CELLS as f64).round() as usize;
    let filled = filled.min(BAR_CELLS);
    format!(
        "SCORE DO CURRÍCULO\n{score}/10  {}\n[{}{}]",
        ScoreBand::from_score(score).label(),
        "█".repeat(filled),
        "░".repeat(BAR_CELLS - filled),
    )
}

/// Plain-text export of score, analysis and suggestions.
/// Only the parts present in the result are written.
pub fn render_report(result: &AnalysisResult) -> String {
    let rule = "─".repeat(RULE_WIDTH);
    let mut parts = Vec::new();

    if let Some(score) = result.score {
        parts.push(format!("SCORE: {score}/10\n"));
    }
    if !result.analysis.is_empty() {
        parts.push(format!("ANÁLISE\n{rule}\n{}\n", result.analysis));
    }
    if !result.suggestions.is_empty() {
        let body = match &result.suggestions {
            Suggestions::List(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| format!("{}. {item}", i + 1))
                .collect::<Vec<_>>()
                .join("\n"),
            Suggestions::Text(text) => text.clone(),
        };
        parts.push(format!("SUGESTÕES\n{rule}\n{body}\n"));
    }

    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: Option<f64>, analysis: &str, suggestions: Suggestions) -> AnalysisResult {
        AnalysisResult {
            score,
            analysis: analysis.to_string(),
            suggestions,
        }
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(9.0), ScoreBand::High);
        assert_eq!(ScoreBand::from_score(7.0), ScoreBand::High);
        assert_eq!(ScoreBand::from_score(6.9), ScoreBand::Mid);
        assert_eq!(ScoreBand::from_score(4.0), ScoreBand::Mid);
        assert_eq!(ScoreBand::from_score(3.5), ScoreBand::Low);
    }

    #[test]
    fn test_score_percent_is_clamped() {
        assert_eq!(score_percent(8.5), 85.0);
        assert_eq!(score_percent(12.0), 100.0);
        assert_eq!(score_percent(-1.0), 0.0);
    }

    #[test]
    fn test_score_card_bar() {
        let card = render_score_card(5.0);
        assert!(card.contains("5/10"));
        assert!(card.contains("🟡 Médio"));
        assert!(card.contains(&format!("[{}{}]", "█".repeat(10), "░".repeat(10))));
    }

    #[test]
    fn test_normalize_json_encoded_list() {
        let raw = Suggestions::Text(r#"["Adicione métricas", "Reduza para uma página"]"#.to_string());
        assert_eq!(
            normalize_suggestions(&raw),
            Suggestions::List(vec![
                "Adicione métricas".to_string(),
                "Reduza para uma página".to_string()
            ])
        );
    }

    #[test]
    fn test_normalize_plain_text_unchanged() {
        let raw = Suggestions::Text("Adicione métricas.".to_string());
        assert_eq!(normalize_suggestions(&raw), raw);
    }

    #[test]
    fn test_flatten_list_joins_lines() {
        let list = Suggestions::List(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(flatten_suggestions(&list), "a\nb");
    }

    #[test]
    fn test_view_passes_distinct_content_through() {
        let r = result(
            Some(8.0),
            "Boa estrutura.",
            Suggestions::List(vec!["a".to_string(), "b".to_string()]),
        );
        let view = FeedbackView::from_result(&r);
        assert_eq!(view.analysis, "Boa estrutura.");
        assert_eq!(view.suggestions, "a\nb");
    }

    #[test]
    fn test_view_segments_duplicated_content() {
        let text = "Texto de análise aqui.\n\n3. Sugestões\nPrimeira sugestão.";
        let r = result(None, text, Suggestions::Text(format!("  {text}\n")));
        let view = FeedbackView::from_result(&r);
        assert_eq!(view.analysis, "Texto de análise aqui.");
        assert_eq!(view.suggestions, "3. Sugestões\nPrimeira sugestão.");
    }

    #[test]
    fn test_view_does_not_segment_empty_analysis() {
        let r = result(None, "", Suggestions::Text(String::new()));
        let view = FeedbackView::from_result(&r);
        assert_eq!(view.analysis, "");
        assert_eq!(view.suggestions, "");
    }

    #[test]
    fn test_report_with_list_suggestions() {
        let r = result(
            Some(8.5),
            "Boa estrutura.",
            Suggestions::List(vec!["Use métricas".to_string(), "Corte jargões".to_string()]),
        );
        let rule = "─".repeat(40);
        let expected = format!(
            "SCORE: 8.5/10\n\nANÁLISE\n{rule}\nBoa estrutura.\n\nSUGESTÕES\n{rule}\n1. Use métricas\n2. Corte jargões\n"
        );
        assert_eq!(render_report(&r), expected);
    }

    #[test]
    fn test_report_whole_score_has_no_decimal() {
        let r = result(Some(8.0), "", Suggestions::default());
        assert_eq!(render_report(&r), "SCORE: 8/10\n");
    }

    #[test]
    fn test_report_skips_missing_parts() {
        let r = result(None, "", Suggestions::Text("Revise o resumo.".to_string()));
        let rule = "─".repeat(40);
        assert_eq!(
            render_report(&r),
            format!("SUGESTÕES\n{rule}\nRevise o resumo.\n")
        );
    }

    #[test]
    fn test_report_empty_result() {
        assert_eq!(render_report(&AnalysisResult::default()), "");
    }
}
