//! Two-tier grader-response parsing.
//!
//! Tier 1 is a strict decode of the whole reply as the legacy
//! `{"rating", "reasons"}` object. Anything else goes through the label
//! extractor, which is total: every field it cannot find or parse comes back
//! as 0.0 or the empty string, never an error.

use super::DIMENSIONS;
use serde::Deserialize;

/// Legacy function-call-shaped grade.
#[derive(Debug, Deserialize)]
pub(crate) struct StructuredGrade {
    pub rating: f64,
    pub reasons: String,
}

/// Grade scraped from `Label: value` lines; arrays are index-aligned with
/// [`DIMENSIONS`].
#[derive(Debug)]
pub(crate) struct LabeledGrade {
    pub overall_rating: f64,
    pub overall_reasoning: String,
    pub scores: [f64; 10],
    pub reasonings: [String; 10],
}

pub(crate) enum ParsedGrade {
    Structured(StructuredGrade),
    Labeled(LabeledGrade),
}

/// Probe the response shape and pick the parse strategy. The labeled branch
/// cannot fail.
pub(crate) fn parse_response(text: &str) -> ParsedGrade {
    match serde_json::from_str::<StructuredGrade>(text.trim()) {
        Ok(grade) => ParsedGrade::Structured(grade),
        Err(_) => ParsedGrade::Labeled(extract_labels(text)),
    }
}

fn extract_labels(text: &str) -> LabeledGrade {
    let mut scores = [0.0_f64; 10];
    let mut reasonings: [String; 10] = std::array::from_fn(|_| String::new());
    for (i, dim) in DIMENSIONS.iter().enumerate() {
        scores[i] = numeric_value(text, &format!("{}Score", dim.label));
        reasonings[i] = text_value(text, &format!("{}Reasoning", dim.label));
    }

    LabeledGrade {
        overall_rating: numeric_value(text, "OverallRating"),
        overall_reasoning: text_value(text, "OverallReasoning"),
        scores,
        reasonings,
    }
}

/// First line starting with `label:` wins; the value is the remainder.
fn value_for_label(text: &str, label: &str) -> Option<String> {
    let needle = format!("{label}:");
    text.lines().find_map(|line| {
        line.trim_start()
            .strip_prefix(&needle)
            .map(|rest| rest.trim().to_string())
    })
}

fn text_value(text: &str, label: &str) -> String {
    value_for_label(text, label).unwrap_or_default()
}

fn numeric_value(text: &str, label: &str) -> f64 {
    value_for_label(text, label)
        .map(|raw| parse_score(&raw))
        .unwrap_or(0.0)
}

/// Accepts `4`, `4.5`, and graders that answer in `4/5` fraction form.
fn parse_score(raw: &str) -> f64 {
    let numerator = raw.split('/').next().unwrap_or(raw);
    numerator.trim().parse::<f64>().unwrap_or(0.0)
}
