//! Per-conversation descriptive statistics and batch aggregation. Every
//! function here divides by a count and must return 0.0 on empty input
//! instead of faulting.

use crate::model::{Conversation, EvaluationResult, Speaker};

/// Batch-level averages, recomputed fresh each run. No historical state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateData {
    pub average_rating: f64,
    pub num_evaluations: usize,
    pub metrics: MetricAverages,
}

/// Averaged metric values in report order: the two conversation statistics,
/// then the ten rubric dimensions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricAverages {
    pub student_talk_time: f64,
    pub average_words_per_turn: f64,
    pub first_mile_diagnostics: f64,
    pub retrieval_practice: f64,
    pub reflect_revisit: f64,
    pub interleaved_practice: f64,
    pub guided_examples: f64,
    pub feedback_quality: f64,
    pub socratic_reasoning: f64,
    pub misconception_diagnosis: f64,
    pub motivation_relevance: f64,
    pub beliefs_attributions: f64,
}

fn word_count(message: &str) -> usize {
    message.split_whitespace().count()
}

/// Share of the dialogue's words uttered by the student.
pub fn student_talk_time(conversation: &Conversation) -> f64 {
    let mut student_words = 0usize;
    let mut total_words = 0usize;
    for exchange in &conversation.exchanges {
        let words = word_count(&exchange.message);
        total_words += words;
        if exchange.speaker == Speaker::Student {
            student_words += words;
        }
    }

    if total_words == 0 {
        return 0.0;
    }
    student_words as f64 / total_words as f64
}

/// Mean word count per exchange.
pub fn average_words_per_turn(conversation: &Conversation) -> f64 {
    let total_turns = conversation.exchanges.len();
    if total_turns == 0 {
        return 0.0;
    }
    let total_words: usize = conversation
        .exchanges
        .iter()
        .map(|ex| word_count(&ex.message))
        .sum();
    total_words as f64 / total_turns as f64
}

/// Mean of the rating and of each rubric sub-score across the batch. The
/// conversation statistics (talk time, words per turn) are folded in by the
/// driver, which averages them over conversations rather than evaluations.
pub fn aggregate(results: &[EvaluationResult]) -> AggregateData {
    if results.is_empty() {
        return AggregateData::default();
    }

    let n = results.len() as f64;
    let mean = |field: fn(&EvaluationResult) -> f64| results.iter().map(field).sum::<f64>() / n;

    AggregateData {
        average_rating: mean(|r| r.rating),
        num_evaluations: results.len(),
        metrics: MetricAverages {
            student_talk_time: 0.0,
            average_words_per_turn: 0.0,
            first_mile_diagnostics: mean(|r| r.first_mile_diagnostics_score),
            retrieval_practice: mean(|r| r.retrieval_practice_score),
            reflect_revisit: mean(|r| r.reflect_revisit_score),
            interleaved_practice: mean(|r| r.interleaved_practice_score),
            guided_examples: mean(|r| r.guided_examples_score),
            feedback_quality: mean(|r| r.feedback_quality_score),
            socratic_reasoning: mean(|r| r.socratic_reasoning_score),
            misconception_diagnosis: mean(|r| r.misconception_diagnosis_score),
            motivation_relevance: mean(|r| r.motivation_relevance_score),
            beliefs_attributions: mean(|r| r.beliefs_attributions_score),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Exchange;

    fn conversation_with_word_counts(counts: &[usize]) -> Conversation {
        // Alternating Student/Teacher starting with Student; each exchange
        // carries exactly the requested number of words.
        let exchanges = counts
            .iter()
            .enumerate()
            .map(|(i, &n)| Exchange {
                speaker: if i % 2 == 0 {
                    Speaker::Student
                } else {
                    Speaker::Teacher
                },
                message: vec!["word"; n].join(" "),
            })
            .collect();
        Conversation {
            id: "c".into(),
            scenario: "s".into(),
            student: "st".into(),
            exchanges,
        }
    }

    #[test]
    fn talk_time_and_words_per_turn_fixture() {
        let conversation = conversation_with_word_counts(&[5, 7, 4, 6]);
        assert!((student_talk_time(&conversation) - 9.0 / 22.0).abs() < 1e-12);
        assert!((average_words_per_turn(&conversation) - 5.5).abs() < 1e-12);
    }

    #[test]
    fn zero_word_conversation_yields_zero_not_a_fault() {
        let conversation = conversation_with_word_counts(&[0, 0]);
        assert_eq!(student_talk_time(&conversation), 0.0);
        assert_eq!(average_words_per_turn(&conversation), 0.0);
    }

    #[test]
    fn empty_conversation_yields_zero() {
        let conversation = conversation_with_word_counts(&[]);
        assert_eq!(student_talk_time(&conversation), 0.0);
        assert_eq!(average_words_per_turn(&conversation), 0.0);
    }

    #[test]
    fn aggregate_of_empty_batch_is_all_zeros() {
        let data = aggregate(&[]);
        assert_eq!(data.average_rating, 0.0);
        assert_eq!(data.num_evaluations, 0);
        assert_eq!(data.metrics.beliefs_attributions, 0.0);
    }

    #[test]
    fn aggregate_averages_ratings_and_subscores() {
        let mut a = crate::model::EvaluationResult::empty("a".into());
        a.rating = 7.0;
        a.socratic_reasoning_score = 4.0;
        let mut b = crate::model::EvaluationResult::empty("b".into());
        b.rating = 8.0;
        b.socratic_reasoning_score = 2.0;
        let mut c = crate::model::EvaluationResult::empty("c".into());
        c.rating = 6.0;
        c.socratic_reasoning_score = 3.0;

        let data = aggregate(&[a, b, c]);
        assert!((data.average_rating - 7.0).abs() < 1e-12);
        assert_eq!(data.num_evaluations, 3);
        assert!((data.metrics.socratic_reasoning - 3.0).abs() < 1e-12);
        assert_eq!(data.metrics.first_mile_diagnostics, 0.0);
    }
}
