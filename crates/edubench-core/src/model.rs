use serde::{Deserialize, Serialize};

/// Who uttered an exchange. Serialized as the capitalized word so transcripts
/// and persisted records read the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    Student,
    Teacher,
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Speaker::Student => write!(f, "Student"),
            Speaker::Teacher => write!(f, "Teacher"),
        }
    }
}

/// One utterance in a dialogue. Append-only: exchanges are created once and
/// never edited or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub speaker: Speaker,
    pub message: String,
}

/// A completed tutoring dialogue for one (student, scenario) pair.
///
/// `id` is `{student}_{scenario}` and is unique within a batch. Exchange
/// order is chronological.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub scenario: String,
    pub student: String,
    pub exchanges: Vec<Exchange>,
}

/// A synthetic student persona. Loaded once, shared read-only across every
/// conversation that references it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub system_prompt: String,
}

/// The teacher persona under evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: String,
    pub system_prompt: String,
}

/// One id + description entry of a scenario rubric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricItem {
    pub id: String,
    pub description: String,
}

/// Structured pedagogical rubric attached to a scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rubric {
    #[serde(default)]
    pub goals: Vec<RubricItem>,
    #[serde(default)]
    pub required_behaviors: Vec<RubricItem>,
    #[serde(default)]
    pub forbidden_behaviors: Vec<RubricItem>,
}

/// A tutoring scenario. `initial_message` is the mandatory opening line,
/// always attributed to the student. The descriptive fields inform prompts
/// and reports, not control flow, and default to empty for legacy minimal
/// scenario files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub grade_level: String,
    #[serde(default)]
    pub problem_statement: String,
    #[serde(default)]
    pub canonical_mistake: String,
    pub initial_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rubric: Option<Rubric>,
    /// Legacy field from early scenario files; kept for loading, unused.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade_band: Option<i64>,
}

/// Grader output for one conversation.
///
/// Every numeric field is always present; the grading engine fills 0.0 for
/// anything the grader response did not supply. Sub-scores are on a 0-5
/// scale, `rating` on 1-10.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub conversation_id: String,
    pub rating: f64,
    pub reasoning: String,
    #[serde(default)]
    pub first_mile_diagnostics_score: f64,
    #[serde(default)]
    pub retrieval_practice_score: f64,
    #[serde(default)]
    pub reflect_revisit_score: f64,
    #[serde(default)]
    pub interleaved_practice_score: f64,
    #[serde(default)]
    pub guided_examples_score: f64,
    #[serde(default)]
    pub feedback_quality_score: f64,
    #[serde(default)]
    pub socratic_reasoning_score: f64,
    #[serde(default)]
    pub misconception_diagnosis_score: f64,
    #[serde(default)]
    pub motivation_relevance_score: f64,
    #[serde(default)]
    pub beliefs_attributions_score: f64,
}

impl EvaluationResult {
    /// A fully-defaulted result for `conversation_id`; the parse layer fills
    /// in whatever the grader actually provided.
    pub fn empty(conversation_id: String) -> Self {
        Self {
            conversation_id,
            rating: 0.0,
            reasoning: String::new(),
            first_mile_diagnostics_score: 0.0,
            retrieval_practice_score: 0.0,
            reflect_revisit_score: 0.0,
            interleaved_practice_score: 0.0,
            guided_examples_score: 0.0,
            feedback_quality_score: 0.0,
            socratic_reasoning_score: 0.0,
            misconception_diagnosis_score: 0.0,
            motivation_relevance_score: 0.0,
            beliefs_attributions_score: 0.0,
        }
    }
}
