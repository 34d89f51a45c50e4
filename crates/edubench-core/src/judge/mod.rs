//! Grading engine: submits a finished transcript to the grader role with the
//! ten-dimension pedagogical rubric and normalizes the reply into an
//! [`EvaluationResult`], whatever shape the grader answered in.

mod parse;
mod prompt;

use crate::model::{Conversation, EvaluationResult};
use crate::providers::llm::{ChatClient, ChatMessage};
use parse::ParsedGrade;

pub(crate) struct Dimension {
    /// Label stem used in the `Label: value` answer format
    /// (`<label>Score`, `<label>Reasoning`).
    pub label: &'static str,
    /// Human-readable name used in the combined reasoning and the report.
    pub title: &'static str,
    /// Behavioral anchors for the 0-5 scale, quoted verbatim in the prompt.
    pub anchors: &'static str,
}

pub(crate) const DIMENSIONS: [Dimension; 10] = [
    Dimension {
        label: "FirstMileDiagnostics",
        title: "First-Mile Diagnostics",
        anchors: "probing what the student already knows before teaching. \
                  0 = never checks prior knowledge; 3 = asks at least one diagnostic question \
                  before explaining; 5 = maps the student's starting point and tailors the \
                  opening explanation to it.",
    },
    Dimension {
        label: "RetrievalPractice",
        title: "Retrieval Practice",
        anchors: "prompting the student to recall rather than re-read. \
                  0 = teacher only re-explains; 3 = occasionally asks the student to restate \
                  or recall; 5 = regularly has the student retrieve key ideas from memory \
                  before more help is given.",
    },
    Dimension {
        label: "ReflectRevisit",
        title: "Reflect & Revisit",
        anchors: "returning to earlier material and prompting reflection. \
                  0 = never revisits; 3 = at least one callback to earlier steps; \
                  5 = deliberate reflection on what was learned and how it connects.",
    },
    Dimension {
        label: "InterleavedPractice",
        title: "Interleaved Practice",
        anchors: "mixing the current topic with related problem types. \
                  0 = a single problem type only; 3 = one contrast with a related type; \
                  5 = varied practice that forces the student to discriminate between methods.",
    },
    Dimension {
        label: "GuidedExamples",
        title: "Guided Examples",
        anchors: "worked examples with fading support. \
                  0 = answers handed over or no examples at all; 3 = one worked example with \
                  some student participation; 5 = examples stepped through jointly with \
                  support fading as competence grows.",
    },
    Dimension {
        label: "FeedbackQuality",
        title: "Feedback Quality",
        anchors: "specific, actionable, non-judgmental feedback. \
                  0 = vague praise or blame; 3 = correct/incorrect with some explanation; \
                  5 = precise feedback naming what is right, what is wrong, and the next step.",
    },
    Dimension {
        label: "SocraticReasoning",
        title: "Socratic Reasoning",
        anchors: "leading with questions the student can answer. \
                  0 = pure lecture; 3 = some guiding questions; 5 = sustained questioning \
                  that lets the student construct the solution.",
    },
    Dimension {
        label: "MisconceptionDiagnosis",
        title: "Misconception Diagnosis",
        anchors: "identifying and addressing the underlying error. \
                  0 = symptom-level corrections only; 3 = names the misconception; \
                  5 = surfaces the misconception and has the student confront the contradiction.",
    },
    Dimension {
        label: "MotivationRelevance",
        title: "Motivation & Relevance",
        anchors: "connecting the material to the student's interests or goals. \
                  0 = no connection attempted; 3 = generic encouragement; \
                  5 = ties the topic to something the student demonstrably cares about.",
    },
    Dimension {
        label: "BeliefsAttributions",
        title: "Beliefs & Attributions",
        anchors: "shaping productive beliefs about ability and effort. \
                  0 = reinforces fixed-ability talk; 3 = neutral; 5 = explicitly attributes \
                  progress to strategy and effort and normalizes struggle.",
    },
];

/// Grade one conversation. Transport errors from the grader query propagate;
/// malformed grader *content* never fails; it degrades to defaulted fields.
pub async fn grade(
    conversation: &Conversation,
    grader_role: &dyn ChatClient,
) -> anyhow::Result<EvaluationResult> {
    let request = prompt::grading_prompt(&render_transcript(conversation));
    let response = grader_role
        .complete(&[ChatMessage::user(request)], None)
        .await?;
    Ok(into_result(conversation.id.clone(), &response.text))
}

fn render_transcript(conversation: &Conversation) -> String {
    conversation
        .exchanges
        .iter()
        .map(|ex| format!("[{}]: {}", ex.speaker, ex.message))
        .collect::<Vec<_>>()
        .join("\n")
}

fn into_result(conversation_id: String, response_text: &str) -> EvaluationResult {
    let mut result = EvaluationResult::empty(conversation_id);
    match parse::parse_response(response_text) {
        ParsedGrade::Structured(grade) => {
            result.rating = grade.rating;
            result.reasoning = grade.reasons;
        }
        ParsedGrade::Labeled(grade) => {
            result.rating = grade.overall_rating;
            result.reasoning = combined_reasoning(&grade);
            let [first_mile, retrieval, reflect, interleaved, guided, feedback, socratic, misconception, motivation, beliefs] =
                grade.scores;
            result.first_mile_diagnostics_score = first_mile;
            result.retrieval_practice_score = retrieval;
            result.reflect_revisit_score = reflect;
            result.interleaved_practice_score = interleaved;
            result.guided_examples_score = guided;
            result.feedback_quality_score = feedback;
            result.socratic_reasoning_score = socratic;
            result.misconception_diagnosis_score = misconception;
            result.motivation_relevance_score = motivation;
            result.beliefs_attributions_score = beliefs;
        }
    }
    result
}

/// Overall reasoning plus each dimension's reasoning, newline-joined and
/// labeled with the dimension score, in the fixed dimension order.
fn combined_reasoning(grade: &parse::LabeledGrade) -> String {
    let mut lines = vec![format!("Overall: {}", grade.overall_reasoning)];
    for (i, dim) in DIMENSIONS.iter().enumerate() {
        lines.push(format!(
            "{} ({}): {}",
            dim.title, grade.scores[i], grade.reasonings[i]
        ));
    }
    lines.join("\n")
}
