//! Conversation engine: bounded turn-taking between the teacher and student
//! roles, with a moderator deciding after each round whether to keep going.

mod prompt;

use crate::model::{Conversation, Exchange, Scenario, Speaker, Student, Teacher};
use crate::providers::llm::{ChatClient, ChatMessage};

pub const DEFAULT_MAX_TURNS: u32 = 10;

/// Generate one tutoring dialogue for a (student, scenario) pair.
///
/// The teacher and student roles each hold their own message log seeded with
/// their own system prompt: each perceives the other as "user" and itself as
/// "assistant", so the two logs are mirrored role-swapped views of the same
/// exchanges, not copies of one transcript.
///
/// Queries are strictly sequential (teacher, student, moderator per round)
/// and unretried; any query error aborts this conversation and propagates.
/// A moderator that never says STOP is not an error; the loop just runs
/// `max_turns` rounds.
pub async fn generate_conversation(
    student: &Student,
    scenario: &Scenario,
    teacher: &Teacher,
    teacher_role: &dyn ChatClient,
    student_role: &dyn ChatClient,
    moderator_role: &dyn ChatClient,
    max_turns: u32,
) -> anyhow::Result<Conversation> {
    anyhow::ensure!(
        !scenario.initial_message.trim().is_empty(),
        "scenario {} has an empty initial_message",
        scenario.id
    );
    anyhow::ensure!(max_turns > 0, "max_turns must be positive");

    // The opening line is always the student's, straight from the scenario.
    let mut student_message = scenario.initial_message.clone();
    let mut exchanges = vec![Exchange {
        speaker: Speaker::Student,
        message: student_message.clone(),
    }];

    let mut student_log = vec![ChatMessage::system(&student.system_prompt)];
    let mut teacher_log = vec![
        ChatMessage::system(&teacher.system_prompt),
        ChatMessage::user(&student_message),
    ];

    for round in 0..max_turns {
        let teacher_message = teacher_role.complete(&teacher_log, None).await?.text;
        exchanges.push(Exchange {
            speaker: Speaker::Teacher,
            message: teacher_message.clone(),
        });
        student_log.push(ChatMessage::assistant(&student_message));
        student_log.push(ChatMessage::user(&teacher_message));
        teacher_log.push(ChatMessage::assistant(&teacher_message));

        student_message = student_role.complete(&student_log, None).await?.text;
        exchanges.push(Exchange {
            speaker: Speaker::Student,
            message: student_message.clone(),
        });
        teacher_log.push(ChatMessage::user(&student_message));

        let history = exchanges
            .iter()
            .map(|ex| format!("{}: {}", ex.speaker, ex.message))
            .collect::<Vec<_>>()
            .join("\n");
        let decision = moderator_role
            .complete(
                &[ChatMessage::user(prompt::moderator_prompt(&history))],
                Some(prompt::MODERATOR_MAX_TOKENS),
            )
            .await?
            .text;
        if decision.trim().to_uppercase().contains("STOP") {
            tracing::debug!(round, conversation = %scenario.id, "moderator stopped the dialogue");
            break;
        }
    }

    Ok(Conversation {
        id: format!("{}_{}", student.id, scenario.id),
        scenario: scenario.id.clone(),
        student: student.id.clone(),
        exchanges,
    })
}
