use super::super::args::{OnError, RunArgs};
use crate::exit_codes::{EXIT_SUCCESS, RUNTIME_ERROR};
use edubench_core::config::load_config;
use edubench_core::engine::generate_conversation;
use edubench_core::judge;
use edubench_core::metrics;
use edubench_core::model::{Conversation, EvaluationResult};
use edubench_core::providers::llm::build_client;
use edubench_core::report::{json, markdown};
use edubench_core::repository;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Drive the whole batch: load actors, generate every (student, scenario)
/// conversation, persist them, grade them, and render the report.
///
/// Generation and grading are separate phases; all conversations exist
/// before any grading starts. Within a phase, pairs run on a worker pool of
/// `--parallel` permits (1 = the sequential reference behavior). Turn order
/// inside a conversation is always strictly sequential.
pub async fn run(args: RunArgs) -> anyhow::Result<i32> {
    std::fs::create_dir_all(&args.output_dir)?;

    let config = load_config(&args.env_file)?;
    let teacher_client = build_client(&config.teacher)?;
    let student_client = build_client(&config.student)?;
    let grader_client = build_client(&config.grader)?;
    let moderator_client = build_client(&config.moderator)?;

    let students = repository::load_all_students(&args.data_dir.join("students"))?;
    let scenarios = repository::load_all_scenarios(&args.data_dir.join("scenarios"))?;
    let teacher = repository::load_teacher(&args.data_dir.join("teacher").join("teacher.yaml"))?;
    anyhow::ensure!(!students.is_empty(), "no students found in {}", args.data_dir.join("students").display());
    anyhow::ensure!(!scenarios.is_empty(), "no scenarios found in {}", args.data_dir.join("scenarios").display());

    // Generation phase
    let sem = Arc::new(Semaphore::new(args.parallel.max(1)));
    let mut join_set = JoinSet::new();
    for student in &students {
        for scenario in &scenarios {
            let permit = sem.clone().acquire_owned().await?;
            let student = student.clone();
            let scenario = scenario.clone();
            let teacher = teacher.clone();
            let teacher_client = Arc::clone(&teacher_client);
            let student_client = Arc::clone(&student_client);
            let moderator_client = Arc::clone(&moderator_client);
            let max_turns = args.max_turns;
            join_set.spawn(async move {
                let _permit = permit;
                let pair = format!("{}_{}", student.id, scenario.id);
                tracing::info!(pair = %pair, "generating conversation");
                let result = generate_conversation(
                    &student,
                    &scenario,
                    &teacher,
                    teacher_client.as_ref(),
                    student_client.as_ref(),
                    moderator_client.as_ref(),
                    max_turns,
                )
                .await;
                (pair, result)
            });
        }
    }

    let mut conversations: Vec<Conversation> = Vec::new();
    let mut failed_pairs: Vec<String> = Vec::new();
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((_, Ok(conversation))) => conversations.push(conversation),
            Ok((pair, Err(e))) => {
                tracing::warn!(pair = %pair, error = %format!("{e:#}"), "conversation generation failed; pair excluded");
                failed_pairs.push(pair);
            }
            Err(e) => {
                tracing::warn!(error = %e, "generation task died");
                failed_pairs.push("unknown".to_string());
            }
        }
    }
    if args.on_error == OnError::Abort && !failed_pairs.is_empty() {
        tracing::error!(failed = ?failed_pairs, "aborting run (--on-error abort)");
        return Ok(RUNTIME_ERROR);
    }
    // Completion order is nondeterministic under parallelism
    conversations.sort_by(|a, b| a.id.cmp(&b.id));

    let conversations_jsonl = args.output_dir.join("conversations.jsonl");
    json::write_conversations_jsonl(&conversations, &conversations_jsonl)?;
    json::write_conversations_json(&conversations, &args.output_dir.join("conversations.json"))?;
    tracing::info!(
        count = conversations.len(),
        path = %conversations_jsonl.display(),
        "conversations generated and saved"
    );

    // Grading phase
    let mut join_set = JoinSet::new();
    for conversation in &conversations {
        let permit = sem.clone().acquire_owned().await?;
        let conversation = conversation.clone();
        let grader_client = Arc::clone(&grader_client);
        join_set.spawn(async move {
            let _permit = permit;
            tracing::info!(conversation = %conversation.id, "evaluating conversation");
            let id = conversation.id.clone();
            let result = judge::grade(&conversation, grader_client.as_ref()).await;
            (id, result)
        });
    }

    let mut evaluations: Vec<EvaluationResult> = Vec::new();
    let mut failed_grades: Vec<String> = Vec::new();
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((_, Ok(evaluation))) => evaluations.push(evaluation),
            Ok((id, Err(e))) => {
                tracing::warn!(conversation = %id, error = %format!("{e:#}"), "grading failed; conversation excluded");
                failed_grades.push(id);
            }
            Err(e) => {
                tracing::warn!(error = %e, "grading task died");
                failed_grades.push("unknown".to_string());
            }
        }
    }
    if args.on_error == OnError::Abort && !failed_grades.is_empty() {
        tracing::error!(failed = ?failed_grades, "aborting run (--on-error abort)");
        return Ok(RUNTIME_ERROR);
    }
    evaluations.sort_by(|a, b| a.conversation_id.cmp(&b.conversation_id));

    let evaluations_jsonl = args.output_dir.join("evaluations.jsonl");
    json::write_evaluations_jsonl(&evaluations, &evaluations_jsonl)?;
    tracing::info!(
        count = evaluations.len(),
        path = %evaluations_jsonl.display(),
        "evaluations saved"
    );

    // Aggregation: rubric means from evaluations, conversation statistics
    // averaged over conversations
    let mut aggregated = metrics::aggregate(&evaluations);
    if !conversations.is_empty() {
        let n = conversations.len() as f64;
        aggregated.metrics.student_talk_time = conversations
            .iter()
            .map(metrics::student_talk_time)
            .sum::<f64>()
            / n;
        aggregated.metrics.average_words_per_turn = conversations
            .iter()
            .map(metrics::average_words_per_turn)
            .sum::<f64>()
            / n;
    }

    let report_path = args.output_dir.join("report.md");
    std::fs::write(&report_path, markdown::render_markdown(&aggregated))?;
    tracing::info!(path = %report_path.display(), "report written");

    Ok(EXIT_SUCCESS)
}
