//! Flat-file persistence: newline-delimited JSON for batch artifacts, plus a
//! pretty JSON array of conversations for easier ad-hoc use.

use crate::model::{Conversation, EvaluationResult};
use std::path::Path;

fn write_jsonl<T: serde::Serialize>(records: &[T], out: &Path) -> anyhow::Result<()> {
    let mut buf = String::new();
    for record in records {
        buf.push_str(&serde_json::to_string(record)?);
        buf.push('\n');
    }
    std::fs::write(out, buf)?;
    Ok(())
}

pub fn write_conversations_jsonl(conversations: &[Conversation], out: &Path) -> anyhow::Result<()> {
    write_jsonl(conversations, out)
}

pub fn write_conversations_json(conversations: &[Conversation], out: &Path) -> anyhow::Result<()> {
    std::fs::write(out, serde_json::to_string_pretty(conversations)?)?;
    Ok(())
}

pub fn write_evaluations_jsonl(results: &[EvaluationResult], out: &Path) -> anyhow::Result<()> {
    write_jsonl(results, out)
}

pub fn read_conversations_jsonl(path: &Path) -> anyhow::Result<Vec<Conversation>> {
    let raw = std::fs::read_to_string(path)?;
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| Ok(serde_json::from_str(line)?))
        .collect()
}
