use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "edubench",
    version,
    about = "Moderated multi-turn tutoring benchmark: generate dialogues, grade them against a pedagogical rubric, and report"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full benchmark pipeline (generate, grade, report)
    Run(RunArgs),
    Version,
}

/// What to do when a single (student, scenario) pair fails.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnError {
    /// log the pair as a warning, exclude it from aggregation, keep going
    Skip,
    /// finish in-flight work, then abort the run with exit code 1
    Abort,
}

#[derive(Parser, Clone)]
pub struct RunArgs {
    /// directory for conversations, evaluations, and the report
    #[arg(long, default_value = "results")]
    pub output_dir: PathBuf,

    /// directory holding students/, scenarios/, and teacher/teacher.yaml
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// dotfile with per-role {ROLE}_{API_KEY,BASE_URL,MODEL,PROVIDER} vars
    #[arg(long, default_value = ".eduenv")]
    pub env_file: PathBuf,

    /// round bound per conversation
    #[arg(long, default_value_t = edubench_core::engine::DEFAULT_MAX_TURNS)]
    pub max_turns: u32,

    /// worker pool size for cross-pair parallelism (1 = sequential)
    #[arg(long, default_value_t = 1)]
    pub parallel: usize,

    /// per-pair failure policy
    #[arg(long, value_enum, default_value_t = OnError::Skip)]
    pub on_error: OnError,
}
