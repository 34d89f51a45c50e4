//! Actor and scenario repository: one YAML entity per file. A malformed file
//! fails its load with the offending path in the error; there is no silent
//! skip and no partial data, because the batch crosses every student with
//! every scenario.

use crate::model::{Scenario, Student, Teacher};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("scenario {path} has an empty initial_message")]
    EmptyInitialMessage { path: PathBuf },
}

fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&raw).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_student(path: &Path) -> Result<Student, LoadError> {
    load_yaml(path)
}

pub fn load_teacher(path: &Path) -> Result<Teacher, LoadError> {
    load_yaml(path)
}

pub fn load_scenario(path: &Path) -> Result<Scenario, LoadError> {
    let scenario: Scenario = load_yaml(path)?;
    if scenario.initial_message.trim().is_empty() {
        return Err(LoadError::EmptyInitialMessage {
            path: path.to_path_buf(),
        });
    }
    Ok(scenario)
}

fn yaml_files(directory: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let entries = std::fs::read_dir(directory).map_err(|source| LoadError::Io {
        path: directory.to_path_buf(),
        source,
    })?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| LoadError::Io {
            path: directory.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_yaml = path
            .extension()
            .is_some_and(|ext| ext == "yaml" || ext == "yml");
        if is_yaml {
            files.push(path);
        }
    }
    // read_dir order is platform-dependent
    files.sort();
    Ok(files)
}

/// Load every `*.yaml`/`*.yml` student in `directory`, sorted by id.
pub fn load_all_students(directory: &Path) -> Result<Vec<Student>, LoadError> {
    let mut students = yaml_files(directory)?
        .iter()
        .map(|path| load_student(path))
        .collect::<Result<Vec<_>, _>>()?;
    students.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(students)
}

/// Load every `*.yaml`/`*.yml` scenario in `directory`, sorted by id.
pub fn load_all_scenarios(directory: &Path) -> Result<Vec<Scenario>, LoadError> {
    let mut scenarios = yaml_files(directory)?
        .iter()
        .map(|path| load_scenario(path))
        .collect::<Result<Vec<_>, _>>()?;
    scenarios.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_a_student_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alice.yaml");
        fs::write(&path, "id: alice\nsystem_prompt: You are Alice.\n").unwrap();

        let student = load_student(&path).unwrap();
        assert_eq!(student.id, "alice");
        assert_eq!(student.system_prompt, "You are Alice.");
    }

    #[test]
    fn malformed_file_reports_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        fs::write(&path, "id: [unterminated\n").unwrap();

        let err = load_student(&path).expect_err("malformed YAML must fail");
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn one_bad_file_fails_the_directory_load() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("good.yaml"),
            "id: good\nsystem_prompt: ok\n",
        )
        .unwrap();
        fs::write(dir.path().join("bad.yaml"), "system_prompt: no id\n").unwrap();

        assert!(load_all_students(dir.path()).is_err());
    }

    #[test]
    fn scenario_with_empty_initial_message_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.yaml");
        fs::write(&path, "id: empty\ninitial_message: \"  \"\n").unwrap();

        let err = load_scenario(&path).expect_err("blank opener must fail");
        assert!(matches!(err, LoadError::EmptyInitialMessage { .. }));
    }

    #[test]
    fn directory_load_sorts_by_id_and_ignores_other_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("02_zeta.yaml"),
            "id: zeta\ninitial_message: hi\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("01_alpha.yml"),
            "id: alpha\ninitial_message: hey\n",
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "not yaml").unwrap();

        let scenarios = load_all_scenarios(dir.path()).unwrap();
        let ids: Vec<&str> = scenarios.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "zeta"]);
    }

    #[test]
    fn scenario_rubric_round_trips_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rich.yaml");
        fs::write(
            &path,
            "\
id: rich
name: Adding unlike fractions
subject: math
initial_message: Help me add 1/2 and 1/3.
rubric:
  goals:
    - id: G1
      description: Student can find a common denominator.
  required_behaviors:
    - id: R1
      description: Teacher diagnoses before explaining.
  forbidden_behaviors:
    - id: F1
      description: Teacher states the full answer unprompted.
",
        )
        .unwrap();

        let scenario = load_scenario(&path).unwrap();
        let rubric = scenario.rubric.expect("rubric present");
        assert_eq!(rubric.goals.len(), 1);
        assert_eq!(rubric.required_behaviors[0].id, "R1");
        assert_eq!(
            rubric.forbidden_behaviors[0].description,
            "Teacher states the full answer unprompted."
        );
    }
}
