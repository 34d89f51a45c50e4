use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;

fn write_actor_fixtures(dir: &Path) {
    fs::create_dir_all(dir.join("data/students")).unwrap();
    fs::create_dir_all(dir.join("data/scenarios")).unwrap();
    fs::create_dir_all(dir.join("data/teacher")).unwrap();

    fs::write(
        dir.join("data/students/alice.yaml"),
        "id: alice\nsystem_prompt: You are Alice, a confused sixth grader.\n",
    )
    .unwrap();
    fs::write(
        dir.join("data/students/bruno.yaml"),
        "id: bruno\nsystem_prompt: You are Bruno, an overconfident seventh grader.\n",
    )
    .unwrap();
    fs::write(
        dir.join("data/scenarios/fractions.yaml"),
        "id: fractions\nsubject: math\ninitial_message: Help me add 1/2 and 1/3.\n",
    )
    .unwrap();
    fs::write(
        dir.join("data/teacher/teacher.yaml"),
        "id: tutor\nsystem_prompt: You are a patient tutor.\n",
    )
    .unwrap();
}

fn edubench(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("edubench").expect("cargo bin");
    cmd.current_dir(dir);
    // all four roles offline
    for role in ["STUDENT", "TEACHER", "GRADER", "MODERATOR"] {
        cmd.env(format!("{role}_PROVIDER"), "fake");
        cmd.env(format!("{role}_MODEL"), "fake-model");
    }
    cmd
}

fn read_json(path: &Path) -> Value {
    let content = fs::read_to_string(path).expect("missing json file");
    serde_json::from_str(&content).expect("invalid json")
}

#[test]
fn run_with_fake_providers_writes_all_artifacts() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_actor_fixtures(tmp.path());
    let out = tmp.path().join("results");

    edubench(tmp.path())
        .args(["run", "--max-turns", "2"])
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success();

    // 2 students x 1 scenario, fake moderator never says STOP:
    // 1 seed + 2 rounds x 2 exchanges per conversation
    let jsonl = fs::read_to_string(out.join("conversations.jsonl")).unwrap();
    let records: Vec<Value> = jsonl
        .lines()
        .map(|line| serde_json::from_str(line).expect("invalid jsonl record"))
        .collect();
    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record["exchanges"].as_array().unwrap().len(), 5);
        assert_eq!(record["exchanges"][0]["speaker"], "Student");
        assert_eq!(
            record["exchanges"][0]["message"],
            "Help me add 1/2 and 1/3."
        );
    }
    assert_eq!(records[0]["id"], "alice_fractions");
    assert_eq!(records[1]["id"], "bruno_fractions");

    let array = read_json(&out.join("conversations.json"));
    assert_eq!(array.as_array().unwrap().len(), 2);

    let evaluations = fs::read_to_string(out.join("evaluations.jsonl")).unwrap();
    assert_eq!(evaluations.lines().count(), 2);
    let first: Value = serde_json::from_str(evaluations.lines().next().unwrap()).unwrap();
    assert_eq!(first["conversation_id"], "alice_fractions");
    // fake grader text is not a grade; parsing degrades to defaults
    assert_eq!(first["rating"], 0.0);

    let report = fs::read_to_string(out.join("report.md")).unwrap();
    assert!(report.starts_with("# EduBench Evaluation Report"));
    assert!(report.contains("- Number of Evaluations: 2"));
    assert!(report.contains("- Student Talk Time:"));
}

#[test]
fn parallel_run_produces_the_same_artifacts() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_actor_fixtures(tmp.path());
    let out = tmp.path().join("results");

    edubench(tmp.path())
        .args(["run", "--max-turns", "1", "--parallel", "4"])
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success();

    let jsonl = fs::read_to_string(out.join("conversations.jsonl")).unwrap();
    let ids: Vec<String> = jsonl
        .lines()
        .map(|line| {
            let v: Value = serde_json::from_str(line).unwrap();
            v["id"].as_str().unwrap().to_string()
        })
        .collect();
    // artifacts are sorted regardless of completion order
    assert_eq!(ids, vec!["alice_fractions", "bruno_fractions"]);
}

#[test]
fn missing_data_dir_is_a_config_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("results");

    edubench(tmp.path())
        .arg("run")
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("fatal"));
}

#[test]
fn unknown_provider_is_a_config_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_actor_fixtures(tmp.path());

    edubench(tmp.path())
        .env("GRADER_PROVIDER", "carrier-pigeon")
        .arg("run")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("carrier-pigeon"));
}

#[test]
fn version_prints_the_package_version() {
    let tmp = tempfile::tempdir().expect("tempdir");
    Command::cargo_bin("edubench")
        .expect("cargo bin")
        .current_dir(tmp.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
