//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn blocks() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("blocks").unwrap()
}

const GOOD_SET: &str = r#"{
  "ID": 1,
  "Title": "Bio 101",
  "PublicID": "pub-1",
  "Flashcards": [
    {"ID": 1, "Term": "cell", "Solution": "unit of life", "Concept": "Biology"},
    {"ID": 2, "Term": "gene", "Solution": "unit of heredity", "Concept": "Biology"},
    {"ID": 3, "Term": "mole", "Solution": "6.022e23", "Concept": "Chemistry"}
  ]
}"#;

#[test]
fn validate_good_set() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("set.json");
    std::fs::write(&path, GOOD_SET).unwrap();

    blocks()
        .arg("validate")
        .arg("--file")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Bio 101 (3 cards, 2 concepts)"))
        .stdout(predicate::str::contains("Biology — 2 card(s)"))
        .stdout(predicate::str::contains("All sets valid"));
}

#[test]
fn validate_flags_duplicate_ids() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("set.json");
    std::fs::write(
        &path,
        r#"{
          "ID": 1, "Title": "Dupes", "PublicID": "d",
          "Flashcards": [
            {"ID": 1, "Term": "a", "Concept": "X"},
            {"ID": 1, "Term": "b", "Concept": "X"}
          ]
        }"#,
    )
    .unwrap();

    blocks()
        .arg("validate")
        .arg("--file")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("duplicate card id 1"))
        .stdout(predicate::str::contains("1 warning(s) found"));
}

#[test]
fn validate_directory_of_sets() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.json"), GOOD_SET).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not a set").unwrap();

    blocks()
        .arg("validate")
        .arg("--file")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Bio 101"));
}

#[test]
fn validate_nonexistent_file() {
    blocks()
        .arg("validate")
        .arg("--file")
        .arg("/nonexistent/set.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read set file"));
}

#[test]
fn validate_malformed_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{not json").unwrap();

    blocks()
        .arg("validate")
        .arg("--file")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse set file"));
}

#[test]
fn init_creates_config_and_example_set() {
    let dir = TempDir::new().unwrap();

    blocks()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created blocks.toml"))
        .stdout(predicate::str::contains("Created sets/example.json"));

    assert!(dir.path().join("blocks.toml").exists());
    assert!(dir.path().join("sets/example.json").exists());

    // Second run leaves existing files alone.
    blocks()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists, skipping"));
}

#[test]
fn init_example_set_validates_cleanly() {
    let dir = TempDir::new().unwrap();
    blocks().current_dir(dir.path()).arg("init").assert().success();

    blocks()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--file")
        .arg(dir.path().join("sets/example.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("All sets valid"));
}

#[test]
fn play_requires_a_set_source() {
    blocks()
        .arg("play")
        .assert()
        .failure()
        .stderr(predicate::str::contains("pass --set"));
}

#[test]
fn play_offline_shows_instructions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("set.json");
    std::fs::write(&path, GOOD_SET).unwrap();

    // EOF before the start prompt exits cleanly.
    blocks()
        .arg("play")
        .arg("--file")
        .arg(&path)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("How to play Blocks"))
        .stdout(predicate::str::contains("Bio 101 (3 cards)"));
}

#[test]
fn play_rejects_empty_set() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.json");
    std::fs::write(
        &path,
        r#"{"ID": 1, "Title": "Empty", "PublicID": "e", "Flashcards": []}"#,
    )
    .unwrap();

    blocks()
        .arg("play")
        .arg("--file")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no cards"));
}

#[test]
fn play_full_game_over_stdin() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("set.json");
    std::fs::write(&path, GOOD_SET).unwrap();

    // Start, match both Biology terms, then the Chemistry term; decline replay.
    blocks()
        .arg("play")
        .arg("--file")
        .arg(&path)
        .write_stdin("\nt 1\nt 2\nt 1\nn\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Matched Biology!"))
        .stdout(predicate::str::contains("Matched Chemistry!"))
        .stdout(predicate::str::contains("Set complete!"))
        .stdout(predicate::str::contains("Offline set: score not submitted"));
}

#[test]
fn play_miss_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("set.json");
    std::fs::write(&path, GOOD_SET).unwrap();

    // Select one Biology card and the Chemistry card: wrong pair.
    blocks()
        .arg("play")
        .arg("--file")
        .arg(&path)
        .write_stdin("\nt 1\nt 3\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrong match!"));
}
