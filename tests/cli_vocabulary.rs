use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn lexi(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lexi").unwrap();
    cmd.env("LEXI_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("LEXI_LOG");
    cmd
}

fn add_language(home: &Path, name: &str) {
    lexi(home)
        .args(["language", "add", name])
        .assert()
        .success();
}

#[test]
fn test_commands_need_a_language() {
    let temp_dir = tempfile::tempdir().unwrap();

    lexi(temp_dir.path())
        .args(["word", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No languages yet"));
}

#[test]
fn test_language_add_and_list() {
    let temp_dir = tempfile::tempdir().unwrap();

    lexi(temp_dir.path())
        .args(["language", "add", "Spanish", "--flag", "🇪🇸", "--role", "student"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Language added: 🇪🇸 Spanish"));

    lexi(temp_dir.path())
        .args(["language", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* 1. 🇪🇸 Spanish (student)"));
}

#[test]
fn test_words_with_categories() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    add_language(home, "Spanish");

    lexi(home)
        .args(["category", "add", "Animals", "--color", "green"])
        .assert()
        .success();
    lexi(home)
        .args(["word", "add", "gato", "cat", "--example", "El gato duerme.", "-c", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Word added: gato"));

    lexi(home)
        .args(["word", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gato · cat"))
        .stdout(predicate::str::contains("Animals"));

    // Deleting the category keeps the word.
    lexi(home)
        .args(["category", "delete", "1"])
        .assert()
        .success();
    lexi(home)
        .args(["word", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gato · cat"))
        .stdout(predicate::str::contains("uncategorized"));
}

#[test]
fn test_word_add_requires_definition() {
    let temp_dir = tempfile::tempdir().unwrap();
    add_language(temp_dir.path(), "Spanish");

    lexi(temp_dir.path())
        .args(["word", "add", "gato", " "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Definition is required"));
}

#[test]
fn test_word_search_and_delete() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    add_language(home, "Spanish");
    for (term, definition) in [("gato", "cat"), ("perro", "dog")] {
        lexi(home)
            .args(["word", "add", term, definition])
            .assert()
            .success();
    }

    lexi(home)
        .args(["word", "list", "--search", "GAT"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gato"))
        .stdout(predicate::str::contains("perro").not());

    lexi(home)
        .args(["word", "delete", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Index 9 not found"));

    // Newest first, so 1 is perro.
    lexi(home)
        .args(["word", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Word deleted (1): perro"));
}

#[test]
fn test_language_override_and_use() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    add_language(home, "Spanish");
    add_language(home, "French");

    lexi(home)
        .args(["-l", "2", "word", "add", "bonjour", "hello"])
        .assert()
        .success();

    lexi(home)
        .args(["word", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bonjour").not());

    lexi(home)
        .args(["language", "use", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Now studying: French"));

    lexi(home)
        .args(["word", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bonjour · hello"));
}

#[test]
fn test_config_default_mode() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    lexi(home)
        .args(["config", "default-mode", "forgot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default-mode set to forgot"));

    lexi(home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("default-mode = forgot"));

    lexi(home)
        .args(["config", "colour", "red"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown config key: colour"));
}

#[test]
fn test_invalid_rows_are_reported() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    add_language(home, "Spanish");
    lexi(home)
        .args(["word", "add", "gato", "cat"])
        .assert()
        .success();

    let words_path = home.join("words.json");
    let mut table: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&words_path).unwrap()).unwrap();
    for row in table.as_object_mut().unwrap().values_mut() {
        row["forgot_count"] = serde_json::json!(-1);
    }
    std::fs::write(&words_path, table.to_string()).unwrap();

    lexi(home)
        .args(["word", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid record"));
}
