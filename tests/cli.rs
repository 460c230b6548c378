//! Integration tests driving the spravka binary's one-shot commands.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Get path to spravka binary
fn spravka_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_spravka"))
}

/// Run spravka with an isolated data directory and no user config
fn run_spravka(args: &[&str], home: &Path) -> (String, String, bool) {
    let output = Command::new(spravka_binary())
        .args(args)
        .arg("--config")
        .arg(home.join("missing-config.json"))
        .env("HOME", home)
        .env("XDG_DATA_HOME", home)
        .env_remove("SPRAVKA_LOG")
        .output()
        .expect("Failed to run spravka");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

#[test]
fn test_list_prints_titles_in_order() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, ok) = run_spravka(&["list", "--color", "never"], home.path());

    assert!(ok);
    let titles: Vec<&str> = stdout.lines().collect();
    assert_eq!(titles.len(), 9);
    assert_eq!(titles[0], "Закон Хика");
    assert_eq!(titles[3], "Горячие клавиши");
    assert_eq!(titles[8], "Метрики оценки интерфейса");
}

#[test]
fn test_show_topic() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, ok) = run_spravka(
        &["show", "Посимвольный поиск", "--color", "never"],
        home.path(),
    );

    assert!(ok);
    assert_eq!(
        stdout,
        "📘 Посимвольный поиск\n\nПо мере ввода текста список подходящих результатов обновляется.\n"
    );
}

#[test]
fn test_show_unknown_topic_fails() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, stderr, ok) = run_spravka(&["show", "Нет такой темы"], home.path());

    assert!(!ok);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Нет такой темы"));
}

#[test]
fn test_search_joins_words() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, ok) = run_spravka(
        &["search", "--color", "never", "горячие", "клавиши"],
        home.path(),
    );

    assert!(ok);
    assert_eq!(stdout.matches("🔹").count(), 1);
    assert!(stdout.starts_with("🔹 Горячие клавиши\n"));
}

#[test]
fn test_search_no_matches() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, ok) = run_spravka(&["search", "--color", "never", "блокчейн"], home.path());

    assert!(!ok);
    assert_eq!(stdout, "❌ Нет совпадений.\n");
}

#[test]
fn test_find_json() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, ok) = run_spravka(&["find", "--json", "мыши"], home.path());

    assert!(ok);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let spans = json["spans"].as_array().unwrap();
    assert_eq!(spans[0]["style"], "heading");
    assert_eq!(spans[0]["text"], "🔍 Найдено в \"Горячие клавиши\"");
    assert!(spans.iter().any(|s| s["style"] == "match" && s["text"] == "мыши"));
}

#[test]
fn test_find_not_found() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, ok) = run_spravka(&["find", "--color", "never", "Горячие"], home.path());

    assert!(!ok);
    assert_eq!(stdout, "❌ Ничего не найдено.\n");
}

#[test]
fn test_custom_glossary_file() {
    let home = tempfile::tempdir().unwrap();
    let glossary = home.path().join("topics.json");
    fs::write(
        &glossary,
        r#"{"topics": [
            {"title": "Affordance", "body": "What an object lets you do."},
            {"title": "Fitts's law", "body": "Time to reach a target grows with distance."}
        ]}"#,
    )
    .unwrap();

    let glossary_arg = glossary.to_str().unwrap();
    let (stdout, _, ok) = run_spravka(
        &["list", "--color", "never", "--glossary", glossary_arg],
        home.path(),
    );
    assert!(ok);
    assert_eq!(stdout, "Affordance\nFitts's law\n");

    let (stdout, _, ok) = run_spravka(
        &["find", "--color", "never", "--glossary", glossary_arg, "TARGET"],
        home.path(),
    );
    assert!(ok);
    assert!(stdout.contains("\"Fitts's law\""));
}

#[test]
fn test_invalid_glossary_file_reports_error() {
    let home = tempfile::tempdir().unwrap();
    let glossary = home.path().join("broken.json");
    fs::write(
        &glossary,
        r#"{"topics": [{"title": "A", "body": "x"}, {"title": "A", "body": "y"}]}"#,
    )
    .unwrap();

    let (_, stderr, ok) = run_spravka(
        &["list", "--glossary", glossary.to_str().unwrap()],
        home.path(),
    );
    assert!(!ok);
    assert!(stderr.contains("Duplicate topic title"));
}

#[test]
fn test_config_glossary_is_used() {
    let home = tempfile::tempdir().unwrap();
    let glossary = home.path().join("topics.json");
    fs::write(&glossary, r#"{"topics": [{"title": "Only", "body": "one topic"}]}"#).unwrap();

    let config = home.path().join("config.json");
    fs::write(
        &config,
        serde_json::json!({ "glossary": glossary }).to_string(),
    )
    .unwrap();

    let output = Command::new(spravka_binary())
        .args(["list", "--color", "never", "--config"])
        .arg(&config)
        .env("HOME", home.path())
        .env("XDG_DATA_HOME", home.path())
        .output()
        .expect("Failed to run spravka");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Only\n");
}

#[test]
fn test_commands_do_not_create_data_dir() {
    let home = tempfile::tempdir().unwrap();

    let output = Command::new(spravka_binary())
        .args(["list", "--color", "never"])
        .env("HOME", home.path())
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env_remove("SPRAVKA_LOG")
        .output()
        .expect("Failed to run spravka");

    assert!(output.status.success());
    assert!(!home.path().join("data").join("spravka").exists());
    assert!(!home.path().join("Library").join("Application Support").join("spravka").exists());
}
