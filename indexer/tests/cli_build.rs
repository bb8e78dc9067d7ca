use serde_json::Value;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn indexer() -> Command {
    Command::new(env!("CARGO_BIN_EXE_indexer"))
}

const FEEDS: &str = r#"[
  {"title": "Rust Blog", "items": [
    {"title": "Announcing Rust", "description": "release notes", "link": "https://blog/1", "pubDate": "2024-01-01"},
    {"title": "Announcing Rust (mirror)", "description": "release notes", "link": "https://blog/1"},
    {"title": "No link here", "description": "dropped"},
    {"title": "Cargo tips", "content": "<p>workspaces &amp; features</p>", "link": "https://blog/2"}
  ]},
  {"title": "Garden", "items": [
    {"title": "Tomatoes", "description": null, "link": "https://garden/1"}
  ]}
]"#;

#[test]
fn build_writes_envelope_and_respects_force() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("feeds.json");
    let output = dir.path().join("public").join("search.json");
    fs::write(&input, FEEDS).unwrap();

    let status = indexer().args(["build", "--input"]).arg(&input).arg("--output").arg(&output).status().unwrap();
    assert!(status.success());

    let v: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(v["postCount"], 3);
    assert_eq!(v["index"]["metadata"]["documentCount"], 3);
    assert_eq!(v["index"]["documentMap"]["1"]["title"], "Cargo tips");
    assert_eq!(v["index"]["documentMap"]["2"]["feedTitle"], "Garden");
    assert!(v["index"]["invertedIndex"]["announcing"].is_object());

    // existing artifact is left alone without --force
    fs::write(&input, "[]").unwrap();
    let status = indexer().args(["build", "--input"]).arg(&input).arg("--output").arg(&output).status().unwrap();
    assert!(status.success());
    let v: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(v["postCount"], 3);

    let status = indexer().args(["build", "--force", "--input"]).arg(&input).arg("--output").arg(&output).status().unwrap();
    assert!(status.success());
    let v: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(v["postCount"], 0);
}

#[test]
fn raw_keeps_every_item() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("feeds.json");
    let output = dir.path().join("search.bin");
    fs::write(&input, FEEDS).unwrap();

    let status = indexer().args(["build", "--raw", "--input"]).arg(&input).arg("--output").arg(&output).status().unwrap();
    assert!(status.success());

    let out = indexer().args(["stats", "--index"]).arg(&output).output().unwrap();
    assert!(out.status.success());
    let v: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["postCount"], 5);
    assert_eq!(v["metadata"]["documentCount"], 5);
}

#[test]
fn stats_fails_on_missing_artifact() {
    let dir = tempdir().unwrap();
    let out = indexer().args(["stats", "--index"]).arg(dir.path().join("none.json")).output().unwrap();
    assert!(!out.status.success());
}
