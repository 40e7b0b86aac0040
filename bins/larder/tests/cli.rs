//! End-to-end tests for the larder binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

const EXPORT: &str = r#"[
    {"id": 1, "name": "Tomato Soup", "author": "Jane Doe", "tags": ["vegetarian"],
     "ingredients": [{"quantity": "4", "name": "tomatoes"}, {"quantity": "1 cup", "name": "cream"}]},
    {"id": 2, "name": "Crème brûlée", "author": null, "tags": ["dessert"],
     "ingredients": [{"quantity": "2 cups", "name": "heavy cream"}]},
    {"id": 12, "name": "Chicken Noodle Soup", "author": "Sam",
     "ingredients": [{"quantity": "200 g", "name": "egg noodles"}]},
    {"id": 21, "name": "Apple Pie", "author": "Jane", "tags": ["dessert"],
     "ingredients": [], "archived_at": "2021-06-01T08:00:00Z"}
]"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("recipes.json"), EXPORT).unwrap();
        Self { dir }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("larder").unwrap();
        cmd.current_dir(self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path())
            .env_remove("LARDER_LOG");
        cmd
    }

    fn search_json(&self, args: &[&str]) -> Value {
        self.search_json_with(&[], args)
    }

    /// Search with `options` placed before the export path and the query
    fn search_json_with(&self, options: &[&str], query: &[&str]) -> Value {
        let output = self
            .cmd()
            .args(["--format", "json", "search"])
            .args(options)
            .arg("recipes.json")
            .args(query)
            .output()
            .unwrap();
        assert!(output.status.success());
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

fn ids(json: &Value) -> Vec<i64> {
    json["recipes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|hit| hit["recipe"]["id"].as_i64().unwrap())
        .collect()
}

#[test]
fn test_search_text_output() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["search", "recipes.json", "soup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tomato Soup by Jane Doe"))
        .stdout(predicate::str::contains("name: Chicken Noodle Soup"))
        .stdout(predicate::str::contains("Apple Pie").not())
        .stderr(predicate::str::contains("2 matching recipes"));
}

#[test]
fn test_search_json_output() {
    let ws = Workspace::new();
    let json = ws.search_json(&["ingredient:cream"]);
    assert_eq!(json["total"], 2);
    assert_eq!(ids(&json), vec![2, 1]);
    assert_eq!(json["recipes"][0]["match"][0]["kind"], "ingredient");
    assert_eq!(json["recipes"][0]["match"][0]["value"], "2 cups heavy cream");
}

#[test]
fn test_empty_query_lists_everything_archived_last() {
    let ws = Workspace::new();
    let json = ws.search_json(&[]);
    assert_eq!(ids(&json), vec![12, 2, 1, 21]);
}

#[test]
fn test_negation_and_accents() {
    let ws = Workspace::new();
    assert_eq!(ids(&ws.search_json(&["soup", "-author:jane"])), vec![12]);
    assert_eq!(ids(&ws.search_json(&["CREME"])), vec![2]);
}

#[test]
fn test_quoted_query_argument() {
    let ws = Workspace::new();
    assert_eq!(ids(&ws.search_json(&[r#"ingredient:"egg noodles""#])), vec![12]);
}

#[test]
fn test_exclude_archived() {
    let ws = Workspace::new();
    assert_eq!(ids(&ws.search_json_with(&["--exclude-archived"], &["jane"])), vec![1]);
    assert_eq!(ids(&ws.search_json(&["jane"])), vec![1, 21]);
}

#[test]
fn test_flags_after_query_are_query_terms() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["parse", "jane", "--exclude-archived"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exclude author|name ~ \"-exclude-archived\""));
}

#[test]
fn test_negated_terms_after_options() {
    let ws = Workspace::new();
    let json = ws.search_json_with(&["--exclude-archived"], &["-tag:vegetarian", "-author:sam"]);
    assert_eq!(ids(&json), vec![2]);
}

#[test]
fn test_config_hides_archived() {
    let ws = Workspace::new();
    fs::write(ws.dir.path().join(".larder.toml"), "[search]\ninclude_archived = false\n").unwrap();
    assert_eq!(ids(&ws.search_json(&["tag:dessert"])), vec![2]);
    assert_eq!(
        ids(&ws.search_json_with(&["--include-archived"], &["tag:dessert"])),
        vec![2, 21]
    );
}

#[test]
fn test_limit() {
    let ws = Workspace::new();
    let json = ws.search_json_with(&["--limit", "2"], &[]);
    assert_eq!(json["total"], 4);
    assert_eq!(ids(&json), vec![12, 2]);
}

#[test]
fn test_zero_limit_rejected() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["search", "--limit", "0", "recipes.json"])
        .assert()
        .code(2);
}

#[test]
fn test_search_from_stdin() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["search", "-", "id:12"])
        .write_stdin(EXPORT)
        .assert()
        .success()
        .stdout(predicate::str::contains("#12  Chicken Noodle Soup by Sam"))
        .stdout(predicate::str::contains("id: 12"));
}

#[test]
fn test_missing_export_exit_code() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["search", "missing.json", "soup"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("E4000"));
}

#[test]
fn test_json_error_report() {
    let ws = Workspace::new();
    let output = ws
        .cmd()
        .args(["--format", "json", "search", "missing.json", "soup"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(output.stdout.is_empty());

    let report: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(report["code_str"], "E4000");
    assert_eq!(report["category"], "Catalog");
    assert!(report["suggestion"].is_string());
}

#[test]
fn test_json_error_report_for_invalid_config() {
    let ws = Workspace::new();
    fs::write(ws.dir.path().join(".larder.toml"), "[search]
limit = 0
").unwrap();
    let output = ws
        .cmd()
        .args(["--format", "json", "search", "recipes.json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));

    let report: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(report["code_str"], "E3004");
}

#[test]
fn test_invalid_export_exit_code() {
    let ws = Workspace::new();
    fs::write(ws.dir.path().join("broken.json"), "{\"items\": []}").unwrap();
    ws.cmd()
        .args(["search", "broken.json"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("E4002"));
}

#[test]
fn test_invalid_config_exit_code() {
    let ws = Workspace::new();
    fs::write(ws.dir.path().join(".larder.toml"), "[output]\nformat = \"yaml\"\n").unwrap();
    ws.cmd()
        .args(["search", "recipes.json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("E3002"));
}

#[test]
fn test_parse_json() {
    let ws = Workspace::new();
    let output = ws
        .cmd()
        .args(["parse", "--format", "json", "-tag:spicy", r#"name:"pot pie""#])
        .output()
        .unwrap();
    assert!(output.status.success());

    let nodes: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(nodes[0]["field"], "tag");
    assert_eq!(nodes[0]["negative"], true);
    assert_eq!(nodes[1]["field"], "name");
    assert_eq!(nodes[1]["value"], "pot pie");
}

#[test]
fn test_parse_text() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["parse", "jane"])
        .assert()
        .success()
        .stdout(predicate::str::contains("include author|name ~ \"jane\""));
}

#[test]
fn test_normalize() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["normalize", "Crème", "Brûlée!"])
        .assert()
        .success()
        .stdout("cremebrulee\n");
}
