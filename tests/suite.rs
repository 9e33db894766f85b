// Centralized integration suite for the tenets helpers; exercises catalog
// validation, lookup rules, rendering, and the listing binaries so changes
// surface in one place.
mod support;

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs;
use std::io::{Cursor, Write};
use std::process::{Command, Stdio};
use support::{
    golden_catalog_path, helper_binary, run_command, run_command_expect_failure, workspace_root,
};
use tempfile::TempDir;
use tenets::read_rendered_outline;

fn check_cmd() -> Command {
    let mut cmd = Command::new(helper_binary("tenet-check"));
    cmd.env("TENETS_ROOT", workspace_root());
    cmd
}

fn run_with_stdin(mut cmd: Command, input: &str) -> Result<std::process::Output> {
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd.spawn().context("spawning helper with piped stdin")?;
    child
        .stdin
        .as_mut()
        .context("child stdin unavailable")?
        .write_all(input.as_bytes())
        .context("writing stdin payload")?;
    child.wait_with_output().context("waiting for helper")
}

fn write_catalog(dir: &TempDir, name: &str, value: &Value) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string_pretty(value).expect("serialize fixture"))
        .expect("write fixture catalog");
    path
}

fn broken_catalog_value() -> Value {
    json!({
        "schema_version": "tenet_catalog_v1",
        "catalog": {"key": "principles_broken_v1", "title": "Broken", "labels": []},
        "scope": {
            "description": "Broken fixture.",
            "languages": {"javascript": "Modern JavaScript."}
        },
        "docs": {},
        "entries": [
            {
                "id": "srp",
                "title": "Single Responsibility Principle",
                "summary": "One reason to change.",
                "examples": [{"language": "javascript", "lines": ["x();"]}]
            },
            {
                "id": "srp",
                "title": "Duplicate Entry",
                "summary": "",
                "examples": [{"language": "fortran", "lines": ["y();"]}]
            }
        ]
    })
}

#[test]
fn default_catalog_passes_check() -> Result<()> {
    let output = run_command(check_cmd())?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ok:"), "expected ok line, got {stdout}");
    assert!(
        stdout.contains("(10 entries)"),
        "expected entry count, got {stdout}"
    );
    Ok(())
}

#[test]
fn check_reports_every_violation_for_broken_catalog() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_catalog(&dir, "broken.json", &broken_catalog_value());

    let mut cmd = check_cmd();
    cmd.arg("--catalog").arg(&path);
    let output = run_command_expect_failure(cmd)?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("duplicate entry id srp"),
        "missing duplicate-id report: {stderr}"
    );
    assert!(
        stderr.contains("empty summary"),
        "missing empty-summary report: {stderr}"
    );
    assert!(
        stderr.contains("undeclared language 'fortran'"),
        "missing language report: {stderr}"
    );
    assert!(stderr.contains("validation error"), "missing tally: {stderr}");
    Ok(())
}

#[test]
fn check_accepts_golden_catalog_via_stdin() -> Result<()> {
    let document = fs::read_to_string(golden_catalog_path())?;
    let mut cmd = check_cmd();
    cmd.arg("--stdin");
    let output = run_with_stdin(cmd, &document)?;
    assert!(output.status.success(), "stdin check should pass");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ok: <stdin> (3 entries)"), "got {stdout}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("declared language 'ruby' has no examples"),
        "got {stderr}"
    );
    Ok(())
}

#[test]
fn check_rejects_broken_catalog_via_stdin() -> Result<()> {
    let document = serde_json::to_string(&broken_catalog_value())?;
    let mut cmd = check_cmd();
    cmd.arg("--stdin");
    let output = run_with_stdin(cmd, &document)?;
    assert!(!output.status.success(), "stdin check should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("<stdin>: duplicate entry id srp"), "got {stderr}");
    Ok(())
}

#[test]
fn check_sweeps_directories_for_catalogs() -> Result<()> {
    let dir = TempDir::new()?;
    write_catalog(&dir, "first.json", &broken_catalog_value());
    fs::write(dir.path().join("second.json"), "{ not json").expect("write second fixture");

    let mut cmd = check_cmd();
    cmd.arg("--dir").arg(dir.path());
    let output = run_command_expect_failure(cmd)?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("first.json"), "got {stderr}");
    assert!(stderr.contains("second.json"), "got {stderr}");
    assert!(stderr.contains("invalid catalog"), "got {stderr}");
    Ok(())
}

#[test]
fn render_stdout_matches_output_file() -> Result<()> {
    let mut stdout_cmd = Command::new(helper_binary("tenet-render"));
    stdout_cmd.env("TENETS_ROOT", workspace_root());
    let stdout_output = run_command(stdout_cmd)?;
    let rendered = String::from_utf8_lossy(&stdout_output.stdout).into_owned();
    assert!(rendered.contains("# Design Tenets"), "missing title");
    assert!(rendered.contains("```javascript"), "missing fenced example");
    assert!(!rendered.contains("[toc]"), "contents tables are out of scope");

    let dir = TempDir::new()?;
    let out_path = dir.path().join("tenets.md");
    let mut file_cmd = Command::new(helper_binary("tenet-render"));
    file_cmd
        .env("TENETS_ROOT", workspace_root())
        .arg("--output")
        .arg(&out_path);
    run_command(file_cmd)?;

    let written = fs::read_to_string(&out_path)?;
    assert_eq!(written, rendered, "file output must match stdout output");
    Ok(())
}

#[test]
fn rendered_document_round_trips_ids_and_titles() -> Result<()> {
    let mut render_cmd = Command::new(helper_binary("tenet-render"));
    render_cmd.env("TENETS_ROOT", workspace_root());
    let rendered = run_command(render_cmd)?.stdout;

    let outline = read_rendered_outline(Cursor::new(rendered))
        .map_err(|err| anyhow::anyhow!("outline parse failed: {err}"))?;
    let outline_ids: Vec<String> = outline.iter().map(|entry| entry.id.0.clone()).collect();

    let mut list_cmd = Command::new(helper_binary("tenet-list"));
    list_cmd.env("TENETS_ROOT", workspace_root());
    let listed = run_command(list_cmd)?.stdout;
    let listed_ids: Vec<String> = String::from_utf8_lossy(&listed)
        .lines()
        .map(|line| line.split('\t').next().unwrap_or_default().to_string())
        .collect();

    assert_eq!(outline_ids, listed_ids, "outline and listing must agree");
    assert!(outline
        .iter()
        .any(|entry| entry.title == "Open/Closed Principle"));
    Ok(())
}

#[test]
fn show_by_id_returns_matching_entry() -> Result<()> {
    let mut cmd = Command::new(helper_binary("tenet-show"));
    cmd.arg("--catalog")
        .arg(golden_catalog_path())
        .arg("--id")
        .arg("ocp");
    let output = run_command(cmd)?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("## Open/Closed Principle"), "got {stdout}");
    assert!(stdout.contains("`ocp`"), "got {stdout}");
    Ok(())
}

#[test]
fn show_unknown_id_fails_with_known_ids() -> Result<()> {
    let mut cmd = Command::new(helper_binary("tenet-show"));
    cmd.arg("--catalog")
        .arg(golden_catalog_path())
        .arg("--id")
        .arg("dip");
    let output = run_command_expect_failure(cmd)?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no entry with id 'dip'"), "got {stderr}");
    assert!(stderr.contains("srp, ocp, lsp"), "got {stderr}");
    Ok(())
}

#[test]
fn show_by_position_uses_authored_order() -> Result<()> {
    let mut cmd = Command::new(helper_binary("tenet-show"));
    cmd.arg("--catalog")
        .arg(golden_catalog_path())
        .arg("--position")
        .arg("2");
    let output = run_command(cmd)?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("## Liskov Substitution Principle"),
        "got {stdout}"
    );

    let mut out_of_range = Command::new(helper_binary("tenet-show"));
    out_of_range
        .arg("--catalog")
        .arg(golden_catalog_path())
        .arg("--position")
        .arg("3");
    let output = run_command_expect_failure(out_of_range)?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("catalog has 3 entries"), "got {stderr}");
    Ok(())
}

#[test]
fn show_json_emits_full_entry() -> Result<()> {
    let mut cmd = Command::new(helper_binary("tenet-show"));
    cmd.arg("--catalog")
        .arg(golden_catalog_path())
        .arg("--id")
        .arg("srp")
        .arg("--json");
    let output = run_command(cmd)?;
    let value: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value.get("id").and_then(Value::as_str), Some("srp"));
    assert_eq!(
        value.get("title").and_then(Value::as_str),
        Some("Single Responsibility Principle")
    );
    assert!(value.get("examples").and_then(Value::as_array).is_some());
    Ok(())
}

#[test]
fn every_listed_id_resolves_through_show() -> Result<()> {
    let mut list_cmd = Command::new(helper_binary("tenet-list"));
    list_cmd.arg("--catalog").arg(golden_catalog_path());
    let listed = run_command(list_cmd)?.stdout;

    for line in String::from_utf8_lossy(&listed).lines() {
        let id = line.split('\t').next().unwrap_or_default();
        let mut show_cmd = Command::new(helper_binary("tenet-show"));
        show_cmd
            .arg("--catalog")
            .arg(golden_catalog_path())
            .arg("--id")
            .arg(id);
        run_command(show_cmd).with_context(|| format!("listed id {id} must resolve"))?;
    }
    Ok(())
}

#[test]
fn listing_is_stable_across_runs() -> Result<()> {
    let mut first_cmd = Command::new(helper_binary("tenet-list"));
    first_cmd.arg("--catalog").arg(golden_catalog_path());
    let first = run_command(first_cmd)?.stdout;

    let mut second_cmd = Command::new(helper_binary("tenet-list"));
    second_cmd.arg("--catalog").arg(golden_catalog_path());
    let second = run_command(second_cmd)?.stdout;

    assert_eq!(first, second, "listing must be deterministic");
    let text = String::from_utf8_lossy(&first).into_owned();
    let ids: Vec<&str> = text
        .lines()
        .map(|line| line.split('\t').next().unwrap_or_default())
        .collect();
    assert_eq!(ids, vec!["srp", "ocp", "lsp"], "authored order must hold");
    Ok(())
}

#[test]
fn list_filters_by_language_as_json() -> Result<()> {
    let mut cmd = Command::new(helper_binary("tenet-list"));
    cmd.arg("--catalog")
        .arg(golden_catalog_path())
        .arg("--language")
        .arg("pseudocode")
        .arg("--json");
    let output = run_command(cmd)?;
    let snapshots: Value = serde_json::from_slice(&output.stdout)?;
    let snapshots = snapshots.as_array().context("snapshot array expected")?;
    assert_eq!(snapshots.len(), 1);
    assert_eq!(
        snapshots[0].get("id").and_then(Value::as_str),
        Some("lsp")
    );
    Ok(())
}

#[test]
fn list_coverage_reports_unused_language() -> Result<()> {
    let mut cmd = Command::new(helper_binary("tenet-list"));
    cmd.arg("--catalog")
        .arg(golden_catalog_path())
        .arg("--coverage");
    let output = run_command(cmd)?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("javascript: 2 entries"), "got {stdout}");
    assert!(stdout.contains("ruby: unused"), "got {stdout}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("declared language 'ruby' has no examples"),
        "got {stderr}"
    );
    Ok(())
}
