use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn pilot(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("prompt-pilot");
    cmd.arg("--data-dir").arg(dir.path());
    cmd
}

#[test]
fn test_cli_help() {
    let mut cmd = cargo_bin_cmd!("prompt-pilot");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Agent presets and a local prompt optimizer",
        ))
        .stdout(predicate::str::contains("optimize"))
        .stdout(predicate::str::contains("agents"))
        .stdout(predicate::str::contains("providers"))
        .stdout(predicate::str::contains("shell"));
}

#[test]
fn test_cli_version() {
    let mut cmd = cargo_bin_cmd!("prompt-pilot");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("prompt-pilot"));
}

#[test]
fn test_cli_optimize_help() {
    let mut cmd = cargo_bin_cmd!("prompt-pilot");
    cmd.args(["optimize", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--mode"))
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("--no-delay"));
}

#[test]
fn test_optimize_with_mode_and_format() {
    let dir = TempDir::new().unwrap();
    pilot(&dir)
        .args([
            "optimize",
            "Please make a form",
            "--mode",
            "SIMPLIFY",
            "--format",
            "Markdown",
            "--no-delay",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("$ OUTPUT.PROMPT"))
        .stdout(predicate::str::contains("# Optimized Output\n\nmake a form"));
}

#[test]
fn test_optimize_uses_active_agent_mode() {
    let dir = TempDir::new().unwrap();
    pilot(&dir)
        .args(["optimize", "build a form", "--no-delay"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "I need you to create exactly what I describe below",
        ));
}

#[test]
fn test_optimize_json_output() {
    let dir = TempDir::new().unwrap();
    pilot(&dir)
        .args([
            "--output",
            "json",
            "optimize",
            "hello",
            "--mode",
            "shorten",
            "--format",
            "json",
            "--no-delay",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""mode":"SHORTEN""#))
        .stdout(predicate::str::contains(r#""format":"JSON""#))
        .stdout(predicate::str::contains(r#""input":"hello""#));
}

#[test]
fn test_optimize_refuses_blank_input() {
    let dir = TempDir::new().unwrap();
    pilot(&dir)
        .args(["optimize", "   ", "--mode", "CLARIFY", "--no-delay"])
        .assert()
        .failure();
}

#[test]
fn test_optimize_rejects_unknown_mode() {
    let dir = TempDir::new().unwrap();
    pilot(&dir)
        .args(["optimize", "hi", "--mode", "TRANSLATE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TRANSLATE"));
}

#[test]
fn test_agents_require_init() {
    let dir = TempDir::new().unwrap();
    pilot(&dir)
        .args(["agents", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("init"));
}

#[test]
fn test_init_then_agent_lifecycle() {
    let dir = TempDir::new().unwrap();
    pilot(&dir).arg("init").assert().success();
    assert!(dir.path().join("config.toml").exists());
    assert!(dir.path().join("store").join("agents.json").exists());

    pilot(&dir)
        .args(["agents", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Prompt Eng"))
        .stdout(predicate::str::contains("Frontend Design & HTML"));

    pilot(&dir)
        .args([
            "agents",
            "create",
            "--name",
            "Reviewer",
            "--system-prompt",
            "You review code.",
            "--format",
            "markdown",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created agent Reviewer"));

    pilot(&dir)
        .args(["--output", "json", "agents", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name":"Reviewer""#))
        .stdout(predicate::str::contains(r#""outputFormat":"Markdown""#));

    pilot(&dir)
        .args(["agents", "select", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Frontend Design & HTML"));

    pilot(&dir)
        .args(["optimize", "make a website", "--no-delay"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Design and implement a web applicationlication",
        ));

    pilot(&dir)
        .args(["agents", "delete", "2"])
        .assert()
        .success();
    pilot(&dir)
        .args(["agents", "show", "2"])
        .assert()
        .failure();
}

#[test]
fn test_agent_create_requires_name_and_prompt() {
    let dir = TempDir::new().unwrap();
    pilot(&dir).arg("init").assert().success();
    pilot(&dir)
        .args(["agents", "create", "--name", "Half done"])
        .assert()
        .failure();
}

#[test]
fn test_provider_settings_persist() {
    let dir = TempDir::new().unwrap();
    pilot(&dir).arg("init").assert().success();

    pilot(&dir)
        .args(["providers", "set-key", "anthropic", "sk-ant-0123456789"])
        .assert()
        .success();
    pilot(&dir)
        .args(["providers", "toggle", "anthropic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("enabled"));

    pilot(&dir)
        .args(["--output", "json", "providers", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6789"))
        .stdout(predicate::str::contains("sk-ant-0123456789").not());

    pilot(&dir)
        .args(["providers", "set-model", "openai", "no-such-model"])
        .assert()
        .failure();
    pilot(&dir)
        .args(["providers", "toggle", "unknown"])
        .assert()
        .failure();
}

#[test]
fn test_modes_and_formats() {
    let dir = TempDir::new().unwrap();
    pilot(&dir)
        .arg("modes")
        .assert()
        .success()
        .stdout(predicate::str::contains("REWRITE_PERFECTLY"))
        .stdout(predicate::str::contains("SHORTEN"));
    pilot(&dir)
        .arg("formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bulleted List"))
        .stdout(predicate::str::contains("Table"));
}

#[test]
fn test_config_show() {
    let dir = TempDir::new().unwrap();
    pilot(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("delay_ms = 1500"))
        .stdout(predicate::str::contains("max_entries = 10"));
}
