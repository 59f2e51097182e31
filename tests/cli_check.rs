//! Integration test: `plcguard check` against a scripted engine.
//!
//! The engine is a small shell script in a temp directory that drains stdin
//! and prints canned output, so these run only on unix.
#![cfg(unix)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const VIOLATIONS: &str = r#"[{"status":"OK","rule_no":1,"rule_name":"Modularize PLC Code"},{"status":"NOT_FOLLOWED","rule_no":2,"rule_name":"Track operating modes","violation":{"line":2,"reason":"mode not checked","suggestion":"add mode guard"}}]"#;

const SOURCE: &str = "FUNCTION_BLOCK Pump\nIF start THEN run := TRUE; END_IF;\nEND_FUNCTION_BLOCK\n";

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        fs::write(dir.path().join("pump.scl"), SOURCE).expect("failed to write source");
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes an engine script that ignores its request and runs `body`.
    fn engine(&self, body: &str) -> String {
        let script = self.path().join("engine.sh");
        fs::write(&script, format!("cat >/dev/null\n{body}\n")).expect("failed to write engine");
        format!("sh {}", shell_words::quote(&script.to_string_lossy()))
    }

    fn engine_printing(&self, stdout: &str) -> String {
        self.engine(&format!("printf '%s' {}", shell_words::quote(stdout)))
    }

    fn check(&self, file: &str, extra: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_plcguard"))
            .arg("check")
            .arg(file)
            .args(extra)
            .current_dir(self.path())
            .env("NO_COLOR", "1")
            .output()
            .expect("failed to execute plcguard")
    }
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("stdout is not valid JSON")
}

#[test]
fn violations_exit_with_check_failed() {
    let ws = Workspace::new();
    let engine = ws.engine_printing(VIOLATIONS);
    let out = ws.check("pump.scl", &["--engine", &engine]);

    assert_eq!(out.status.code(), Some(6));
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("95% compliant"), "{text}");
    assert!(text.contains("pump.scl:2"), "{text}");
    assert!(text.contains("IF start THEN run := TRUE; END_IF;"), "{text}");
}

#[test]
fn clean_run_exits_zero() {
    let ws = Workspace::new();
    let engine = ws.engine_printing(r#"[{"status":"OK","rule_no":1,"rule_name":"X"}]"#);
    let out = ws.check("pump.scl", &["--engine", &engine]);

    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("100% compliant"));
}

#[test]
fn json_output_carries_the_report() {
    let ws = Workspace::new();
    let engine = ws.engine_printing(VIOLATIONS);
    let out = ws.check("pump.scl", &["--engine", &engine, "--json"]);

    assert_eq!(out.status.code(), Some(6));
    let value = stdout_json(&out);
    assert_eq!(value["file"], "pump.scl");
    assert_eq!(value["phase"], "success");
    assert_eq!(value["report"]["summary"]["failed_rule_count"], 1);
    assert_eq!(value["report"]["summary"]["passed_rule_count"], 19);
    assert_eq!(value["report"]["results"]["violations"][0]["line"], 2);
    assert_eq!(value["report"]["frequency"][0]["rule_no"], 2);
}

#[test]
fn json_format_can_come_from_config() {
    let ws = Workspace::new();
    let engine = ws.engine_printing("[]");
    fs::write(ws.path().join("plcguard.toml"), "[report]\nformat = \"json\"\n").unwrap();
    let out = ws.check("pump.scl", &["--engine", &engine]);

    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout_json(&out)["report"]["summary"]["percent"], 100);
}

#[test]
fn engine_from_config_is_used() {
    let ws = Workspace::new();
    let engine = ws.engine_printing(VIOLATIONS);
    let words = shell_words::split(&engine).unwrap();
    fs::write(
        ws.path().join("plcguard.toml"),
        format!("[engine]\ncommand = {}\n", toml_array(&words)),
    )
    .unwrap();
    let out = ws.check("pump.scl", &["--json"]);

    assert_eq!(out.status.code(), Some(6));
    assert_eq!(stdout_json(&out)["report"]["results"]["followed"][0]["rule_no"], 1);
}

fn toml_array(words: &[String]) -> String {
    let quoted: Vec<String> = words.iter().map(|w| format!("{w:?}")).collect();
    format!("[{}]", quoted.join(", "))
}

#[test]
fn malformed_engine_output_is_an_error() {
    let ws = Workspace::new();
    let engine = ws.engine_printing("Parse Error at line 1");
    let out = ws.check("pump.scl", &["--engine", &engine, "--json"]);

    assert_eq!(out.status.code(), Some(1));
    let value = stdout_json(&out);
    assert_eq!(value["phase"], "failure");
    assert_eq!(value["failure"]["kind"], "malformed_output");
}

#[test]
fn crashing_engine_reports_stderr() {
    let ws = Workspace::new();
    let engine = ws.engine("echo 'checker crashed' >&2\nexit 4");
    let out = ws.check("pump.scl", &["--engine", &engine]);

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stdout).contains("checker crashed"));
}

#[test]
fn missing_engine_is_unavailable() {
    let ws = Workspace::new();
    let out = ws.check("pump.scl", &["--engine", "no_such_plc_checker_987", "--json"]);

    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout_json(&out)["failure"]["kind"], "engine_unavailable");
}

#[test]
fn unsupported_extension_is_invalid_input() {
    let ws = Workspace::new();
    fs::write(ws.path().join("notes.txt"), "hello").unwrap();
    let engine = ws.engine_printing("[]");
    let out = ws.check("notes.txt", &["--engine", &engine]);

    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("notes.txt"));
}

#[test]
fn empty_source_is_invalid_input() {
    let ws = Workspace::new();
    fs::write(ws.path().join("empty.st"), "").unwrap();
    let engine = ws.engine_printing("[]");
    let out = ws.check("empty.st", &["--engine", &engine]);

    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn policy_file_reaches_the_engine() {
    let ws = Workspace::new();
    fs::write(ws.path().join("policy.json"), r#"{"pairs":[["A","B"]]}"#).unwrap();
    let script = ws.path().join("echo_policy.sh");
    // Echo back a policy ERROR only when the policy text arrived on stdin.
    fs::write(
        &script,
        r#"if grep -q pairs; then printf '%s' '[{"status":"ERROR","rule_no":10,"rule_name":"Policy","reason":"seen"}]'; else printf '[]'; fi"#,
    )
    .unwrap();
    let engine = format!("sh {}", shell_words::quote(&script.to_string_lossy()));
    let out = ws.check("pump.scl", &["--engine", &engine, "--policy", "policy.json", "--json"]);

    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout_json(&out)["report"]["results"]["errors"][0]["reason"], "seen");
}
