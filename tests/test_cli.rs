// CLI integration tests for twc
// Drives the built binary against temporary base files and edit scripts

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const BASE: &str = "while( true){foo( );}";

const SCRIPT: &str = r#"
[[edit]]
from = 5
to = 5
text = " "

[[edit]]
from = 6
to = 7

[[edit]]
from = 12
to = 12
text = "\n"

[[edit]]
from = 13
to = 13
text = "\n    "

[[edit]]
from = 17
to = 18

[[edit]]
from = 20
to = 20
text = "\n"
"#;

struct Fixture {
    _dir: TempDir,
    base: PathBuf,
    script: PathBuf,
}

fn fixture(script: &str) -> Fixture {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let base = dir.path().join("input.c");
    let script_path = dir.path().join("edits.toml");
    fs::write(&base, BASE).expect("Failed to write base file");
    fs::write(&script_path, script).expect("Failed to write script");
    Fixture {
        _dir: dir,
        base,
        script: script_path,
    }
}

fn twc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_twc"))
        .args(args)
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", env!("CARGO_TARGET_TMPDIR"))
        .output()
        .expect("Failed to execute command")
}

fn arg(path: &Path) -> &str {
    path.to_str().expect("temp path should be UTF-8")
}

/// Test that --help lists the subcommands
#[test]
fn test_help_flag_shows_subcommands() {
    let output = twc(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Help should exit with success");
    for command in ["apply", "search", "count"] {
        assert!(
            stdout.contains(command),
            "Help should show {} subcommand. Got: {}",
            command,
            stdout
        );
    }
}

#[test]
fn test_apply_prints_edited_text() {
    let fixture = fixture(SCRIPT);
    let output = twc(&["apply", arg(&fixture.base), arg(&fixture.script)]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "while (true)\n{\n    foo();\n}"
    );
}

#[test]
fn test_apply_diff_shows_unified_diff() {
    let fixture = fixture(SCRIPT);
    let output = twc(&["apply", arg(&fixture.base), arg(&fixture.script), "--diff"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("+++ formatted"), "Got: {}", stdout);
    assert!(stdout.contains("-while( true){foo( );}"), "Got: {}", stdout);
    assert!(stdout.contains("+while (true)"), "Got: {}", stdout);
}

#[test]
fn test_apply_rejects_non_whitespace_edit() {
    let fixture = fixture("[[edit]]\nfrom = 0\nto = 5\ntext = \" \"\n");
    let output = twc(&["apply", arg(&fixture.base), arg(&fixture.script)]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success(), "Non-whitespace edit should fail");
    assert!(
        stderr.contains("edit #0") && stderr.contains("non-whitespace"),
        "Error should name the rejected entry. Got: {}",
        stderr
    );
}

#[test]
fn test_apply_reports_unknown_script_keys() {
    let fixture = fixture("[[edit]]\nstart = 0\n");
    let output = twc(&["apply", arg(&fixture.base), arg(&fixture.script)]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Could not load"));
}

#[test]
fn test_search_json_reports_position_in_edit() {
    let fixture = fixture(SCRIPT);
    let output = twc(&[
        "search",
        arg(&fixture.base),
        "--script",
        arg(&fixture.script),
        "--from",
        "12",
        "--to",
        "13",
        "--mode",
        "line-break",
        "--backward",
        "--json",
    ]);

    assert!(output.status.success());
    let hit: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("search should print JSON");
    assert_eq!(hit["kind"], "line_break");
    assert_eq!(hit["position"]["kind"], "in_edit");
    assert_eq!(hit["position"]["offset"], 0);
}

#[test]
fn test_search_without_hit_prints_not_found() {
    let fixture = fixture(SCRIPT);
    let output = twc(&[
        "search",
        arg(&fixture.base),
        "--from",
        "13",
        "--to",
        "16",
        "--mode",
        "line-break",
    ]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "not found");
}

#[test]
fn test_count_uses_tab_width_flag() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("tabs.txt");
    fs::write(&base, "a\t\n \tb").unwrap();

    let output = twc(&["count", arg(&base), "--tab-width", "8"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    // `a` ends at column 1, the first tab fills to 8, the newline takes
    // column 9, then a space and a tab fill to 16.
    assert!(stdout.contains("breaks: 1"), "Got: {}", stdout);
    assert!(stdout.contains("spaces: 14"), "Got: {}", stdout);
}

#[test]
fn test_count_reads_tab_width_from_config() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("tabs.txt");
    let config = dir.path().join("config.toml");
    fs::write(&base, "\t").unwrap();
    fs::write(&config, "tab_width = 2\n").unwrap();

    let output = twc(&["count", arg(&base), "--config", arg(&config)]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("spaces: 2"));
}

#[test]
fn test_count_rejects_zero_tab_width_in_config() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("tabs.txt");
    let config = dir.path().join("config.toml");
    fs::write(&base, "\t").unwrap();
    fs::write(&config, "tab_width = 0\n").unwrap();

    let output = twc(&["count", arg(&base), "--config", arg(&config)]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Error:"));
}
