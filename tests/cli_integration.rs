//! Integration tests for the funcrefs binary.
//!
//! Referrer queries run against a shell script standing in for guru so the
//! tests do not depend on a Go toolchain.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const SERVER_GO: &str = r#"package main

type Server struct{}

func (s *Server) Serve() {}

func Serve() {}

func main() {}
"#;

fn funcrefs(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_funcrefs"))
        .args(args)
        .env("FUNCREFS_LOG", "warn")
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0")
        .output()
        .unwrap()
}

fn setup_workspace() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("server.go");
    fs::write(&file, SERVER_GO).unwrap();
    (dir, file)
}

fn offset_of(needle: &str) -> usize {
    SERVER_GO.find(needle).unwrap()
}

#[cfg(unix)]
fn fake_guru(dir: &Path, failing_position: Option<&str>) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let fail = failing_position
        .map(|p| format!("if [ \"$last\" = \"{p}\" ]; then echo broken >&2; exit 1; fi\n"))
        .unwrap_or_default();
    let script = format!(
        "#!/bin/sh\nfor arg in \"$@\"; do last=\"$arg\"; done\n{fail}echo \"refs $*\"\n"
    );

    let path = dir.join("fake-guru");
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn test_help() {
    let output = funcrefs(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Find a Go function or method"));
}

#[test]
fn test_requires_files() {
    let output = funcrefs(&[]);
    assert!(!output.status.success());
}

#[test]
fn test_list_all() {
    let (_dir, file) = setup_workspace();

    let output = funcrefs(&["--list-only", file.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        format!(
            "[{{Server.Serve {}}} {{Serve {}}} {{main {}}}]",
            offset_of("Serve() {}"),
            offset_of("Serve() {}\n\nfunc main"),
            offset_of("main() {}"),
        )
    );
}

#[test]
fn test_method_filter_json() {
    let (_dir, file) = setup_workspace();

    let output = funcrefs(&[
        "--list-only",
        "--format",
        "json",
        "--func",
        "Server.Serve",
        file.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    let matches: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        matches,
        serde_json::json!([{ "name": "Server.Serve", "offset": offset_of("Serve() {}") }])
    );
}

#[test]
fn test_no_match_is_not_an_error() {
    let (_dir, file) = setup_workspace();

    let output = funcrefs(&["-n", "-f", "Serv", file.to_str().unwrap()]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "[]");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No declaration matches 'Serv'"));
    assert!(stderr.contains("Did you mean"));
}

#[test]
fn test_unreadable_file_is_fatal() {
    let (dir, file) = setup_workspace();
    let missing = dir.path().join("missing.go");

    let output = funcrefs(&["-n", file.to_str().unwrap(), missing.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing.go"));
}

#[test]
fn test_syntax_error_is_fatal() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("broken.go");
    fs::write(&file, "package main\n\nfunc Broken( {\n").unwrap();

    let output = funcrefs(&["-n", file.to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("syntax error"));
    assert!(stderr.contains("broken.go"));
}

#[test]
fn test_invalid_filter_is_rejected() {
    let (_dir, file) = setup_workspace();
    let output = funcrefs(&["-n", "-f", "Server.", file.to_str().unwrap()]);
    assert!(!output.status.success());
}

#[test]
fn test_main_only_issues_no_queries() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("main.go");
    let source = "package main\n\nfunc main() {}\n";
    fs::write(&file, source).unwrap();

    // The tool does not exist; it must never be looked up
    let output = funcrefs(&[
        "--tool",
        "funcrefs-missing-guru",
        file.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        format!("[{{main {}}}]", source.find("main() {}").unwrap())
    );
    assert!(!String::from_utf8_lossy(&output.stderr).contains("Summary"));
}

#[test]
fn test_missing_tool_is_fatal() {
    let (_dir, file) = setup_workspace();

    let output = funcrefs(&[
        "--tool",
        "funcrefs-missing-guru",
        "-f",
        "Serve",
        file.to_str().unwrap(),
    ]);

    assert!(!output.status.success());
}

#[cfg(unix)]
#[test]
fn test_queries_pass_scope_and_position() {
    let (dir, file) = setup_workspace();
    let guru = fake_guru(dir.path(), None);
    let target = file.to_str().unwrap();

    let output = funcrefs(&[
        "--tool",
        guru.to_str().unwrap(),
        "--scope",
        "./...",
        "-f",
        "Server.Serve",
        target,
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(&format!(
        "refs -json -scope ./... referrers {target}:#{}",
        offset_of("Serve() {}")
    )));
}

#[cfg(unix)]
#[test]
fn test_failing_query_does_not_stop_batch() {
    let (dir, file) = setup_workspace();
    let target = file.to_str().unwrap();
    let failing = format!("{target}:#{}", offset_of("Serve() {}"));
    let guru = fake_guru(dir.path(), Some(&failing));

    let output = funcrefs(&["--tool", guru.to_str().unwrap(), "--no-json", target]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains(&format!("referrers {failing}\n")));
    assert!(stdout.contains(&format!(
        "refs -scope . referrers {target}:#{}",
        offset_of("Serve() {}\n\nfunc main")
    )));
    assert!(!stdout.contains(&format!("{target}:#{}", offset_of("main() {}"))));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1 failed"));
    assert!(stderr.contains("Server.Serve"));
}

#[cfg(unix)]
#[test]
fn test_config_file_supplies_defaults() {
    let (dir, file) = setup_workspace();
    let guru = fake_guru(dir.path(), None);
    let config = dir.path().join("funcrefs.toml");
    fs::write(
        &config,
        format!(
            "scope = \"example.com/app/...\"\ntool = \"{}\"\njson = false\nexclude = [\"Serve\"]\n",
            guru.display()
        ),
    )
    .unwrap();

    let output = funcrefs(&["--config", config.to_str().unwrap(), file.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("refs -scope example.com/app/... referrers"));
    // Only Server.Serve is queried; Serve is excluded and main always is
    assert_eq!(stdout.matches("refs ").count(), 1);
}
