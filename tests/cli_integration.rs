//! Integration tests for the Folder Guard CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Interactive prompts are hard to automate, so every run supplies the
//! password through `FOLDERGUARD_PASSWORD`.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const STRONG: &str = "Tr7!kq#Vz2@Lm9$xW";

/// Helper: get a Command pointing at the folderguard binary, run inside `dir`.
fn folderguard(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("folderguard").expect("binary should exist");
    cmd.current_dir(dir.path()).env_remove("FOLDERGUARD_LOG");
    cmd
}

#[test]
fn help_flag_shows_usage() {
    let tmp = TempDir::new().unwrap();
    folderguard(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Password-protected encryption for markdown notes",
        ))
        .stdout(predicate::str::contains("lock"))
        .stdout(predicate::str::contains("unlock"))
        .stdout(predicate::str::contains("check-password"));
}

#[test]
fn no_args_shows_help() {
    let tmp = TempDir::new().unwrap();
    folderguard(&tmp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn lock_and_unlock_a_folder() {
    let tmp = TempDir::new().unwrap();
    tmp.child("notes/a.md").write_str("# A\n").unwrap();
    tmp.child("notes/sub/b.md").write_str("# B\n").unwrap();
    tmp.child("notes/keep.txt").write_str("untouched").unwrap();

    folderguard(&tmp)
        .args(["lock", "notes"])
        .env("FOLDERGUARD_PASSWORD", STRONG)
        .assert()
        .success()
        .stdout(predicate::str::contains("Locked 2 files"));

    tmp.child("notes/a.md").assert(predicate::path::missing());
    tmp.child("notes/sub/b.md").assert(predicate::path::missing());
    tmp.child("notes/a.encrypted")
        .assert(predicate::str::contains("\"salt\""));
    tmp.child("notes/sub/b.encrypted")
        .assert(predicate::str::contains("\"data\""));
    tmp.child("notes/keep.txt").assert("untouched");

    folderguard(&tmp)
        .args(["unlock", "notes"])
        .env("FOLDERGUARD_PASSWORD", STRONG)
        .assert()
        .success()
        .stdout(predicate::str::contains("Unlocked 2 files"));

    tmp.child("notes/a.md").assert("# A\n");
    tmp.child("notes/sub/b.md").assert("# B\n");
    tmp.child("notes/a.encrypted").assert(predicate::path::missing());
}

#[test]
fn lock_and_unlock_a_single_file() {
    let tmp = TempDir::new().unwrap();
    tmp.child("diary.md").write_str("dear diary").unwrap();

    folderguard(&tmp)
        .args(["lock", "diary.md"])
        .env("FOLDERGUARD_PASSWORD", STRONG)
        .assert()
        .success()
        .stdout(predicate::str::contains("Locked"));
    tmp.child("diary.encrypted").assert(predicate::path::exists());

    folderguard(&tmp)
        .args(["unlock", "diary.encrypted"])
        .env("FOLDERGUARD_PASSWORD", STRONG)
        .assert()
        .success();
    tmp.child("diary.md").assert("dear diary");
}

#[test]
fn unlock_with_wrong_password_fails_and_keeps_file() {
    let tmp = TempDir::new().unwrap();
    tmp.child("diary.md").write_str("dear diary").unwrap();

    folderguard(&tmp)
        .args(["lock", "diary.md"])
        .env("FOLDERGUARD_PASSWORD", STRONG)
        .assert()
        .success();
    let locked = std::fs::read_to_string(tmp.child("diary.encrypted").path()).unwrap();

    folderguard(&tmp)
        .args(["unlock", "diary.encrypted"])
        .env("FOLDERGUARD_PASSWORD", "Wrong!Password#42xyz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("wrong password"));

    tmp.child("diary.encrypted").assert(locked);
    tmp.child("diary.md").assert(predicate::path::missing());
}

#[test]
fn weak_env_password_is_refused_without_allow_weak() {
    let tmp = TempDir::new().unwrap();
    tmp.child("a.md").write_str("x").unwrap();

    folderguard(&tmp)
        .args(["lock", "a.md"])
        .env("FOLDERGUARD_PASSWORD", "short")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 12 characters"))
        .stderr(predicate::str::contains("--allow-weak"));
    tmp.child("a.md").assert("x");

    folderguard(&tmp)
        .args(["lock", "a.md", "--allow-weak"])
        .env("FOLDERGUARD_PASSWORD", "short")
        .assert()
        .success();
    tmp.child("a.encrypted").assert(predicate::path::exists());
}

#[test]
fn wrong_extension_is_refused_before_prompting() {
    let tmp = TempDir::new().unwrap();
    tmp.child("todo.txt").write_str("x").unwrap();

    folderguard(&tmp)
        .args(["lock", "todo.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Only .md files can be locked."));
}

#[test]
fn missing_path_fails() {
    let tmp = TempDir::new().unwrap();
    folderguard(&tmp)
        .args(["unlock", "nowhere.encrypted"])
        .env("FOLDERGUARD_PASSWORD", STRONG)
        .assert()
        .failure();
}

#[test]
fn config_file_changes_suffixes_and_policy() {
    let tmp = TempDir::new().unwrap();
    tmp.child(".folderguard.toml")
        .write_str("min_password_length = 6\nrequire_complexity = false\nplaintext_suffix = \"txt\"\n")
        .unwrap();
    tmp.child("n.txt").write_str("note").unwrap();

    folderguard(&tmp)
        .args(["lock", "n.txt"])
        .env("FOLDERGUARD_PASSWORD", "qazwsxedc")
        .assert()
        .success();
    tmp.child("n.encrypted").assert(predicate::path::exists());
}

#[test]
fn invalid_config_is_reported() {
    let tmp = TempDir::new().unwrap();
    tmp.child(".folderguard.toml")
        .write_str("min_password_length = 2\n")
        .unwrap();
    tmp.child("a.md").write_str("x").unwrap();

    folderguard(&tmp)
        .args(["lock", "a.md"])
        .env("FOLDERGUARD_PASSWORD", STRONG)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file error"));
}

#[test]
fn check_password_json_reports_verdict() {
    let tmp = TempDir::new().unwrap();

    folderguard(&tmp)
        .args(["check-password", "--json"])
        .env("FOLDERGUARD_PASSWORD", STRONG)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"valid\": true"))
        .stdout(predicate::str::contains("\"strength\": \"strong\""));

    folderguard(&tmp)
        .args(["check-password", "--json"])
        .env("FOLDERGUARD_PASSWORD", "password")
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"valid\": false"));
}
