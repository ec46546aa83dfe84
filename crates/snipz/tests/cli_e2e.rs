#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn snipz(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("snipz"));
    cmd.env("SNIPZ_HOME", home.path())
        .env_remove("SNIPZ_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn seed(home: &TempDir) {
    snipz(home)
        .args(["category", "add", "Networking"])
        .assert()
        .success();
    snipz(home)
        .args(["category", "add", "Scripting"])
        .assert()
        .success();
    snipz(home)
        .args([
            "add",
            "Scripting",
            "--type",
            "Powershell",
            "--name",
            "Get User",
            "--value",
            "Get-ADUser {{Username}} -Server {{Dc}}",
        ])
        .assert()
        .success();
}

#[test]
fn first_run_creates_data_files() {
    let home = TempDir::new().unwrap();
    snipz(&home)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("No categories yet"));

    assert_eq!(
        fs::read_to_string(home.path().join("scripts.json")).unwrap(),
        "{}"
    );
    assert_eq!(
        fs::read_to_string(home.path().join("profile.env")).unwrap(),
        "GEMINI_ENABLED=False\nGEMINI_API_KEY=\nTHEME=dark\n"
    );
}

#[test]
fn add_list_and_delete_workflow() {
    let home = TempDir::new().unwrap();
    seed(&home);

    snipz(&home)
        .args(["ls", "Scripting"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[Powershell] Get User"));

    snipz(&home)
        .arg("cats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Networking (0 scripts)"))
        .stdout(predicate::str::contains("Scripting (1 script)"));

    snipz(&home)
        .args(["rm", "Scripting", "Get User"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Script deleted"));

    let on_disk = fs::read_to_string(home.path().join("scripts.json")).unwrap();
    assert_eq!(on_disk, "{\n    \"Networking\": [],\n    \"Scripting\": []\n}");
}

#[test]
fn naked_invocation_lists_first_category() {
    let home = TempDir::new().unwrap();
    seed(&home);
    snipz(&home)
        .args(["add", "Networking", "-t", "Bash", "-n", "Ping", "--value", "ping {{Host}}"])
        .assert()
        .success();

    snipz(&home)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Networking\n"))
        .stdout(predicate::str::contains("Ping"));
}

#[test]
fn copy_print_fills_placeholders() {
    let home = TempDir::new().unwrap();
    seed(&home);

    snipz(&home)
        .args([
            "copy",
            "Scripting",
            "Get User",
            "--print",
            "--set",
            "Username=jdoe",
            "--set",
            "Dc=dc01",
        ])
        .assert()
        .success()
        .stdout("Get-ADUser jdoe -Server dc01\n");
}

#[test]
fn copy_without_values_keeps_markers_and_warns() {
    let home = TempDir::new().unwrap();
    seed(&home);

    snipz(&home)
        .args(["copy", "Scripting", "Get User", "--print", "-s", "Username=jdoe"])
        .write_stdin("")
        .assert()
        .success()
        .stdout("Get-ADUser jdoe -Server {{Dc}}\n")
        .stderr(predicate::str::contains("No value given for: Dc"));
}

#[test]
fn add_reads_value_from_stdin() {
    let home = TempDir::new().unwrap();
    seed(&home);

    snipz(&home)
        .args(["add", "Networking", "-t", "Bash", "-n", "Routes"])
        .write_stdin("ip route show\n")
        .assert()
        .success();

    snipz(&home)
        .args(["copy", "Networking", "Routes", "--print"])
        .assert()
        .success()
        .stdout("ip route show\n");
}

#[test]
fn duplicate_name_in_category_fails() {
    let home = TempDir::new().unwrap();
    seed(&home);

    snipz(&home)
        .args(["add", "Scripting", "-n", "Get User", "--value", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn swap_uses_listed_positions() {
    let home = TempDir::new().unwrap();
    seed(&home);
    snipz(&home)
        .args(["add", "Scripting", "-n", "List Procs", "--value", "Get-Process"])
        .assert()
        .success();

    snipz(&home)
        .args(["swap", "Scripting", "1", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.   [Other] List Procs"));

    snipz(&home)
        .args(["swap", "Scripting", "1", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn edit_changes_only_given_fields() {
    let home = TempDir::new().unwrap();
    seed(&home);

    snipz(&home)
        .args(["edit", "Scripting", "Get User", "--new-name", "Find User"])
        .assert()
        .success();

    snipz(&home)
        .args(["show", "Scripting", "Find User"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Find User [Powershell]"))
        .stdout(predicate::str::contains("placeholders: Username, Dc"));
}

#[test]
fn category_rename_conflict_and_moves() {
    let home = TempDir::new().unwrap();
    seed(&home);

    snipz(&home)
        .args(["category", "rename", "Networking", "Scripting"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Conflict"));

    snipz(&home)
        .args(["category", "up", "Networking"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already first"));

    snipz(&home)
        .args(["category", "down", "Networking"])
        .assert()
        .success();

    let on_disk = fs::read_to_string(home.path().join("scripts.json")).unwrap();
    assert!(on_disk.find("Scripting").unwrap() < on_disk.find("Networking").unwrap());
}

#[test]
fn search_across_categories() {
    let home = TempDir::new().unwrap();
    seed(&home);

    snipz(&home)
        .args(["search", "get"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Get User"));

    snipz(&home)
        .args(["search", "nothing-like-this"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No scripts match"));
}

#[test]
fn json_output_is_structured() {
    let home = TempDir::new().unwrap();
    seed(&home);

    let output = snipz(&home)
        .args(["--output", "json", "list", "Scripting"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value["listed_scripts"][0]["script"]["script_name"],
        "Get User"
    );
    assert_eq!(value["listed_scripts"][0]["position"], 1);
}

#[test]
fn config_show_and_set() {
    let home = TempDir::new().unwrap();

    snipz(&home)
        .args(["config", "THEME", "light"])
        .assert()
        .success()
        .stdout(predicate::str::contains("THEME=light"));

    snipz(&home)
        .args(["config", "THEME", "purple"])
        .assert()
        .failure();

    snipz(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("GEMINI_ENABLED=False"))
        .stdout(predicate::str::contains("THEME=light"));
}

#[test]
fn completions_print_a_script() {
    let home = TempDir::new().unwrap();
    snipz(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("snipz"));
}

#[test]
fn types_lists_catch_all() {
    let home = TempDir::new().unwrap();
    snipz(&home)
        .arg("types")
        .assert()
        .success()
        .stdout(predicate::str::contains("Powershell"))
        .stdout(predicate::str::contains("Other"));
}
