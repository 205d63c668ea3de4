use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::path::Path;

mod common;
use common::{Sandbox, add_sample_day, dt};

#[test]
fn init_writes_config_and_store() {
    let sb = Sandbox::sqlite("init");

    sb.cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Store initialized"));

    assert!(Path::new(&sb.config).exists());
    assert!(Path::new(&sb.store).exists());

    // second run keeps the existing config
    sb.cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(contains("already exists"));
}

#[test]
fn config_print_shows_pay_codes() {
    let sb = Sandbox::sqlite("config_print");

    sb.cmd()
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("reg: '211'").or(contains("reg: \"211\"")))
        .stdout(contains("derive_split: true"));
}

#[test]
fn add_then_list_shows_padded_area_and_split() {
    let sb = Sandbox::sqlite("add_list");
    add_sample_day(&sb);

    sb.cmd()
        .args(["list", "2025-09-19"])
        .assert()
        .success()
        .stdout(contains("3 entries"))
        .stdout(contains("007"))
        .stdout(contains("012"))
        .stdout(contains("Ann Smith"))
        // total 10 on a Friday is split 8 / 2
        .stdout(contains("8.00*"))
        .stdout(contains("2.00*"));
}

#[test]
fn list_filters_by_job_and_prints_json() {
    let sb = Sandbox::sqlite("list_json");
    add_sample_day(&sb);

    sb.cmd()
        .args(["list", "2025-09-19", "--job", "4500999", "--json"])
        .assert()
        .success()
        .stdout(contains("\"employee_name\": \"Cy Lee\""))
        .stdout(contains("Ann Smith").not());
}

#[test]
fn list_empty_day() {
    let sb = Sandbox::sqlite("list_empty");

    sb.cmd()
        .args(["list", "2025-09-18"])
        .assert()
        .success()
        .stdout(contains("No entries for 2025-09-18"));
}

#[test]
fn add_rejects_bad_input() {
    let sb = Sandbox::sqlite("add_bad");

    sb.cmd()
        .args([
            "add",
            "2025-13-40",
            "--job",
            "1",
            "--area",
            "1",
            "--code",
            "c",
            "--employee",
            "X",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));

    sb.cmd()
        .args([
            "add",
            "2025-09-19",
            "--job",
            "1",
            "--area",
            "1",
            "--code",
            "c",
            "--employee",
            "X",
            "--rt=-3",
        ])
        .assert()
        .failure();
}

#[test]
fn add_rejects_job_number_with_separator() {
    let sb = Sandbox::sqlite("add_slash_job");

    sb.cmd()
        .args([
            "add",
            "2025-09-19",
            "--job",
            "45/00",
            "--area",
            "1",
            "--code",
            "c",
            "--employee",
            "X",
            "--rt",
            "8",
        ])
        .assert()
        .failure()
        .stderr(contains("must not contain"));
}

#[test]
fn del_removes_only_entries_of_that_day() {
    let sb = Sandbox::sqlite("del");
    add_sample_day(&sb);

    sb.cmd()
        .args(["del", "2025-09-19", "--id", "3", "99", "-y"])
        .assert()
        .success()
        .stdout(contains("#99 is not recorded"))
        .stdout(contains("Deleted 1 entry"));

    sb.cmd()
        .args(["list", "2025-09-19"])
        .assert()
        .success()
        .stdout(contains("Cy Lee").not())
        .stdout(contains("Bob Jones"));
}

#[test]
fn csv_backend_round_trip() {
    let sb = Sandbox::csv("csv_backend");
    add_sample_day(&sb);

    let raw = std::fs::read_to_string(&sb.store).unwrap();
    assert!(raw.starts_with("Id,"));
    assert!(raw.contains("Cy Lee"));

    sb.cmd()
        .args(["del", "2025-09-19", "--id", "1", "-y"])
        .assert()
        .success();

    sb.cmd()
        .args(["list", "2025-09-19"])
        .assert()
        .success()
        .stdout(contains("2 entries"))
        .stdout(contains("Ann Smith").not());
}

#[test]
fn unknown_backend_is_an_error() {
    let sb = Sandbox::sqlite("bad_backend");

    dt().args(["--config", &sb.config, "--backend", "mongo", "list"])
        .assert()
        .failure()
        .stderr(contains("mongo"));
}
