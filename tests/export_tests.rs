use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{Sandbox, add_sample_day};

fn is_xlsx(path: &std::path::Path) -> bool {
    fs::read(path)
        .map(|b| b.starts_with(b"PK"))
        .unwrap_or(false)
}

#[test]
fn export_writes_every_document_into_month_folder() {
    let sb = Sandbox::sqlite("export_all");
    add_sample_day(&sb);

    sb.cmd()
        .args(["export", "2025-09-19", "--out", &sb.out, "--by", "ops"])
        .assert()
        .success()
        .stdout(contains(
            "2 TimeEntries, 1 Daily Time, 1 Description file(s); 0 failed",
        ));

    for file in [
        "09-19-2025 - 4500123 - Daily Time Import.xlsx",
        "09-19-2025 - 4500999 - Daily Time Import.xlsx",
        "09-19-2025 - Daily Time.xlsx",
        "09-19-2025 - 4500123 - Description.xlsx",
    ] {
        let p = sb.out_file("September", file);
        assert!(is_xlsx(&p), "missing or invalid {}", p.display());
    }

    // job without comments gets no description file
    assert!(
        !sb.out_file("September", "09-19-2025 - 4500999 - Description.xlsx")
            .exists()
    );
}

#[test]
fn export_without_rows_creates_nothing() {
    let sb = Sandbox::sqlite("export_empty");

    sb.cmd()
        .args(["export", "2025-09-20", "--out", &sb.out])
        .assert()
        .success()
        .stdout(contains("No matching rows for 2025-09-20. No files created."));

    assert!(!std::path::Path::new(&sb.out).join("September").exists());
}

#[test]
fn dry_run_names_documents_without_writing() {
    let sb = Sandbox::sqlite("export_dry");
    add_sample_day(&sb);

    sb.cmd()
        .args(["export", "2025-09-19", "--out", &sb.out, "--dry-run"])
        .assert()
        .success()
        .stdout(contains("[dry-run] 09-19-2025 - 4500123 - Daily Time Import.xlsx"));

    assert!(!std::path::Path::new(&sb.out).exists());

    sb.cmd()
        .arg("log")
        .assert()
        .success()
        .stdout(contains("No exports recorded."));
}

#[test]
fn optional_documents_can_be_skipped() {
    let sb = Sandbox::sqlite("export_skip");
    add_sample_day(&sb);

    sb.cmd()
        .args([
            "export",
            "2025-09-19",
            "--out",
            &sb.out,
            "--no-summary",
            "--no-descriptions",
        ])
        .assert()
        .success()
        .stdout(contains("2 TimeEntries, 0 Daily Time, 0 Description file(s)"));

    assert!(!sb.out_file("September", "09-19-2025 - Daily Time.xlsx").exists());
}

#[test]
fn day_first_dates_and_en_dash_from_config() {
    let sb = Sandbox::sqlite("export_cfg");
    fs::write(
        &sb.config,
        "filename_date_format: '%d-%m-%Y'\nsummary_separator: '–'\n",
    )
    .unwrap();
    add_sample_day(&sb);

    sb.cmd()
        .args(["export", "2025-09-19", "--out", &sb.out])
        .assert()
        .success();

    assert!(is_xlsx(
        &sb.out_file("September", "19-09-2025 - 4500123 - Daily Time Import.xlsx")
    ));
    assert!(is_xlsx(
        &sb.out_file("September", "19-09-2025 – Daily Time.xlsx")
    ));
}

#[test]
fn invalid_config_is_rejected() {
    let sb = Sandbox::sqlite("export_bad_cfg");
    fs::write(&sb.config, "filename_date_format: '%Y%m%d'\n").unwrap();

    sb.cmd()
        .args(["export", "2025-09-19", "--out", &sb.out])
        .assert()
        .failure()
        .stderr(contains("filename_date_format"));
}

#[test]
fn exports_are_logged() {
    let sb = Sandbox::sqlite("export_log");
    add_sample_day(&sb);

    sb.cmd()
        .args(["export", "2025-09-19", "--out", &sb.out, "--by", "ops"])
        .assert()
        .success();

    sb.cmd()
        .args(["log", "--date", "2025-09-19"])
        .assert()
        .success()
        .stdout(contains("09-19-2025 - 4500123 - Daily Time Import.xlsx"))
        .stdout(contains("Created"))
        .stdout(contains("ALL"))
        .stdout(contains("ops"));

    sb.cmd()
        .args(["log", "--internal"])
        .assert()
        .success()
        .stdout(contains("add"))
        .stdout(contains("export"));
}

#[test]
fn csv_backend_exports_and_logs() {
    let sb = Sandbox::csv("export_csv");
    add_sample_day(&sb);

    sb.cmd()
        .args(["export", "2025-09-19", "--out", &sb.out])
        .assert()
        .success();

    assert!(is_xlsx(
        &sb.out_file("September", "09-19-2025 - 4500999 - Daily Time Import.xlsx")
    ));

    sb.cmd()
        .arg("log")
        .assert()
        .success()
        .stdout(contains("4500999").and(contains("Created")));
}
