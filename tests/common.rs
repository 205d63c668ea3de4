#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn dt() -> Command {
    cargo_bin_cmd!("dailytime")
}

/// Isolated paths for one test: config file (never created unless a test
/// writes it), store file and output folder, all under the system temp dir.
pub struct Sandbox {
    pub config: String,
    pub store: String,
    pub out: String,
}

impl Sandbox {
    pub fn new(name: &str, ext: &str) -> Self {
        let base: PathBuf = env::temp_dir().join(format!("dailytime_it_{name}"));
        fs::remove_dir_all(&base).ok();
        fs::create_dir_all(&base).ok();

        let s = |p: PathBuf| p.to_string_lossy().to_string();
        Self {
            config: s(base.join("dailytime.yaml")),
            store: s(base.join(format!("store.{ext}"))),
            out: s(base.join("out")),
        }
    }

    pub fn sqlite(name: &str) -> Self {
        Self::new(name, "sqlite")
    }

    pub fn csv(name: &str) -> Self {
        Self::new(name, "csv")
    }

    /// `dailytime --config <cfg> --db <store> [--backend csv]`
    pub fn cmd(&self) -> Command {
        let mut c = dt();
        c.args(["--config", &self.config, "--db", &self.store]);
        if self.store.ends_with(".csv") {
            c.args(["--backend", "csv"]);
        }
        c
    }

    pub fn out_file(&self, month: &str, file: &str) -> PathBuf {
        PathBuf::from(&self.out).join(month).join(file)
    }
}

/// Two employees on job 4500123 (area 7) plus one on job 4500999, all on
/// Friday 2025-09-19.
pub fn add_sample_day(sb: &Sandbox) {
    sb.cmd()
        .args([
            "add",
            "2025-09-19",
            "--job",
            "4500123",
            "--area",
            "7",
            "--code",
            "01-100",
            "--employee",
            "Ann Smith",
            "--emp-no",
            "1001",
            "--employee",
            "Bob Jones",
            "--emp-no",
            "1002",
            "--rt",
            "8",
            "--ot",
            "2",
            "--premium",
            "Subsistence",
            "--comments",
            "Formwork level 2",
        ])
        .assert()
        .success();

    sb.cmd()
        .args([
            "add",
            "2025-09-19",
            "--job",
            "4500999",
            "--area",
            "12",
            "--code",
            "02-200",
            "--employee",
            "Cy Lee",
            "--total",
            "10",
        ])
        .assert()
        .success();
}
