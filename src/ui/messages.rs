//! Console feedback for CLI commands.
//!
//! Status lines go to stdout so they interleave with tables and reports;
//! errors go to stderr. Colours are dropped when `NO_COLOR` is set.

use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

#[derive(Clone, Copy)]
enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn style(self) -> (&'static str, &'static str) {
        match self {
            Level::Info => (FG_BLUE, "ℹ️"),
            Level::Success => (FG_GREEN, "✅"),
            Level::Warning => (FG_YELLOW, "⚠️"),
            Level::Error => (FG_RED, "❌"),
        }
    }
}

fn colored() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn line(level: Level, msg: &dyn fmt::Display) -> String {
    let (fg, icon) = level.style();
    if colored() {
        format!("{fg}{BOLD}{icon} {RESET}{msg}")
    } else {
        format!("{icon} {msg}")
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", line(Level::Info, &msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", line(Level::Success, &msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", line(Level::Warning, &msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", line(Level::Error, &msg));
}

/// Section header for multi-part command output (entry list, exports log).
pub fn header<T: fmt::Display>(msg: T) {
    if colored() {
        println!("{FG_BLUE}{BOLD}=== {msg} ==={RESET}");
    } else {
        println!("=== {msg} ===");
    }
}
