// Leveled stderr logger for the migration runs.
// DEBUG lines only show with --debug; INFO and ERROR always print.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Clone, Copy)]
enum Level {
    Info,
    Debug,
    Error,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Error => "ERROR",
        }
    }
}

pub fn set_debug(enabled: bool) {
    DEBUG_ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_debug() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

pub fn info(msg: &str) {
    log_line(Level::Info, msg);
}

pub fn debug(msg: &str) {
    if is_debug() {
        log_line(Level::Debug, msg);
    }
}

pub fn error(msg: &str) {
    log_line(Level::Error, msg);
}

fn log_line(level: Level, msg: &str) {
    eprintln!("{}", format_line(level, unix_seconds(), msg));
}

fn format_line(level: Level, ts: u64, msg: &str) -> String {
    format!("[{}] {} {}", level.label(), ts, msg)
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
