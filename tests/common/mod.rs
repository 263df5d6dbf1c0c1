#![allow(dead_code)]

use jist::interpreter::parse_and_run;
use jist::Value;
use std::path::PathBuf;
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn run(source: &str) -> Value {
    match parse_and_run(source) {
        Ok(value) => value,
        Err(e) => panic!("script failed: {}\n---\n{}", e, source),
    }
}

pub fn run_err(source: &str) -> String {
    match parse_and_run(source) {
        Ok(value) => panic!("expected an error, got {:?}\n---\n{}", value, source),
        Err(e) => e,
    }
}

pub fn num(source: &str) -> f64 {
    match run(source) {
        Value::Number(n) => n,
        other => panic!("expected a number, got {:?}", other),
    }
}

pub fn strings(values: &[&str]) -> Value {
    Value::array(values.iter().map(|s| Value::string(s)).collect())
}

pub fn numbers(values: &[f64]) -> Value {
    Value::array(values.iter().map(|n| Value::Number(*n)).collect())
}

pub fn jist_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_jist"))
}

static SCRIPT_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Writes `contents` to a fresh file under the temp dir.
pub fn write_script(name: &str, contents: &str) -> PathBuf {
    let id = SCRIPT_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("jist-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(format!("{}-{}.jist", id, name));
    std::fs::write(&path, contents).expect("write script");
    path
}
