#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};

use pagepick::config::Config;
use pagepick::core::types::FieldPath;
use pagepick::logging::Logger;
use pagepick::paging::decode::PageShape;
use pagepick::paging::record::RecordFields;
use pagepick::paging::recorded::RecordedSource;
use serde_json::{Value, json};

pub fn binary_path() -> String {
    let raw = PathBuf::from(env!("CARGO_BIN_EXE_pagepick"));
    if raw.is_absolute() {
        return raw.to_string_lossy().to_string();
    }
    let from_manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(&raw);
    if from_manifest.exists() {
        return from_manifest.to_string_lossy().to_string();
    }
    raw.to_string_lossy().to_string()
}

static COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn make_temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "pagepick-{prefix}-{}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let _ = fs::create_dir_all(&dir);
    dir
}

pub fn write_config(dir: &Path, fetch_limit: &str, file_logging: bool) {
    let cfg = format!(
        r#"{{
      "score_cutoff": {{ "value": 50, "description": "cutoff" }},
      "result_limit": {{ "value": 10, "description": "limit" }},
      "fetch_limit": {{ "value": "{fetch_limit}", "description": "fetch" }},
      "page_shape": {{ "value": "next", "description": "shape" }},
      "label_field": {{ "value": "name", "description": "label" }},
      "key_field": {{ "value": "id", "description": "key" }},
      "file_logging_enabled": {{ "value": "{}", "description": "file logging" }}
    }}"#,
        if file_logging { "True" } else { "False" }
    );
    fs::write(dir.join("config.json"), cfg).unwrap();
}

/// Playlists served two per page, linked by `next` URLs.
pub fn playlist_capture() -> Value {
    json!({
        "start": {
            "items": [
                { "id": "p1", "name": "Workout Mix", "added_at": "2024-03-10T12:00:00Z" },
                { "id": "p2", "name": "Chill Vibes", "added_at": "2024-02-01T12:00:00Z" }
            ],
            "next": "https://api.example.com/me/playlists?offset=2"
        },
        "pages": {
            "https://api.example.com/me/playlists?offset=2": {
                "items": [
                    { "id": "p3", "name": "workout", "added_at": "2024-03-11T12:00:00Z" },
                    { "id": "p4", "name": "Road Trip" }
                ],
                "next": null
            }
        }
    })
}

pub fn write_capture(dir: &Path, capture: &Value) {
    fs::write(
        dir.join("pages.json"),
        serde_json::to_string_pretty(capture).unwrap(),
    )
    .unwrap();
}

pub fn playlist_fields() -> RecordFields {
    RecordFields {
        key: FieldPath::try_from_str("id").unwrap(),
        label: FieldPath::try_from_str("name").unwrap(),
    }
}

pub fn playlist_source() -> RecordedSource {
    RecordedSource::from_value(playlist_capture(), PageShape::Next, playlist_fields()).unwrap()
}

pub fn quiet_logger() -> Logger {
    let logger = Logger::new();
    logger.set_file_logging_enabled(false);
    logger
}

pub fn load_config(dir: &Path) -> Config {
    Config::load_from(dir.join("config.json")).expect("config should load")
}

pub fn run_with_input(dir: &Path, args: &[&str], input: &str) -> Output {
    let mut child = Command::new(binary_path())
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn binary");

    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();

    child.wait_with_output().unwrap()
}

fn strip_ansi_and_control(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\u{1B}' {
            if matches!(chars.peek(), Some('[')) {
                let _ = chars.next();
                for nc in chars.by_ref() {
                    if nc.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
            continue;
        }
        if c.is_control() {
            continue;
        }
        out.push(c);
    }

    out
}

pub fn normalized_lines(buf: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(buf)
        .lines()
        .map(|l| strip_ansi_and_control(l).trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

pub fn read_log_contents(dir: &Path) -> Option<String> {
    let logs_dir = dir.join("logs");
    let mut entries = fs::read_dir(&logs_dir).ok()?;
    let entry = entries.find_map(|e| e.ok())?;
    fs::read_to_string(entry.path()).ok()
}
