use crate::logging::{LogTarget, Logger};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

fn temp_log_dir() -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let uniq = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("pagepick-logs-{nanos}-{uniq}"))
}

fn logger_in_temp() -> Logger {
    let logger = Logger::new();
    logger.set_log_dir(temp_log_dir());
    logger
}

#[test]
fn logger_defers_file_creation_until_needed() {
    let logger = logger_in_temp();
    assert!(logger.log_path().is_none());

    logger.info("console only", LogTarget::ConsoleOnly);
    assert!(logger.log_path().is_none());

    logger.info("file line", LogTarget::FileOnly);
    let path = logger.log_path().expect("log path should be set");
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("file line"));
    assert!(contents.contains("INFO"));
    assert!(
        path.file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("pagepick-")
    );
}

#[test]
fn logger_writes_levels_and_combined_targets() {
    let logger = logger_in_temp();

    logger.warn("warn line", LogTarget::FileOnly);
    logger.error("error line", LogTarget::ConsoleAndFile);

    let path = logger.log_path().expect("log path should be set");
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("WARN"));
    assert!(contents.contains("warn line"));
    assert!(contents.contains("ERROR"));
    assert!(contents.contains("error line"));
}

#[test]
fn logger_skips_file_logging_when_disabled() {
    let logger = logger_in_temp();
    logger.set_file_logging_enabled(false);

    logger.info("file should not exist", LogTarget::ConsoleAndFile);
    assert!(logger.log_path().is_none());

    logger.set_file_logging_enabled(true);
    logger.info("now write", LogTarget::FileOnly);
    assert!(logger.log_path().is_some());
}

#[test]
fn scoped_logger_tags_lines_and_shares_file() {
    let logger = logger_in_temp();
    let paging = logger.scoped("paging");

    paging.info("fetched page", LogTarget::FileOnly);
    logger.info("plain line", LogTarget::FileOnly);

    assert_eq!(paging.log_path(), logger.log_path());
    let contents = fs::read_to_string(logger.log_path().unwrap()).unwrap();
    assert!(contents.contains("[paging] fetched page"));
    let plain = contents
        .lines()
        .find(|l| l.contains("plain line"))
        .unwrap();
    assert!(!plain.contains("[paging]"));
}

#[test]
fn set_log_dir_is_ignored_once_file_is_open() {
    let first = temp_log_dir();
    let logger = Logger::new();
    logger.set_log_dir(&first);
    logger.info("open it", LogTarget::FileOnly);

    logger.set_log_dir(temp_log_dir());
    assert_eq!(logger.log_dir(), Some(first));
}
