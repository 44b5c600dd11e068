use pagepick::paging::Target;

use crate::common::{
    load_config, make_temp_dir, normalized_lines, playlist_capture, run_with_input,
    write_capture, write_config,
};

#[test]
fn show_config_lists_every_key() {
    let dir = make_temp_dir("config");
    write_config(&dir, "50", false);

    let output = run_with_input(&dir, &["--show-config"], "");
    assert!(output.status.success(), "show-config should succeed");
    let lines = normalized_lines(&output.stdout);
    for key in [
        "SCORE_CUTOFF",
        "RESULT_LIMIT",
        "FETCH_LIMIT",
        "PAGE_SHAPE",
        "LABEL_FIELD",
        "KEY_FIELD",
        "FILE_LOGGING_ENABLED",
    ] {
        assert!(
            lines.iter().any(|l| l.starts_with(key)),
            "missing row for {key}"
        );
    }
}

#[test]
fn missing_config_is_created_with_defaults() {
    let dir = make_temp_dir("config-init");

    let output = run_with_input(&dir, &["--show-config"], "");
    assert!(output.status.success());
    let cfg = load_config(&dir);
    assert_eq!(cfg.fetch_limit(), Target::Count(50));
    assert_eq!(cfg.result_limit(), 10);
}

#[test]
fn set_flag_persists_values() {
    let dir = make_temp_dir("config-set");
    write_config(&dir, "50", false);

    let output = run_with_input(
        &dir,
        &["--set", "RESULT_LIMIT=1", "--set", "FETCH_LIMIT=all", "--show-config"],
        "",
    );
    assert!(output.status.success());

    let cfg = load_config(&dir);
    assert_eq!(cfg.result_limit(), 1);
    assert_eq!(cfg.fetch_limit(), Target::All);
}

#[test]
fn result_limit_caps_candidates_shown() {
    let dir = make_temp_dir("config-limit");
    write_config(&dir, "all", false);
    write_capture(&dir, &playlist_capture());

    let output = run_with_input(&dir, &["--set", "RESULT_LIMIT=1"], "workout\n");
    assert!(output.status.success());
    let lines = normalized_lines(&output.stdout);
    assert!(lines.iter().any(|l| l.starts_with("1. workout (")));
    assert!(!lines.iter().any(|l| l.starts_with("2. Workout Mix")));
    assert!(lines.contains(&"2. Search again".to_string()));
}

#[test]
fn unknown_key_is_rejected_without_writing() {
    let dir = make_temp_dir("config-bad");
    write_config(&dir, "50", false);

    let output = run_with_input(&dir, &["--set", "BOGUS=1"], "");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown configuration key 'BOGUS'"));
    assert_eq!(load_config(&dir).fetch_limit(), Target::Count(50));
}

#[test]
fn bad_cli_flag_exits_with_usage() {
    let dir = make_temp_dir("config-flag");
    let output = run_with_input(&dir, &["--frobnicate"], "");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown argument: --frobnicate"));
    assert!(stderr.contains("Usage: pagepick"));
}

#[test]
fn missing_flag_value_and_bad_set_also_show_usage() {
    let dir = make_temp_dir("config-usage");
    for args in [&["--source"][..], &["--set", "RESULT_LIMIT"][..]] {
        let output = run_with_input(&dir, args, "");
        assert_eq!(output.status.code(), Some(2));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Usage: pagepick"), "no usage for {args:?}");
    }
}
