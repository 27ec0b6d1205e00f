use std::process::Command;

fn paramedit() -> Command {
    Command::new(env!("CARGO_BIN_EXE_paramedit"))
}

#[test]
fn test_help_lists_options() {
    let output = paramedit().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--form"));
    assert!(stdout.contains("--config"));
    assert!(stdout.contains("--log-file"));
}

#[test]
fn test_missing_form_fails_before_terminal_setup() {
    let dir = tempfile::tempdir().unwrap();
    let output = paramedit()
        .arg("--form")
        .arg(dir.path().join("missing.json"))
        .arg("--log-file")
        .arg(dir.path().join("paramedit.log"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing.json"));
}

#[test]
fn test_malformed_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[ui\ntitle = ").unwrap();
    let output = paramedit()
        .arg("--config")
        .arg(&config)
        .arg("--log-file")
        .arg(dir.path().join("paramedit.log"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("config.toml"));
}
