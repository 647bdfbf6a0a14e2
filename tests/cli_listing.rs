use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

/// Runs the binary against an explicit config so local or user config files do not leak in.
fn sysfonts(config: &str) -> (Command, tempfile::TempDir) {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("sysfontsrc.toml");
    fs::write(&path, config).unwrap();

    let mut cmd = Command::cargo_bin("sysfonts").unwrap();
    cmd.current_dir(tmp.path()).arg("--config").arg(&path);
    (cmd, tmp)
}

#[test]
fn test_check_lists_deduped_sorted_names() {
    let (mut cmd, _tmp) = sysfonts("");
    cmd.args([
        "--no-system", "--check", "Arial", "--check", "Courier New", "--check", "Menlo",
        "--check", "Arial",
    ]);
    cmd.assert()
        .success()
        .stdout("Arial\tproportional\nCourier New\tmonospace\nMenlo\tmonospace\n");
}

#[test]
fn test_json_output_shape() {
    let (mut cmd, _tmp) = sysfonts("");
    cmd.args(["--no-system", "--format", "json", "--check", "Consolas", "--check", "Georgia"]);
    let output = cmd.assert().success().get_output().stdout.clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            {"name": "Consolas", "isMonospace": true},
            {"name": "Georgia", "isMonospace": false},
        ])
    );
}

#[test]
fn test_monospace_only_filters() {
    let (mut cmd, _tmp) = sysfonts("");
    cmd.args([
        "--no-system", "--monospace-only", "--check", "Georgia", "--check", "Fira Code",
    ]);
    cmd.assert().success().stdout("Fira Code\tmonospace\n");
}

#[test]
fn test_extra_names_from_config() {
    let (mut cmd, _tmp) = sysfonts(
        r#"
        [source]
        include_system = false
        extra_names = ["Verdana", "Lucida Console"]
        "#,
    );
    cmd.assert()
        .success()
        .stdout("Lucida Console\tmonospace\nVerdana\tproportional\n");
}

#[test]
fn test_config_extra_keywords_apply() {
    let (mut cmd, _tmp) = sysfonts(
        r#"
        [classifier]
        extra_keywords = ["iosevka"]
        "#,
    );
    cmd.args(["--no-system", "--check", "Iosevka Term"]);
    cmd.assert().success().stdout("Iosevka Term\tmonospace\n");
}

#[test]
fn test_unavailable_source_fails_with_empty_result() {
    let (mut cmd, tmp) = sysfonts("");
    let missing = tmp.path().join("no-such-font.ttf");
    cmd.args(["--no-system", "--format", "json", "--font-path"])
        .arg(&missing);
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("[]"))
        .stderr(predicate::str::contains("failed to get system fonts"));
}

#[test]
fn test_nothing_to_list_is_not_an_error() {
    let (mut cmd, _tmp) = sysfonts("[source]\ninclude_system = false\n");
    cmd.assert().success().stdout("");
}

#[test]
fn test_default_configuration_is_printed() {
    let mut cmd = Command::cargo_bin("sysfonts").unwrap();
    cmd.arg("--get-default-configuration");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("naming = \"family\""))
        .stdout(predicate::str::contains("probe = \"imW0\""));
}

#[test]
fn test_invalid_naming_is_rejected() {
    let mut cmd = Command::cargo_bin("sysfonts").unwrap();
    cmd.args(["--naming", "full"]);
    cmd.assert().failure();
}
