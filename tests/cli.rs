use assert_cmd::Command;

#[test]
fn help_lists_games_and_options() {
    let output = Command::cargo_bin("reflex")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();
    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);
    assert!(help.contains("typing"));
    assert!(help.contains("aim"));
    assert!(help.contains("--secs"));
    assert!(help.contains("--name"));
}

#[test]
fn unknown_game_is_rejected() {
    Command::cargo_bin("reflex")
        .unwrap()
        .arg("chess")
        .assert()
        .failure();
}
