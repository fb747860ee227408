use std::{
    io::Write,
    process::{Command, Output, Stdio},
};

fn run_cli(args: &[&str], script: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_hex-voyage"))
        .args(args)
        .env("RUST_LOG", "warn")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to launch the hex-voyage binary");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(script.as_bytes())
        .expect("failed to write the script");
    child.wait_with_output().expect("hex-voyage did not exit")
}

#[test]
fn script_from_stdin_moves_the_ship() {
    let output = run_cli(
        &["--seed", "7", "--json"],
        "generateMap\n# tile 9 sits at column 1, row 1\nfocusHex 9\nselectFocusedHex\nmoveShipToSelectedTile\n",
    );

    assert!(output.status.success(), "{output:?}");
    let state: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout holds the final state");
    assert_eq!(state["ship"]["position"]["column"], 1);
    assert_eq!(state["ship"]["position"]["row"], 1);
    assert_eq!(state["ship"]["moves_left"], 3);
    assert_eq!(state["tiles"].as_array().map(Vec::len), Some(63));
}

#[test]
fn rejected_actions_are_skipped_by_default() {
    let output = run_cli(&["--seed", "7"], "startTurn\nwarpDrive\nstartTurn\n");

    assert!(output.status.success(), "{output:?}");
    let frame = String::from_utf8_lossy(&output.stdout);
    assert!(frame.starts_with("== Turn 3 =="), "{frame}");
    assert!(String::from_utf8_lossy(&output.stderr).contains("warpDrive"));
}

#[test]
fn strict_mode_fails_on_the_first_rejection() {
    let output = run_cli(&["--strict"], "generateMap\nselectFocusedHex\n");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("line 2"));
}
