use std::process::Command;

#[test]
fn test_sim_prints_report() {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .args(["1", "2"])
        .output()
        .expect("failed to run sim");
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let winner = report["winner"].as_str().expect("winner should be set");
    assert!(winner == "Player" || winner == "Opponent");
    assert_ne!(report["status"], "InProgress");
    assert!(report["player"]["shots"].as_u64().unwrap() > 0);
}

#[test]
fn test_sim_is_reproducible() {
    let run = || {
        Command::new(env!("CARGO_BIN_EXE_sim"))
            .args(["7", "8"])
            .output()
            .expect("failed to run sim")
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn test_sim_rejects_missing_seeds() {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .output()
        .expect("failed to run sim");
    assert!(!output.status.success());
}
