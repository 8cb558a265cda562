use std::process::Command;

#[test]
fn test_version_flag() {
    let binary_path = env!("CARGO_BIN_EXE_bloghub");

    let output = Command::new(binary_path)
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success(), "Version flag should exit with code 0");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        format!("bloghub {}", env!("CARGO_PKG_VERSION")),
        "Version output should match Cargo.toml"
    );
}

#[test]
fn test_unknown_flag_fails() {
    let binary_path = env!("CARGO_BIN_EXE_bloghub");

    let output = Command::new(binary_path)
        .arg("--definitely-not-a-flag")
        .env("BLOGHUB_HOME", std::env::temp_dir().join("bloghub-flag-test"))
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown argument"));
}
