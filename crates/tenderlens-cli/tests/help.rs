use assert_cmd::Command;

/// Helper to get a Command for the tenderlens binary.
#[allow(deprecated)]
fn tenderlens_cmd() -> Command {
    Command::cargo_bin("tenderlens").unwrap()
}

#[test]
fn help_works() {
    tenderlens_cmd().arg("--help").assert().success();
}
