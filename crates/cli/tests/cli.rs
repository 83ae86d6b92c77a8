use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("backoffice-cli").expect("bin");
    cmd.env_remove("RUST_LOG")
        .env_remove("BACKOFFICE_CONFIG")
        .env("BACKOFFICE_API_URL", "http://127.0.0.1:9/api");
    cmd
}

#[test]
fn help_lists_commands() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("toggle"))
        .stdout(predicate::str::contains("update"));
}

#[test]
fn list_without_session_fails() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let session = tmp.path().join("session.json");

    cli()
        .env("BACKOFFICE_SESSION_FILE", &session)
        .args(["list", "clients"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn whoami_reads_persisted_session() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let session = tmp.path().join("session.json");
    std::fs::write(
        &session,
        r#"{"token":{"token":"abc","clientId":7,"userName":"ops"}}"#,
    )
    .expect("write session");

    cli()
        .env("BACKOFFICE_SESSION_FILE", &session)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("ops"))
        .stdout(predicate::str::contains("7"));
}

#[test]
fn logout_clears_session() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let session = tmp.path().join("session.json");
    std::fs::write(&session, r#"{"token":{"token":"abc","clientId":7}}"#).expect("write session");

    cli()
        .env("BACKOFFICE_SESSION_FILE", &session)
        .arg("logout")
        .assert()
        .success();

    cli()
        .env("BACKOFFICE_SESSION_FILE", &session)
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn unknown_entity_is_a_usage_error() {
    cli()
        .args(["list", "planets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown entity"));
}

#[test]
fn create_rejects_malformed_field() {
    cli()
        .args(["create", "role", "-f", "name"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected key=value"));
}
