use assert_cmd::Command;
use serde_json::Value;

fn bin() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("gtag-inject"))
}

#[test]
fn check_json_success_payload() {
    let assert = bin()
        .args(["check", "--id", "G-ABC123", "--json"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let payload: Value = serde_json::from_str(&stdout).unwrap();
    assert!(payload["ok"].as_bool().unwrap());
    assert_eq!(payload["tracking_id"].as_str(), Some("G-ABC123"));
    assert!(payload.get("errors").is_none(), "empty errors are omitted");
}

#[test]
fn check_json_error_payload() {
    let assert = bin()
        .args(["check", "--id", "UA-12345-1", "--json"])
        .assert()
        .failure();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let payload: Value = serde_json::from_str(&stdout).unwrap();
    assert!(!payload["ok"].as_bool().unwrap());
    assert!(payload.get("tracking_id").is_none());
    let errors = payload["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0]["message"].as_str(),
        Some("Invalid Google Analytics Tracking ID. Expected format: G-[A-Z0-9]+")
    );
}

#[test]
fn render_json_lists_directive_pair() {
    let assert = bin()
        .args(["render", "--id", "G-ABC123", "--json"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let payload: Value = serde_json::from_str(&stdout).unwrap();
    let directives = payload.as_array().expect("directive array");
    assert_eq!(directives.len(), 2);
    assert_eq!(directives[0]["strategy"].as_str(), Some("lazy_onload"));
    assert!(
        directives[0]["source"]["external"]["src"]
            .as_str()
            .unwrap()
            .contains("id=G-ABC123")
    );
    assert_eq!(directives[1]["id"].as_str(), Some("google-analytics"));
    assert!(
        directives[1]["source"]["inline"]["body"]
            .as_str()
            .unwrap()
            .contains("gtag('config', 'G-ABC123'")
    );
}
