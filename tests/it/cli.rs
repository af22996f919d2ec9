use super::*;
use intent_client::cli::{classify_json, intents_json, ready_report, READY};
use std::{io::Write, process::Command};

fn intent_cli(dir: &std::path::Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_intent_cli"));
    cmd.current_dir(dir)
        .env_remove("OPENAI_API_KEY")
        .env_remove("GENERIC_API_KEY")
        .env_remove("INTENT_MODEL_NAME")
        .env_remove("TRAIN_DATA_FILE_PATH")
        .env_remove("INTENT_CHUNK_SIZE");
    cmd
}

#[test]
fn test_ready_report_follows_backend() {
    assert_eq!(ready_report(&StubBackend::new()).unwrap(), READY);
    assert!(matches!(
        ready_report(&StubBackend::new().not_ready()),
        Err(IntentError::InvalidConfiguration(_))
    ));
}

#[tokio::test]
#[serial]
async fn test_classify_json_shape() {
    let backend = Arc::new(
        StubBackend::new()
            .reply(sample_input(0), StubReply::Text("flight\n".to_string()))
            .reply(sample_input(100), StubReply::Text("flight\n".to_string()))
            .reply(sample_input(200), StubReply::Text("meal\n".to_string())),
    );
    let classifier = classifier(backend);
    let prompt_set = classifier.prepare(&chunked_corpus(250, 100), 100).unwrap();
    let json = classify_json(&classifier, &prompt_set, "flights to boston")
        .await
        .unwrap();
    assert_eq!(
        json,
        serde_json::json!({"intents": [{"label": "flight"}, {"label": "meal"}]})
    );
    assert_eq!(intents_json(&[]), serde_json::json!({"intents": []}));
}

#[test]
#[serial]
fn test_cli_ready_with_key() {
    let dir = tempfile::tempdir().unwrap();
    let output = intent_cli(dir.path())
        .args(["ready", "--no_log"])
        .env("OPENAI_API_KEY", "sk-test")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "OK");
}

#[test]
#[serial]
fn test_cli_ready_without_key_exits_with_configuration_code() {
    let dir = tempfile::tempdir().unwrap();
    let output = intent_cli(dir.path())
        .args(["ready", "--no_log"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("InvalidConfiguration"));
}

#[test]
#[serial]
fn test_cli_ready_with_unusable_log_dir() {
    let dir = tempfile::tempdir().unwrap();
    let not_a_dir = dir.path().join("logs");
    std::fs::write(&not_a_dir, "").unwrap();
    let output = intent_cli(dir.path())
        .arg("ready")
        .arg("--log_dir")
        .arg(&not_a_dir)
        .env("OPENAI_API_KEY", "sk-test")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "OK");
}

#[test]
#[serial]
fn test_cli_missing_corpus_exits_with_configuration_code() {
    let dir = tempfile::tempdir().unwrap();
    let output = intent_cli(dir.path())
        .args(["classify", "--no_log", "--text", "flights", "--corpus", "missing.tsv"])
        .env("OPENAI_API_KEY", "sk-test")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
#[serial]
fn test_cli_unreachable_backend_exits_with_backend_code() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = dir.path().join("train.tsv");
    let mut file = std::fs::File::create(&corpus).unwrap();
    writeln!(file, "i want to fly from boston\tflight").unwrap();
    writeln!(file, "what meals are served\tmeal").unwrap();

    let output = intent_cli(dir.path())
        .args(["classify", "--no_log", "--text", "flights", "--model", "local"])
        .args(["--api_host", "http://127.0.0.1:1"])
        .arg("--corpus")
        .arg(&corpus)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("BackendUnavailable"));
}

#[test]
#[serial]
fn test_cli_api_host_requires_model() {
    let dir = tempfile::tempdir().unwrap();
    let output = intent_cli(dir.path())
        .args(["ready", "--no_log", "--api_host", "http://127.0.0.1:1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}
