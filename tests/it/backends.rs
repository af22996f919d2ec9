use super::*;

#[tokio::test]
#[serial]
async fn test_openai_backend_with_key_is_ready() {
    let backend = IntentClient::openai()
        .gpt_4_o_mini()
        .with_api_key("sk-test")
        .logging_enabled(false)
        .init()
        .unwrap();
    assert!(backend.is_ready());
    assert_eq!(backend.model_id(), "gpt-4o-mini");
}

#[tokio::test]
#[serial]
async fn test_openai_backend_without_key_is_invalid() {
    let res = IntentClient::openai()
        .with_api_key_env_var("INTENT_CLIENT_TEST_UNSET_KEY")
        .logging_enabled(false)
        .init();
    assert!(matches!(res, Err(IntentError::InvalidConfiguration(_))));
}

#[tokio::test]
#[serial]
async fn test_unreachable_host_is_backend_unavailable() {
    let backend = IntentClient::generic_api()
        .with_api_host("http://127.0.0.1")
        .with_api_port("1")
        .model_id("local")
        .logging_enabled(false)
        .init()
        .unwrap();
    let classifier = classifier(backend);
    let prompt_set = classifier.prepare(&chunked_corpus(4, 2), 2).unwrap();
    let res = classifier.classify(&prompt_set, "flights").await;
    assert!(matches!(res, Err(IntentError::BackendUnavailable(_))));
}
