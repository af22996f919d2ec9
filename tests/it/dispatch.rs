use super::*;
use std::sync::atomic::Ordering;

#[tokio::test]
#[serial]
async fn test_results_keep_prompt_order() {
    // Later prompts answer first.
    let mut backend = StubBackend::new();
    for i in 0..6 {
        backend = backend.reply(
            sample_input(i),
            StubReply::Delayed(format!("label_{}", i), Duration::from_millis(60 - i as u64 * 10)),
        );
    }
    let backend = Arc::new(backend);
    let classifier = classifier(backend);
    let prompt_set = classifier.prepare(&chunked_corpus(6, 1), 1).unwrap();

    let completions = classifier
        .dispatcher()
        .dispatch(&prompt_set, "flights")
        .await
        .unwrap();
    let indexes: Vec<usize> = completions.iter().map(|c| c.prompt_index).collect();
    assert_eq!(indexes, vec![0, 1, 2, 3, 4, 5]);
    let contents: Vec<&str> = completions.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(
        contents,
        vec!["label_0", "label_1", "label_2", "label_3", "label_4", "label_5"]
    );
}

#[tokio::test]
#[serial]
async fn test_concurrency_is_bounded() {
    let backend = Arc::new(
        StubBackend::new().fallback(StubReply::Delayed(
            "flight".to_string(),
            Duration::from_millis(20),
        )),
    );
    let dispatcher = CompletionDispatcher::new(backend.clone()).max_concurrency(3);
    let classifier = classifier(backend.clone());
    let prompt_set = classifier.prepare(&chunked_corpus(12, 1), 1).unwrap();

    let completions = dispatcher.dispatch(&prompt_set, "flights").await.unwrap();
    assert_eq!(completions.len(), 12);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 12);
    let max_in_flight = backend.max_in_flight.load(Ordering::SeqCst);
    assert!(max_in_flight <= 3, "max in flight was {}", max_in_flight);
    assert!(max_in_flight > 1, "requests were not concurrent");
}

#[tokio::test]
#[serial]
async fn test_invalid_temperature_is_a_backend_failure() {
    let backend = Arc::new(StubBackend::new());
    let mut dispatcher = CompletionDispatcher::new(backend.clone());
    dispatcher.config.temperature = 3.5;
    let classifier = classifier(backend.clone());
    let prompt_set = classifier.prepare(&chunked_corpus(2, 1), 1).unwrap();

    let res = dispatcher.dispatch(&prompt_set, "flights").await;
    assert!(matches!(
        res,
        Err(IntentError::BackendUnavailable(
            CompletionError::RequestBuilderError(_)
        ))
    ));
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
#[serial]
async fn test_prompt_set_is_reusable_across_concurrent_calls() {
    let backend = Arc::new(
        StubBackend::new()
            .reply("Input: dinner", StubReply::Text("meal".to_string()))
            .reply("Input: fare", StubReply::Text("airfare".to_string())),
    );
    let classifier = classifier(backend);
    let prompt_set = classifier.prepare(&chunked_corpus(9, 3), 3).unwrap();

    let (meal, airfare) = tokio::join!(
        classifier.classify(&prompt_set, "dinner"),
        classifier.classify(&prompt_set, "fare"),
    );
    assert_eq!(meal.unwrap(), vec![Prediction::new("meal")]);
    assert_eq!(airfare.unwrap(), vec![Prediction::new("airfare")]);
}
