use super::*;

fn labels(predictions: &[Prediction]) -> Vec<&str> {
    predictions.iter().map(|p| p.label.as_str()).collect()
}

#[tokio::test]
#[serial]
async fn test_votes_across_chunks() {
    let backend = Arc::new(
        StubBackend::new()
            .reply(sample_input(0), StubReply::Text("flight\n".to_string()))
            .reply(sample_input(100), StubReply::Text("flight\n".to_string()))
            .reply(sample_input(200), StubReply::Text("meal\n".to_string())),
    );
    let classifier = classifier(backend.clone());
    let prompt_set = classifier
        .prepare(&chunked_corpus(250, 100), 100)
        .unwrap();
    assert_eq!(prompt_set.len(), 3);

    let res = classifier
        .classify(&prompt_set, "i want to fly from boston to denver")
        .await
        .unwrap();
    assert_eq!(labels(&res), vec!["flight", "meal"]);
    assert_eq!(backend.calls.load(std::sync::atomic::Ordering::SeqCst), 3);
}

#[tokio::test]
#[serial]
async fn test_prompts_carry_chunk_and_input() {
    let backend = Arc::new(StubBackend::new());
    let classifier = classifier(backend.clone());
    let prompt_set = classifier.prepare(&chunked_corpus(3, 2), 2).unwrap();
    classifier
        .classify(&prompt_set, "cheapest fare to dallas")
        .await
        .unwrap();

    let mut prompts = backend.prompts.lock().unwrap().clone();
    prompts.sort();
    assert_eq!(prompts.len(), 2);
    let expected_first = format!(
        "{}\n\nIntent: chunk_0\nExample: {}\n\nIntent: chunk_0\nExample: {}\n\n{}",
        ATIS_PREFIX,
        sample_input(0),
        sample_input(1),
        ATIS_SUFFIX.replace("{input}", "cheapest fare to dallas"),
    );
    assert!(prompts.contains(&expected_first));
    for prompt in &prompts {
        assert!(prompt.ends_with("Input: cheapest fare to dallas\nIntent:"));
    }
}

#[tokio::test]
#[serial]
async fn test_malformed_votes_are_dropped() {
    let backend = Arc::new(
        StubBackend::new()
            .reply(sample_input(0), StubReply::Text("".to_string()))
            .reply(sample_input(10), StubReply::Text("airfare".to_string()))
            .reply(sample_input(20), StubReply::Text("  \n".to_string()))
            .reply(sample_input(30), StubReply::Text("flight to boston".to_string()))
            .reply(sample_input(40), StubReply::Text("airfare\n".to_string())),
    );
    let classifier = classifier(backend);
    let prompt_set = classifier.prepare(&chunked_corpus(50, 10), 10).unwrap();
    let res = classifier.classify(&prompt_set, "how much").await.unwrap();
    assert_eq!(labels(&res), vec!["airfare", "flight"]);
}

#[tokio::test]
#[serial]
async fn test_all_malformed_is_empty() {
    let backend = Arc::new(StubBackend::new().fallback(StubReply::Text("\n".to_string())));
    let classifier = classifier(backend);
    let prompt_set = classifier.prepare(&chunked_corpus(30, 10), 10).unwrap();
    let res = classifier.classify(&prompt_set, "hello").await.unwrap();
    assert!(res.is_empty());
}

#[tokio::test]
#[serial]
async fn test_ties_follow_prompt_order() {
    // The first prompt answers last but its label still wins the tie.
    let backend = Arc::new(
        StubBackend::new()
            .reply(
                sample_input(0),
                StubReply::Delayed("meal".to_string(), Duration::from_millis(80)),
            )
            .reply(sample_input(1), StubReply::Text("flight".to_string())),
    );
    let classifier = classifier(backend);
    let prompt_set = classifier.prepare(&chunked_corpus(2, 1), 1).unwrap();
    let res = classifier.classify(&prompt_set, "dinner on the plane").await.unwrap();
    assert_eq!(labels(&res), vec!["meal", "flight"]);
}

#[tokio::test]
#[serial]
async fn test_top_k_limits_result() {
    let backend = Arc::new(
        StubBackend::new()
            .reply(sample_input(0), StubReply::Text("a".to_string()))
            .reply(sample_input(1), StubReply::Text("b".to_string()))
            .reply(sample_input(2), StubReply::Text("c".to_string()))
            .reply(sample_input(3), StubReply::Text("d".to_string())),
    );
    let config = ClassifierConfig::new().top_k(2);
    let classifier = IntentClassifier::new(backend, &config);
    let prompt_set = classifier.prepare(&chunked_corpus(4, 1), 1).unwrap();
    let res = classifier.classify(&prompt_set, "x").await.unwrap();
    assert_eq!(labels(&res), vec!["a", "b"]);
}

#[tokio::test]
#[serial]
async fn test_backend_failure_fails_the_call() {
    let backend = Arc::new(StubBackend::new().reply(sample_input(100), StubReply::Fail));
    let classifier = classifier(backend);
    let prompt_set = classifier.prepare(&chunked_corpus(250, 100), 100).unwrap();
    let res = classifier.classify(&prompt_set, "flights to denver").await;
    assert!(matches!(res, Err(IntentError::BackendUnavailable(_))));
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_slow_backend_times_out() {
    let backend = Arc::new(StubBackend::new().reply(
        sample_input(0),
        StubReply::Delayed("flight".to_string(), Duration::from_secs(60)),
    ));
    let mut config = ClassifierConfig::new();
    config.timeout(Duration::from_secs(5));
    let classifier = IntentClassifier::new(backend, &config);
    let prompt_set = classifier.prepare(&chunked_corpus(20, 10), 10).unwrap();
    let res = classifier.classify(&prompt_set, "flights to denver").await;
    assert!(matches!(
        res,
        Err(IntentError::BackendUnavailable(CompletionError::Timeout(_)))
    ));
}

#[tokio::test]
#[serial]
async fn test_empty_corpus_classifies_to_nothing() {
    let backend = Arc::new(StubBackend::new());
    let classifier = classifier(backend.clone());
    let prompt_set = classifier.prepare(&[], 100).unwrap();
    assert!(prompt_set.is_empty());
    let res = classifier.classify(&prompt_set, "anything").await.unwrap();
    assert!(res.is_empty());
    assert_eq!(backend.calls.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[tokio::test]
#[serial]
async fn test_zero_chunk_size_is_rejected() {
    let classifier = classifier(Arc::new(StubBackend::new()));
    let res = classifier.prepare(&chunked_corpus(10, 5), 0);
    assert!(matches!(res, Err(IntentError::InvalidConfiguration(_))));
}

#[tokio::test]
#[serial]
async fn test_readiness_comes_from_backend() {
    assert!(classifier(Arc::new(StubBackend::new())).is_ready());
    assert!(!classifier(Arc::new(StubBackend::new().not_ready())).is_ready());
}

#[tokio::test]
#[serial]
async fn test_evaluate_scores_top_label() {
    let backend = Arc::new(
        StubBackend::new()
            .reply("Input: book a flight", StubReply::Text("flight".to_string()))
            .fallback(StubReply::Text("airfare".to_string())),
    );
    let classifier = classifier(backend);
    let prompt_set = classifier.prepare(&chunked_corpus(10, 5), 5).unwrap();
    let test_examples = vec![
        LabeledExample::new("book a flight", "flight"),
        LabeledExample::new("price to dallas", "airfare"),
        LabeledExample::new("lunch options", "meal"),
        LabeledExample::new("not scored", "meal"),
    ];
    let metrics = evaluate(&classifier, &prompt_set, &test_examples, 3)
        .await
        .unwrap();
    assert_eq!(metrics.evaluated, 3);
    assert!((metrics.accuracy - 2.0 / 3.0).abs() < 1e-9);
}
