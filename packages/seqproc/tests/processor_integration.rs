use seqproc::{ProcessorError, ProgressEvent, RunState, TaskProcessor};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn recorder() -> (Arc<Mutex<Vec<(usize, usize)>>>, impl FnMut(ProgressEvent)) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    (events, move |e: ProgressEvent| {
        sink.lock().unwrap().push((e.processed, e.total))
    })
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_scenario_full_run() {
    let processor = TaskProcessor::new();
    let (events, on_progress) = recorder();

    let outcome = processor
        .run(json!([1, 2, 3, 4, 5]), Some(Duration::from_millis(1000)), on_progress)
        .await
        .unwrap();

    assert_eq!(
        *events.lock().unwrap(),
        vec![(1, 5), (2, 5), (3, 5), (4, 5), (5, 5)]
    );
    assert_eq!(outcome.state, RunState::Completed);
    assert_eq!(outcome.processed, 5);
}

#[tokio::test(start_paused = true)]
async fn test_scenario_cancel_after_second_item() {
    let processor = Arc::new(TaskProcessor::new());
    let token = processor.cancellation_token();

    // Cancel at t=1500: inside the delay that follows the second item
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(1500)).await;
        token.cancel();
    });

    let (events, on_progress) = recorder();
    let outcome = processor
        .run(json!([1, 2, 3, 4, 5]), Some(Duration::from_millis(1000)), on_progress)
        .await
        .unwrap();

    assert_eq!(*events.lock().unwrap(), vec![(1, 5), (2, 5)]);
    assert_eq!(outcome.state, RunState::Cancelled);
    assert_eq!(outcome.processed, 2);
}

#[tokio::test]
async fn test_scenario_empty_batch() {
    let processor = TaskProcessor::new();
    let (events, on_progress) = recorder();

    let outcome = processor
        .run(json!([]), Some(Duration::from_millis(1000)), on_progress)
        .await
        .unwrap();

    assert!(events.lock().unwrap().is_empty());
    assert_eq!(outcome.state, RunState::Completed);
    assert_eq!(outcome.processed, 0);
}

#[tokio::test]
async fn test_scenario_non_numeric_item() {
    let processor = TaskProcessor::new();
    let (events, on_progress) = recorder();

    let result = processor
        .run(json!([1, "x", 3]), Some(Duration::from_millis(1000)), on_progress)
        .await;

    assert!(matches!(result, Err(ProcessorError::InvalidInput(_))));
    assert!(events.lock().unwrap().is_empty());
}

// =============================================================================
// CROSS-THREAD CANCELLATION
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cancel_from_another_thread() {
    let processor = Arc::new(TaskProcessor::new());
    let canceller = Arc::clone(&processor);

    let handle = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(30));
        canceller.cancel();
    });

    let (events, on_progress) = recorder();
    let items: Vec<f64> = (0..1000).map(f64::from).collect();
    let outcome = processor
        .run(items, Some(Duration::from_millis(10)), on_progress)
        .await
        .unwrap();
    handle.join().unwrap();

    assert_eq!(outcome.state, RunState::Cancelled);
    assert!(outcome.processed > 0);
    assert!(outcome.processed < 1000);

    // Progress is contiguous and ordered up to the cancellation point
    let events = events.lock().unwrap();
    assert_eq!(events.len(), outcome.processed);
    for (i, (processed, total)) in events.iter().enumerate() {
        assert_eq!(*processed, i + 1);
        assert_eq!(*total, 1000);
    }
}

#[tokio::test(start_paused = true)]
async fn test_progress_is_strictly_increasing() {
    let processor = TaskProcessor::new();
    let mut last = 0;

    let outcome = processor
        .run(vec![9.0, -1.5, 0.0, 42.0], Some(Duration::from_millis(5)), |e| {
            assert_eq!(e.processed, last + 1);
            assert_eq!(e.total, 4);
            last = e.processed;
        })
        .await
        .unwrap();

    assert_eq!(last, 4);
    assert!(outcome.is_completed());
}

#[tokio::test]
async fn test_outcome_serializes_to_camel_case_json() {
    let processor = TaskProcessor::new();
    let outcome = processor.run_silent(vec![1.0], Some(Duration::ZERO)).await.unwrap();

    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["state"], "completed");
    assert_eq!(value["processed"], 1);
    assert_eq!(value["total"], 1);
    assert!(value.get("runId").is_some());
    assert!(value.get("elapsedMs").is_some());
}
