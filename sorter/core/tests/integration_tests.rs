//! Integration tests for the sorting core
//!
//! These tests verify that the store, engine, and controller work
//! together correctly in realistic usage scenarios. Tests cover:
//! - Dataset generation shape and validation
//! - The full sort-then-reverse interactive scenario
//! - The synchronous/stepped execution model (no runtime required)
//! - Busy-gate rejection of concurrent requests
//! - Cooperative cancellation and the follow-up full sort
//! - Drill-down regeneration sizing

use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use tokio::sync::mpsc;
use tokio::time::timeout;

use sorter_core::{
    AnimatedQuicksort, ObservationEvent, SequenceStore, SortController, SortDirection, SortError,
    SortState, SorterConfig, SorterMessage,
};

// =============================================================================
// Helpers
// =============================================================================

/// Receive one message or fail loudly after a deadline
async fn recv_message(rx: &mut mpsc::Receiver<SorterMessage>) -> SorterMessage {
    timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for a message")
        .expect("message channel closed unexpectedly")
}

/// Expect the `DatasetReplaced` message that follows a generate request
async fn recv_dataset(rx: &mut mpsc::Receiver<SorterMessage>) -> Vec<i32> {
    match recv_message(rx).await {
        SorterMessage::DatasetReplaced { values } => values,
        other => panic!("expected DatasetReplaced, got {other:?}"),
    }
}

/// Drain one full sort: the `SortStarted` announcement plus every
/// observation up to and including the terminal event
async fn drain_one_sort(
    rx: &mut mpsc::Receiver<SorterMessage>,
) -> (SortDirection, Vec<ObservationEvent>) {
    let direction = match recv_message(rx).await {
        SorterMessage::SortStarted { direction } => direction,
        other => panic!("expected SortStarted, got {other:?}"),
    };

    let mut events = Vec::new();
    loop {
        match recv_message(rx).await {
            SorterMessage::Observation(event) => {
                let terminal = event.is_terminal();
                events.push(event);
                if terminal {
                    break;
                }
            }
            other => panic!("unexpected message during a sort: {other:?}"),
        }
    }
    (direction, events)
}

/// Wait for the background worker to release the busy gate
async fn wait_until_idle(controller: &SortController) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while controller.is_sorting() {
        assert!(
            Instant::now() < deadline,
            "controller never went idle after its sort finished"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

/// Multiset equality: same values regardless of order
fn assert_permutation(actual: &[i32], expected: &[i32]) {
    let mut actual = actual.to_vec();
    let mut expected = expected.to_vec();
    actual.sort_unstable();
    expected.sort_unstable();
    assert_eq!(actual, expected, "sorting must not add or drop values");
}

fn is_sorted(values: &[i32], direction: SortDirection) -> bool {
    values.windows(2).all(|pair| match direction {
        SortDirection::Ascending => pair[0] <= pair[1],
        SortDirection::Descending => pair[0] >= pair[1],
    })
}

// =============================================================================
// Dataset generation
// =============================================================================

/// Generated datasets have the documented shape: requested length, all
/// values within `[1, large_bound]`, and a guaranteed small element.
#[tokio::test]
async fn test_generate_dataset_shape() {
    let (controller, mut rx) = SortController::channel(SorterConfig::instant());

    controller.request_generate(12).await.unwrap();
    let values = recv_dataset(&mut rx).await;

    assert_eq!(values.len(), 12);
    assert!(
        values.iter().all(|&v| (1..=1000).contains(&v)),
        "all values must lie in [1, 1000]: {values:?}"
    );
    assert!(
        values.iter().any(|&v| v <= 30),
        "at least one value must lie in [1, 30]: {values:?}"
    );
    assert_eq!(controller.snapshot(), values);
}

/// Invalid generation arguments are rejected as explicit errors.
#[tokio::test]
async fn test_generate_rejects_invalid_arguments() {
    let (controller, _rx) = SortController::channel(SorterConfig::instant());

    assert!(matches!(
        controller.request_generate(0).await,
        Err(SortError::InvalidArgument { .. })
    ));
    assert!(matches!(
        controller.request_generate_with_bounds(5, 0, 1000).await,
        Err(SortError::InvalidArgument { .. })
    ));
    assert!(matches!(
        controller.request_generate_with_bounds(5, 30, 0).await,
        Err(SortError::InvalidArgument { .. })
    ));
}

// =============================================================================
// The interactive scenario: sort, then reverse
// =============================================================================

/// The full interactive flow: generate 12 numbers, sort (ascending,
/// full quicksort), sort again (descending, linear reversal with a
/// mirror-pair swap trace and no pivots).
#[tokio::test]
async fn test_sort_then_reverse_scenario() {
    let (controller, mut rx) = SortController::channel(SorterConfig::instant());

    controller.request_generate(12).await.unwrap();
    let original = recv_dataset(&mut rx).await;

    // First sort: direction flips to Ascending, full quicksort.
    controller.request_sort().await.unwrap();
    let (direction, events) = drain_one_sort(&mut rx).await;
    wait_until_idle(&controller).await;

    assert_eq!(direction, SortDirection::Ascending);
    assert_eq!(events.last(), Some(&ObservationEvent::SortComplete));
    assert!(
        events
            .iter()
            .any(|e| matches!(e, ObservationEvent::PivotChosen { .. })),
        "the first sort must be a full quicksort"
    );

    let ascending = controller.snapshot();
    assert!(is_sorted(&ascending, SortDirection::Ascending));
    assert_permutation(&ascending, &original);
    assert_eq!(
        controller.sort_state(),
        SortState::Sorted(SortDirection::Ascending)
    );

    // Second sort: direction flips to Descending; the dataset is already
    // sorted the other way, so only mirror-pair swaps may appear.
    controller.request_sort().await.unwrap();
    let (direction, events) = drain_one_sort(&mut rx).await;
    wait_until_idle(&controller).await;

    assert_eq!(direction, SortDirection::Descending);

    let mut expected_pair = 0;
    for event in &events {
        match event {
            ObservationEvent::PivotChosen { .. } => {
                panic!("the reversal shortcut must not announce pivots")
            }
            ObservationEvent::RangeSwapped { i, j, .. } => {
                assert_eq!(
                    (*i, *j),
                    (expected_pair, 11 - expected_pair),
                    "reversal swaps mirror pairs in order"
                );
                expected_pair += 1;
            }
            ObservationEvent::SortComplete => {}
            ObservationEvent::Cancelled => panic!("nothing requested cancellation"),
        }
    }
    assert_eq!(expected_pair, 6, "a 12-element reversal swaps 6 pairs");

    let descending = controller.snapshot();
    let reversed: Vec<i32> = ascending.iter().rev().copied().collect();
    assert_eq!(descending, reversed, "second sort is the exact reverse");
    assert_eq!(
        controller.sort_state(),
        SortState::Sorted(SortDirection::Descending)
    );
}

/// Boundary: a single-element dataset sorts with no swaps and a bare
/// `SortComplete`.
#[tokio::test]
async fn test_single_element_sort() {
    let (controller, mut rx) = SortController::channel(SorterConfig::instant());

    controller.request_generate(1).await.unwrap();
    let values = recv_dataset(&mut rx).await;
    assert_eq!(values.len(), 1);

    controller.request_sort().await.unwrap();
    let (_, events) = drain_one_sort(&mut rx).await;
    assert_eq!(events, vec![ObservationEvent::SortComplete]);
}

/// Sorting before any dataset exists trivially completes.
#[tokio::test]
async fn test_sort_on_empty_store_completes() {
    let (controller, mut rx) = SortController::channel(SorterConfig::instant());

    controller.request_sort().await.unwrap();
    let (direction, events) = drain_one_sort(&mut rx).await;
    wait_until_idle(&controller).await;

    assert_eq!(direction, SortDirection::Ascending);
    assert_eq!(events, vec![ObservationEvent::SortComplete]);
    assert_eq!(
        controller.sort_state(),
        SortState::Sorted(SortDirection::Ascending)
    );
}

// =============================================================================
// Synchronous/stepped execution model
// =============================================================================

/// The engine works standalone on the caller's thread: no runtime, no
/// channel, events inline through the callback.
#[test]
fn test_synchronous_model_needs_no_runtime() {
    let values = vec![300, 7, 150, 7, 999, 42, 1];
    let mut store = SequenceStore::from_values(values.clone());
    let mut engine = AnimatedQuicksort::new();

    let mut events = Vec::new();
    let outcome = engine
        .run_sort(&mut store, |event| events.push(event))
        .unwrap();

    assert_eq!(
        outcome,
        sorter_core::SortOutcome::Sorted {
            direction: SortDirection::Ascending
        }
    );
    assert!(is_sorted(&store.snapshot(), SortDirection::Ascending));
    assert_permutation(&store.snapshot(), &values);

    let terminals = events.iter().filter(|e| e.is_terminal()).count();
    assert_eq!(terminals, 1, "exactly one terminal event per sort");
    assert_eq!(events.last(), Some(&ObservationEvent::SortComplete));
}

// =============================================================================
// Busy gate
// =============================================================================

/// A second sort request while one is in flight fails fast and leaves
/// the first sort untouched.
#[tokio::test]
async fn test_concurrent_sort_rejected() {
    let config = SorterConfig::new().with_step_delay(Duration::from_millis(10));
    let (controller, mut rx) = SortController::channel(config);

    controller.request_generate(40).await.unwrap();
    let original = recv_dataset(&mut rx).await;

    controller.request_sort().await.unwrap();
    assert_eq!(
        controller.request_sort().await,
        Err(SortError::ConcurrentSortInProgress)
    );

    // The in-flight sort still runs to a correct completion.
    let (_, events) = drain_one_sort(&mut rx).await;
    wait_until_idle(&controller).await;

    assert_eq!(events.last(), Some(&ObservationEvent::SortComplete));
    assert!(is_sorted(&controller.snapshot(), SortDirection::Ascending));
    assert_permutation(&controller.snapshot(), &original);
}

/// Dataset mutations (generate, drill-down, reset) are rejected while a
/// sort is in flight, then accepted again once it finishes.
#[tokio::test]
async fn test_mutations_rejected_while_sorting() {
    let config = SorterConfig::new().with_step_delay(Duration::from_millis(10));
    let (controller, mut rx) = SortController::channel(config);

    controller.request_generate(40).await.unwrap();
    let _ = recv_dataset(&mut rx).await;

    controller.request_sort().await.unwrap();

    assert_eq!(
        controller.request_generate(5).await,
        Err(SortError::ConcurrentSortInProgress)
    );
    assert_eq!(
        controller.request_drill_down(0).await,
        Err(SortError::ConcurrentSortInProgress)
    );
    assert_eq!(
        controller.request_reset().await,
        Err(SortError::ConcurrentSortInProgress)
    );

    let (_, _) = drain_one_sort(&mut rx).await;
    wait_until_idle(&controller).await;

    controller.request_generate(5).await.unwrap();
    assert_eq!(recv_dataset(&mut rx).await.len(), 5);
}

// =============================================================================
// Cancellation
// =============================================================================

/// Cancellation stops the run at a step boundary, keeps the partial
/// array, resets the sorted-state, and the next request runs a full
/// quicksort in the next toggle direction.
#[tokio::test]
async fn test_cancellation_mid_sort() {
    let config = SorterConfig::new().with_step_delay(Duration::from_millis(5));
    let (controller, mut rx) = SortController::channel(config);

    controller.request_generate(64).await.unwrap();
    let original = recv_dataset(&mut rx).await;

    controller.request_sort().await.unwrap();
    match recv_message(&mut rx).await {
        SorterMessage::SortStarted { direction } => {
            assert_eq!(direction, SortDirection::Ascending);
        }
        other => panic!("expected SortStarted, got {other:?}"),
    }

    // Let a few steps through, then cancel.
    let mut seen = 0;
    let terminal = loop {
        match recv_message(&mut rx).await {
            SorterMessage::Observation(event) if event.is_terminal() => break event,
            SorterMessage::Observation(_) => {
                seen += 1;
                if seen == 3 {
                    controller.request_cancel();
                }
            }
            other => panic!("unexpected message during a sort: {other:?}"),
        }
    };
    wait_until_idle(&controller).await;

    assert_eq!(terminal, ObservationEvent::Cancelled);
    assert_eq!(controller.sort_state(), SortState::Unsorted);
    assert_permutation(&controller.snapshot(), &original);

    // Next request: toggle flipped again, full quicksort from the
    // partial state.
    controller.request_sort().await.unwrap();
    let (direction, events) = drain_one_sort(&mut rx).await;
    wait_until_idle(&controller).await;

    assert_eq!(direction, SortDirection::Descending);
    assert!(
        events
            .iter()
            .any(|e| matches!(e, ObservationEvent::PivotChosen { .. })),
        "a sort after cancellation must be a full quicksort"
    );
    assert_eq!(events.last(), Some(&ObservationEvent::SortComplete));
    assert!(is_sorted(&controller.snapshot(), SortDirection::Descending));
}

// =============================================================================
// Drill-down
// =============================================================================

/// Drilling down on a small value regenerates a dataset sized to that
/// value.
#[tokio::test]
async fn test_drill_down_sizes_dataset_to_value() {
    let (controller, mut rx) = SortController::channel(SorterConfig::instant());

    // A degenerate distribution makes every value exactly 1.
    controller
        .request_generate_with_bounds(8, 1, 1)
        .await
        .unwrap();
    let values = recv_dataset(&mut rx).await;
    assert!(values.iter().all(|&v| v == 1));

    controller.request_drill_down(3).await.unwrap();
    let drilled = recv_dataset(&mut rx).await;
    assert_eq!(drilled.len(), 1, "dataset is sized to the clicked value");
    assert_eq!(controller.sort_state(), SortState::Unsorted);
}

/// Drilling down on a value above the small bound is rejected without
/// touching the dataset.
#[tokio::test]
async fn test_drill_down_rejects_large_values() {
    let (controller, mut rx) = SortController::channel(SorterConfig::instant());

    // Retry generation until some value exceeds the small bound; with 19
    // unplanted draws from [1, 1000] this practically always succeeds on
    // the first attempt.
    let mut large_index = None;
    for _ in 0..50 {
        controller.request_generate(20).await.unwrap();
        let values = recv_dataset(&mut rx).await;
        if let Some(index) = values.iter().position(|&v| v > 30) {
            large_index = Some((index, values));
            break;
        }
    }
    let (index, values) = large_index.expect("no value above the small bound after 50 datasets");

    assert!(matches!(
        controller.request_drill_down(index).await,
        Err(SortError::InvalidArgument { .. })
    ));
    assert_eq!(controller.snapshot(), values, "dataset must be untouched");
}
