use super::*;

#[test]
fn test_starts_in_estimating_at_zero() {
    let est = ProgressEstimator::start(50);
    assert_eq!(est.phase(), Phase::Estimating);
    assert_eq!(est.percent(), 0);
}

#[test]
fn test_progress_is_monotonic_while_estimating() {
    let mut est = ProgressEstimator::start(10);
    let mut last = 0;
    for _ in 0..10_000 {
        let p = est.tick();
        assert!(p >= last, "progress went backwards: {last} -> {p}");
        last = p;
    }
}

#[test]
fn test_never_reaches_100_while_pending() {
    let mut est = ProgressEstimator::start(300);
    for _ in 0..100_000 {
        assert!(est.tick() < 100);
    }
    assert_eq!(est.phase(), Phase::Estimating);
}

#[test]
fn test_linear_segment_tracks_estimate() {
    // 8s + 10 * 0.35s = 11.5s -> 115 ticks; at half the estimate the
    // linear segment puts progress at ~42%.
    let mut est = ProgressEstimator::start(10);
    for _ in 0..57 {
        est.tick();
    }
    let p = est.percent();
    assert!((40..=44).contains(&p), "unexpected percent {p}");
}

#[test]
fn test_estimate_batch_size_is_capped() {
    // Batches beyond 300 items share the same estimate.
    let mut a = ProgressEstimator::start(300);
    let mut b = ProgressEstimator::start(5_000);
    for _ in 0..100 {
        assert_eq!(a.tick(), b.tick());
    }
}

#[test]
fn test_sprint_reaches_done() {
    let mut est = ProgressEstimator::start(5);
    est.tick();
    est.mark_ready();
    assert_eq!(est.phase(), Phase::Sprinting);

    let mut ticks = 0;
    while !est.is_done() {
        est.tick();
        ticks += 1;
        assert!(ticks < 50, "sprint never finished");
    }
    assert_eq!(est.percent(), 100);
    // 5% per tick from near zero: about 20 ticks.
    assert!(ticks <= 20);
}

#[test]
fn test_sprint_is_monotonic_across_the_switch() {
    let mut est = ProgressEstimator::start(100);
    for _ in 0..200 {
        est.tick();
    }
    let before = est.percent();
    est.mark_ready();
    let mut last = before;
    while !est.is_done() {
        let p = est.tick();
        assert!(p >= last);
        last = p;
    }
}

#[test]
fn test_abort_returns_to_idle_without_done() {
    let mut est = ProgressEstimator::start(10);
    est.tick();
    est.abort();
    assert_eq!(est.phase(), Phase::Idle);
    assert_eq!(est.percent(), 0);
    // Ticks are inert when idle.
    assert_eq!(est.tick(), 0);
}

#[test]
fn test_reset_after_done() {
    let mut est = ProgressEstimator::start(1);
    est.mark_ready();
    while !est.is_done() {
        est.tick();
    }
    est.reset();
    assert_eq!(est.phase(), Phase::Idle);
    assert_eq!(est.percent(), 0);
}

#[test]
fn test_done_state_holds_at_100() {
    let mut est = ProgressEstimator::start(1);
    est.mark_ready();
    while !est.is_done() {
        est.tick();
    }
    assert_eq!(est.tick(), 100);
    assert_eq!(est.phase(), Phase::Done);
}

#[test]
fn test_phase_labels_by_threshold() {
    assert_eq!(phase_label(0), phase_label(14));
    assert_ne!(phase_label(14), phase_label(15));
    assert_ne!(phase_label(39), phase_label(40));
    assert_ne!(phase_label(69), phase_label(70));
    assert_ne!(phase_label(89), phase_label(90));
    assert_eq!(phase_label(100), "Done!");
}
