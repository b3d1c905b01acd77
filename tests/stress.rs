//! Stress tests for ALEC Stream
//!
//! Run with: cargo test --release stress -- --ignored

use alec_stream::*;
use std::time::Instant;

fn reading(i: usize) -> f64 {
    20.0 + (i as f64 * 0.001).sin() * 5.0 + if i % 997 == 0 { 40.0 } else { 0.0 }
}

#[test]
#[ignore] // Run manually with --ignored
fn stress_test_zscore() {
    let mut detector = ZScoreDetector::new(3.0, 30).unwrap();

    let iterations = 10_000_000;
    let start = Instant::now();

    for i in 0..iterations {
        detector.update(reading(i));
    }

    let elapsed = start.elapsed();
    let rate = iterations as f64 / elapsed.as_secs_f64();

    println!("Z-score: {} updates in {:?}", iterations, elapsed);
    println!("Rate: {:.0} updates/second", rate);

    assert_eq!(detector.count(), iterations as u64);
    assert!(detector.mean().is_finite());
    assert!(
        rate > 1_000_000.0,
        "Should process at least 1M updates/s, got {:.0}",
        rate
    );
}

#[test]
#[ignore]
fn stress_test_adaptive_long_run_drift() {
    // sum/sum_sq accumulate round-off over millions of evictions
    let mut detector = AdaptiveZScoreDetector::new(100, 3.0).unwrap();

    let iterations = 5_000_000;
    let start = Instant::now();

    for i in 0..iterations {
        detector.update(reading(i));
    }

    let elapsed = start.elapsed();
    println!("Adaptive: {} updates in {:?}", iterations, elapsed);

    assert_eq!(detector.len(), 100);
    assert!(detector.stddev() >= 0.0);
    assert!(detector.mean() > 10.0 && detector.mean() < 30.0);
}

#[test]
#[ignore]
fn stress_test_iqr_large_window() {
    let mut detector = IqrDetector::new(10_000, 1.5).unwrap();

    let iterations = 1_000_000;
    let start = Instant::now();

    for i in 0..iterations {
        detector.update(reading(i));
    }

    let elapsed = start.elapsed();
    let rate = iterations as f64 / elapsed.as_secs_f64();

    println!("IQR (w=10000): {} updates in {:?}", iterations, elapsed);
    println!("Rate: {:.0} updates/second", rate);
    println!("Anomalies: {}", detector.anomalies_detected());

    assert_eq!(detector.recompute_interval(), 1_000);
    assert!(detector.anomalies_detected() > 0);
    assert!(
        rate > 100_000.0,
        "Should process at least 100k updates/s, got {:.0}",
        rate
    );
}

#[test]
#[ignore]
fn stress_test_filters() {
    let mut kalman = KalmanFilter1D::default();
    let mut ema = EmaFilter::default();
    let mut ma = MovingAverage::new(1_000).unwrap();

    let iterations = 10_000_000;
    let start = Instant::now();

    for i in 0..iterations {
        let v = reading(i);
        kalman.update(v);
        ema.update(v);
        ma.update(v);
    }

    let elapsed = start.elapsed();
    println!("Filters: {} updates in {:?}", iterations, elapsed);

    assert!(kalman.estimate().is_finite());
    assert!(ema.value().is_finite());
    assert!(ma.average().is_some());
}

#[test]
#[ignore]
fn stress_test_rate_limiter_burst() {
    let mut limiter = AlertRateLimiter::new(1_000, 1.0).unwrap();

    let iterations = 5_000_000;
    let start = Instant::now();
    let mut allowed = 0u64;

    for i in 0..iterations {
        // 10 kHz alert storm
        if limiter.allow(i as f64 * 1e-4) {
            allowed += 1;
        }
    }

    let elapsed = start.elapsed();
    println!(
        "Rate limiter: {} calls in {:?}, {} allowed",
        iterations, elapsed, allowed
    );

    assert_eq!(allowed + limiter.suppressed_count(), iterations as u64);
    assert!(limiter.len() <= 1_000);
    // 500 seconds of stream, at most 1000 per rolling second
    assert!(allowed <= 1_000 * 501);
}

#[test]
#[ignore]
fn stress_test_tumbling_day() {
    let mut window = TumblingWindow::new(300_000).unwrap();

    // One reading per second for a day
    let mut closed = 0;
    for i in 0..86_400usize {
        if let Some(stats) = window.add(reading(i), i as u64 * 1_000) {
            assert_eq!(stats.sample_count, 300);
            assert!(stats.min <= stats.avg && stats.avg <= stats.max);
            closed += 1;
        }
    }

    assert_eq!(closed, 287);
    assert!(window.flush().is_some());
}
