use approx::assert_abs_diff_eq;

use crate::assert_err;
use crate::error::Error;
use crate::lessons::regression::{RegressionConfig, make_data, run_manual, run_with_optimizer};

#[test]
fn test_make_data_is_seeded() {
    let config = RegressionConfig::default();
    let (x1, y1) = make_data(&config);
    let (x2, y2) = make_data(&config);
    assert_eq!(x1.shape(), &[100, 1]);
    assert_eq!(x1, x2);
    assert_eq!(y1, y2);

    // 无噪声时 y 严格在直线上
    let exact = RegressionConfig {
        noise_std: 0.0,
        ..config
    };
    let (x, y) = make_data(&exact);
    assert_abs_diff_eq!(y[[7, 0]], 2.0 * x[[7, 0]] + 1.0, epsilon = 1e-6);
}

#[test]
fn test_manual_sgd_recovers_line() {
    let report = run_manual(&RegressionConfig::default()).unwrap();
    assert_eq!(report.method, "manual");
    assert_eq!(report.loss_history.len(), 100);
    assert_abs_diff_eq!(report.w, 2.0, epsilon = 0.05);
    assert_abs_diff_eq!(report.b, 1.0, epsilon = 0.05);
    assert!(report.final_loss < 0.05);
    assert!(report.loss_history[0] > report.final_loss);
}

#[test]
fn test_optimizer_matches_manual() {
    let config = RegressionConfig::default();
    let manual = run_manual(&config).unwrap();
    let library = run_with_optimizer(&config).unwrap();
    assert_eq!(library.method, "sgd");
    assert_abs_diff_eq!(library.w, manual.w, epsilon = 1e-4);
    assert_abs_diff_eq!(library.b, manual.b, epsilon = 1e-4);
    for (a, b) in library.loss_history.iter().zip(&manual.loss_history) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-4);
    }
}

#[test]
fn test_invalid_config() {
    let config = RegressionConfig {
        epochs: 0,
        ..RegressionConfig::default()
    };
    assert_err!(run_manual(&config), Error::Config(_));
    let config = RegressionConfig {
        learning_rate: -0.1,
        ..RegressionConfig::default()
    };
    assert_err!(run_with_optimizer(&config), Error::Config(_));
}
