use approx::assert_abs_diff_eq;

use crate::lessons::autograd::{run, run_at, toy_derivative, toy_function};

#[test]
fn test_toy_at_two() {
    let report = run().unwrap();
    assert_eq!(report.x, 2.0);
    assert_abs_diff_eq!(report.y, 6.0, epsilon = 1e-5);
    assert_abs_diff_eq!(report.grad, 15.0, epsilon = 1e-4);
    assert_abs_diff_eq!(report.analytic_grad, 15.0);
    assert_abs_diff_eq!(report.accumulated_grad, 30.0, epsilon = 1e-4);
    assert_abs_diff_eq!(report.grad_after_zero, 15.0, epsilon = 1e-4);
}

#[test]
fn test_matches_analytic_elsewhere() {
    for x in [-3.0, -0.5, 0.0, 1.5, 4.0] {
        let report = run_at(x).unwrap();
        assert_abs_diff_eq!(report.y, toy_function(x), epsilon = 1e-3);
        assert_abs_diff_eq!(report.grad, toy_derivative(x), epsilon = 1e-3);
    }
}

#[test]
fn test_display_mentions_both_derivatives() {
    let text = run().unwrap().to_string();
    assert!(text.contains("自动微分"));
    assert!(text.contains("解析解"));
}
