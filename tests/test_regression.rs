/*
 * @Description  : 线性回归集成测试：手写 SGD 与 SGD 优化器都应还原出 y = 2x + 1
 */

use approx::assert_abs_diff_eq;
use gan_primer::lessons::regression::{RegressionConfig, run_manual, run_with_optimizer};

#[test]
fn test_regression_converges() {
    let config = RegressionConfig {
        num_samples: 200,
        epochs: 150,
        seed: 7,
        ..RegressionConfig::default()
    };

    for report in [
        run_manual(&config).unwrap(),
        run_with_optimizer(&config).unwrap(),
    ] {
        println!("{report}");
        assert_abs_diff_eq!(report.w, 2.0, epsilon = 0.05);
        assert_abs_diff_eq!(report.b, 1.0, epsilon = 0.05);
        // 只剩噪声（std=0.1）带来的误差
        assert!(report.final_loss < 0.02, "最终损失过大: {}", report.final_loss);
        assert_eq!(report.loss_history.len(), 150);
        assert!(
            report.loss_history.windows(2).all(|w| w[1] <= w[0] + 1e-6),
            "全批量梯度下降的损失应单调不增"
        );
    }
}

#[test]
fn test_regression_other_line() {
    let config = RegressionConfig {
        true_w: -3.0,
        true_b: 0.5,
        noise_std: 0.0,
        epochs: 300,
        ..RegressionConfig::default()
    };
    let report = run_with_optimizer(&config).unwrap();
    assert_abs_diff_eq!(report.w, -3.0, epsilon = 1e-3);
    assert_abs_diff_eq!(report.b, 0.5, epsilon = 1e-3);
}
