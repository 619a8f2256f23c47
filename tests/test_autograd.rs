/*
 * @Description  : 自动微分集成测试：与解析导数、数值差分对照
 */

use approx::assert_abs_diff_eq;
use gan_primer::lessons::autograd::{self, toy_derivative, toy_function};
use gan_primer::nn::{Graph, Init, VarActivationOps, VarLossOps, VarMatrixOps, VarReduceOps};
use gan_primer::tensor::Tensor;

#[test]
fn test_toy_function_matches_analytic_derivative() {
    let report = autograd::run().unwrap();
    println!("{report}");
    assert_abs_diff_eq!(report.y, toy_function(2.0), epsilon = 1e-5);
    assert_abs_diff_eq!(report.grad, report.analytic_grad, epsilon = 1e-4);
    assert_abs_diff_eq!(report.accumulated_grad, 2.0 * report.grad, epsilon = 1e-4);
    assert_abs_diff_eq!(report.grad_after_zero, toy_derivative(2.0), epsilon = 1e-4);
}

/// 小型 MLP 的梯度与中心差分对照
#[test]
fn test_mlp_gradient_matches_finite_difference() {
    let graph = Graph::new_with_seed(3);
    let x = graph
        .input(&Tensor::new(&[0.5, -1.0, 0.25, 2.0, 0.0, -0.5], &[2, 3]))
        .unwrap();
    let t = graph.input(&Tensor::new(&[1.0, 0.0], &[2, 1])).unwrap();
    let w1 = graph.parameter(&[3, 4], Init::Normal { mean: 0.0, std: 0.5 }, "w1").unwrap();
    let w2 = graph.parameter(&[4, 1], Init::Normal { mean: 0.0, std: 0.5 }, "w2").unwrap();

    let h = x.matmul(&w1).unwrap().leaky_relu(0.1);
    let loss = h.matmul(&w2).unwrap().sigmoid().bce_loss(&t).unwrap();

    loss.backward().unwrap();
    let analytic = w1.grad().unwrap().unwrap();
    let original = w1.value().unwrap().unwrap();

    let eps = 1e-2;
    for (i, j) in [(0, 0), (1, 2), (2, 3)] {
        let mut plus = original.clone();
        plus[[i, j]] += eps;
        w1.set_value(&plus).unwrap();
        loss.forward().unwrap();
        let loss_plus = loss.item().unwrap();

        let mut minus = original.clone();
        minus[[i, j]] -= eps;
        w1.set_value(&minus).unwrap();
        loss.forward().unwrap();
        let loss_minus = loss.item().unwrap();

        let numeric = (loss_plus - loss_minus) / (2.0 * eps);
        assert_abs_diff_eq!(analytic[[i, j]], numeric, epsilon = 1e-2);
    }
}

#[test]
fn test_mean_of_squares_gradient() {
    // d/dv mean(v²) = 2v / n
    let graph = Graph::new();
    let v = graph
        .parameter(&[1, 4], Init::Constant(0.0), "v")
        .unwrap();
    v.set_value(&Tensor::new(&[1.0, -2.0, 3.0, 0.5], &[1, 4])).unwrap();
    let loss = v.pow(2.0).mean();
    loss.backward().unwrap();
    let grad = v.grad().unwrap().unwrap();
    assert_eq!(grad.shape(), &[1, 4]);
    for (g, expected) in grad.to_vec().iter().zip([0.5, -1.0, 1.5, 0.25]) {
        assert_abs_diff_eq!(*g, expected, epsilon = 1e-6);
    }
}
