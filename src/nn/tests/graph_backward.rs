use crate::assert_err;
use crate::nn::{Graph, GraphError, Init, VarMatrixOps, VarReduceOps};
use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

/// y = x³ + 2x² - 5x 在 x = 2 处：y = 6，dy/dx = 3x² + 4x - 5 = 15
#[test]
fn test_backward_polynomial() {
    let graph = Graph::new();
    let x = graph.parameter(&[1, 1], Init::Constant(2.0), "x").unwrap();
    let y = x.pow(3.0) + x.pow(2.0).scale(2.0) - x.scale(5.0);

    let loss = y.backward().unwrap();
    assert_abs_diff_eq!(loss, 6.0, epsilon = 1e-5);
    assert_abs_diff_eq!(x.grad().unwrap().unwrap()[[0, 0]], 15.0, epsilon = 1e-4);
}

#[test]
fn test_backward_same_parent_twice() {
    // d(x·x)/dx = 2x
    let graph = Graph::new();
    let x = graph.parameter(&[1, 1], Init::Constant(3.0), "x").unwrap();
    let y = (&x * &x).sum();
    y.backward().unwrap();
    assert_abs_diff_eq!(x.grad().unwrap().unwrap()[[0, 0]], 6.0);
}

#[test]
fn test_backward_accumulates_across_calls() {
    let graph = Graph::new();
    let x = graph.parameter(&[1, 1], Init::Constant(2.0), "x").unwrap();
    let y = x.pow(2.0);

    y.backward().unwrap();
    assert_abs_diff_eq!(x.grad().unwrap().unwrap()[[0, 0]], 4.0);

    // 未清零时再次反向传播，梯度累加
    y.backward().unwrap();
    assert_abs_diff_eq!(x.grad().unwrap().unwrap()[[0, 0]], 8.0);

    graph.zero_grad();
    assert!(x.grad().unwrap().is_none());
    y.backward().unwrap();
    assert_abs_diff_eq!(x.grad().unwrap().unwrap()[[0, 0]], 4.0);
}

#[test]
fn test_backward_broadcast_bias() {
    let graph = Graph::new();
    let x = graph.input(&Tensor::ones(&[3, 2])).unwrap();
    let b = graph.parameter(&[1, 2], Init::Zeros, "b").unwrap();
    let y = (&x + &b).sum();
    y.backward().unwrap();
    crate::assert_tensor_close!(b.grad().unwrap().unwrap(), [3.0, 3.0], [1, 2]);
}

#[test]
fn test_backward_matmul() {
    let graph = Graph::new();
    let x = graph.input(&Tensor::new(&[1., 2.], &[1, 2])).unwrap();
    let w = graph.parameter(&[2, 1], Init::Ones, "w").unwrap();
    let y = x.matmul(&w).unwrap().sum();
    y.backward().unwrap();
    crate::assert_tensor_close!(w.grad().unwrap().unwrap(), [1.0, 2.0], [2, 1]);
}

#[test]
fn test_backward_requires_scalar_loss() {
    let graph = Graph::new();
    let w = graph.parameter(&[2, 1], Init::Ones, "w").unwrap();
    let y = w.scale(2.0);
    assert_err!(y.backward(), GraphError::InvalidOperation(_));
}

#[test]
fn test_backward_input_gets_no_grad() {
    let graph = Graph::new();
    let x = graph.input(&Tensor::scalar(1.0)).unwrap();
    let w = graph.parameter(&[1, 1], Init::Ones, "w").unwrap();
    (&x * &w).sum().backward().unwrap();
    assert_err!(x.grad(), GraphError::InvalidOperation(_));
    assert_abs_diff_eq!(w.grad().unwrap().unwrap()[[0, 0]], 1.0);
}

#[test]
fn test_backward_releases_intermediate_values() {
    let graph = Graph::new();
    let w = graph.parameter(&[1, 1], Init::Constant(2.0), "w").unwrap();
    let h = w.scale(3.0);
    let loss = h.sum();

    loss.backward().unwrap();
    assert!(h.value().unwrap().is_none());
    // 叶子节点不受影响
    assert!(w.value().unwrap().is_some());

    loss.backward_ex(true).unwrap();
    assert_abs_diff_eq!(h.item().unwrap(), 6.0);
    assert_eq!(graph.inner().last_backward_pass_id(), 2);
}

#[test]
fn test_backward_in_eval_mode_still_works() {
    let graph = Graph::new();
    let w = graph.parameter(&[1, 1], Init::Constant(1.0), "w").unwrap();
    let loss = w.pow(2.0);
    graph.eval();
    loss.backward().unwrap();
    assert_abs_diff_eq!(w.grad().unwrap().unwrap()[[0, 0]], 2.0);
}
