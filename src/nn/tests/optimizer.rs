use crate::assert_err;
use crate::nn::{
    Adam, Graph, GraphError, Init, Optimizer, SGD, Var, VarLossOps, VarMatrixOps,
};
use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

/// 拟合 y = 2x：x=[1,2]ᵀ，t=[2,4]ᵀ，w 初值为0
fn regression_problem(graph: &Graph) -> (Var, Var) {
    let x = graph.input(&Tensor::new(&[1., 2.], &[2, 1])).unwrap();
    let t = graph.input(&Tensor::new(&[2., 4.], &[2, 1])).unwrap();
    let w = graph.parameter(&[1, 1], Init::Zeros, "w").unwrap();
    let loss = x.matmul(&w).unwrap().mse_loss(&t).unwrap();
    (w, loss)
}

#[test]
fn test_sgd_single_step() {
    let graph = Graph::new();
    let (w, loss) = regression_problem(&graph);
    let mut optimizer = SGD::new(&graph, &[w.clone()], 0.1).unwrap();

    // loss = mean((w·x - t)²)，w=0时 ∂loss/∂w = 2·mean(x·(wx - t)) = -10
    let value = optimizer.minimize(&loss).unwrap();
    assert_abs_diff_eq!(value, 10.0);
    assert_abs_diff_eq!(w.value().unwrap().unwrap()[[0, 0]], 1.0, epsilon = 1e-6);
}

#[test]
fn test_sgd_converges() {
    let graph = Graph::new();
    let (w, loss) = regression_problem(&graph);
    let mut optimizer = SGD::new(&graph, &[w.clone()], 0.05).unwrap();
    for _ in 0..200 {
        optimizer.minimize(&loss).unwrap();
    }
    assert_abs_diff_eq!(w.value().unwrap().unwrap()[[0, 0]], 2.0, epsilon = 1e-3);
}

#[test]
fn test_adam_first_step_moves_by_learning_rate() {
    let graph = Graph::new();
    let (w, loss) = regression_problem(&graph);
    let mut optimizer = Adam::new(&graph, &[w.clone()], 0.01).unwrap();
    optimizer.minimize(&loss).unwrap();
    // 偏差修正后第一步的更新量为 lr·sign(g)
    assert_abs_diff_eq!(w.value().unwrap().unwrap()[[0, 0]], 0.01, epsilon = 1e-6);
}

#[test]
fn test_adam_converges_and_reset() {
    let graph = Graph::new();
    let (w, loss) = regression_problem(&graph);
    let mut optimizer = Adam::with_config(&graph, &[w.clone()], 0.1, 0.5, 0.999, 1e-8).unwrap();
    assert_eq!(optimizer.betas(), (0.5, 0.999));
    for _ in 0..300 {
        optimizer.minimize(&loss).unwrap();
    }
    assert_abs_diff_eq!(w.value().unwrap().unwrap()[[0, 0]], 2.0, epsilon = 5e-2);
    optimizer.reset();
}

#[test]
fn test_optimizer_only_touches_own_params() {
    let graph = Graph::new();
    let x = graph.input(&Tensor::scalar(1.0)).unwrap();
    let a = graph.parameter(&[1, 1], Init::Ones, "a").unwrap();
    let b = graph.parameter(&[1, 1], Init::Ones, "b").unwrap();
    let loss = (&(&x * &a) * &b).mse_loss(&graph.zeros(&[1, 1]).unwrap()).unwrap();

    let mut opt_a = SGD::new(&graph, &[a.clone()], 0.1).unwrap();
    loss.backward().unwrap();
    opt_a.step().unwrap();
    assert!(a.value().unwrap().unwrap()[[0, 0]] < 1.0);
    assert_eq!(b.value().unwrap().unwrap()[[0, 0]], 1.0);

    opt_a.zero_grad().unwrap();
    assert!(a.grad().unwrap().is_none());
    assert!(b.grad().unwrap().is_some());
}

#[test]
fn test_step_without_grad_keeps_param() {
    let graph = Graph::new();
    let w = graph.parameter(&[2, 2], Init::Ones, "w").unwrap();
    let mut optimizer = Adam::new(&graph, &[w.clone()], 0.1).unwrap();
    optimizer.step().unwrap();
    assert_eq!(w.value().unwrap().unwrap(), Tensor::ones(&[2, 2]));
}

#[test]
fn test_learning_rate_accessors() {
    let graph = Graph::new();
    let w = graph.parameter(&[1, 1], Init::Ones, "w").unwrap();
    let mut optimizer = SGD::new(&graph, &[w], 0.1).unwrap();
    assert_abs_diff_eq!(optimizer.learning_rate(), 0.1);
    optimizer.set_learning_rate(0.01);
    assert_abs_diff_eq!(optimizer.learning_rate(), 0.01);
}

#[test]
fn test_optimizer_invalid_config() {
    let graph = Graph::new();
    let w = graph.parameter(&[1, 1], Init::Ones, "w").unwrap();
    let x = graph.input(&Tensor::scalar(1.0)).unwrap();

    assert_err!(SGD::new(&graph, &[w.clone()], 0.0), GraphError::InvalidOperation(_));
    assert_err!(SGD::new(&graph, &[x], 0.1), GraphError::InvalidOperation(_));
    assert_err!(
        Adam::with_config(&graph, &[w.clone()], 0.1, 1.0, 0.999, 1e-8),
        GraphError::InvalidOperation(_)
    );

    let other = Graph::new();
    assert_err!(SGD::new(&other, &[w], 0.1), GraphError::InvalidOperation(_));
}
