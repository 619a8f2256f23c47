use crate::assert_err;
use crate::nn::{Graph, GraphError, Init, VarActivationOps, VarMatrixOps, VarReduceOps};
use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

#[test]
fn test_forward_chain() {
    let graph = Graph::new();
    let x = graph.input(&Tensor::new(&[1., 2.], &[1, 2])).unwrap();
    let w = graph
        .parameter(&[2, 1], Init::Constant(1.0), "w")
        .unwrap();
    let y = x.matmul(&w).unwrap().scale(3.0);
    y.forward().unwrap();
    assert_abs_diff_eq!(y.item().unwrap(), 9.0);
}

#[test]
fn test_forward_recomputes_after_input_changes() {
    let graph = Graph::new();
    let x = graph.input(&Tensor::scalar(1.0)).unwrap();
    let y = x.scale(3.0);
    y.forward().unwrap();
    assert_eq!(y.item().unwrap(), 3.0);

    x.set_value(&Tensor::scalar(2.0)).unwrap();
    y.forward().unwrap();
    assert_eq!(y.item().unwrap(), 6.0);
}

#[test]
fn test_forward_with_new_batch_size() {
    let graph = Graph::new();
    let x = graph.input_shape(&[4, 3], Some("x")).unwrap();
    let w = graph.parameter(&[3, 2], Init::Ones, "w").unwrap();
    let y = x.matmul(&w).unwrap();

    x.set_value(&Tensor::ones(&[4, 3])).unwrap();
    y.forward().unwrap();
    assert_eq!(y.value().unwrap().unwrap().shape(), &[4, 2]);

    x.set_value(&Tensor::ones(&[9, 3])).unwrap();
    y.forward().unwrap();
    let value = y.value().unwrap().unwrap();
    assert_eq!(value.shape(), &[9, 2]);
    assert!(value.data_as_slice().iter().all(|&v| v == 3.0));
}

#[test]
fn test_forward_shared_subexpression() {
    // h 被两条路径共用，一次前向传播中只计算一次，结果一致
    let graph = Graph::new();
    let x = graph.input(&Tensor::scalar(0.0)).unwrap();
    let h = x.sigmoid();
    let y = &h + &h;
    y.forward().unwrap();
    assert_abs_diff_eq!(y.item().unwrap(), 1.0);
    assert_eq!(graph.inner().last_forward_pass_id(), 1);
}

#[test]
fn test_forward_leaf_without_value() {
    let graph = Graph::new();
    let x = graph.input_shape(&[2, 2], None).unwrap();
    let y = x.tanh();
    assert_err!(y.forward(), GraphError::InvalidOperation(_));
    assert_err!(x.forward(), GraphError::InvalidOperation(_));
}

#[test]
fn test_forward_leaf_with_value_is_noop() {
    let graph = Graph::new();
    let x = graph.input(&Tensor::ones(&[2, 2])).unwrap();
    x.forward().unwrap();
    assert_eq!(graph.inner().last_forward_pass_id(), 0);
}

#[test]
fn test_build_time_shape_checks() {
    let graph = Graph::new();
    let a = graph.input(&Tensor::ones(&[2, 3])).unwrap();
    let b = graph.input(&Tensor::ones(&[4, 5])).unwrap();
    assert_err!(a.try_add(&b), GraphError::ShapeMismatch { .. });
    assert_err!(a.matmul(&b), GraphError::ShapeMismatch { .. });

    let c = graph.input(&Tensor::ones(&[1, 3])).unwrap();
    let sum = a.try_add(&c).unwrap();
    assert_eq!(sum.value_expected_shape().unwrap(), vec![2, 3]);
}

#[test]
fn test_cross_graph_operation_is_rejected() {
    let g1 = Graph::new();
    let g2 = Graph::new();
    let a = g1.input(&Tensor::ones(&[1, 1])).unwrap();
    let b = g2.input(&Tensor::ones(&[1, 1])).unwrap();
    assert_err!(a.try_mul(&b), GraphError::InvalidOperation(_));
    assert_err!(a.matmul(&b), GraphError::InvalidOperation(_));
}
