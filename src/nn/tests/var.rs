use crate::assert_err;
use crate::nn::{Graph, GraphError, Init};
use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

#[test]
fn test_var_operator_overloads() {
    let graph = Graph::new();
    let a = graph.input(&Tensor::scalar(6.0)).unwrap();
    let b = graph.input(&Tensor::scalar(2.0)).unwrap();

    let cases = [
        (&a + &b, 8.0),
        (&a - &b, 4.0),
        (&a * &b, 12.0),
        (&a / &b, 3.0),
        (a.clone() + b.clone(), 8.0),
        (&a - b.clone(), 4.0),
        (a.clone() * &b, 12.0),
        (-&a, -6.0),
        (-b.clone(), -2.0),
    ];
    for (var, expected) in cases {
        var.forward().unwrap();
        assert_abs_diff_eq!(var.item().unwrap(), expected);
    }
}

#[test]
fn test_var_cross_graph_operator_panics() {
    let g1 = Graph::new();
    let g2 = Graph::new();
    let a = g1.input(&Tensor::scalar(1.0)).unwrap();
    let b = g2.input(&Tensor::scalar(1.0)).unwrap();
    crate::assert_panic!(&a + &b);
    assert_err!(a.try_div(&b), GraphError::InvalidOperation(_));
}

#[test]
fn test_var_item_requires_single_element() {
    let graph = Graph::new();
    let x = graph.input(&Tensor::ones(&[2, 2])).unwrap();
    assert_err!(x.item(), GraphError::InvalidOperation(_));

    let empty = graph.input_shape(&[1, 1], None).unwrap();
    assert_err!(empty.item(), GraphError::ComputationError(_));
}

#[test]
fn test_var_zero_grad_only_clears_itself() {
    let graph = Graph::new();
    let a = graph.parameter(&[1, 1], Init::Ones, "a").unwrap();
    let b = graph.parameter(&[1, 1], Init::Ones, "b").unwrap();
    (&a * &b).backward().unwrap();
    a.zero_grad().unwrap();
    assert!(a.grad().unwrap().is_none());
    assert!(b.grad().unwrap().is_some());
}

#[test]
fn test_var_outlives_graph_handle() {
    let x = {
        let graph = Graph::new();
        graph.input(&Tensor::scalar(3.0)).unwrap()
    };
    let y = &x * &x;
    y.forward().unwrap();
    assert_eq!(y.item().unwrap(), 9.0);
    assert_eq!(x.get_graph().nodes_count(), 2);
}
