use crate::assert_err;
use crate::nn::{Graph, GraphError, Linear, Module, VarLossOps};
use crate::tensor::Tensor;

#[test]
fn test_linear_creation() {
    let graph = Graph::new_with_seed(42);
    let fc = Linear::new(&graph, 3, 2, true, "fc").unwrap();

    assert_eq!(fc.in_features(), 3);
    assert_eq!(fc.out_features(), 2);
    assert_eq!(fc.name(), "fc");
    assert_eq!(fc.num_params(), 2);
    assert_eq!(fc.num_elements(), 3 * 2 + 2);
    assert_eq!(fc.weights().name().unwrap(), "fc_W");
    assert_eq!(fc.bias().unwrap().name().unwrap(), "fc_b");

    // U(-1/sqrt(3), 1/sqrt(3))
    let bound = 1.0 / 3.0_f32.sqrt();
    let w = fc.weights().value().unwrap().unwrap();
    assert_eq!(w.shape(), &[3, 2]);
    assert!(w.data_as_slice().iter().all(|v| v.abs() <= bound));
    assert_eq!(fc.bias().unwrap().value().unwrap().unwrap().shape(), &[1, 2]);
}

#[test]
fn test_linear_without_bias() {
    let graph = Graph::new();
    let fc = Linear::new(&graph, 4, 1, false, "fc").unwrap();
    assert!(fc.bias().is_none());
    assert_eq!(fc.parameters().len(), 1);
}

#[test]
fn test_linear_forward_matches_manual() {
    let graph = Graph::new();
    let fc = Linear::new(&graph, 2, 1, true, "fc").unwrap();
    fc.weights()
        .set_value(&Tensor::new(&[2.0, -1.0], &[2, 1]))
        .unwrap();
    fc.bias().unwrap().set_value(&Tensor::scalar(0.5)).unwrap();

    let x = graph
        .input(&Tensor::new(&[1., 1., 3., 2.], &[2, 2]))
        .unwrap();
    let y = fc.forward(&x).unwrap();
    y.forward().unwrap();
    crate::assert_tensor_close!(y.value().unwrap().unwrap(), [1.5, 4.5], [2, 1]);

    // 换一个批大小，偏置照常广播
    x.set_value(&Tensor::ones(&[5, 2])).unwrap();
    y.forward().unwrap();
    crate::assert_tensor_close!(y.value().unwrap().unwrap(), [1.5; 5], [5, 1]);
}

#[test]
fn test_linear_backward_reaches_both_params() {
    let graph = Graph::new_with_seed(1);
    let fc = Linear::new(&graph, 3, 1, true, "fc").unwrap();
    let x = graph.input(&Tensor::ones(&[4, 3])).unwrap();
    let target = graph.input(&Tensor::zeros(&[4, 1])).unwrap();
    let loss = fc.forward(&x).unwrap().mse_loss(&target).unwrap();
    loss.backward().unwrap();
    for p in fc.parameters() {
        assert!(p.grad().unwrap().is_some());
    }
}

#[test]
fn test_linear_invalid_config() {
    let graph = Graph::new();
    assert_err!(
        Linear::new(&graph, 0, 3, true, "fc"),
        GraphError::InvalidOperation(_)
    );
    Linear::new(&graph, 2, 3, true, "fc").unwrap();
    assert_err!(
        Linear::new(&graph, 2, 3, true, "fc"),
        GraphError::DuplicateNodeName("节点fc_W在图default_graph中重复")
    );
}
