use crate::assert_err;
use crate::nn::{Graph, GraphError, Init, VarActivationOps, VarLossOps};
use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

#[test]
fn test_mse_loss() {
    let graph = Graph::new();
    let pred = graph.parameter(&[2, 1], Init::Zeros, "pred").unwrap();
    pred.set_value(&Tensor::new(&[1., 2.], &[2, 1])).unwrap();
    let target = graph.input(&Tensor::zeros(&[2, 1])).unwrap();

    let loss = pred.mse_loss(&target).unwrap();
    assert_abs_diff_eq!(loss.backward().unwrap(), 2.5);
    crate::assert_tensor_close!(pred.grad().unwrap().unwrap(), [1., 2.], [2, 1]);
}

#[test]
fn test_bce_loss_value_and_grad() {
    let graph = Graph::new();
    let p = graph
        .parameter(&[1, 1], Init::Constant(0.5), "p")
        .unwrap();
    let t = graph.input(&Tensor::scalar(1.0)).unwrap();
    let loss = p.bce_loss(&t).unwrap();
    assert_abs_diff_eq!(loss.backward().unwrap(), 2.0_f32.ln(), epsilon = 1e-6);
    // (p - t) / (p(1 - p)) = -0.5 / 0.25
    assert_abs_diff_eq!(p.grad().unwrap().unwrap()[[0, 0]], -2.0, epsilon = 1e-5);
}

#[test]
fn test_bce_after_sigmoid_grad_is_p_minus_t() {
    let graph = Graph::new();
    let logits = graph.parameter(&[2, 1], Init::Zeros, "logits").unwrap();
    logits
        .set_value(&Tensor::new(&[0.0, 2.0], &[2, 1]))
        .unwrap();
    let t = graph.input(&Tensor::new(&[1.0, 0.0], &[2, 1])).unwrap();
    let loss = logits.sigmoid().bce_loss(&t).unwrap();
    loss.backward().unwrap();

    let p1 = 1.0 / (1.0 + (-2.0_f32).exp());
    crate::assert_tensor_close!(
        logits.grad().unwrap().unwrap(),
        [(0.5 - 1.0) / 2.0, p1 / 2.0],
        [2, 1],
        1e-5
    );
}

#[test]
fn test_bce_loss_saturated_prediction_is_finite() {
    let graph = Graph::new();
    let p = graph.parameter(&[1, 2], Init::Zeros, "p").unwrap();
    p.set_value(&Tensor::new(&[0.0, 1.0], &[1, 2])).unwrap();
    let t = graph.input(&Tensor::new(&[1.0, 0.0], &[1, 2])).unwrap();
    let loss = p.bce_loss(&t).unwrap();
    loss.forward().unwrap();
    // ln 被截断在 -100
    assert_abs_diff_eq!(loss.item().unwrap(), 100.0, epsilon = 1e-3);
}

#[test]
fn test_bce_loss_rejects_out_of_range_prediction() {
    let graph = Graph::new();
    let p = graph.parameter(&[1, 1], Init::Constant(1.5), "p").unwrap();
    let t = graph.input(&Tensor::scalar(1.0)).unwrap();
    let loss = p.bce_loss(&t).unwrap();
    assert_err!(loss.forward(), GraphError::ComputationError(_));
}

#[test]
fn test_loss_shape_mismatch() {
    let graph = Graph::new();
    let p = graph.parameter(&[2, 1], Init::Zeros, "p").unwrap();
    let t = graph.input(&Tensor::zeros(&[1, 2])).unwrap();
    assert_err!(p.mse_loss(&t), GraphError::ShapeMismatch { .. });
    assert_err!(p.bce_loss(&t), GraphError::ShapeMismatch { .. });
}
