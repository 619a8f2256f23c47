use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;

#[test]
fn test_mat_mul() {
    let a = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    let b = Tensor::new(&[7., 8., 9., 10., 11., 12.], &[3, 2]);
    let c = a.mat_mul(&b);
    assert_eq!(c, Tensor::new(&[58., 64., 139., 154.], &[2, 2]));
}

#[test]
fn test_mat_mul_shape_errors() {
    let a = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    assert_eq!(
        a.try_mat_mul(&a),
        Err(TensorError::OperatorError {
            operator: Operator::MatMul,
            tensor1_shape: vec![2, 3],
            tensor2_shape: vec![2, 3],
        })
    );
    let v = Tensor::new(&[1., 2., 3.], &[3]);
    assert!(a.try_mat_mul(&v).is_err());
}
