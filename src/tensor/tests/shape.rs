use crate::assert_panic;
use crate::errors::TensorError;
use crate::tensor::Tensor;

#[test]
fn test_reshape_and_flatten() {
    let t = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    let r = t.reshape(&[3, 2]);
    assert_eq!(r.shape(), &[3, 2]);
    assert_eq!(r.to_vec(), t.to_vec());
    assert_eq!(t.flatten().shape(), &[6]);
    assert_panic!(t.reshape(&[4, 2]), TensorError::IncompatibleShape);
}

#[test]
fn test_transpose() {
    let t = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    let tt = t.transpose();
    assert_eq!(tt, Tensor::new(&[1., 4., 2., 5., 3., 6.], &[3, 2]));
    // 转置结果须是行优先连续的
    assert_eq!(tt.data_as_slice(), &[1., 4., 2., 5., 3., 6.]);
}

#[test]
fn test_slice_and_select_rows() {
    let t = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[3, 2]);
    assert_eq!(t.slice_rows(1..3), Tensor::new(&[3., 4., 5., 6.], &[2, 2]));
    assert_eq!(t.select_rows(&[2, 0]), Tensor::new(&[5., 6., 1., 2.], &[2, 2]));
    assert_panic!(
        t.select_rows(&[3]),
        TensorError::IndexOutOfBounds { index: 3, len: 3 }
    );
}

#[test]
fn test_concat_rows() {
    let a = Tensor::new(&[1., 2.], &[1, 2]);
    let b = Tensor::new(&[3., 4., 5., 6.], &[2, 2]);
    let c = Tensor::concat_rows(&[&a, &b]).unwrap();
    assert_eq!(c, Tensor::new(&[1., 2., 3., 4., 5., 6.], &[3, 2]));

    let bad = Tensor::new(&[1., 2., 3.], &[1, 3]);
    assert_eq!(
        Tensor::concat_rows(&[&a, &bad]),
        Err(TensorError::InconsistentShape)
    );
    assert_eq!(Tensor::concat_rows(&[]), Err(TensorError::EmptyList));
}

#[test]
fn test_sum_to_shape() {
    let g = Tensor::ones(&[4, 3]);
    assert_eq!(g.sum_to_shape(&[1, 3]), Tensor::full(4., &[1, 3]));
    assert_eq!(g.sum_to_shape(&[4, 1]), Tensor::full(3., &[4, 1]));
    assert_eq!(g.sum_to_shape(&[1, 1]), Tensor::scalar(12.));
    assert_eq!(g.sum_to_shape(&[3]), Tensor::full(4., &[3]));
    assert_eq!(g.sum_to_shape(&[4, 3]), g);
}

#[test]
fn test_broadcast_compatibility() {
    let a = Tensor::zeros(&[4, 3]);
    assert!(a.can_broadcast_with(&Tensor::zeros(&[1, 3])));
    assert!(a.can_broadcast_with(&Tensor::zeros(&[3])));
    assert!(a.can_broadcast_with(&Tensor::scalar(1.)));
    assert!(!a.can_broadcast_with(&Tensor::zeros(&[2, 3])));
}
