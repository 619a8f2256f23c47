use crate::assert_panic;
use crate::errors::TensorError;
use crate::tensor::Tensor;

#[test]
fn test_new_with_matching_shape() {
    let t = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    assert_eq!(t.shape(), &[2, 3]);
    assert_eq!(t.dimension(), 2);
    assert_eq!(t.size(), 6);
    assert_eq!(t[[1, 2]], 6.);
}

#[test]
fn test_try_new_with_mismatched_data() {
    let result = Tensor::try_new(&[1., 2., 3.], &[2, 2]);
    assert_eq!(
        result,
        Err(TensorError::ShapeDataMismatch {
            data_len: 3,
            shape: vec![2, 2],
        })
    );
    assert_panic!(
        Tensor::new(&[1., 2., 3.], &[2, 2]),
        TensorError::ShapeDataMismatch {
            data_len: 3,
            shape: vec![2, 2],
        }
    );
}

#[test]
fn test_scalar_and_number() {
    let t = Tensor::scalar(3.5);
    assert_eq!(t.shape(), &[1, 1]);
    assert!(t.is_scalar());
    assert_eq!(t.get_data_number(), Some(3.5));

    let v = Tensor::new(&[1., 2.], &[2]);
    assert!(!v.is_scalar());
    assert_eq!(v.get_data_number(), None);

    // 0阶张量也算标量
    let t0 = Tensor::new(&[7.], &[]);
    assert!(t0.is_scalar());
    assert_eq!(t0.dimension(), 0);
}

#[test]
fn test_zeros_ones_full() {
    assert_eq!(Tensor::zeros(&[2, 2]).to_vec(), vec![0.; 4]);
    assert_eq!(Tensor::ones(&[3]).to_vec(), vec![1.; 3]);
    assert_eq!(Tensor::full(2.5, &[1, 2]).to_vec(), vec![2.5, 2.5]);
}

#[test]
fn test_linspace() {
    let t = Tensor::linspace(-1., 1., 5);
    assert_eq!(t.shape(), &[5, 1]);
    assert_eq!(t.to_vec(), vec![-1., -0.5, 0., 0.5, 1.]);
    assert_panic!(Tensor::linspace(0., 1., 1));
}

#[test]
fn test_uniform_stays_in_range() {
    let t = Tensor::uniform(-0.5, 0.5, &[10, 10]);
    assert!(t.min_value() >= -0.5);
    assert!(t.max_value() <= 0.5);
}

#[test]
fn test_normal_seeded_is_reproducible() {
    let a = Tensor::normal_seeded(0., 1., &[4, 8], 42);
    let b = Tensor::normal_seeded(0., 1., &[4, 8], 42);
    let c = Tensor::normal_seeded(0., 1., &[4, 8], 43);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(!a.has_non_finite());
}

#[test]
fn test_normal_statistics() {
    let t = Tensor::normal_seeded(2., 0.5, &[100, 100], 7);
    assert!((t.mean_value() - 2.).abs() < 0.05);
    assert!((t.std_value() - 0.5).abs() < 0.05);
}
