use crate::assert_err;
use crate::error::Error;
use crate::lessons::samples::show;
use crate::tensor::Tensor;

#[test]
fn test_show_without_saving() {
    let report = show(&Tensor::zeros(&[4, 784]), 2, None).unwrap();
    assert_eq!(report.count, 4);
    assert_eq!(report.grid_shape, vec![62, 62]);
    assert_eq!(report.saved_to, None);
    assert_eq!(report.preview.lines().count(), 28);
}

#[test]
fn test_show_saves_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("samples.png");
    let report = show(&Tensor::zeros(&[3, 1, 28, 28]), 8, Some(&path)).unwrap();
    assert_eq!(report.count, 3);
    assert_eq!(report.grid_shape, vec![32, 92]);
    assert!(path.exists());
    assert!(report.to_string().contains("samples.png"));
}

#[test]
fn test_show_rejects_bad_shape() {
    assert_err!(show(&Tensor::zeros(&[2, 10]), 2, None), Error::Vision(_));
}
