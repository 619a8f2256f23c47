//! 数据变换函数：归一化、one-hot 编码、展平

use crate::data::error::DataError;
use crate::tensor::Tensor;

/// 将 0-255 像素值归一化到 0-1
pub fn normalize_pixels(tensor: &Tensor) -> Tensor {
    tensor / 255.0
}

/// 标准化：`(x - mean) / std`
///
/// 像素已在[0, 1]时，`normalize(x, 0.5, 0.5)`将其映射到[-1, 1]，与 Tanh 输出的值域一致
pub fn normalize(tensor: &Tensor, mean: f32, std: f32) -> Result<Tensor, DataError> {
    if !(std > 0.0 && std.is_finite()) {
        return Err(DataError::InvalidArgument(format!(
            "标准化的 std 必须为正数，但得到 {std}"
        )));
    }
    Ok((tensor - mean) / std)
}

/// 将类别索引转换为 one-hot 编码
///
/// `labels`形状为[N]或[N, 1]，输出形状为[N, num_classes]。
/// 超出`0..num_classes`的索引返回错误
///
/// ```ignore
/// let labels = Tensor::new(&[0.0, 2.0, 1.0], &[3]);
/// let encoded = one_hot(&labels, 3)?;
/// // [[1,0,0], [0,0,1], [0,1,0]]
/// ```
pub fn one_hot(labels: &Tensor, num_classes: usize) -> Result<Tensor, DataError> {
    let flat = labels.flatten();
    let n = flat.size();

    let mut data = vec![0.0; n * num_classes];
    for (i, &label) in flat.data_as_slice().iter().enumerate() {
        let class_idx = label as usize;
        if label < 0.0 || class_idx >= num_classes {
            return Err(DataError::IndexOutOfBounds {
                index: class_idx,
                len: num_classes,
            });
        }
        data[i * num_classes + class_idx] = 1.0;
    }

    Ok(Tensor::new(&data, &[n, num_classes]))
}

/// 展平图像，保留第一维（样本维）：
/// - [N, C, H, W] → [N, C*H*W]
/// - [N, H, W] → [N, H*W]
/// - 其他形状整体展平
pub fn flatten_images(tensor: &Tensor) -> Tensor {
    let shape = tensor.shape();
    match shape.len() {
        3 | 4 => {
            let n = shape[0];
            let flat_size = shape[1..].iter().product::<usize>();
            tensor.reshape(&[n, flat_size])
        }
        _ => tensor.flatten(),
    }
}
