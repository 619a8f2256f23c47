//! 样本可视化相关错误

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("样本批为空，无法拼接网格")]
    EmptyBatch,

    /// 样本须为 [N, 784]、[N, 1, 28, 28] 或单个 [784] / [28, 28]
    #[error("样本形状{got:?}无法解释为 28x28 灰度图")]
    InvalidSampleShape { got: Vec<usize> },

    #[error("参数无效: {0}")]
    InvalidArgument(String),

    #[error("图像编码失败: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}
