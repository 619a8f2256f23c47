/*
 * @Description  : crate 级错误：汇总各模块的错误类型，供 lessons / gan / CLI 统一向上传递
 */

use thiserror::Error;

use crate::data::DataError;
use crate::errors::TensorError;
use crate::nn::GraphError;
use crate::vision::VisionError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Tensor(#[from] TensorError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Vision(#[from] VisionError),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 解析失败: {0}")]
    Json(#[from] serde_json::Error),

    #[error("配置无效: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
