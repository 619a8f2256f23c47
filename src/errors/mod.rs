/*
 * @Description  : 张量层面的错误类型，计算图与数据层面的错误见各自模块的`error.rs`
 */

use thiserror::Error;
mod ops;
pub use self::ops::*;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TensorError {
    // 数字比较用
    #[error("{value_name}须{operator}{threshold}")]
    ValueMustSatisfyComparison {
        value_name: String,
        operator: ComparisonOperator,
        threshold: usize,
    },
    // 张量二元运算
    #[error(
        "形状不一致，故无法{operator}：第一个张量的形状为{tensor1_shape:?}，第二个张量的形状为{tensor2_shape:?}"
    )]
    OperatorError {
        operator: Operator,
        tensor1_shape: Vec<usize>,
        tensor2_shape: Vec<usize>,
    },
    #[error("数据长度{data_len}与形状{shape:?}的元素个数不符")]
    ShapeDataMismatch { data_len: usize, shape: Vec<usize> },
    #[error("张量阶数须为{expected}，实际为{got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("索引{index}越界（长度为{len}）")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("张量列表为空")]
    EmptyList,
    #[error("张量形状不一致")]
    InconsistentShape,
    #[error("张量形状不兼容")]
    IncompatibleShape,
    #[error("除数为零")]
    DivByZero,
    #[error("作为除数的张量中存在为零元素")]
    DivByZeroElement,
}
