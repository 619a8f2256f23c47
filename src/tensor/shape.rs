use super::Tensor;
use crate::errors::TensorError;
use ndarray::{Axis, IxDyn, Slice};
use std::ops::Range;

impl Tensor {
    /// 返回改变形状后的新张量，元素个数必须保持不变
    pub fn reshape(&self, shape: &[usize]) -> Self {
        assert!(
            self.size() == shape.iter().product::<usize>(),
            "{}",
            TensorError::IncompatibleShape
        );
        let data = self
            .data
            .as_standard_layout()
            .into_owned()
            .into_shape(IxDyn(shape))
            .expect("元素个数一致时重塑不应失败");
        Self { data }
    }

    /// 展平为一维向量
    pub fn flatten(&self) -> Self {
        self.reshape(&[self.size()])
    }

    /// 二维张量的转置
    pub fn transpose(&self) -> Self {
        assert!(
            self.dimension() == 2,
            "{}",
            TensorError::DimensionMismatch {
                expected: 2,
                got: self.dimension(),
            }
        );
        Self {
            data: self.data.t().as_standard_layout().into_owned(),
        }
    }

    /// 沿第一维（样本维）截取`[start, end)`范围内的行
    pub fn slice_rows(&self, range: Range<usize>) -> Self {
        let rows = self.shape().first().copied().unwrap_or(0);
        assert!(
            range.start <= range.end && range.end <= rows,
            "{}",
            TensorError::IndexOutOfBounds {
                index: range.end,
                len: rows,
            }
        );
        let view = self
            .data
            .slice_axis(Axis(0), Slice::from(range.start..range.end));
        Self {
            data: view.to_owned(),
        }
    }

    /// 沿第一维按给定索引挑选行（可重复、可乱序）
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        let rows = self.shape().first().copied().unwrap_or(0);
        if let Some(&bad) = indices.iter().find(|&&i| i >= rows) {
            panic!(
                "{}",
                TensorError::IndexOutOfBounds {
                    index: bad,
                    len: rows,
                }
            );
        }
        Self {
            data: self.data.select(Axis(0), indices),
        }
    }

    /// 沿第一维拼接多个张量，其余维度必须一致
    pub fn concat_rows(tensors: &[&Self]) -> Result<Self, TensorError> {
        let first = tensors.first().ok_or(TensorError::EmptyList)?;
        if tensors
            .iter()
            .any(|t| t.dimension() != first.dimension() || t.shape()[1..] != first.shape()[1..])
        {
            return Err(TensorError::InconsistentShape);
        }
        let views = tensors.iter().map(|t| t.data.view()).collect::<Vec<_>>();
        let data =
            ndarray::concatenate(Axis(0), &views).map_err(|_| TensorError::InconsistentShape)?;
        Ok(Self { data })
    }

    /// 将（广播后得到的）张量按求和方式规约回`shape`
    ///
    /// 这是广播运算反向传播的关键：前向时被广播扩展出来的维度，
    /// 其上游梯度需要沿该维度求和才能得到原参数的梯度。
    pub fn sum_to_shape(&self, shape: &[usize]) -> Self {
        if self.shape() == shape {
            return self.clone();
        }
        let mut data = self.data.clone();

        // 1. 多出来的前导维度直接求和消掉
        while data.ndim() > shape.len() {
            data = data.sum_axis(Axis(0));
        }

        // 2. 目标为1而当前不为1的维度求和并保持维度
        for (axis, &target) in shape.iter().enumerate() {
            if target == 1 && data.shape()[axis] != 1 {
                data = data.sum_axis(Axis(axis)).insert_axis(Axis(axis));
            }
        }

        assert!(
            data.shape() == shape,
            "{}",
            TensorError::IncompatibleShape
        );
        Self { data }
    }
}
