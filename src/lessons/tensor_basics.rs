//! 第 2 节：张量基础：创建、形状、逐元素运算、广播、矩阵乘法、变形

use std::fmt;

use serde::Serialize;

use super::ShapeDisplay;
use crate::tensor::Tensor;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TensorBasicsReport {
    /// `a = [[1,2,3],[4,5,6]]`
    pub a: Vec<f32>,
    pub a_shape: Vec<usize>,
    pub a_size: usize,
    pub a_sum: f32,
    pub a_mean: f32,
    /// `a * 2 + 1`
    pub scaled: Vec<f32>,
    /// `a + [10, 20, 30]`（[1, 3] 沿行广播）
    pub broadcast: Vec<f32>,
    /// 随机矩阵 b: [3, 2]
    pub random_shape: Vec<usize>,
    pub random_mean: f32,
    /// `a @ b`
    pub matmul_shape: Vec<usize>,
    pub matmul: Vec<f32>,
    pub reshaped_shape: Vec<usize>,
    pub transposed_shape: Vec<usize>,
}

pub fn run(seed: u64) -> TensorBasicsReport {
    let a = Tensor::new(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]);
    let row = Tensor::new(&[10.0, 20.0, 30.0], &[1, 3]);
    let b = Tensor::normal_seeded(0.0, 1.0, &[3, 2], seed);
    let product = a.mat_mul(&b);

    TensorBasicsReport {
        a: a.to_vec(),
        a_shape: a.shape().to_vec(),
        a_size: a.size(),
        a_sum: a.sum_value(),
        a_mean: a.mean_value(),
        scaled: (&a * 2.0 + 1.0).to_vec(),
        broadcast: (&a + &row).to_vec(),
        random_shape: b.shape().to_vec(),
        random_mean: b.mean_value(),
        matmul_shape: product.shape().to_vec(),
        matmul: product.to_vec(),
        reshaped_shape: a.reshape(&[3, 2]).shape().to_vec(),
        transposed_shape: a.transpose().shape().to_vec(),
    }
}

impl fmt::Display for TensorBasicsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "a = {:?}, 形状 {}, 元素 {} 个",
            self.a,
            ShapeDisplay(&self.a_shape),
            self.a_size
        )?;
        writeln!(f, "sum(a) = {}, mean(a) = {}", self.a_sum, self.a_mean)?;
        writeln!(f, "a * 2 + 1 = {:?}", self.scaled)?;
        writeln!(f, "a + [10, 20, 30] = {:?}", self.broadcast)?;
        writeln!(
            f,
            "b ~ N(0, 1), 形状 {}, 均值 {:.4}",
            ShapeDisplay(&self.random_shape),
            self.random_mean
        )?;
        writeln!(f, "a @ b: 形状 {}", ShapeDisplay(&self.matmul_shape))?;
        writeln!(
            f,
            "reshape → {}, transpose → {}",
            ShapeDisplay(&self.reshaped_shape),
            ShapeDisplay(&self.transposed_shape)
        )
    }
}
