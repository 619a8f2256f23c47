/*
 * @Description  : 张量（Tensor）模块：基于ndarray的f32稠密张量，
 *                 是计算图中所有节点的值与梯度的载体。
 */

use ndarray::{Array, ArrayD, IxDyn};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::errors::{ComparisonOperator, TensorError};

mod ops {
    pub mod arithmetic;
    pub mod assign;
    pub mod mat_mul;
    pub mod others;
}

mod index;
mod print;
mod property;
mod shape;

pub(crate) use property::broadcast_shape;

#[cfg(test)]
mod tests;

/// 定义张量的结构体。其可以是标量、向量、矩阵或更高维度的数组。
/// 注：只要通过Tensor初始化的都是张量（即使标量也是张量）；
/// 而通常意义上的数字（类型为usize、i32、f32等）就只是纯数（number），在这里不被认为是张量。
#[derive(Debug, Clone)]
pub struct Tensor {
    data: ArrayD<f32>,
}

impl Tensor {
    /// 创建一个张量，若为标量，`shape`可以是[]、[1]、[1,1]、[1,1,1]...
    /// 若为向量，`shape`可以是[n]、[1,n]、[n,1]；
    /// 若为矩阵，`shape`可以是[n,m]；
    /// 若为更高维度的数组，`shape`可以是[c,n,m,...]；
    /// 注：`data`的长度必须和`shape`中所有元素的乘积相等，否则panic（需要错误返回值时请用`try_new`）。
    pub fn new(data: &[f32], shape: &[usize]) -> Self {
        match Self::try_new(data, shape) {
            Ok(tensor) => tensor,
            Err(e) => panic!("{e}"),
        }
    }

    /// `new`的非panic版本
    pub fn try_new(data: &[f32], shape: &[usize]) -> Result<Self, TensorError> {
        let expected = shape.iter().product::<usize>();
        if data.len() != expected {
            return Err(TensorError::ShapeDataMismatch {
                data_len: data.len(),
                shape: shape.to_vec(),
            });
        }
        let data = Array::from_shape_vec(IxDyn(shape), data.to_vec())
            .map_err(|_| TensorError::IncompatibleShape)?;
        Ok(Self { data })
    }

    /// 创建形状为[1, 1]的标量张量（计算图中损失值的统一形状）
    pub fn scalar(value: f32) -> Self {
        Self::new(&[value], &[1, 1])
    }

    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            data: ArrayD::zeros(IxDyn(shape)),
        }
    }

    pub fn ones(shape: &[usize]) -> Self {
        Self {
            data: ArrayD::ones(IxDyn(shape)),
        }
    }

    /// 创建所有元素都为`value`的张量
    pub fn full(value: f32, shape: &[usize]) -> Self {
        Self {
            data: ArrayD::from_elem(IxDyn(shape), value),
        }
    }

    /// 创建形状为[n, 1]的列向量，值为[start, end]闭区间上的`n`个等距点。
    /// n必须大于等于2，否则会panic。
    pub fn linspace(start: f32, end: f32, n: usize) -> Self {
        assert!(
            n >= 2,
            "{}",
            TensorError::ValueMustSatisfyComparison {
                value_name: "n".to_string(),
                operator: ComparisonOperator::GreaterOrEqual,
                threshold: 2,
            }
        );
        let step = (end - start) / (n - 1) as f32;
        let data = (0..n).map(|i| start + step * i as f32).collect::<Vec<_>>();
        Self::new(&data, &[n, 1])
    }

    /// 创建一个随机张量，其值在[min, max]的闭区间
    pub fn uniform(min: f32, max: f32, shape: &[usize]) -> Self {
        let mut rng = rand::thread_rng();
        Self::uniform_with_rng(min, max, shape, &mut rng)
    }

    /// 使用指定的随机数生成器创建均匀分布张量
    pub fn uniform_with_rng<R: Rng + ?Sized>(
        min: f32,
        max: f32,
        shape: &[usize],
        rng: &mut R,
    ) -> Self {
        let dist = Uniform::from(min..=max);
        let data = (0..shape.iter().product::<usize>())
            .map(|_| dist.sample(rng))
            .collect::<Vec<_>>();
        Self::new(&data, shape)
    }

    /// 创建一个服从正态分布的随机张量（使用全局RNG，非确定性）
    pub fn normal(mean: f32, std_dev: f32, shape: &[usize]) -> Self {
        let mut rng = rand::thread_rng();
        Self::normal_with_rng(mean, std_dev, shape, &mut rng)
    }

    /// 创建一个服从正态分布的随机张量（固定种子，结果可复现）
    pub fn normal_seeded(mean: f32, std_dev: f32, shape: &[usize], seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::normal_with_rng(mean, std_dev, shape, &mut rng)
    }

    /// 使用指定的随机数生成器创建正态分布张量（Box-Muller变换）
    pub fn normal_with_rng<R: Rng + ?Sized>(
        mean: f32,
        std_dev: f32,
        shape: &[usize],
        rng: &mut R,
    ) -> Self {
        let data_len = shape.iter().product::<usize>();
        let mut data = Vec::with_capacity(data_len);

        while data.len() < data_len {
            let u1: f32 = rng.r#gen();
            let u2: f32 = rng.r#gen();
            let r = (-2.0 * u1.ln()).sqrt();
            let theta = 2.0 * std::f32::consts::PI * u2;
            let z0 = mean + std_dev * r * theta.cos();
            let z1 = mean + std_dev * r * theta.sin();

            // u1为0时ln得到-inf，丢弃该样本
            if z0.is_finite() {
                data.push(z0);
            }
            if data.len() < data_len && z1.is_finite() {
                data.push(z1);
            }
        }

        Self::new(&data, shape)
    }
}

// crate内部使用的构造与访问
impl Tensor {
    pub(crate) const fn from_array(data: ArrayD<f32>) -> Self {
        Self { data }
    }

    pub(crate) const fn array(&self) -> &ArrayD<f32> {
        &self.data
    }
}
