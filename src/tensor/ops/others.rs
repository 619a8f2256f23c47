/*
 * @Description  : 规约运算与逐元素的数学函数（激活函数的前向/反向都基于这里）
 */

use crate::tensor::Tensor;
use ndarray::Axis;

impl From<f32> for Tensor {
    /// 将纯数转换为形状为`[1, 1]`的标量张量
    fn from(number: f32) -> Self {
        Self::scalar(number)
    }
}

impl PartialEq for Tensor {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓规约↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
impl Tensor {
    /// 所有元素求和，返回形状为[1, 1]的标量张量
    pub fn sum(&self) -> Self {
        Self::scalar(self.data.sum())
    }

    /// 所有元素的均值，返回形状为[1, 1]的标量张量；空张量的均值为0
    pub fn mean(&self) -> Self {
        Self::scalar(self.mean_value())
    }

    pub fn sum_value(&self) -> f32 {
        self.data.sum()
    }

    pub fn mean_value(&self) -> f32 {
        if self.size() == 0 {
            0.0
        } else {
            self.data.sum() / self.size() as f32
        }
    }

    /// 总体标准差
    pub fn std_value(&self) -> f32 {
        if self.size() == 0 {
            return 0.0;
        }
        let mean = self.mean_value();
        let var = self.data.iter().map(|x| (x - mean).powi(2)).sum::<f32>() / self.size() as f32;
        var.sqrt()
    }

    pub fn max_value(&self) -> f32 {
        self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    pub fn min_value(&self) -> f32 {
        self.data.iter().copied().fold(f32::INFINITY, f32::min)
    }

    /// 沿第0维求和并保持维度，如[n, m] -> [1, m]
    pub fn sum_axis0_keepdims(&self) -> Self {
        Self {
            data: self.data.sum_axis(Axis(0)).insert_axis(Axis(0)),
        }
    }

    /// 每行最大值所在的列索引（仅2阶张量）
    pub fn argmax_rows(&self) -> Vec<usize> {
        self.data
            .outer_iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .fold((0, f32::NEG_INFINITY), |(bi, bv), (i, &v)| {
                        if v > bv { (i, v) } else { (bi, bv) }
                    })
                    .0
            })
            .collect()
    }
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑规约↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓逐元素↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
impl Tensor {
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            data: self.data.mapv(f),
        }
    }

    pub fn sigmoid(&self) -> Self {
        self.map(|x| 1.0 / (1.0 + (-x).exp()))
    }

    pub fn tanh(&self) -> Self {
        self.map(f32::tanh)
    }

    pub fn exp(&self) -> Self {
        self.map(f32::exp)
    }

    pub fn ln(&self) -> Self {
        self.map(f32::ln)
    }

    pub fn sqrt(&self) -> Self {
        self.map(f32::sqrt)
    }

    pub fn abs(&self) -> Self {
        self.map(f32::abs)
    }

    pub fn powf(&self, exponent: f32) -> Self {
        self.map(|x| x.powf(exponent))
    }

    /// 将所有元素截断到[min, max]
    pub fn clip(&self, min: f32, max: f32) -> Self {
        self.map(|x| x.clamp(min, max))
    }

    /// 与纯数逐元素取较大值
    pub fn maximum(&self, number: f32) -> Self {
        self.map(|x| x.max(number))
    }

    /// 与纯数逐元素取较小值
    pub fn minimum(&self, number: f32) -> Self {
        self.map(|x| x.min(number))
    }
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑逐元素↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
