/*
 * @Description  : Module trait 定义
 */

use super::Var;

/// 由若干参数组成的可训练模块
///
/// `forward()`和`new()`的签名因模块而异，所以不放入 trait；
/// Var 自带图引用，`forward()`也不需要`&Graph`参数。
///
/// ```ignore
/// struct Mlp {
///     fc1: Linear,
///     fc2: Linear,
/// }
///
/// impl Module for Mlp {
///     fn parameters(&self) -> Vec<Var> {
///         [self.fc1.parameters(), self.fc2.parameters()].concat()
///     }
/// }
/// ```
pub trait Module {
    /// 所有可训练参数（交给优化器更新）
    fn parameters(&self) -> Vec<Var>;

    /// 参数张量的个数
    fn num_params(&self) -> usize {
        self.parameters().len()
    }

    /// 参数中标量元素的总数
    fn num_elements(&self) -> usize {
        self.parameters()
            .iter()
            .filter_map(|p| p.value_expected_shape().ok())
            .map(|shape| shape.iter().product::<usize>())
            .sum()
    }
}
