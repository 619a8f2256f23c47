/*
 * @Description  : 入门教程的各个小节，每节一个函数，返回可打印（Display）、可序列化（Serialize）的报告：
 *                 1. versions     ：版本信息
 *                 2. tensor_basics：张量的创建、形状与运算
 *                 3. networks     ：构建 G 与 D 并前向传播
 *                 4. dataset      ：加载 MNIST 并分批
 *                 5. autograd     ：标量函数的自动微分
 *                 6. regression   ：手写 SGD 与优化器 SGD 拟合直线
 *                 7. gan          ：对抗训练
 *                 8. samples      ：展示生成的样本
 */

pub mod autograd;
pub mod dataset;
pub mod gan;
pub mod networks;
pub mod regression;
pub mod samples;
pub mod tensor_basics;
pub mod versions;

#[cfg(test)]
mod tests;

use std::fmt;

/// 以`[a, b, c]`形式写出形状
pub(crate) struct ShapeDisplay<'a>(pub &'a [usize]);

impl fmt::Display for ShapeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
