/*
 * @Description  : 优化器模块，实现 PyTorch 风格的梯度优化算法
 */

mod adam;
mod base;
mod sgd;

pub use adam::Adam;
pub use base::Optimizer;
pub use sgd::SGD;
