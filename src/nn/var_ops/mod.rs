/*
 * @Description  : Var 扩展 trait 模块
 *
 * 按功能领域组织 Var 的扩展方法，用户按需 import：
 * - `activation`: relu, leaky_relu, sigmoid, tanh
 * - `loss`: mse_loss, bce_loss
 * - `matrix`: matmul
 * - `reduce`: sum, mean, pow, scale
 */

mod activation;
mod loss;
mod matrix;
mod reduce;

pub use activation::VarActivationOps;
pub use loss::VarLossOps;
pub use matrix::VarMatrixOps;
pub use reduce::VarReduceOps;
