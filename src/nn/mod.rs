/*
 * @Description  : 负责神经网络（neural network）的构建：
 *                 计算图、节点、Var句柄、层、模块与优化器
 */

mod graph;
pub mod layer;
mod module;
mod nodes;
pub mod optimizer;
mod var;
mod var_ops;

pub use graph::{Graph, GraphError, GraphInner};
pub use layer::Linear;
pub use module::Module;
pub use nodes::NodeId;
pub use optimizer::{Adam, Optimizer, SGD};
pub use var::{Init, Var};
pub use var_ops::{VarActivationOps, VarLossOps, VarMatrixOps, VarReduceOps};

#[cfg(test)]
mod tests;
