/*
 * @Description  : 优化器基础trait和辅助结构
 */

use crate::nn::{Graph, GraphError, Var};
use crate::tensor::Tensor;

/// 优化器核心 trait
///
/// 每个优化器只管理构造时传入的参数，`zero_grad`也只清这些参数的梯度。
/// 因此同一个图上可以有多个优化器（如 GAN 中 G 与 D 各用一个）：
/// ```ignore
/// optimizer_d.zero_grad()?;
/// loss_d.backward()?;
/// optimizer_d.step()?;   // 只更新 D 的参数
/// ```
pub trait Optimizer {
    /// 清零本优化器所管理参数的梯度
    fn zero_grad(&mut self) -> Result<(), GraphError>;

    /// 用参数当前的`.grad`更新参数，没有梯度的参数保持不变
    fn step(&mut self) -> Result<(), GraphError>;

    /// `zero_grad` → `backward` → `step`，返回损失值
    fn minimize(&mut self, loss: &Var) -> Result<f32, GraphError> {
        self.zero_grad()?;
        let loss_value = loss.backward()?;
        self.step()?;
        Ok(loss_value)
    }

    /// 清空内部状态（如动量）
    fn reset(&mut self);

    fn learning_rate(&self) -> f32;

    fn set_learning_rate(&mut self, lr: f32);
}

/// 优化器共用状态（内部实现）
#[derive(Debug)]
pub(super) struct OptimizerState {
    graph: Graph,
    params: Vec<Var>,
    learning_rate: f32,
}

impl OptimizerState {
    /// 参数须全部为`graph`中的参数节点
    pub(super) fn new(graph: &Graph, params: &[Var], learning_rate: f32) -> Result<Self, GraphError> {
        if !(learning_rate > 0.0 && learning_rate.is_finite()) {
            return Err(GraphError::InvalidOperation(format!(
                "学习率必须为正的有限数，但得到 {learning_rate}"
            )));
        }
        {
            let g = graph.inner();
            for param in params {
                if !param.get_graph().same_graph(graph) {
                    return Err(GraphError::InvalidOperation(
                        "优化器的参数必须来自同一个 Graph".to_string(),
                    ));
                }
                let node = g.get_node(param.node_id())?;
                if !node.is_parameter() {
                    return Err(GraphError::InvalidOperation(format!(
                        "{node}不是参数节点，不能交给优化器"
                    )));
                }
            }
        }
        Ok(Self {
            graph: graph.clone(),
            params: params.to_vec(),
            learning_rate,
        })
    }

    pub(super) fn params(&self) -> &[Var] {
        &self.params
    }

    pub(super) const fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    pub(super) const fn set_learning_rate(&mut self, lr: f32) {
        self.learning_rate = lr;
    }

    pub(super) fn zero_grad(&self) -> Result<(), GraphError> {
        let mut g = self.graph.inner_mut();
        for param in &self.params {
            g.clear_node_grad(param.node_id())?;
        }
        Ok(())
    }

    /// 取参数的当前值与梯度，没有梯度时返回None
    pub(super) fn value_and_grad(&self, param: &Var) -> Result<Option<(Tensor, Tensor)>, GraphError> {
        let g = self.graph.inner();
        let Some(grad) = g.get_node_grad(param.node_id())? else {
            return Ok(None);
        };
        let value = g.get_node_value(param.node_id())?.ok_or_else(|| {
            GraphError::ComputationError(format!("参数{:?}没有值，无法更新", param.node_id()))
        })?;
        Ok(Some((value.clone(), grad.clone())))
    }

    pub(super) fn set_value(&self, param: &Var, value: &Tensor) -> Result<(), GraphError> {
        self.graph
            .inner_mut()
            .set_node_value(param.node_id(), Some(value))
    }
}
