/*
 * @Description  : 各类具体节点。所有节点共享`NodeCore`中的状态，
 *                 并通过`TraitNode`提供前向计算与向量-雅可比积（VJP）
 */

mod input;
mod loss;
mod ops;
mod parameter;

pub(crate) use input::Input;
pub(crate) use loss::{BCELoss, MSELoss};
pub(crate) use ops::*;
pub(crate) use parameter::Parameter;

use super::{NodeHandle, NodeId};
use crate::nn::GraphError;
use crate::tensor::Tensor;
use enum_dispatch::enum_dispatch;

#[enum_dispatch]
#[derive(Clone)]
pub(in crate::nn) enum NodeType {
    Input(Input),
    Parameter(Parameter),
    /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓算子↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
    Add(Add),
    Subtract(Subtract),
    Multiply(Multiply),
    Divide(Divide),
    ScalarMultiply(ScalarMultiply),
    MatMul(MatMul),
    Pow(Pow),
    Sigmoid(Sigmoid),
    Tanh(Tanh),
    LeakyReLU(LeakyReLU),
    Identity(Identity),
    Sum(Sum),
    Mean(Mean),
    /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑算子↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
    MSELoss(MSELoss),
    BCELoss(BCELoss),
}

/// 所有节点共有的状态
#[derive(Clone, Default)]
pub(crate) struct NodeCore {
    pub(crate) id: Option<NodeId>,
    pub(crate) name: Option<String>,
    pub(crate) value: Option<Tensor>,
    pub(crate) grad: Option<Tensor>,
    /// 建图时推断出的值形状（输入节点的第一维在运行时可以变化）
    pub(crate) shape: Vec<usize>,
}

impl NodeCore {
    pub(crate) fn with_shape(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            ..Default::default()
        }
    }

    pub(crate) fn display(&self, type_name: &str) -> String {
        match (&self.id, &self.name) {
            (Some(id), Some(name)) => format!("节点[id={}, name={name}, type={type_name}]", id.0),
            _ => format!("节点[未绑定, type={type_name}]"),
        }
    }
}

#[enum_dispatch(NodeType)]
pub(crate) trait TraitNode {
    fn core(&self) -> &NodeCore;
    fn core_mut(&mut self) -> &mut NodeCore;

    /// 节点类型名，也用作自动命名的前缀（如"add_1"）
    fn type_name(&self) -> &'static str;

    fn display_node(&self) -> String {
        self.core().display(self.type_name())
    }

    fn set_value(&mut self, _value: Option<&Tensor>) -> Result<(), GraphError> {
        Err(GraphError::InvalidOperation(format!(
            "{}的值只能通过前向传播计算，不能手动设置",
            self.display_node()
        )))
    }

    /// 根据父节点的值计算本节点的值（图保证调用前所有父节点都已有值）
    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError>;

    /// 给定上游梯度，计算对第`target_index`个父节点的梯度（VJP），结果形状与该父节点的值相同
    fn calc_grad_to_parent(
        &self,
        target_index: usize,
        parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError>;

    fn is_detached(&self) -> bool {
        false
    }
}

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓节点实现共用的辅助函数↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
/// 校验父节点个数
pub(crate) fn check_parents_count(
    type_name: &str,
    parents: &[&NodeHandle],
    expected: usize,
) -> Result<(), GraphError> {
    if parents.len() != expected {
        return Err(GraphError::InvalidOperation(format!(
            "{type_name}节点需要{expected}个父节点，实际得到{}个",
            parents.len()
        )));
    }
    Ok(())
}

/// 取父节点的值
pub(crate) fn parent_value<'a>(
    node: &NodeCore,
    type_name: &str,
    parent: &'a NodeHandle,
) -> Result<&'a Tensor, GraphError> {
    parent.value().ok_or_else(|| {
        GraphError::ComputationError(format!(
            "{}的父{}没有值。不该触及本错误，否则说明crate代码有问题",
            node.display(type_name),
            parent
        ))
    })
}

/// 取本节点的值（反向传播时用到前向结果的节点，如Sigmoid/Tanh）
pub(crate) fn own_value<'a>(node: &'a NodeCore, type_name: &str) -> Result<&'a Tensor, GraphError> {
    node.value.as_ref().ok_or_else(|| {
        GraphError::ComputationError(format!("{}没有值，无法计算梯度", node.display(type_name)))
    })
}

/// 建图时检查两个形状能否广播，返回广播后的形状
pub(crate) fn broadcast_expected_shape(
    type_name: &str,
    a: &[usize],
    b: &[usize],
) -> Result<Vec<usize>, GraphError> {
    crate::tensor::broadcast_shape(a, b).ok_or_else(|| GraphError::ShapeMismatch {
        expected: a.to_vec(),
        got: b.to_vec(),
        message: format!("{type_name}节点的两个父节点形状无法广播"),
    })
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑节点实现共用的辅助函数↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
