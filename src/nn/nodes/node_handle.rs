use super::raw_node::{NodeType, TraitNode};
use crate::nn::GraphError;
use crate::tensor::Tensor;
use std::fmt;

/// 节点在其所属图中的唯一标识（从1开始递增）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// 图中存放的节点：具体节点（`NodeType`）外加图层面的簿记信息
#[derive(Clone)]
pub(in crate::nn) struct NodeHandle {
    raw_node: NodeType,
    last_forward_pass_id: u64,
    last_backward_pass_id: u64,
}

impl NodeHandle {
    pub(in crate::nn) fn new<T: Into<NodeType>>(raw_node: T) -> Self {
        Self {
            raw_node: raw_node.into(),
            last_forward_pass_id: 0,
            last_backward_pass_id: 0,
        }
    }

    pub(in crate::nn) fn bind_id_and_name(&mut self, id: NodeId, name: &str) {
        let core = self.raw_node.core_mut();
        core.id = Some(id);
        core.name = Some(name.to_string());
    }

    pub(in crate::nn) fn id(&self) -> Option<NodeId> {
        self.raw_node.core().id
    }

    pub(in crate::nn) fn name(&self) -> &str {
        self.raw_node.core().name.as_deref().unwrap_or("<未命名>")
    }

    pub(in crate::nn) const fn node_type(&self) -> &NodeType {
        &self.raw_node
    }

    pub(in crate::nn) fn type_name(&self) -> &'static str {
        self.raw_node.type_name()
    }

    pub(in crate::nn) const fn is_input(&self) -> bool {
        matches!(self.raw_node, NodeType::Input(_))
    }

    pub(in crate::nn) const fn is_parameter(&self) -> bool {
        matches!(self.raw_node, NodeType::Parameter(_))
    }

    /// 叶子节点（输入/参数）的值只能通过`set_value`设置
    pub(in crate::nn) const fn is_leaf(&self) -> bool {
        self.is_input() || self.is_parameter()
    }

    pub(in crate::nn) fn is_detached(&self) -> bool {
        self.raw_node.is_detached()
    }

    pub(in crate::nn) fn value_expected_shape(&self) -> &[usize] {
        &self.raw_node.core().shape
    }

    pub(in crate::nn) fn value(&self) -> Option<&Tensor> {
        self.raw_node.core().value.as_ref()
    }

    pub(in crate::nn) fn has_value(&self) -> bool {
        self.value().is_some()
    }

    pub(in crate::nn) fn set_value(&mut self, value: Option<&Tensor>) -> Result<(), GraphError> {
        self.raw_node.set_value(value)
    }

    pub(in crate::nn) fn clear_value(&mut self) {
        self.raw_node.core_mut().value = None;
    }

    pub(in crate::nn) fn grad(&self) -> Option<&Tensor> {
        self.raw_node.core().grad.as_ref()
    }

    pub(in crate::nn) fn set_grad(&mut self, grad: Option<&Tensor>) {
        self.raw_node.core_mut().grad = grad.cloned();
    }

    /// 在已有梯度上累加（没有则直接设置）
    pub(in crate::nn) fn accumulate_grad(&mut self, grad: &Tensor) {
        let core = self.raw_node.core_mut();
        core.grad = Some(match core.grad.take() {
            Some(existing) => existing + grad,
            None => grad.clone(),
        });
    }

    pub(in crate::nn) fn clear_grad(&mut self) {
        self.raw_node.core_mut().grad = None;
    }

    pub(in crate::nn) fn calc_value_by_parents(
        &mut self,
        parents: &[&Self],
    ) -> Result<(), GraphError> {
        self.raw_node.calc_value_by_parents(parents)
    }

    pub(in crate::nn) fn calc_grad_to_parent(
        &self,
        target_index: usize,
        parents: &[&Self],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        self.raw_node
            .calc_grad_to_parent(target_index, parents, upstream_grad)
    }

    pub(in crate::nn) const fn last_forward_pass_id(&self) -> u64 {
        self.last_forward_pass_id
    }

    pub(in crate::nn) const fn set_last_forward_pass_id(&mut self, pass_id: u64) {
        self.last_forward_pass_id = pass_id;
    }

    pub(in crate::nn) const fn last_backward_pass_id(&self) -> u64 {
        self.last_backward_pass_id
    }

    pub(in crate::nn) const fn set_last_backward_pass_id(&mut self, pass_id: u64) {
        self.last_backward_pass_id = pass_id;
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id() {
            Some(id) => write!(f, "节点[id={}, name={}, type={}]", id.0, self.name(), self.type_name()),
            None => write!(f, "节点[未绑定, type={}]", self.type_name()),
        }
    }
}
