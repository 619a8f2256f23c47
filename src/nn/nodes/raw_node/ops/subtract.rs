use super::super::{
    NodeCore, NodeHandle, TraitNode, broadcast_expected_shape, check_parents_count, parent_value,
};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 减法节点：`a - b`，支持广播
#[derive(Clone)]
pub(crate) struct Subtract {
    core: NodeCore,
}

impl Subtract {
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        check_parents_count("Subtract", parents, 2)?;
        let shape = broadcast_expected_shape(
            "Subtract",
            parents[0].value_expected_shape(),
            parents[1].value_expected_shape(),
        )?;
        Ok(Self {
            core: NodeCore::with_shape(&shape),
        })
    }
}

impl TraitNode for Subtract {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        "subtract"
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let a = parent_value(&self.core, self.type_name(), parents[0])?;
        let b = parent_value(&self.core, self.type_name(), parents[1])?;
        if !a.can_broadcast_with(b) {
            return Err(GraphError::ShapeMismatch {
                expected: a.shape().to_vec(),
                got: b.shape().to_vec(),
                message: format!("{}的父节点值无法广播相减", self.display_node()),
            });
        }
        self.core.value = Some(a - b);
        Ok(())
    }

    fn calc_grad_to_parent(
        &self,
        target_index: usize,
        parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let target = parent_value(&self.core, self.type_name(), parents[target_index])?;
        let grad = upstream_grad.sum_to_shape(target.shape());
        // 被减数梯度为正，减数梯度取反
        Ok(if target_index == 0 { grad } else { -1.0 * grad })
    }
}
