use super::super::{
    NodeCore, NodeHandle, TraitNode, broadcast_expected_shape, check_parents_count, parent_value,
};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 加法节点：`a + b`，支持广播（如`[batch, n] + [1, n]`的偏置加法）
///
/// 被广播的父节点，其梯度为上游梯度沿广播维度求和
#[derive(Clone)]
pub(crate) struct Add {
    core: NodeCore,
}

impl Add {
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        check_parents_count("Add", parents, 2)?;
        let shape = broadcast_expected_shape(
            "Add",
            parents[0].value_expected_shape(),
            parents[1].value_expected_shape(),
        )?;
        Ok(Self {
            core: NodeCore::with_shape(&shape),
        })
    }
}

impl TraitNode for Add {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        "add"
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let a = parent_value(&self.core, self.type_name(), parents[0])?;
        let b = parent_value(&self.core, self.type_name(), parents[1])?;
        if !a.can_broadcast_with(b) {
            return Err(GraphError::ShapeMismatch {
                expected: a.shape().to_vec(),
                got: b.shape().to_vec(),
                message: format!("{}的父节点值无法广播相加", self.display_node()),
            });
        }
        self.core.value = Some(a + b);
        Ok(())
    }

    fn calc_grad_to_parent(
        &self,
        target_index: usize,
        parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let target = parent_value(&self.core, self.type_name(), parents[target_index])?;
        Ok(upstream_grad.sum_to_shape(target.shape()))
    }
}
