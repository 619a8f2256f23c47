use super::super::{
    NodeCore, NodeHandle, TraitNode, broadcast_expected_shape, check_parents_count, parent_value,
};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 逐元素除法节点：`a / b`，支持广播
///
/// ∂(a/b)/∂a = 1/b，∂(a/b)/∂b = -a/b²
#[derive(Clone)]
pub(crate) struct Divide {
    core: NodeCore,
}

impl Divide {
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        check_parents_count("Divide", parents, 2)?;
        let shape = broadcast_expected_shape(
            "Divide",
            parents[0].value_expected_shape(),
            parents[1].value_expected_shape(),
        )?;
        Ok(Self {
            core: NodeCore::with_shape(&shape),
        })
    }
}

impl TraitNode for Divide {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        "divide"
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let a = parent_value(&self.core, self.type_name(), parents[0])?;
        let b = parent_value(&self.core, self.type_name(), parents[1])?;
        if !a.can_broadcast_with(b) {
            return Err(GraphError::ShapeMismatch {
                expected: a.shape().to_vec(),
                got: b.shape().to_vec(),
                message: format!("{}的父节点值无法广播相除", self.display_node()),
            });
        }
        if b.to_vec().contains(&0.0) {
            return Err(GraphError::ComputationError(format!(
                "{}的除数中存在为零元素",
                self.display_node()
            )));
        }
        self.core.value = Some(a / b);
        Ok(())
    }

    fn calc_grad_to_parent(
        &self,
        target_index: usize,
        parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let a = parent_value(&self.core, self.type_name(), parents[0])?;
        let b = parent_value(&self.core, self.type_name(), parents[1])?;
        let grad = if target_index == 0 {
            (upstream_grad / b).sum_to_shape(a.shape())
        } else {
            (-1.0 * (upstream_grad * a) / (b * b)).sum_to_shape(b.shape())
        };
        Ok(grad)
    }
}
