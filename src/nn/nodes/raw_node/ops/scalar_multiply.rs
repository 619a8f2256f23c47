use super::super::{NodeCore, NodeHandle, TraitNode, check_parents_count, parent_value};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 数乘节点：`c * x`，`c`为建图时确定的常数（取反即`c = -1`）
#[derive(Clone)]
pub(crate) struct ScalarMultiply {
    core: NodeCore,
    factor: f32,
}

impl ScalarMultiply {
    pub(crate) fn new(parents: &[&NodeHandle], factor: f32) -> Result<Self, GraphError> {
        check_parents_count("ScalarMultiply", parents, 1)?;
        Ok(Self {
            core: NodeCore::with_shape(parents[0].value_expected_shape()),
            factor,
        })
    }
}

impl TraitNode for ScalarMultiply {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        "scalar_multiply"
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let x = parent_value(&self.core, self.type_name(), parents[0])?;
        self.core.value = Some(x * self.factor);
        Ok(())
    }

    fn calc_grad_to_parent(
        &self,
        _target_index: usize,
        _parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        Ok(upstream_grad * self.factor)
    }
}
