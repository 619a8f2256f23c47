use super::super::{NodeCore, NodeHandle, TraitNode, check_parents_count, parent_value};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 恒等节点：值原样透传。
/// `detached`为true时反向传播在此截断（`Var::detach`即通过它实现，原节点不受影响）
#[derive(Clone)]
pub(crate) struct Identity {
    core: NodeCore,
    detached: bool,
}

impl Identity {
    pub(crate) fn new(parents: &[&NodeHandle], detached: bool) -> Result<Self, GraphError> {
        check_parents_count("Identity", parents, 1)?;
        Ok(Self {
            core: NodeCore::with_shape(parents[0].value_expected_shape()),
            detached,
        })
    }
}

impl TraitNode for Identity {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        if self.detached { "detach" } else { "identity" }
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let x = parent_value(&self.core, self.type_name(), parents[0])?;
        self.core.value = Some(x.clone());
        Ok(())
    }

    fn calc_grad_to_parent(
        &self,
        _target_index: usize,
        _parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        Ok(upstream_grad.clone())
    }

    fn is_detached(&self) -> bool {
        self.detached
    }
}
