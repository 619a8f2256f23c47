use super::super::{NodeCore, NodeHandle, TraitNode, check_parents_count, own_value, parent_value};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// Tanh 激活函数节点，反向用到前向结果：d(tanh)/dx = 1 - tanh²(x)
#[derive(Clone)]
pub(crate) struct Tanh {
    core: NodeCore,
}

impl Tanh {
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        check_parents_count("Tanh", parents, 1)?;
        Ok(Self {
            core: NodeCore::with_shape(parents[0].value_expected_shape()),
        })
    }
}

impl TraitNode for Tanh {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        "tanh"
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let x = parent_value(&self.core, self.type_name(), parents[0])?;
        self.core.value = Some(x.tanh());
        Ok(())
    }

    fn calc_grad_to_parent(
        &self,
        _target_index: usize,
        _parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let y = own_value(&self.core, self.type_name())?;
        let local = 1.0 - &(y * y);
        Ok(upstream_grad * &local)
    }
}
