use super::super::{NodeCore, NodeHandle, TraitNode, check_parents_count, own_value, parent_value};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// Sigmoid 激活函数节点
///
/// forward: sigmoid(x) = 1 / (1 + e^(-x))
/// backward: d(sigmoid)/dx = sigmoid(x) * (1 - sigmoid(x))
#[derive(Clone)]
pub(crate) struct Sigmoid {
    core: NodeCore,
}

impl Sigmoid {
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        check_parents_count("Sigmoid", parents, 1)?;
        Ok(Self {
            core: NodeCore::with_shape(parents[0].value_expected_shape()),
        })
    }
}

impl TraitNode for Sigmoid {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        "sigmoid"
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let x = parent_value(&self.core, self.type_name(), parents[0])?;
        self.core.value = Some(x.sigmoid());
        Ok(())
    }

    fn calc_grad_to_parent(
        &self,
        _target_index: usize,
        _parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let y = own_value(&self.core, self.type_name())?;
        let local = y * &(1.0 - y);
        Ok(upstream_grad * &local)
    }
}
