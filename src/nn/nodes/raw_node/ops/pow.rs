use super::super::{NodeCore, NodeHandle, TraitNode, check_parents_count, parent_value};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 幂节点：`x^p`，指数`p`为常数
#[derive(Clone)]
pub(crate) struct Pow {
    core: NodeCore,
    exponent: f32,
}

impl Pow {
    pub(crate) fn new(parents: &[&NodeHandle], exponent: f32) -> Result<Self, GraphError> {
        check_parents_count("Pow", parents, 1)?;
        Ok(Self {
            core: NodeCore::with_shape(parents[0].value_expected_shape()),
            exponent,
        })
    }
}

impl TraitNode for Pow {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        "pow"
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let x = parent_value(&self.core, self.type_name(), parents[0])?;
        self.core.value = Some(x.powf(self.exponent));
        Ok(())
    }

    fn calc_grad_to_parent(
        &self,
        _target_index: usize,
        parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        // d(x^p)/dx = p * x^(p-1)
        let x = parent_value(&self.core, self.type_name(), parents[0])?;
        let local = x.powf(self.exponent - 1.0) * self.exponent;
        Ok(upstream_grad * &local)
    }
}
