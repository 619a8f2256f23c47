use super::super::{NodeCore, NodeHandle, TraitNode, check_parents_count, parent_value};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 全元素求和节点，输出形状为[1, 1]
#[derive(Clone)]
pub(crate) struct Sum {
    core: NodeCore,
}

impl Sum {
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        check_parents_count("Sum", parents, 1)?;
        Ok(Self {
            core: NodeCore::with_shape(&[1, 1]),
        })
    }
}

impl TraitNode for Sum {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        "sum"
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let x = parent_value(&self.core, self.type_name(), parents[0])?;
        self.core.value = Some(x.sum());
        Ok(())
    }

    fn calc_grad_to_parent(
        &self,
        _target_index: usize,
        parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let x = parent_value(&self.core, self.type_name(), parents[0])?;
        let g = upstream_grad.sum_value();
        Ok(Tensor::full(g, x.shape()))
    }
}
