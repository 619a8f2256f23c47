use super::super::{NodeCore, NodeHandle, TraitNode, check_parents_count, parent_value};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// LeakyReLU 节点：x > 0 时为 x，否则为 slope * x。slope 为 0 时即 ReLU
#[derive(Clone)]
pub(crate) struct LeakyReLU {
    core: NodeCore,
    slope: f32,
}

impl LeakyReLU {
    pub(crate) fn new(parents: &[&NodeHandle], slope: f32) -> Result<Self, GraphError> {
        check_parents_count("LeakyReLU", parents, 1)?;
        if !(0.0..1.0).contains(&slope) {
            return Err(GraphError::InvalidOperation(format!(
                "LeakyReLU的负半轴斜率须在[0, 1)内，实际为{slope}"
            )));
        }
        Ok(Self {
            core: NodeCore::with_shape(parents[0].value_expected_shape()),
            slope,
        })
    }
}

impl TraitNode for LeakyReLU {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        if self.slope == 0.0 { "relu" } else { "leaky_relu" }
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let x = parent_value(&self.core, self.type_name(), parents[0])?;
        let slope = self.slope;
        self.core.value = Some(x.map(|v| if v > 0.0 { v } else { slope * v }));
        Ok(())
    }

    fn calc_grad_to_parent(
        &self,
        _target_index: usize,
        parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let x = parent_value(&self.core, self.type_name(), parents[0])?;
        let slope = self.slope;
        let local = x.map(|v| if v > 0.0 { 1.0 } else { slope });
        Ok(upstream_grad * &local)
    }
}
