use super::super::{NodeCore, NodeHandle, TraitNode, parent_value};
use super::check_pred_target_shapes;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 均方误差损失节点：mean((pred - target)²)，输出形状为[1, 1]
#[derive(Clone)]
pub(crate) struct MSELoss {
    core: NodeCore,
}

impl MSELoss {
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        check_pred_target_shapes("MSELoss", parents)?;
        Ok(Self {
            core: NodeCore::with_shape(&[1, 1]),
        })
    }
}

impl TraitNode for MSELoss {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        "mse_loss"
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let pred = parent_value(&self.core, self.type_name(), parents[0])?;
        let target = parent_value(&self.core, self.type_name(), parents[1])?;
        if !pred.is_same_shape(target) {
            return Err(GraphError::ShapeMismatch {
                expected: pred.shape().to_vec(),
                got: target.shape().to_vec(),
                message: format!("{}的预测值与目标值形状不一致", self.display_node()),
            });
        }
        let diff = pred - target;
        self.core.value = Some((&diff * &diff).mean());
        Ok(())
    }

    fn calc_grad_to_parent(
        &self,
        target_index: usize,
        parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let pred = parent_value(&self.core, self.type_name(), parents[0])?;
        let target = parent_value(&self.core, self.type_name(), parents[1])?;
        // ∂L/∂pred = 2(pred - target)/N，对target取反
        let scale = 2.0 * upstream_grad.sum_value() / pred.size() as f32;
        let grad = (pred - target) * scale;
        Ok(if target_index == 0 { grad } else { -1.0 * grad })
    }
}
