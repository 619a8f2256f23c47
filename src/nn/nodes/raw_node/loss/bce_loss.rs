use super::super::{NodeCore, NodeHandle, TraitNode, parent_value};
use super::check_pred_target_shapes;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// ln的下限，避免预测值为0或1时出现无穷大
const LOG_CLAMP: f32 = -100.0;
/// 反向传播时分母p(1-p)的下限
const GRAD_EPS: f32 = 1e-12;

/// 二元交叉熵损失节点：mean(-(t·ln(p) + (1-t)·ln(1-p)))，输出形状为[1, 1]
///
/// 预测值p须已在(0, 1)内（通常接在Sigmoid之后）
#[derive(Clone)]
pub(crate) struct BCELoss {
    core: NodeCore,
}

impl BCELoss {
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        check_pred_target_shapes("BCELoss", parents)?;
        Ok(Self {
            core: NodeCore::with_shape(&[1, 1]),
        })
    }
}

fn clamped_ln(x: &Tensor) -> Tensor {
    x.map(|v| v.ln().max(LOG_CLAMP))
}

impl TraitNode for BCELoss {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        "bce_loss"
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let p = parent_value(&self.core, self.type_name(), parents[0])?;
        let t = parent_value(&self.core, self.type_name(), parents[1])?;
        if !p.is_same_shape(t) {
            return Err(GraphError::ShapeMismatch {
                expected: p.shape().to_vec(),
                got: t.shape().to_vec(),
                message: format!("{}的预测值与目标值形状不一致", self.display_node()),
            });
        }
        if p.min_value() < 0.0 || p.max_value() > 1.0 {
            return Err(GraphError::ComputationError(format!(
                "{}的预测值须在[0, 1]内，实际范围为[{}, {}]",
                self.display_node(),
                p.min_value(),
                p.max_value()
            )));
        }
        let log_p = clamped_ln(p);
        let log_1mp = clamped_ln(&(1.0 - p));
        let per_elem = -1.0 * (t * &log_p + (1.0 - t) * &log_1mp);
        self.core.value = Some(per_elem.mean());
        Ok(())
    }

    fn calc_grad_to_parent(
        &self,
        target_index: usize,
        parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let p = parent_value(&self.core, self.type_name(), parents[0])?;
        let t = parent_value(&self.core, self.type_name(), parents[1])?;
        let scale = upstream_grad.sum_value() / p.size() as f32;
        let grad = if target_index == 0 {
            // ∂L/∂p = (p - t) / (p(1 - p)) / N
            let denom = (p * &(1.0 - p)).maximum(GRAD_EPS);
            (p - t) / denom
        } else {
            // ∂L/∂t = -(ln p - ln(1 - p)) / N
            -1.0 * (clamped_ln(p) - clamped_ln(&(1.0 - p)))
        };
        Ok(grad * scale)
    }
}
