mod bce_loss;
mod mse_loss;

pub(crate) use bce_loss::BCELoss;
pub(crate) use mse_loss::MSELoss;

use super::NodeHandle;
use crate::nn::GraphError;

/// 损失节点的两个父节点（预测值与目标值）须形状一致
fn check_pred_target_shapes(type_name: &str, parents: &[&NodeHandle]) -> Result<(), GraphError> {
    super::check_parents_count(type_name, parents, 2)?;
    let (pred, target) = (
        parents[0].value_expected_shape(),
        parents[1].value_expected_shape(),
    );
    if pred != target {
        return Err(GraphError::ShapeMismatch {
            expected: pred.to_vec(),
            got: target.to_vec(),
            message: format!("{type_name}节点的目标值形状须与预测值一致"),
        });
    }
    Ok(())
}
