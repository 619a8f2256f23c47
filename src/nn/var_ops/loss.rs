/*
 * @Description  : Var 损失函数扩展 trait
 */

use crate::nn::{GraphError, Var};

/// 损失函数扩展 trait，返回形状为[1, 1]的损失节点
///
/// ```ignore
/// use gan_primer::nn::{Var, VarLossOps};
///
/// let loss = pred.mse_loss(&target)?;
/// let loss = prob.bce_loss(&labels)?;
/// ```
pub trait VarLossOps {
    /// 均方误差：mean((pred - target)²)
    fn mse_loss(&self, target: &Var) -> Result<Var, GraphError>;

    /// 二元交叉熵：-mean(t·ln(p) + (1-t)·ln(1-p))，`self`须为[0, 1]内的概率
    fn bce_loss(&self, target: &Var) -> Result<Var, GraphError>;
}

impl VarLossOps for Var {
    fn mse_loss(&self, target: &Var) -> Result<Var, GraphError> {
        self.check_same_graph(target, "MSE 损失")?;
        let id =
            self.graph()
                .borrow_mut()
                .new_mse_loss_node(self.node_id(), target.node_id(), None)?;
        Ok(self.sibling(id))
    }

    fn bce_loss(&self, target: &Var) -> Result<Var, GraphError> {
        self.check_same_graph(target, "BCE 损失")?;
        let id =
            self.graph()
                .borrow_mut()
                .new_bce_loss_node(self.node_id(), target.node_id(), None)?;
        Ok(self.sibling(id))
    }
}
