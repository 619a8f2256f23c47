/*
 * @Description  : Var 矩阵运算扩展 trait
 */

use crate::nn::{GraphError, Var};

pub trait VarMatrixOps {
    /// 矩阵乘法：[m, k] × [k, n] -> [m, n]
    fn matmul(&self, other: &Var) -> Result<Var, GraphError>;
}

impl VarMatrixOps for Var {
    fn matmul(&self, other: &Var) -> Result<Var, GraphError> {
        self.check_same_graph(other, "矩阵乘法")?;
        let id =
            self.graph()
                .borrow_mut()
                .new_mat_mul_node(self.node_id(), other.node_id(), None)?;
        Ok(self.sibling(id))
    }
}
