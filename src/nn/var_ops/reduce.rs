/*
 * @Description  : Var 规约与逐元素标量运算扩展 trait
 */

use crate::nn::Var;

/// ```ignore
/// use gan_primer::nn::{Var, VarReduceOps};
///
/// // y = x³ + 2x² - 5x
/// let y = x.pow(3.0) + x.pow(2.0).scale(2.0) - x.scale(5.0);
/// let total = y.sum();
/// ```
pub trait VarReduceOps {
    /// 所有元素求和，输出[1, 1]
    fn sum(&self) -> Var;

    /// 所有元素求均值，输出[1, 1]
    fn mean(&self) -> Var;

    /// 逐元素幂：x^exponent
    fn pow(&self, exponent: f32) -> Var;

    /// 逐元素乘以常数
    fn scale(&self, factor: f32) -> Var;
}

impl VarReduceOps for Var {
    fn sum(&self) -> Var {
        let id = self
            .graph()
            .borrow_mut()
            .new_sum_node(self.node_id(), None)
            .expect("创建 Sum 节点失败");
        self.sibling(id)
    }

    fn mean(&self) -> Var {
        let id = self
            .graph()
            .borrow_mut()
            .new_mean_node(self.node_id(), None)
            .expect("创建 Mean 节点失败");
        self.sibling(id)
    }

    fn pow(&self, exponent: f32) -> Var {
        let id = self
            .graph()
            .borrow_mut()
            .new_pow_node(self.node_id(), exponent, None)
            .expect("创建 Pow 节点失败");
        self.sibling(id)
    }

    fn scale(&self, factor: f32) -> Var {
        let id = self
            .graph()
            .borrow_mut()
            .new_scalar_multiply_node(self.node_id(), factor, None)
            .expect("创建 ScalarMultiply 节点失败");
        self.sibling(id)
    }
}
