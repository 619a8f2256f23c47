/*
 * @Description  : Var 激活函数扩展 trait
 */

use crate::nn::Var;

/// 激活函数扩展 trait（逐元素，输出形状与输入一致）
///
/// ```ignore
/// use gan_primer::nn::{Var, VarActivationOps};
///
/// let h = x.leaky_relu(0.1);
/// let prob = logits.sigmoid();
/// ```
pub trait VarActivationOps {
    /// max(0, x)
    fn relu(&self) -> Var;

    /// x if x > 0 else slope * x，`slope`须在[0, 1)内
    fn leaky_relu(&self, slope: f32) -> Var;

    /// 1 / (1 + exp(-x))
    fn sigmoid(&self) -> Var;

    fn tanh(&self) -> Var;
}

impl VarActivationOps for Var {
    fn relu(&self) -> Var {
        let id = self
            .graph()
            .borrow_mut()
            .new_relu_node(self.node_id(), None)
            .expect("创建 ReLU 节点失败");
        self.sibling(id)
    }

    fn leaky_relu(&self, slope: f32) -> Var {
        let id = self
            .graph()
            .borrow_mut()
            .new_leaky_relu_node(self.node_id(), slope, None)
            .expect("创建 LeakyReLU 节点失败");
        self.sibling(id)
    }

    fn sigmoid(&self) -> Var {
        let id = self
            .graph()
            .borrow_mut()
            .new_sigmoid_node(self.node_id(), None)
            .expect("创建 Sigmoid 节点失败");
        self.sibling(id)
    }

    fn tanh(&self) -> Var {
        let id = self
            .graph()
            .borrow_mut()
            .new_tanh_node(self.node_id(), None)
            .expect("创建 Tanh 节点失败");
        self.sibling(id)
    }
}
