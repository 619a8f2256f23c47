/*
 * @Description  : Var - 携带图引用的变量句柄，支持算子重载和链式调用
 */

use super::graph::GraphInner;
use super::{GraphError, NodeId};
use crate::tensor::Tensor;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::rc::Rc;

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓参数初始化↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
/// 参数初始化策略。`fan_in`取形状的第一维（权重形状为`[in, out]`）
#[derive(Debug, Clone, PartialEq)]
pub enum Init {
    Constant(f32),
    Zeros,
    Ones,
    Normal { mean: f32, std: f32 },
    /// Kaiming/He 正态初始化：std = sqrt(2 / fan_in)
    Kaiming,
    /// Xavier/Glorot 正态初始化：std = sqrt(2 / (fan_in + fan_out))
    Xavier,
    /// 均匀分布 U(-1/sqrt(fan_in), 1/sqrt(fan_in))，全连接层权重和偏置的默认初始化
    KaimingUniform { fan_in: usize },
}

impl Init {
    /// 使用全局RNG生成（非确定性）
    pub fn generate(&self, shape: &[usize]) -> Tensor {
        let mut rng = rand::thread_rng();
        self.generate_by(shape, &mut rng)
    }

    /// 使用指定的RNG生成（可复现）
    pub fn generate_with_rng(&self, shape: &[usize], rng: &mut StdRng) -> Tensor {
        self.generate_by(shape, rng)
    }

    fn generate_by<R: rand::Rng + ?Sized>(&self, shape: &[usize], rng: &mut R) -> Tensor {
        let fan_in = shape.first().copied().unwrap_or(1).max(1);
        match self {
            Self::Constant(v) => Tensor::full(*v, shape),
            Self::Zeros => Tensor::zeros(shape),
            Self::Ones => Tensor::ones(shape),
            Self::Normal { mean, std } => Tensor::normal_with_rng(*mean, *std, shape, rng),
            Self::Kaiming => {
                let std = (2.0 / fan_in as f32).sqrt();
                Tensor::normal_with_rng(0.0, std, shape, rng)
            }
            Self::Xavier => {
                let fan_out = shape.get(1).copied().unwrap_or(1);
                let std = (2.0 / (fan_in + fan_out) as f32).sqrt();
                Tensor::normal_with_rng(0.0, std, shape, rng)
            }
            Self::KaimingUniform { fan_in } => {
                let bound = 1.0 / (*fan_in).max(1) as f32;
                let bound = bound.sqrt();
                Tensor::uniform_with_rng(-bound, bound, shape, rng)
            }
        }
    }
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑参数初始化↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

/// 智能变量句柄
///
/// 持有`Rc<RefCell<GraphInner>>`，所以可以像普通张量一样做`&a + &b`、`x.sigmoid()`等运算，
/// 每次运算都会在图中新增一个节点。克隆只复制Rc。
///
/// ```ignore
/// let graph = Graph::new();
/// let x = graph.input(&images)?;
/// let h = x.matmul(&w)?.leaky_relu(0.1);
/// let loss = h.sigmoid().bce_loss(&target)?;
/// loss.backward()?;
/// ```
#[derive(Clone)]
pub struct Var {
    id: NodeId,
    graph: Rc<RefCell<GraphInner>>,
}

impl std::fmt::Debug for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Var").field("id", &self.id).finish()
    }
}

impl Var {
    pub(crate) const fn new(id: NodeId, graph: Rc<RefCell<GraphInner>>) -> Self {
        Self { id, graph }
    }

    pub const fn node_id(&self) -> NodeId {
        self.id
    }

    pub(crate) const fn graph(&self) -> &Rc<RefCell<GraphInner>> {
        &self.graph
    }

    /// 把同一个图中的另一个节点包装为Var
    pub(crate) fn sibling(&self, id: NodeId) -> Self {
        Self::new(id, Rc::clone(&self.graph))
    }

    pub fn same_graph(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.graph, &other.graph)
    }

    /// 获取 Var 所属的 Graph 句柄（即使原句柄已 drop 也有效）
    pub fn get_graph(&self) -> super::graph::Graph {
        super::graph::Graph::from_rc(Rc::clone(&self.graph))
    }

    pub fn name(&self) -> Result<String, GraphError> {
        Ok(self.graph.borrow().get_node_name(self.id)?.to_string())
    }

    /// 节点创建时就已确定的输出形状
    pub fn value_expected_shape(&self) -> Result<Vec<usize>, GraphError> {
        Ok(self
            .graph
            .borrow()
            .get_node_value_expected_shape(self.id)?
            .to_vec())
    }

    pub(crate) fn check_same_graph(&self, other: &Self, op: &str) -> Result<(), GraphError> {
        if self.same_graph(other) {
            Ok(())
        } else {
            Err(GraphError::InvalidOperation(format!(
                "不能对来自不同 Graph 的 Var 进行{op}"
            )))
        }
    }

    // ==================== 梯度流控制 ====================

    /// 返回一个值相同但截断梯度的新 Var，原 Var 不受影响
    pub fn detach(&self) -> Result<Self, GraphError> {
        let id = self
            .graph
            .borrow_mut()
            .new_identity_node(self.id, true, None)?;
        Ok(self.sibling(id))
    }

    // ==================== 执行 ====================

    pub fn forward(&self) -> Result<(), GraphError> {
        self.graph.borrow_mut().forward(self.id)
    }

    /// 反向传播：先执行一次前向传播，再从本节点（须为标量损失）反向传播，返回损失值
    pub fn backward(&self) -> Result<f32, GraphError> {
        self.backward_ex(false)
    }

    /// 同`backward`，`retain_graph`为true时保留中间节点的值
    pub fn backward_ex(&self, retain_graph: bool) -> Result<f32, GraphError> {
        let mut g = self.graph.borrow_mut();
        g.forward(self.id)?;
        g.backward_ex(self.id, retain_graph)
    }

    // ==================== 值与梯度 ====================

    pub fn value(&self) -> Result<Option<Tensor>, GraphError> {
        Ok(self.graph.borrow().get_node_value(self.id)?.cloned())
    }

    pub fn set_value(&self, value: &Tensor) -> Result<(), GraphError> {
        self.graph.borrow_mut().set_node_value(self.id, Some(value))
    }

    /// 取单元素节点的值
    pub fn item(&self) -> Result<f32, GraphError> {
        let value = self.value()?.ok_or_else(|| {
            GraphError::ComputationError(format!("节点{:?}没有值，请先执行 forward", self.id))
        })?;
        value.get_data_number().ok_or_else(|| {
            GraphError::InvalidOperation(format!(
                "item() 要求单元素张量，但形状为 {:?}",
                value.shape()
            ))
        })
    }

    pub fn grad(&self) -> Result<Option<Tensor>, GraphError> {
        Ok(self.graph.borrow().get_node_grad(self.id)?.cloned())
    }

    pub fn zero_grad(&self) -> Result<(), GraphError> {
        self.graph.borrow_mut().clear_node_grad(self.id)
    }

    // ==================== 返回 Result 的运算 ====================

    pub fn try_add(&self, other: &Self) -> Result<Self, GraphError> {
        self.check_same_graph(other, "加法")?;
        let id = self
            .graph
            .borrow_mut()
            .new_add_node(self.id, other.id, None)?;
        Ok(self.sibling(id))
    }

    pub fn try_sub(&self, other: &Self) -> Result<Self, GraphError> {
        self.check_same_graph(other, "减法")?;
        let id = self
            .graph
            .borrow_mut()
            .new_subtract_node(self.id, other.id, None)?;
        Ok(self.sibling(id))
    }

    /// 逐元素乘法
    pub fn try_mul(&self, other: &Self) -> Result<Self, GraphError> {
        self.check_same_graph(other, "乘法")?;
        let id = self
            .graph
            .borrow_mut()
            .new_multiply_node(self.id, other.id, None)?;
        Ok(self.sibling(id))
    }

    /// 逐元素除法
    pub fn try_div(&self, other: &Self) -> Result<Self, GraphError> {
        self.check_same_graph(other, "除法")?;
        let id = self
            .graph
            .borrow_mut()
            .new_divide_node(self.id, other.id, None)?;
        Ok(self.sibling(id))
    }
}

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓算子重载↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
macro_rules! impl_var_binary_op {
    ($trait:ident, $method:ident, $try_method:ident, $desc:literal) => {
        impl $trait for &Var {
            type Output = Var;

            fn $method(self, other: &Var) -> Var {
                self.$try_method(other)
                    .unwrap_or_else(|e| panic!("Var {}失败：{e}", $desc))
            }
        }

        impl $trait for Var {
            type Output = Var;

            fn $method(self, other: Var) -> Var {
                <&Var as $trait<&Var>>::$method(&self, &other)
            }
        }

        impl $trait<Var> for &Var {
            type Output = Var;

            fn $method(self, other: Var) -> Var {
                <&Var as $trait<&Var>>::$method(self, &other)
            }
        }

        impl $trait<&Var> for Var {
            type Output = Var;

            fn $method(self, other: &Var) -> Var {
                <&Var as $trait<&Var>>::$method(&self, other)
            }
        }
    };
}

impl_var_binary_op!(Add, add, try_add, "加法");
impl_var_binary_op!(Sub, sub, try_sub, "减法");
impl_var_binary_op!(Mul, mul, try_mul, "乘法");
impl_var_binary_op!(Div, div, try_div, "除法");

impl Neg for &Var {
    type Output = Var;

    fn neg(self) -> Var {
        let id = self
            .graph
            .borrow_mut()
            .new_scalar_multiply_node(self.id, -1.0, None)
            .expect("创建取反节点失败");
        self.sibling(id)
    }
}

impl Neg for Var {
    type Output = Self;

    fn neg(self) -> Self {
        -&self
    }
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑算子重载↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
