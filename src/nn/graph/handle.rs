/*
 * @Description  : Graph 句柄（用户级 API）
 */

use super::error::GraphError;
use super::inner::GraphInner;
use crate::nn::NodeId;
use crate::nn::var::{Init, Var};
use crate::tensor::Tensor;
use std::cell::RefCell;
use std::rc::Rc;

/// Graph - 计算图句柄（PyTorch 风格用户 API）
///
/// `Rc<RefCell<GraphInner>>` 的薄封装。克隆得到的多个 Graph 引用同一个 GraphInner，
/// 创建的 Var 自动持有图引用。
#[derive(Clone)]
pub struct Graph {
    inner: Rc<RefCell<GraphInner>>,
}

impl Graph {
    // ==================== 创建 ====================

    pub fn new() -> Self {
        Self::from_inner(GraphInner::new())
    }

    /// 创建带种子的图（参数初始化与`randn`均可复现）
    pub fn new_with_seed(seed: u64) -> Self {
        Self::from_inner(GraphInner::new_with_seed(seed))
    }

    pub fn from_inner(inner: GraphInner) -> Self {
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    pub(crate) const fn from_rc(inner: Rc<RefCell<GraphInner>>) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> std::cell::Ref<'_, GraphInner> {
        self.inner.borrow()
    }

    pub fn inner_mut(&self) -> std::cell::RefMut<'_, GraphInner> {
        self.inner.borrow_mut()
    }

    pub(crate) fn inner_rc(&self) -> Rc<RefCell<GraphInner>> {
        Rc::clone(&self.inner)
    }

    /// 判断两个句柄是否指向同一个图
    pub fn same_graph(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn wrap_node_id(&self, node_id: NodeId) -> Var {
        Var::new(node_id, Rc::clone(&self.inner))
    }

    // ==================== 创建变量 ====================

    fn new_input_with_value(&self, data: &Tensor, name: Option<&str>) -> Result<Var, GraphError> {
        let mut g = self.inner.borrow_mut();
        let node_id = g.new_input_node(data.shape(), name)?;
        g.set_node_value(node_id, Some(data))?;
        Ok(self.wrap_node_id(node_id))
    }

    /// 创建输入节点并设置数据
    pub fn input(&self, data: &Tensor) -> Result<Var, GraphError> {
        self.new_input_with_value(data, None)
    }

    pub fn input_named(&self, data: &Tensor, name: &str) -> Result<Var, GraphError> {
        self.new_input_with_value(data, Some(name))
    }

    /// 创建只有形状、暂无值的输入节点（之后通过`Var::set_value`喂数据）
    pub fn input_shape(&self, shape: &[usize], name: Option<&str>) -> Result<Var, GraphError> {
        let node_id = self.inner.borrow_mut().new_input_node(shape, name)?;
        Ok(self.wrap_node_id(node_id))
    }

    /// 创建参数节点，按`init`策略初始化（图有种子时使用图的RNG）
    pub fn parameter(&self, shape: &[usize], init: Init, name: &str) -> Result<Var, GraphError> {
        let mut g = self.inner.borrow_mut();
        let node_id = g.new_parameter_node(shape, Some(name))?;
        let init_data = match g.rng_mut() {
            Some(rng) => init.generate_with_rng(shape, rng),
            None => init.generate(shape),
        };
        g.set_node_value(node_id, Some(&init_data))?;
        Ok(self.wrap_node_id(node_id))
    }

    /// 创建常量（即带值的输入节点，不接收梯度）
    pub fn constant(&self, data: &Tensor) -> Result<Var, GraphError> {
        self.new_input_with_value(data, None)
    }

    pub fn zeros(&self, shape: &[usize]) -> Result<Var, GraphError> {
        self.new_input_with_value(&Tensor::zeros(shape), None)
    }

    pub fn ones(&self, shape: &[usize]) -> Result<Var, GraphError> {
        self.new_input_with_value(&Tensor::ones(shape), None)
    }

    /// 创建标准正态分布的随机输入
    pub fn randn(&self, shape: &[usize]) -> Result<Var, GraphError> {
        let data = {
            let mut g = self.inner.borrow_mut();
            match g.rng_mut() {
                Some(rng) => Tensor::normal_with_rng(0.0, 1.0, shape, rng),
                None => Tensor::normal(0.0, 1.0, shape),
            }
        };
        self.new_input_with_value(&data, None)
    }

    // ==================== 执行 ====================

    pub fn forward(&self, output: &Var) -> Result<(), GraphError> {
        output.forward()
    }

    pub fn backward(&self, loss: &Var) -> Result<f32, GraphError> {
        loss.backward()
    }

    // ==================== 训练控制 ====================

    /// 清零图中所有节点的梯度（只清某个模型的参数请用优化器的`zero_grad`）
    pub fn zero_grad(&self) {
        self.inner.borrow_mut().zero_grad();
    }

    pub fn train(&self) {
        self.inner.borrow_mut().set_train_mode();
    }

    pub fn eval(&self) {
        self.inner.borrow_mut().set_eval_mode();
    }

    pub fn is_eval(&self) -> bool {
        !self.inner.borrow().is_train_mode()
    }

    /// 在 no_grad 上下文中执行闭包，结束后恢复原模式
    pub fn no_grad_scope<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Self) -> R,
    {
        let was_train = !self.is_eval();
        self.eval();
        let result = f(self);
        if was_train {
            self.train();
        }
        result
    }

    // ==================== 统计 ====================

    pub fn nodes_count(&self) -> usize {
        self.inner.borrow().nodes_count()
    }

    /// 图中参数节点的个数
    pub fn parameters_count(&self) -> usize {
        self.inner.borrow().get_trainable_nodes().len()
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Graph")
            .field("name", &inner.name())
            .field("nodes_count", &inner.nodes_count())
            .finish()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
