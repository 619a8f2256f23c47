/*
 * @Description  : GraphInner 节点构建方法（new_*_node）
 */

use super::super::error::GraphError;
use super::GraphInner;
use crate::nn::NodeId;
use crate::nn::nodes::NodeHandle;
use crate::nn::nodes::raw_node::{
    Add, BCELoss, Divide, Identity, Input, LeakyReLU, MSELoss, MatMul, Mean, Multiply, Parameter,
    Pow, ScalarMultiply, Sigmoid, Subtract, Sum, Tanh,
};

impl GraphInner {
    /// 添加节点到列表，同时登记父子边
    pub(in crate::nn::graph) fn add_node_to_list(
        &mut self,
        mut node_handle: NodeHandle,
        name: Option<&str>,
        parents: &[NodeId],
    ) -> Result<NodeId, GraphError> {
        let node_name = self.generate_valid_new_node_name(name.unwrap_or(""), node_handle.type_name())?;
        let node_id = self.generate_valid_node_id();

        for &parent_id in parents {
            let children = self.forward_edges.entry(parent_id).or_default();
            if !children.contains(&node_id) {
                children.push(node_id);
            }
        }
        self.backward_edges
            .entry(node_id)
            .or_default()
            .extend(parents);

        node_handle.bind_id_and_name(node_id, &node_name);
        self.nodes.insert(node_id, node_handle);
        Ok(node_id)
    }

    fn parent_handles(&self, parents: &[NodeId]) -> Result<Vec<&NodeHandle>, GraphError> {
        parents.iter().map(|&id| self.get_node(id)).collect()
    }

    /// 创建并登记一个以`parents`为父节点的运算节点
    fn new_op_node<F>(
        &mut self,
        parents: &[NodeId],
        name: Option<&str>,
        build: F,
    ) -> Result<NodeId, GraphError>
    where
        F: FnOnce(&[&NodeHandle]) -> Result<NodeHandle, GraphError>,
    {
        let node = build(&self.parent_handles(parents)?)?;
        self.add_node_to_list(node, name, parents)
    }

    /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓叶子节点↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
    pub fn new_input_node(
        &mut self,
        shape: &[usize],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = NodeHandle::new(Input::new(shape)?);
        self.add_node_to_list(node, name, &[])
    }

    /// 创建参数节点（尚无值，须随后用`set_node_value`初始化）
    pub fn new_parameter_node(
        &mut self,
        shape: &[usize],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = NodeHandle::new(Parameter::new(shape)?);
        self.add_node_to_list(node, name, &[])
    }
    /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑叶子节点↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

    /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓算子↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
    pub fn new_add_node(
        &mut self,
        a: NodeId,
        b: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.new_op_node(&[a, b], name, |p| Ok(NodeHandle::new(Add::new(p)?)))
    }

    pub fn new_subtract_node(
        &mut self,
        a: NodeId,
        b: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.new_op_node(&[a, b], name, |p| Ok(NodeHandle::new(Subtract::new(p)?)))
    }

    pub fn new_multiply_node(
        &mut self,
        a: NodeId,
        b: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.new_op_node(&[a, b], name, |p| Ok(NodeHandle::new(Multiply::new(p)?)))
    }

    pub fn new_divide_node(
        &mut self,
        a: NodeId,
        b: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.new_op_node(&[a, b], name, |p| Ok(NodeHandle::new(Divide::new(p)?)))
    }

    pub fn new_scalar_multiply_node(
        &mut self,
        x: NodeId,
        factor: f32,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.new_op_node(&[x], name, |p| {
            Ok(NodeHandle::new(ScalarMultiply::new(p, factor)?))
        })
    }

    pub fn new_mat_mul_node(
        &mut self,
        a: NodeId,
        b: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.new_op_node(&[a, b], name, |p| Ok(NodeHandle::new(MatMul::new(p)?)))
    }

    pub fn new_pow_node(
        &mut self,
        x: NodeId,
        exponent: f32,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.new_op_node(&[x], name, |p| Ok(NodeHandle::new(Pow::new(p, exponent)?)))
    }

    pub fn new_sigmoid_node(&mut self, x: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.new_op_node(&[x], name, |p| Ok(NodeHandle::new(Sigmoid::new(p)?)))
    }

    pub fn new_tanh_node(&mut self, x: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.new_op_node(&[x], name, |p| Ok(NodeHandle::new(Tanh::new(p)?)))
    }

    pub fn new_leaky_relu_node(
        &mut self,
        x: NodeId,
        slope: f32,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.new_op_node(&[x], name, |p| Ok(NodeHandle::new(LeakyReLU::new(p, slope)?)))
    }

    pub fn new_relu_node(&mut self, x: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.new_leaky_relu_node(x, 0.0, name)
    }

    pub fn new_identity_node(
        &mut self,
        x: NodeId,
        detached: bool,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.new_op_node(&[x], name, |p| Ok(NodeHandle::new(Identity::new(p, detached)?)))
    }

    pub fn new_sum_node(&mut self, x: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.new_op_node(&[x], name, |p| Ok(NodeHandle::new(Sum::new(p)?)))
    }

    pub fn new_mean_node(&mut self, x: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.new_op_node(&[x], name, |p| Ok(NodeHandle::new(Mean::new(p)?)))
    }
    /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑算子↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

    /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓损失↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
    pub fn new_mse_loss_node(
        &mut self,
        pred: NodeId,
        target: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.new_op_node(&[pred, target], name, |p| Ok(NodeHandle::new(MSELoss::new(p)?)))
    }

    pub fn new_bce_loss_node(
        &mut self,
        pred: NodeId,
        target: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.new_op_node(&[pred, target], name, |p| Ok(NodeHandle::new(BCELoss::new(p)?)))
    }
    /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑损失↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
}
