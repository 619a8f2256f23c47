/*
 * @Description  : GraphInner 基础操作 + 前向传播
 */

use super::super::error::GraphError;
use super::GraphInner;
use crate::nn::NodeId;
use crate::nn::nodes::NodeHandle;
use crate::tensor::Tensor;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;

impl GraphInner {
    // ========== 创建 ==========

    pub fn new() -> Self {
        Self::with_name("default_graph")
    }

    /// 创建一个带固定种子的计算图（确保可重复性）
    pub fn new_with_seed(seed: u64) -> Self {
        let mut graph = Self::new();
        graph.set_seed(seed);
        graph
    }

    pub fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            nodes: HashMap::new(),
            forward_edges: HashMap::new(),
            backward_edges: HashMap::new(),
            last_forward_pass_id: 0,
            last_backward_pass_id: 0,
            next_id: 0,
            is_eval_mode: false,
            rng: None,
        }
    }

    // ========== 基础访问器 ==========

    pub const fn last_forward_pass_id(&self) -> u64 {
        self.last_forward_pass_id
    }

    pub const fn last_backward_pass_id(&self) -> u64 {
        self.last_backward_pass_id
    }

    /// 设置/重置图的随机种子
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = Some(StdRng::seed_from_u64(seed));
    }

    pub const fn has_seed(&self) -> bool {
        self.rng.is_some()
    }

    /// 图的随机数生成器（未设种子时为None）
    pub fn rng_mut(&mut self) -> Option<&mut StdRng> {
        self.rng.as_mut()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodes(&self) -> Vec<NodeId> {
        let mut ids = self.nodes.keys().copied().collect::<Vec<_>>();
        ids.sort_unstable();
        ids
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    pub(in crate::nn) fn get_node(&self, id: NodeId) -> Result<&NodeHandle, GraphError> {
        self.nodes.get(&id).ok_or(GraphError::NodeNotFound(id))
    }

    pub(in crate::nn) fn get_node_mut(&mut self, id: NodeId) -> Result<&mut NodeHandle, GraphError> {
        self.nodes.get_mut(&id).ok_or(GraphError::NodeNotFound(id))
    }

    pub fn get_node_parents(&self, id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        self.get_node(id)?;
        Ok(self.backward_edges.get(&id).cloned().unwrap_or_default())
    }

    pub fn get_node_children(&self, id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        self.get_node(id)?;
        Ok(self.forward_edges.get(&id).cloned().unwrap_or_default())
    }

    pub fn get_node_name(&self, id: NodeId) -> Result<&str, GraphError> {
        Ok(self.get_node(id)?.name())
    }

    pub fn get_node_value_expected_shape(&self, id: NodeId) -> Result<&[usize], GraphError> {
        Ok(self.get_node(id)?.value_expected_shape())
    }

    pub fn get_node_value(&self, id: NodeId) -> Result<Option<&Tensor>, GraphError> {
        Ok(self.get_node(id)?.value())
    }

    pub fn set_node_value(&mut self, id: NodeId, value: Option<&Tensor>) -> Result<(), GraphError> {
        self.get_node_mut(id)?.set_value(value)
    }

    pub fn get_node_grad(&self, id: NodeId) -> Result<Option<&Tensor>, GraphError> {
        let node = self.get_node(id)?;
        if node.is_input() {
            return Err(GraphError::InvalidOperation(format!(
                "输入{node}不应该有梯度"
            )));
        }
        Ok(node.grad())
    }

    pub fn is_node_detached(&self, id: NodeId) -> Result<bool, GraphError> {
        Ok(self.get_node(id)?.is_detached())
    }

    /// 获取所有可训练的参数节点（按id升序）
    pub fn get_trainable_nodes(&self) -> Vec<NodeId> {
        let mut ids = self
            .nodes
            .iter()
            .filter(|(_, node)| node.is_parameter())
            .map(|(&id, _)| id)
            .collect::<Vec<_>>();
        ids.sort_unstable();
        ids
    }

    // ========== ID/名称生成 ==========

    pub(in crate::nn::graph) const fn generate_valid_node_id(&mut self) -> NodeId {
        // 先递增再返回，所以第一个节点 ID 是 1
        self.next_id += 1;
        NodeId(self.next_id)
    }

    pub(in crate::nn::graph) fn check_duplicate_node_name(&self, name: &str) -> Result<(), GraphError> {
        if self.nodes.values().any(|node| node.name() == name) {
            return Err(GraphError::DuplicateNodeName(format!(
                "节点{}在图{}中重复",
                name,
                self.name()
            )));
        }
        Ok(())
    }

    pub(in crate::nn::graph) fn generate_valid_new_node_name(
        &self,
        base_name: &str,
        node_type: &str,
    ) -> Result<String, GraphError> {
        if !base_name.is_empty() {
            self.check_duplicate_node_name(base_name)?;
            return Ok(base_name.to_string());
        }

        let mut counter = 1;
        loop {
            let name = format!("{node_type}_{counter}");
            if self.check_duplicate_node_name(&name).is_ok() {
                return Ok(name);
            }
            counter += 1;
        }
    }

    // ========== 前向传播 ==========

    /// 计算`node_id`的值。每次调用都是新的一轮：所有非叶子祖先节点都会按当前的叶子值重新计算
    pub fn forward(&mut self, node_id: NodeId) -> Result<(), GraphError> {
        let node = self.get_node(node_id)?;
        if node.is_leaf() {
            if node.has_value() {
                return Ok(());
            }
            return Err(GraphError::InvalidOperation(format!(
                "{node}是输入/参数节点，其值应通过 set_value 设置，而非通过父节点前向传播计算"
            )));
        }

        let new_pass_id = self.last_forward_pass_id + 1;
        self.forward_node_internal(node_id, new_pass_id)?;
        self.last_forward_pass_id = new_pass_id;
        Ok(())
    }

    fn forward_node_internal(&mut self, node_id: NodeId, pass_id: u64) -> Result<(), GraphError> {
        let node = self.get_node_mut(node_id)?;
        if node.is_leaf() {
            if node.has_value() {
                node.set_last_forward_pass_id(pass_id);
                return Ok(());
            }
            return Err(GraphError::InvalidOperation(format!(
                "{node}没有值，请先通过 set_value 设置"
            )));
        }
        if node.last_forward_pass_id() == pass_id {
            return Ok(());
        }

        let parent_ids = self.get_node_parents(node_id)?;
        for &parent_id in &parent_ids {
            self.forward_node_internal(parent_id, pass_id)?;
        }

        // 暂时取出本节点，使其能在借用父节点的同时被修改
        let mut node = self
            .nodes
            .remove(&node_id)
            .ok_or(GraphError::NodeNotFound(node_id))?;
        let result = match parent_ids
            .iter()
            .map(|id| self.get_node(*id))
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(parents) => node.calc_value_by_parents(&parents),
            Err(e) => Err(e),
        };
        node.set_last_forward_pass_id(pass_id);
        self.nodes.insert(node_id, node);
        result
    }

    /// 释放中间节点的值和梯度（叶子节点不受影响）
    pub(in crate::nn::graph) fn release_intermediate_results(&mut self) {
        for node in self.nodes.values_mut().filter(|n| !n.is_leaf()) {
            node.clear_value();
            node.clear_grad();
        }
    }

    /// 重置中间节点的梯度（参数节点的梯度保留以便累加）
    pub(in crate::nn::graph) fn reset_intermediate_grad(&mut self) {
        for node in self.nodes.values_mut().filter(|n| !n.is_parameter()) {
            node.clear_grad();
            node.set_last_backward_pass_id(0);
        }
    }
}
