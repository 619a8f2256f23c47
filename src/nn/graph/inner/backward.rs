/*
 * @Description  : GraphInner VJP 反向传播
 */

use super::super::error::GraphError;
use super::GraphInner;
use crate::nn::NodeId;
use crate::tensor::Tensor;
use std::collections::HashSet;

impl GraphInner {
    /// 反向传播，返回损失的标量值。结束后释放中间结果
    pub fn backward(&mut self, loss: NodeId) -> Result<f32, GraphError> {
        self.backward_ex(loss, false)
    }

    /// 反向传播（扩展版本）：`retain_graph`为true时保留中间节点的值，便于检查
    pub fn backward_ex(&mut self, loss: NodeId, retain_graph: bool) -> Result<f32, GraphError> {
        if !self.is_train_mode() {
            tracing::warn!("在 no_grad/eval 模式下调用 backward，这通常是误用");
        }

        let loss_node = self.get_node(loss)?;
        let loss_value = loss_node.value().ok_or_else(|| {
            GraphError::ComputationError(format!("损失{loss_node}没有值，请先执行 forward"))
        })?;
        if loss_value.size() != 1 {
            return Err(GraphError::InvalidOperation(format!(
                "反向传播要求损失为标量 [1, 1]，但得到 {:?}",
                loss_value.shape()
            )));
        }
        let loss_scalar = loss_value.sum_value();

        self.backward_vjp_core(loss)?;

        if !retain_graph {
            self.release_intermediate_results();
        }
        Ok(loss_scalar)
    }

    fn backward_vjp_core(&mut self, loss_id: NodeId) -> Result<(), GraphError> {
        self.reset_intermediate_grad();

        // 损失节点本身可能就是参数（极少见），其梯度同样累加
        self.get_node_mut(loss_id)?
            .accumulate_grad(&Tensor::ones(&[1, 1]));

        let topo_order = self.topological_sort_backward(loss_id)?;
        for &node_id in &topo_order {
            self.propagate_grad_to_parents(node_id)?;
        }

        self.last_backward_pass_id += 1;
        let pass_id = self.last_backward_pass_id;
        for node_id in topo_order {
            let node = self.get_node_mut(node_id)?;
            if node.grad().is_some() {
                node.set_last_backward_pass_id(pass_id);
            }
        }
        Ok(())
    }

    /// 将梯度从当前节点传播到其父节点（输入节点不接收梯度，detached节点截断传播）
    fn propagate_grad_to_parents(&mut self, node_id: NodeId) -> Result<(), GraphError> {
        let parent_ids = self.get_node_parents(node_id)?;
        let node = self.get_node(node_id)?;
        if parent_ids.is_empty() || node.is_detached() {
            return Ok(());
        }
        let Some(upstream_grad) = node.grad() else {
            return Ok(());
        };

        let parents = parent_ids
            .iter()
            .map(|&id| self.get_node(id))
            .collect::<Result<Vec<_>, _>>()?;

        let mut parent_grads = Vec::with_capacity(parent_ids.len());
        for (index, parent) in parents.iter().enumerate() {
            if parent.is_input() {
                continue;
            }
            let grad = node.calc_grad_to_parent(index, &parents, upstream_grad)?;
            parent_grads.push((parent_ids[index], grad));
        }

        for (parent_id, grad) in parent_grads {
            self.get_node_mut(parent_id)?.accumulate_grad(&grad);
        }
        Ok(())
    }

    /// 反向拓扑排序：返回`loss_id`及其所有祖先，保证每个节点都排在其所有父节点之前
    fn topological_sort_backward(&self, loss_id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        fn dfs(
            graph: &GraphInner,
            node_id: NodeId,
            visited: &mut HashSet<NodeId>,
            postorder: &mut Vec<NodeId>,
        ) -> Result<(), GraphError> {
            if !visited.insert(node_id) {
                return Ok(());
            }
            for parent_id in graph.get_node_parents(node_id)? {
                dfs(graph, parent_id, visited, postorder)?;
            }
            postorder.push(node_id);
            Ok(())
        }

        let mut visited = HashSet::new();
        let mut postorder = Vec::new();
        dfs(self, loss_id, &mut visited, &mut postorder)?;
        // 后序中父节点先于子节点，反转即得到从损失出发的顺序
        postorder.reverse();
        Ok(postorder)
    }

    /// 清除所有节点的梯度
    pub fn clear_grad(&mut self) {
        for node in self.nodes.values_mut() {
            node.clear_grad();
        }
    }

    /// 清除单个节点的梯度
    pub fn clear_node_grad(&mut self, node_id: NodeId) -> Result<(), GraphError> {
        self.get_node_mut(node_id)?.clear_grad();
        Ok(())
    }

    /// 清零梯度（PyTorch 风格）
    pub fn zero_grad(&mut self) {
        self.clear_grad();
    }
}
