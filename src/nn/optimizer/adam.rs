/*
 * @Description  : Adam优化器实现
 */

use super::base::{Optimizer, OptimizerState};
use crate::nn::{Graph, GraphError, NodeId, Var};
use crate::tensor::Tensor;
use std::collections::HashMap;

/// Adam优化器（带偏差修正，与 PyTorch 的`torch.optim.Adam`一致）
#[derive(Debug)]
pub struct Adam {
    state: OptimizerState,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    /// 一阶矩估计
    m: HashMap<NodeId, Tensor>,
    /// 二阶矩估计
    v: HashMap<NodeId, Tensor>,
    /// 时间步
    t: i32,
}

impl Adam {
    /// 默认 β1=0.9, β2=0.999, ε=1e-8
    pub fn new(graph: &Graph, params: &[Var], learning_rate: f32) -> Result<Self, GraphError> {
        Self::with_config(graph, params, learning_rate, 0.9, 0.999, 1e-8)
    }

    /// GAN 常用`beta1 = 0.5`
    pub fn with_config(
        graph: &Graph,
        params: &[Var],
        learning_rate: f32,
        beta1: f32,
        beta2: f32,
        epsilon: f32,
    ) -> Result<Self, GraphError> {
        for (name, beta) in [("beta1", beta1), ("beta2", beta2)] {
            if !(0.0..1.0).contains(&beta) {
                return Err(GraphError::InvalidOperation(format!(
                    "Adam 的{name}须在[0, 1)内，但得到 {beta}"
                )));
            }
        }
        let state = OptimizerState::new(graph, params, learning_rate)?;
        Ok(Self {
            state,
            beta1,
            beta2,
            epsilon,
            m: HashMap::new(),
            v: HashMap::new(),
            t: 0,
        })
    }

    pub const fn betas(&self) -> (f32, f32) {
        (self.beta1, self.beta2)
    }

    fn update_moments(&mut self, node_id: NodeId, gradient: &Tensor) -> Tensor {
        // m = β1·m + (1-β1)·g
        let m = self
            .m
            .entry(node_id)
            .or_insert_with(|| Tensor::zeros(gradient.shape()));
        *m *= self.beta1;
        *m += &(gradient * (1.0 - self.beta1));

        // v = β2·v + (1-β2)·g²
        let v = self
            .v
            .entry(node_id)
            .or_insert_with(|| Tensor::zeros(gradient.shape()));
        *v *= self.beta2;
        *v += &(&(gradient * gradient) * (1.0 - self.beta2));

        let m_hat = &*m / (1.0 - self.beta1.powi(self.t));
        let v_hat = &*v / (1.0 - self.beta2.powi(self.t));
        &m_hat / &(&v_hat.sqrt() + self.epsilon)
    }
}

impl Optimizer for Adam {
    fn zero_grad(&mut self) -> Result<(), GraphError> {
        self.state.zero_grad()
    }

    fn step(&mut self) -> Result<(), GraphError> {
        self.t += 1;
        let lr = self.state.learning_rate();
        let params = self.state.params().to_vec();
        for param in &params {
            let Some((value, grad)) = self.state.value_and_grad(param)? else {
                continue;
            };
            let update = self.update_moments(param.node_id(), &grad);
            let new_value = &value - &(&update * lr);
            self.state.set_value(param, &new_value)?;
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.m.clear();
        self.v.clear();
        self.t = 0;
    }

    fn learning_rate(&self) -> f32 {
        self.state.learning_rate()
    }

    fn set_learning_rate(&mut self, lr: f32) {
        self.state.set_learning_rate(lr);
    }
}
