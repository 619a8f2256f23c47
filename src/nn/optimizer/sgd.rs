/*
 * @Description  : 梯度下降优化器实现
 */

use super::base::{Optimizer, OptimizerState};
use crate::nn::{Graph, GraphError, Var};

/// SGD (随机梯度下降) 优化器：θ ← θ − lr·∇θ
#[derive(Debug)]
pub struct SGD {
    state: OptimizerState,
}

impl SGD {
    pub fn new(graph: &Graph, params: &[Var], learning_rate: f32) -> Result<Self, GraphError> {
        let state = OptimizerState::new(graph, params, learning_rate)?;
        Ok(Self { state })
    }
}

impl Optimizer for SGD {
    fn zero_grad(&mut self) -> Result<(), GraphError> {
        self.state.zero_grad()
    }

    fn step(&mut self) -> Result<(), GraphError> {
        let lr = self.state.learning_rate();
        for param in self.state.params() {
            if let Some((value, grad)) = self.state.value_and_grad(param)? {
                let new_value = &value - &(&grad * lr);
                self.state.set_value(param, &new_value)?;
            }
        }
        Ok(())
    }

    // SGD 没有内部状态
    fn reset(&mut self) {}

    fn learning_rate(&self) -> f32 {
        self.state.learning_rate()
    }

    fn set_learning_rate(&mut self, lr: f32) {
        self.state.set_learning_rate(lr);
    }
}
