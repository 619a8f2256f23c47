//! 第 6 节：线性回归
//!
//! 用带噪声的`y = 2x + 1`样本拟合`y = w·x + b`，分别用
//! 1. 手写 SGD：读取`grad`、更新参数值、清零梯度；
//! 2. 库里的`SGD`优化器。

use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::nn::{Graph, GraphError, Init, Optimizer, SGD, Var, VarLossOps, VarMatrixOps};
use crate::tensor::Tensor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegressionConfig {
    pub true_w: f32,
    pub true_b: f32,
    pub num_samples: usize,
    pub noise_std: f32,
    pub learning_rate: f32,
    pub epochs: usize,
    pub seed: u64,
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            true_w: 2.0,
            true_b: 1.0,
            num_samples: 100,
            noise_std: 0.1,
            learning_rate: 0.1,
            epochs: 100,
            seed: 42,
        }
    }
}

impl RegressionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.num_samples == 0 || self.epochs == 0 {
            return Err(Error::Config(
                "num_samples 与 epochs 必须大于 0".to_string(),
            ));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(Error::Config(format!(
                "learning_rate 必须为正的有限数，但得到 {}",
                self.learning_rate
            )));
        }
        if !(self.noise_std >= 0.0 && self.noise_std.is_finite()) {
            return Err(Error::Config(format!(
                "noise_std 不能为负，但得到 {}",
                self.noise_std
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionReport {
    /// "manual" 或 "sgd"
    pub method: String,
    pub w: f32,
    pub b: f32,
    /// 训练结束后的损失
    pub final_loss: f32,
    /// 每轮更新前的损失
    pub loss_history: Vec<f32>,
}

/// 回归问题的计算图：`loss = mse(x @ w + b, y)`
struct Problem {
    w: Var,
    b: Var,
    loss: Var,
}

impl Problem {
    fn build(config: &RegressionConfig) -> Result<Self> {
        config.validate()?;
        let (x, y) = make_data(config);
        let graph = Graph::new();
        let x = graph.input_named(&x, "x")?;
        let y = graph.input_named(&y, "y")?;
        let w = graph.parameter(&[1, 1], Init::Zeros, "w")?;
        let b = graph.parameter(&[1, 1], Init::Zeros, "b")?;
        let loss = x.matmul(&w)?.try_add(&b)?.mse_loss(&y)?;
        Ok(Self { w, b, loss })
    }

    fn report(&self, method: &str, loss_history: Vec<f32>) -> Result<RegressionReport> {
        self.loss.forward()?;
        Ok(RegressionReport {
            method: method.to_string(),
            w: self.w.item()?,
            b: self.b.item()?,
            final_loss: self.loss.item()?,
            loss_history,
        })
    }
}

/// 生成`x ~ N(0, 1)`与`y = true_w·x + true_b + noise`，形状均为[N, 1]
pub fn make_data(config: &RegressionConfig) -> (Tensor, Tensor) {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let shape = [config.num_samples, 1];
    let x = Tensor::normal_with_rng(0.0, 1.0, &shape, &mut rng);
    let noise = Tensor::normal_with_rng(0.0, 1.0, &shape, &mut rng) * config.noise_std;
    let y = &x * config.true_w + config.true_b + noise;
    (x, y)
}

/// 手写的梯度下降：θ ← θ − lr·∂loss/∂θ
pub fn run_manual(config: &RegressionConfig) -> Result<RegressionReport> {
    let problem = Problem::build(config)?;
    let mut loss_history = Vec::with_capacity(config.epochs);

    for _ in 0..config.epochs {
        loss_history.push(problem.loss.backward()?);
        for param in [&problem.w, &problem.b] {
            let value = param
                .value()?
                .ok_or_else(|| GraphError::ComputationError("参数没有值".to_string()))?;
            let grad = param
                .grad()?
                .ok_or_else(|| GraphError::ComputationError("参数没有梯度".to_string()))?;
            param.set_value(&(value - grad * config.learning_rate))?;
            param.zero_grad()?;
        }
    }
    tracing::debug!("手写 SGD 完成，最后一轮损失 {:?}", loss_history.last());
    problem.report("manual", loss_history)
}

/// 同样的拟合，交给`SGD`优化器
pub fn run_with_optimizer(config: &RegressionConfig) -> Result<RegressionReport> {
    let problem = Problem::build(config)?;
    let graph = problem.w.get_graph();
    let mut optimizer = SGD::new(
        &graph,
        &[problem.w.clone(), problem.b.clone()],
        config.learning_rate,
    )?;

    let loss_history = (0..config.epochs)
        .map(|_| optimizer.minimize(&problem.loss))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    tracing::debug!("SGD 优化器完成，最后一轮损失 {:?}", loss_history.last());
    problem.report("sgd", loss_history)
}

impl fmt::Display for RegressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "[{}] w = {:.4}, b = {:.4}, 最终损失 {:.6}",
            self.method, self.w, self.b, self.final_loss
        )?;
        let n = self.loss_history.len();
        for (i, loss) in self.loss_history.iter().enumerate() {
            if i % 10 == 0 || i + 1 == n {
                writeln!(f, "  epoch {:>4}: loss = {loss:.6}", i + 1)?;
            }
        }
        Ok(())
    }
}
