//! 第 5 节：自动微分
//!
//! 对`y = x³ + 2x² − 5x`在`x = 2`处求导，与解析解`3x² + 4x − 5`对照；
//! 再演示不清零时两次反向传播的梯度会累加。

use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::nn::{Graph, GraphError, Init, Var, VarReduceOps};

pub const TOY_X: f32 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutogradReport {
    pub x: f32,
    pub y: f32,
    /// 自动微分得到的 dy/dx
    pub grad: f32,
    pub analytic_grad: f32,
    /// 不调用 zero_grad 再反向传播一次后的梯度
    pub accumulated_grad: f32,
    /// zero_grad 后重新反向传播的梯度
    pub grad_after_zero: f32,
}

/// `x³ + 2x² − 5x`
pub fn toy_function(x: f32) -> f32 {
    x.powi(3) + 2.0 * x.powi(2) - 5.0 * x
}

/// `3x² + 4x − 5`
pub fn toy_derivative(x: f32) -> f32 {
    3.0 * x.powi(2) + 4.0 * x - 5.0
}

fn grad_scalar(x: &Var) -> Result<f32> {
    let grad = x
        .grad()?
        .ok_or_else(|| GraphError::ComputationError("x 没有梯度".to_string()))?;
    Ok(grad.sum_value())
}

pub fn run() -> Result<AutogradReport> {
    run_at(TOY_X)
}

pub fn run_at(x_value: f32) -> Result<AutogradReport> {
    let graph = Graph::new();
    let x = graph.parameter(&[1, 1], Init::Constant(x_value), "x")?;
    let y = x
        .pow(3.0)
        .try_add(&x.pow(2.0).scale(2.0))?
        .try_sub(&x.scale(5.0))?;

    let y_value = y.backward()?;
    let grad = grad_scalar(&x)?;

    y.backward()?;
    let accumulated_grad = grad_scalar(&x)?;

    x.zero_grad()?;
    y.backward()?;
    let grad_after_zero = grad_scalar(&x)?;

    Ok(AutogradReport {
        x: x_value,
        y: y_value,
        grad,
        analytic_grad: toy_derivative(x_value),
        accumulated_grad,
        grad_after_zero,
    })
}

impl fmt::Display for AutogradReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "y = x³ + 2x² − 5x, x = {}", self.x)?;
        writeln!(f, "y = {}", self.y)?;
        writeln!(
            f,
            "dy/dx（自动微分）= {}，解析解 3x² + 4x − 5 = {}",
            self.grad, self.analytic_grad
        )?;
        writeln!(f, "再次 backward（未清零）: {}", self.accumulated_grad)?;
        writeln!(f, "zero_grad 后 backward: {}", self.grad_after_zero)
    }
}
