/*
 * @Description  : Linear (全连接) 层
 */

use crate::nn::{Graph, GraphError, Init, Module, Var, VarMatrixOps};

/// 全连接层：`output = x @ W + b`
///
/// - 输入：[batch_size, in_features]
/// - 输出：[batch_size, out_features]
///
/// 权重与偏置都按 U(-1/sqrt(in), 1/sqrt(in)) 初始化。
///
/// ```ignore
/// let fc = Linear::new(&graph, 784, 128, true, "disc_fc1")?;
/// let h = fc.forward(&x)?.leaky_relu(0.1);
/// ```
#[derive(Debug)]
pub struct Linear {
    /// [in_features, out_features]
    weights: Var,
    /// [1, out_features]，前向时沿 batch 维广播
    bias: Option<Var>,
    in_features: usize,
    out_features: usize,
    name: String,
}

impl Linear {
    /// 参数名为`{name}_W`与`{name}_b`，同一个图中`name`不能重复
    pub fn new(
        graph: &Graph,
        in_features: usize,
        out_features: usize,
        use_bias: bool,
        name: &str,
    ) -> Result<Self, GraphError> {
        if in_features == 0 || out_features == 0 {
            return Err(GraphError::InvalidOperation(format!(
                "Linear 层{name}的特征维度必须为正，但得到 {in_features}→{out_features}"
            )));
        }
        let init = Init::KaimingUniform {
            fan_in: in_features,
        };
        let weights = graph.parameter(
            &[in_features, out_features],
            init.clone(),
            &format!("{name}_W"),
        )?;
        let bias = if use_bias {
            Some(graph.parameter(&[1, out_features], init, &format!("{name}_b"))?)
        } else {
            None
        };

        Ok(Self {
            weights,
            bias,
            in_features,
            out_features,
            name: name.to_string(),
        })
    }

    /// 计算`x @ W + b`
    pub fn forward(&self, x: &Var) -> Result<Var, GraphError> {
        let xw = x.matmul(&self.weights)?;
        match &self.bias {
            Some(bias) => xw.try_add(bias),
            None => Ok(xw),
        }
    }

    pub const fn in_features(&self) -> usize {
        self.in_features
    }

    pub const fn out_features(&self) -> usize {
        self.out_features
    }

    pub const fn weights(&self) -> &Var {
        &self.weights
    }

    pub const fn bias(&self) -> Option<&Var> {
        self.bias.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Module for Linear {
    fn parameters(&self) -> Vec<Var> {
        let mut params = vec![self.weights.clone()];
        if let Some(bias) = &self.bias {
            params.push(bias.clone());
        }
        params
    }
}
