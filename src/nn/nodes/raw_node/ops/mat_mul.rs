use super::super::{NodeCore, NodeHandle, TraitNode, check_parents_count, parent_value};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 矩阵乘法节点：`C = A @ B`，A为[m, k]，B为[k, n]
///
/// VJP：∂L/∂A = G @ Bᵀ，∂L/∂B = Aᵀ @ G（G为上游梯度[m, n]）
#[derive(Clone)]
pub(crate) struct MatMul {
    core: NodeCore,
}

impl MatMul {
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        check_parents_count("MatMul", parents, 2)?;
        let (a, b) = (
            parents[0].value_expected_shape(),
            parents[1].value_expected_shape(),
        );
        if a.len() != 2 || b.len() != 2 {
            return Err(GraphError::DimensionMismatch {
                expected: 2,
                got: if a.len() == 2 { b.len() } else { a.len() },
                message: "MatMul节点的两个父节点都须为2维矩阵".to_string(),
            });
        }
        if a[1] != b[0] {
            return Err(GraphError::ShapeMismatch {
                expected: vec![a[1], b[1]],
                got: b.to_vec(),
                message: format!("MatMul节点要求前者列数({})等于后者行数({})", a[1], b[0]),
            });
        }
        Ok(Self {
            core: NodeCore::with_shape(&[a[0], b[1]]),
        })
    }
}

impl TraitNode for MatMul {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        "mat_mul"
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let a = parent_value(&self.core, self.type_name(), parents[0])?;
        let b = parent_value(&self.core, self.type_name(), parents[1])?;
        let value = a.try_mat_mul(b).map_err(|e| {
            GraphError::ComputationError(format!("{}前向计算失败：{e}", self.display_node()))
        })?;
        self.core.value = Some(value);
        Ok(())
    }

    fn calc_grad_to_parent(
        &self,
        target_index: usize,
        parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let grad = if target_index == 0 {
            let b = parent_value(&self.core, self.type_name(), parents[1])?;
            upstream_grad.try_mat_mul(&b.transpose())
        } else {
            let a = parent_value(&self.core, self.type_name(), parents[0])?;
            a.transpose().try_mat_mul(upstream_grad)
        };
        grad.map_err(|e| {
            GraphError::ComputationError(format!("{}反向计算失败：{e}", self.display_node()))
        })
    }
}
