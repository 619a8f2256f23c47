use super::{NodeCore, NodeHandle, TraitNode};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 参数节点：可训练的权重/偏置，梯度在多次反向传播间累加，直到被清零
#[derive(Clone)]
pub(crate) struct Parameter {
    core: NodeCore,
}

impl Parameter {
    /// 参数初始值由调用方（`Graph::parameter`按`Init`策略）设置
    pub(crate) fn new(shape: &[usize]) -> Result<Self, GraphError> {
        if shape.len() != 2 {
            return Err(GraphError::DimensionMismatch {
                expected: 2,
                got: shape.len(),
                message: "参数张量须为2维（如全连接层权重[in, out]或偏置[1, out]）".to_string(),
            });
        }
        Ok(Self {
            core: NodeCore::with_shape(shape),
        })
    }
}

impl TraitNode for Parameter {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        "parameter"
    }

    fn set_value(&mut self, value: Option<&Tensor>) -> Result<(), GraphError> {
        if let Some(v) = value.filter(|v| v.shape() != self.core.shape.as_slice()) {
            return Err(GraphError::ShapeMismatch {
                expected: self.core.shape.clone(),
                got: v.shape().to_vec(),
                message: format!("{}的新值形状须与原形状一致", self.display_node()),
            });
        }
        self.core.value = value.cloned();
        Ok(())
    }

    fn calc_value_by_parents(&mut self, _parents: &[&NodeHandle]) -> Result<(), GraphError> {
        Err(GraphError::InvalidOperation(format!(
            "{}被执行了前向传播。不该触及本错误，否则说明crate代码有问题",
            self.display_node()
        )))
    }

    fn calc_grad_to_parent(
        &self,
        _target_index: usize,
        _parents: &[&NodeHandle],
        _upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        Err(GraphError::InvalidOperation(format!(
            "{}没有父节点。不该触及本错误，否则说明crate代码有问题",
            self.display_node()
        )))
    }
}
