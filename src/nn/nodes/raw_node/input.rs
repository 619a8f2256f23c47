use super::{NodeCore, NodeHandle, TraitNode};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 输入节点：存放样本、标签或常量，不接收梯度。
/// 设置的值须与建图时的形状阶数相同且除第一维（批大小）外一致。
#[derive(Clone)]
pub(crate) struct Input {
    core: NodeCore,
}

impl Input {
    pub(crate) fn new(shape: &[usize]) -> Result<Self, GraphError> {
        if shape.is_empty() || shape.contains(&0) {
            return Err(GraphError::InvalidOperation(format!(
                "输入节点的形状{shape:?}不能为空或含有0"
            )));
        }
        Ok(Self {
            core: NodeCore::with_shape(shape),
        })
    }
}

impl TraitNode for Input {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        "input"
    }

    fn set_value(&mut self, value: Option<&Tensor>) -> Result<(), GraphError> {
        if let Some(v) = value {
            let expected = &self.core.shape;
            let compatible = v.dimension() == expected.len()
                && v.shape()[1..] == expected[1..]
                && v.shape()[0] > 0;
            if !compatible {
                return Err(GraphError::ShapeMismatch {
                    expected: expected.clone(),
                    got: v.shape().to_vec(),
                    message: format!(
                        "{}的值除第一维外须与建图时的形状一致",
                        self.display_node()
                    ),
                });
            }
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
