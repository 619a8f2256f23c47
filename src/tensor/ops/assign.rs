use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

// 复合赋值：右侧张量只允许广播到左侧的形状，左侧形状保持不变
macro_rules! impl_tensor_assign_op {
    ($trait:ident, $method:ident, $bin_method:ident, $operator:expr) => {
        impl<'a> $trait<&'a Tensor> for Tensor {
            fn $method(&mut self, other: &'a Tensor) {
                let result = (&*self).$bin_method(other);
                if result.shape() != self.shape() {
                    panic!(
                        "{}",
                        TensorError::OperatorError {
                            operator: $operator,
                            tensor1_shape: self.shape().to_vec(),
                            tensor2_shape: other.shape().to_vec(),
                        }
                    );
                }
                *self = result;
            }
        }
        impl $trait for Tensor {
            fn $method(&mut self, other: Tensor) {
                self.$method(&other);
            }
        }
        impl $trait<f32> for Tensor {
            fn $method(&mut self, number: f32) {
                *self = (&*self).$bin_method(number);
            }
        }
    };
}

use std::ops::{Add, Div, Mul, Sub};

impl_tensor_assign_op!(AddAssign, add_assign, add, Operator::AddAssign);
impl_tensor_assign_op!(SubAssign, sub_assign, sub, Operator::SubAssign);
impl_tensor_assign_op!(MulAssign, mul_assign, mul, Operator::MulAssign);
impl_tensor_assign_op!(DivAssign, div_assign, div, Operator::DivAssign);
