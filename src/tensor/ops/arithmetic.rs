/*
 * @Description  : 张量的四则运算，均为“逐元素”运算，并返回一个新的张量。
 *                 1. 其中一个操作数为纯数而另一个为张量：返回的张量形状与该张量相同；
 *                 2. 两个操作数均为张量：支持NumPy风格的广播（broadcasting），
 *                    形状无法广播时panic。
 *                 除法额外检查除数是否为零。
 */

use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;
use std::ops::{Add, Div, Mul, Sub};

/// 张量与张量之间的带广播二元运算
fn broadcast_op(
    lhs: &Tensor,
    rhs: &Tensor,
    operator: Operator,
    op: impl Fn(&ndarray::ArrayD<f32>, &ndarray::ArrayD<f32>) -> ndarray::ArrayD<f32>,
) -> Tensor {
    if !lhs.can_broadcast_with(rhs) {
        panic!(
            "{}",
            TensorError::OperatorError {
                operator,
                tensor1_shape: lhs.shape().to_vec(),
                tensor2_shape: rhs.shape().to_vec(),
            }
        );
    }
    Tensor::from_array(op(lhs.array(), rhs.array()))
}

fn check_divisor_tensor(divisor: &Tensor) {
    assert!(
        !divisor.array().iter().any(|&x| x == 0.0),
        "{}",
        TensorError::DivByZeroElement
    );
}

fn check_divisor_number(divisor: f32) {
    assert!(divisor != 0.0, "{}", TensorError::DivByZero);
}

/// 为`Tensor`/`&Tensor`与`Tensor`/`&Tensor`/`f32`的所有组合生成运算符实现
macro_rules! impl_tensor_binary_op {
    ($trait:ident, $method:ident, $operator:expr, $op:tt, $tensor_guard:expr, $number_guard:expr) => {
        /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓张量与张量↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
        impl<'b> $trait<&'b Tensor> for &Tensor {
            type Output = Tensor;

            fn $method(self, other: &'b Tensor) -> Tensor {
                $tensor_guard(other);
                broadcast_op(self, other, $operator, |a, b| a $op b)
            }
        }
        impl $trait for Tensor {
            type Output = Tensor;

            fn $method(self, other: Tensor) -> Tensor {
                (&self).$method(&other)
            }
        }
        impl<'b> $trait<&'b Tensor> for Tensor {
            type Output = Tensor;

            fn $method(self, other: &'b Tensor) -> Tensor {
                (&self).$method(other)
            }
        }
        impl $trait<Tensor> for &Tensor {
            type Output = Tensor;

            fn $method(self, other: Tensor) -> Tensor {
                self.$method(&other)
            }
        }
        /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑张量与张量↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

        /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓张量与纯数↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
        impl $trait<f32> for &Tensor {
            type Output = Tensor;

            fn $method(self, number: f32) -> Tensor {
                $number_guard(number);
                Tensor::from_array(self.array() $op number)
            }
        }
        impl $trait<f32> for Tensor {
            type Output = Tensor;

            fn $method(self, number: f32) -> Tensor {
                (&self).$method(number)
            }
        }
        impl $trait<&Tensor> for f32 {
            type Output = Tensor;

            fn $method(self, tensor: &Tensor) -> Tensor {
                $tensor_guard(tensor);
                Tensor::from_array(tensor.array().mapv(|x| self $op x))
            }
        }
        impl $trait<Tensor> for f32 {
            type Output = Tensor;

            fn $method(self, tensor: Tensor) -> Tensor {
                self.$method(&tensor)
            }
        }
        /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑张量与纯数↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
    };
}

fn no_tensor_guard(_: &Tensor) {}
fn no_number_guard(_: f32) {}

impl_tensor_binary_op!(Add, add, Operator::Add, +, no_tensor_guard, no_number_guard);
impl_tensor_binary_op!(Sub, sub, Operator::Sub, -, no_tensor_guard, no_number_guard);
impl_tensor_binary_op!(Mul, mul, Operator::Mul, *, no_tensor_guard, no_number_guard);
impl_tensor_binary_op!(Div, div, Operator::Div, /, check_divisor_tensor, check_divisor_number);
