/// 错误断言宏 - 按需要的粒度验证 Result 中的错误
///
/// # 用法
/// - `assert_err!(expr)` : 只验证是 Err
/// - `assert_err!(expr, Variant(literal))` : 验证错误类型 + 精确消息（String 变体）
/// - `assert_err!(expr, NodeNotFound(id))` : 验证节点不存在的错误及其id
/// - `assert_err!(expr, Pattern { .. })` : 验证错误类型
/// - `assert_err!(expr, Pattern { field, .. } if condition)` : 验证类型 + 条件
///
/// # 示例
/// ```ignore
/// assert_err!(result, GraphError::InvalidOperation("反向传播的起点须为标量节点"));
/// assert_err!(result, GraphError::ShapeMismatch { expected, .. } if expected == &[2, 2]);
/// ```
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        assert!($expr.is_err(), "预期 Err，实际得到 {:?}", $expr);
    };
    ($expr:expr, $err_type:ident :: $variant:ident ( $expected:literal )) => {
        match &$expr {
            Err($err_type::$variant(actual)) => assert_eq!(
                actual, $expected,
                "错误消息不匹配：预期 `{}`，实际得到 `{}`",
                $expected, actual
            ),
            Err(e) => panic!(
                "错误类型不匹配：预期 `{}::{}`，实际得到 `{:?}`",
                stringify!($err_type), stringify!($variant), e
            ),
            Ok(v) => panic!(
                "预期 Err({}::{})，实际得到 Ok({:?})",
                stringify!($err_type), stringify!($variant), v
            ),
        }
    };
    ($expr:expr, $err_type:ident :: NodeNotFound ( $id:expr )) => {
        match &$expr {
            Err($err_type::NodeNotFound(id)) => assert_eq!(*id, $id, "节点id不匹配"),
            Err(e) => panic!(
                "错误类型不匹配：预期 `{}::NodeNotFound`，实际得到 `{:?}`",
                stringify!($err_type), e
            ),
            Ok(v) => panic!(
                "预期 Err({}::NodeNotFound)，实际得到 Ok({:?})",
                stringify!($err_type), v
            ),
        }
    };
    ($expr:expr, $($pattern:tt)+) => {
        match &$expr {
            Err(e) => assert!(
                matches!(e, $($pattern)+),
                "错误类型不匹配：预期 `{}`，实际得到 `{:?}`",
                stringify!($($pattern)+),
                e
            ),
            Ok(v) => panic!(
                "预期 Err 匹配 `{}`，实际得到 Ok({:?})",
                stringify!($($pattern)+),
                v
            ),
        }
    };
}

/// panic断言宏：`assert_panic!(expr)`只验证发生了panic，
/// `assert_panic!(expr, msg)`还会比对panic消息（`msg`可以是任何实现了`Display`的值，如错误枚举）
#[macro_export]
macro_rules! assert_panic {
    ($expr:expr) => {
        if std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $expr)).is_ok() {
            panic!("表达式没有触发panic");
        }
    };
    ($expr:expr, $expected_msg:expr) => {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $expr)) {
            Ok(_) => panic!("表达式没有触发panic"),
            Err(err) => {
                let expected = $expected_msg.to_string();
                let actual = err
                    .downcast_ref::<String>()
                    .cloned()
                    .or_else(|| err.downcast_ref::<&'static str>().map(|s| s.to_string()));
                match actual {
                    Some(msg) => assert_eq!(msg, expected, "panic消息与预期不符"),
                    None => panic!("未找到预期的panic消息，预期的panic消息为: {expected}"),
                }
            }
        }
    };
}

/// 逐元素比较张量与期望数据（形状与数值都要匹配）
#[macro_export]
macro_rules! assert_tensor_close {
    ($tensor:expr, $expected:expr, $shape:expr) => {
        $crate::assert_tensor_close!($tensor, $expected, $shape, 1e-5)
    };
    ($tensor:expr, $expected:expr, $shape:expr, $eps:expr) => {{
        let tensor = &$tensor;
        let shape: &[usize] = &$shape;
        assert_eq!(tensor.shape(), shape, "张量形状不符");
        let expected: &[f32] = &$expected;
        assert_eq!(tensor.size(), expected.len(), "元素个数不符");
        for (a, e) in tensor.to_vec().iter().zip(expected.iter()) {
            approx::assert_abs_diff_eq!(*a, *e, epsilon = $eps);
        }
    }};
}
