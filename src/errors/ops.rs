use std::fmt::{self, Display};

/// 张量的二元运算符
#[derive(Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Mul,
    MulAssign,
    Div,
    DivAssign,
    MatMul,
}
impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operation_name = match self {
            Self::Add => "相加",
            Self::AddAssign => "自相加",
            Self::Sub => "相减",
            Self::SubAssign => "自相减",
            Self::Mul => "逐元素相乘",
            Self::MulAssign => "自相乘",
            Self::Div => "相除",
            Self::DivAssign => "自相除",
            Self::MatMul => "矩阵相乘",
        };
        write!(f, "{operation_name}")
    }
}

/// 比较运算符
#[derive(Debug, PartialEq, Eq)]
pub enum ComparisonOperator {
    GreaterOrEqual,
    LessOrEqual,
    GreaterThan,
    LessThan,
}
impl Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator_name = match self {
            Self::GreaterOrEqual => "≥",
            Self::LessOrEqual => "≤",
            Self::GreaterThan => ">",
            Self::LessThan => "<",
        };
        write!(f, "{operator_name}")
    }
}
