mod add;
mod divide;
mod identity;
mod leaky_relu;
mod mat_mul;
mod mean;
mod multiply;
mod pow;
mod scalar_multiply;
mod sigmoid;
mod subtract;
mod sum;
mod tanh;

pub(crate) use add::Add;
pub(crate) use divide::Divide;
pub(crate) use identity::Identity;
pub(crate) use leaky_relu::LeakyReLU;
pub(crate) use mat_mul::MatMul;
pub(crate) use mean::Mean;
pub(crate) use multiply::Multiply;
pub(crate) use pow::Pow;
pub(crate) use scalar_multiply::ScalarMultiply;
pub(crate) use sigmoid::Sigmoid;
pub(crate) use subtract::Subtract;
pub(crate) use sum::Sum;
pub(crate) use tanh::Tanh;
