//! # GAN Primer
//!
//! 用纯rust从零走一遍GAN（生成对抗网络）入门：
//! 先认识张量与自动微分，再用线性回归体会梯度下降，最后在MNIST上交替训练生成器与判别器。
//!
//! 除`ndarray`提供的多维数组外，计算图、反向传播、全连接层与优化器都在本crate内实现，
//! 接口尽量贴近pytorch。各小节见[`lessons`]，命令行入口见`src/main.rs`。
//!

pub mod data;
pub mod error;
pub mod errors;
pub mod gan;
pub mod lessons;
pub mod nn;
pub mod tensor;
pub mod utils;
pub mod vision;

pub use error::{Error, Result};
