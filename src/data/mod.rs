//! 数据加载模块
//!
//! 提供数据集加载、变换和批处理功能。
//!
//! # 主要组件
//!
//! - [`DataLoader`]: `PyTorch` 风格的数据批量加载器
//! - [`TensorDataset`]: 持有特征和标签的数据集
//! - [`MnistDataset`]: MNIST 手写数字数据集（GAN 的真实样本来源）
//! - [`transforms`]: 数据变换函数（归一化、one-hot 等）
//! - [`DataError`]: 数据加载错误类型
//!
//! # 使用示例
//!
//! ```ignore
//! use gan_primer::data::{DataLoader, MnistDataset};
//!
//! let mnist = MnistDataset::train()?.flatten().normalize(0.5, 0.5)?;
//! let loader = DataLoader::new(mnist.to_tensor_dataset()?, 32)
//!     .shuffle(true)
//!     .drop_last(true)
//!     .seed(42);
//!
//! for (real, _labels) in &loader {
//!     // real: [32, 784]，值域[-1, 1]
//! }
//! ```

mod dataloader;
pub mod datasets;
pub mod download;
pub mod error;
pub mod transforms;


// Re-exports
pub use dataloader::{DataLoader, DataLoaderIterator, TensorDataset};
pub use datasets::{MNIST_IMAGE_PIXELS, MNIST_IMAGE_SIDE, MnistDataset, default_data_dir};
pub use error::DataError;
