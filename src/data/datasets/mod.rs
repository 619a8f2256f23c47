//! 内置数据集：MNIST 手写数字（含离线可用的合成替身）

mod mnist;

pub use mnist::{MNIST_IMAGE_PIXELS, MNIST_IMAGE_SIDE, MnistDataset, default_data_dir};
