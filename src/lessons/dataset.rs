//! 第 4 节：加载 MNIST，归一化到[-1, 1]并分批

use std::fmt;

use serde::Serialize;

use super::ShapeDisplay;
use crate::data::{DataLoader, MnistDataset};
use crate::error::Result;
use crate::gan::GanConfig;

/// 离线且未指定`train_limit`时合成的样本数
const SYNTHETIC_SAMPLES: usize = 1024;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetReport {
    /// "mnist" 或 "synthetic"
    pub source: String,
    pub samples: usize,
    pub image_shape: Vec<usize>,
    pub batch_shape: Vec<usize>,
    pub label_shape: Vec<usize>,
    pub num_batches: usize,
    pub pixel_min: f32,
    pub pixel_max: f32,
}

/// 按配置加载训练图像：展平为[N, 784]并归一化到[-1, 1]
///
/// `offline`时使用合成数据，否则读取（必要时下载）MNIST 训练集。
pub fn load_training_images(config: &GanConfig) -> Result<(MnistDataset, &'static str)> {
    let (dataset, source) = if config.offline {
        let n = config.train_limit.unwrap_or(SYNTHETIC_SAMPLES);
        (MnistDataset::synthetic(n, config.seed), "synthetic")
    } else {
        (
            MnistDataset::load(config.data_dir.as_deref(), true, true)?,
            "mnist",
        )
    };
    let dataset = match config.train_limit {
        Some(limit) => dataset.take(limit),
        None => dataset,
    };
    tracing::info!("已加载 {} 个训练样本（{source}）", dataset.len());
    Ok((dataset.flatten().normalize(0.5, 0.5)?, source))
}

pub fn run(config: &GanConfig) -> Result<DatasetReport> {
    config.validate()?;
    let (dataset, source) = load_training_images(config)?;
    let image_shape = dataset.input_shape();
    let loader = DataLoader::new(dataset.to_tensor_dataset()?, config.batch_size)
        .shuffle(true)
        .seed(config.seed);

    let (batch_shape, label_shape) = loader
        .iter()
        .next()
        .map(|(x, y)| (x.shape().to_vec(), y.shape().to_vec()))
        .unwrap_or_default();

    Ok(DatasetReport {
        source: source.to_string(),
        samples: dataset.len(),
        image_shape,
        batch_shape,
        label_shape,
        num_batches: loader.num_batches(),
        pixel_min: dataset.images().min_value(),
        pixel_max: dataset.images().max_value(),
    })
}

impl fmt::Display for DatasetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "数据来源: {}，样本 {} 个，单个样本形状 {}",
            self.source,
            self.samples,
            ShapeDisplay(&self.image_shape)
        )?;
        writeln!(
            f,
            "每批: 图像 {}，标签 {}，共 {} 批",
            ShapeDisplay(&self.batch_shape),
            ShapeDisplay(&self.label_shape),
            self.num_batches
        )?;
        writeln!(
            f,
            "归一化后像素范围: [{:.3}, {:.3}]",
            self.pixel_min, self.pixel_max
        )
    }
}
