/*
 * @Description  : GAN 训练配置，可由 JSON 加载，缺省字段取默认值
 */

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// GAN 的网络结构与训练超参数
///
/// ```ignore
/// let config = GanConfig::from_json_file(Path::new("gan.json"))?;
/// // {"epochs": 5, "batch_size": 64} 之外的字段取默认值
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GanConfig {
    /// 噪声向量维度
    pub z_dim: usize,
    /// 展平后的图像维度（28*28）
    pub image_dim: usize,
    pub d_hidden: usize,
    pub g_hidden: usize,
    /// 隐藏层 LeakyReLU 的负半轴斜率
    pub leaky_slope: f32,

    pub learning_rate: f32,
    pub beta1: f32,
    pub beta2: f32,
    pub batch_size: usize,
    pub epochs: usize,
    pub seed: u64,

    /// 用于可视化的固定噪声个数
    pub num_samples: usize,
    /// 每隔多少步输出一次 debug 日志
    pub log_every: usize,
    /// 只取前若干个训练样本，None 为全部
    pub train_limit: Option<usize>,
    /// 不下载 MNIST，改用合成数据
    pub offline: bool,
    pub data_dir: Option<PathBuf>,
    /// 每轮结束后保存样本网格的目录
    pub out_dir: Option<PathBuf>,
}

impl Default for GanConfig {
    fn default() -> Self {
        Self {
            z_dim: 64,
            image_dim: 784,
            d_hidden: 128,
            g_hidden: 256,
            leaky_slope: 0.1,
            learning_rate: 3e-4,
            beta1: 0.5,
            beta2: 0.999,
            batch_size: 32,
            epochs: 50,
            seed: 42,
            num_samples: 16,
            log_every: 100,
            train_limit: None,
            offline: false,
            data_dir: None,
            out_dir: None,
        }
    }
}

impl GanConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    /// 检查各尺寸为正、学习率为正的有限数、β 与斜率在[0, 1)内
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("z_dim", self.z_dim),
            ("image_dim", self.image_dim),
            ("d_hidden", self.d_hidden),
            ("g_hidden", self.g_hidden),
            ("batch_size", self.batch_size),
            ("epochs", self.epochs),
            ("num_samples", self.num_samples),
            ("log_every", self.log_every),
        ];
        if let Some((name, _)) = sizes.iter().find(|(_, v)| *v == 0) {
            return Err(Error::Config(format!("{name}必须大于 0")));
        }
        if self.train_limit == Some(0) {
            return Err(Error::Config("train_limit 必须大于 0".to_string()));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(Error::Config(format!(
                "learning_rate 必须为正的有限数，但得到 {}",
                self.learning_rate
            )));
        }
        for (name, value) in [
            ("beta1", self.beta1),
            ("beta2", self.beta2),
            ("leaky_slope", self.leaky_slope),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(Error::Config(format!("{name}须在[0, 1)内，但得到 {value}")));
            }
        }
        Ok(())
    }
}
