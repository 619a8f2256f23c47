//! 第 7 节：对抗训练，结束后用固定噪声生成样本

use std::fmt;

use serde::Serialize;

use super::dataset::load_training_images;
use super::samples::{self, SamplesReport};
use crate::error::Result;
use crate::gan::{GanConfig, GanTrainer, TrainingHistory, grid_columns};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GanReport {
    pub source: String,
    pub samples_used: usize,
    pub history: TrainingHistory,
    pub samples: SamplesReport,
}

pub fn train(config: &GanConfig) -> Result<GanReport> {
    let (dataset, source) = load_training_images(config)?;
    let mut trainer = GanTrainer::new(config.clone())?;
    let history = trainer.train(&dataset.to_tensor_dataset()?)?;

    let generated = trainer.generate(config.num_samples)?;
    let out = config.out_dir.as_ref().map(|dir| dir.join("final.png"));
    let samples = samples::show(&generated, grid_columns(config.num_samples), out.as_deref())?;

    Ok(GanReport {
        source: source.to_string(),
        samples_used: dataset.len(),
        history,
        samples,
    })
}

impl fmt::Display for GanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "训练数据: {}（{} 个样本）", self.source, self.samples_used)?;
        for e in &self.history.epochs {
            writeln!(
                f,
                "epoch {:>3}: loss_D={:.4} loss_G={:.4} D(x)={:.3} D(G(z))={:.3}",
                e.epoch, e.d_loss, e.g_loss, e.d_real, e.d_fake
            )?;
        }
        write!(f, "{}", self.samples)
    }
}
