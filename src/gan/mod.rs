/*
 * @Description  : 最小的 GAN：全连接的生成器 G、判别器 D，以及交替训练二者的循环
 */

mod config;
mod models;
mod trainer;

#[cfg(test)]
mod tests;

pub use config::GanConfig;
pub use models::{Discriminator, Generator};
pub use trainer::{EpochStats, GanTrainer, StepStats, TrainingHistory, grid_columns};
