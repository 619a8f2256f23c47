//! 第 3 节：构建生成器与判别器，并把一批噪声依次送过两者

use std::fmt;

use serde::Serialize;

use super::ShapeDisplay;
use crate::error::Result;
use crate::gan::{Discriminator, GanConfig, Generator};
use crate::nn::{Graph, GraphError, Module};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworksReport {
    pub noise_shape: Vec<usize>,
    pub generator_output_shape: Vec<usize>,
    pub discriminator_output_shape: Vec<usize>,
    pub generator_params: usize,
    pub discriminator_params: usize,
    /// G 输出的 (最小值, 最大值)，应在(-1, 1)内
    pub generator_range: (f32, f32),
    /// D 输出的均值，未训练时接近 0.5
    pub discriminator_mean: f32,
}

pub fn run(config: &GanConfig) -> Result<NetworksReport> {
    config.validate()?;
    let graph = Graph::new_with_seed(config.seed);
    let generator = Generator::new(&graph, config)?;
    let discriminator = Discriminator::new(&graph, config)?;

    let z = graph.randn(&[config.batch_size, config.z_dim])?;
    let fake = generator.forward(&z)?;
    let score = discriminator.forward(&fake)?;
    score.forward()?;

    let missing = || GraphError::ComputationError("前向传播后节点没有值".to_string());
    let noise = z.value()?.ok_or_else(missing)?;
    let images = fake.value()?.ok_or_else(missing)?;
    let probs = score.value()?.ok_or_else(missing)?;

    Ok(NetworksReport {
        noise_shape: noise.shape().to_vec(),
        generator_output_shape: images.shape().to_vec(),
        discriminator_output_shape: probs.shape().to_vec(),
        generator_params: generator.num_elements(),
        discriminator_params: discriminator.num_elements(),
        generator_range: (images.min_value(), images.max_value()),
        discriminator_mean: probs.mean_value(),
    })
}

impl fmt::Display for NetworksReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "G: {} → {}，参数 {} 个，输出范围 [{:.3}, {:.3}]",
            ShapeDisplay(&self.noise_shape),
            ShapeDisplay(&self.generator_output_shape),
            self.generator_params,
            self.generator_range.0,
            self.generator_range.1
        )?;
        writeln!(
            f,
            "D: {} → {}，参数 {} 个，输出均值 {:.3}",
            ShapeDisplay(&self.generator_output_shape),
            ShapeDisplay(&self.discriminator_output_shape),
            self.discriminator_params,
            self.discriminator_mean
        )
    }
}
