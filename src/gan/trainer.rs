/*
 * @Description  : GAN 训练循环：每个小批次先更新一次 D，再更新一次 G
 *
 * 整个训练共用一张静态图（按 batch_size 构建），每步只通过 set_value 喂入新数据：
 *   fake   = G(z)
 *   loss_D = ½·(BCE(D(real), 1) + BCE(D(fake.detach()), 0))
 *   loss_G = BCE(D(fake), 1)
 * 另有两条只经过 G 的支路，分别用于固定噪声的可视化和任意噪声的生成。
 */

use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use super::{Discriminator, GanConfig, Generator};
use crate::data::{DataError, DataLoader, TensorDataset};
use crate::error::{Error, Result};
use crate::nn::{Adam, Graph, GraphError, Module, Optimizer, Var, VarLossOps, VarReduceOps};
use crate::tensor::Tensor;
use crate::vision::Vision;

/// 单步训练的统计
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepStats {
    pub d_loss: f32,
    pub g_loss: f32,
    /// D 对真实样本输出的均值（更新 D 之前）
    pub d_real: f32,
    /// D 对生成样本输出的均值（更新 D 之前）
    pub d_fake: f32,
}

/// 一轮的平均统计
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EpochStats {
    pub epoch: usize,
    pub steps: usize,
    pub d_loss: f32,
    pub g_loss: f32,
    pub d_real: f32,
    pub d_fake: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrainingHistory {
    pub epochs: Vec<EpochStats>,
}

impl TrainingHistory {
    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    pub fn last(&self) -> Option<&EpochStats> {
        self.epochs.last()
    }

    /// 各轮的 (d_loss, g_loss)
    pub fn losses(&self) -> Vec<(f32, f32)> {
        self.epochs.iter().map(|e| (e.d_loss, e.g_loss)).collect()
    }
}

pub struct GanTrainer {
    config: GanConfig,
    graph: Graph,
    generator: Generator,
    discriminator: Discriminator,
    optimizer_g: Adam,
    optimizer_d: Adam,
    /// 每步噪声的来源
    rng: StdRng,

    real: Var,
    z: Var,
    real_target: Var,
    fake_target: Var,
    d_real: Var,
    d_fake: Var,
    loss_d: Var,
    loss_g: Var,

    z_fixed: Var,
    fixed_out: Var,
    z_free: Var,
    free_out: Var,

    steps: usize,
}

impl GanTrainer {
    pub fn new(config: GanConfig) -> Result<Self> {
        config.validate()?;
        let graph = Graph::new_with_seed(config.seed);
        let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(1));

        let generator = Generator::new(&graph, &config)?;
        let discriminator = Discriminator::new(&graph, &config)?;

        let batch = config.batch_size;
        let real = graph.input_shape(&[batch, config.image_dim], Some("real"))?;
        let z = graph.input_shape(&[batch, config.z_dim], Some("z"))?;
        let real_target = graph.input_named(&Tensor::ones(&[batch, 1]), "real_target")?;
        let fake_target = graph.input_named(&Tensor::zeros(&[batch, 1]), "fake_target")?;

        // 判别器损失：生成样本经 detach 截断，D 的更新不影响 G
        let fake = generator.forward(&z)?;
        let d_real = discriminator.forward(&real)?;
        let d_fake = discriminator.forward(&fake.detach()?)?;
        let loss_d = d_real
            .bce_loss(&real_target)?
            .try_add(&d_fake.bce_loss(&fake_target)?)?
            .scale(0.5);

        // 生成器损失：希望 D 把生成样本判为真
        let loss_g = discriminator.forward(&fake)?.bce_loss(&real_target)?;

        let fixed_noise = Tensor::normal_with_rng(0.0, 1.0, &[config.num_samples, config.z_dim], &mut rng);
        let z_fixed = graph.input_named(&fixed_noise, "z_fixed")?;
        let fixed_out = generator.forward(&z_fixed)?;
        let z_free = graph.input_shape(&[1, config.z_dim], Some("z_free"))?;
        let free_out = generator.forward(&z_free)?;

        let optimizer_g = Adam::with_config(
            &graph,
            &generator.parameters(),
            config.learning_rate,
            config.beta1,
            config.beta2,
            1e-8,
        )?;
        let optimizer_d = Adam::with_config(
            &graph,
            &discriminator.parameters(),
            config.learning_rate,
            config.beta1,
            config.beta2,
            1e-8,
        )?;

        tracing::info!(
            "GAN 已构建：G 参数 {} 个，D 参数 {} 个，计算图节点 {} 个",
            generator.num_elements(),
            discriminator.num_elements(),
            graph.nodes_count()
        );

        Ok(Self {
            config,
            graph,
            generator,
            discriminator,
            optimizer_g,
            optimizer_d,
            rng,
            real,
            z,
            real_target,
            fake_target,
            d_real,
            d_fake,
            loss_d,
            loss_g,
            z_fixed,
            fixed_out,
            z_free,
            free_out,
            steps: 0,
        })
    }

    /// 用一个真实样本批[n, image_dim]训练一步（先 D 后 G），噪声每步重新采样
    pub fn train_step(&mut self, real_batch: &Tensor) -> Result<StepStats> {
        let n = real_batch.shape().first().copied().unwrap_or(0);
        let noise = Tensor::normal_with_rng(0.0, 1.0, &[n, self.config.z_dim], &mut self.rng);
        self.real.set_value(real_batch)?;
        self.z.set_value(&noise)?;
        self.real_target.set_value(&Tensor::ones(&[n, 1]))?;
        self.fake_target.set_value(&Tensor::zeros(&[n, 1]))?;

        // 1. 判别器：保留中间值以读取 D 的输出
        self.optimizer_d.zero_grad()?;
        let d_loss = self.loss_d.backward_ex(true)?;
        let d_real = Self::mean_of(&self.d_real)?;
        let d_fake = Self::mean_of(&self.d_fake)?;
        self.optimizer_d.step()?;

        // 2. 生成器：前向时 D 已是更新后的权重
        self.optimizer_g.zero_grad()?;
        let g_loss = self.loss_g.backward()?;
        self.optimizer_g.step()?;

        self.steps += 1;
        let stats = StepStats {
            d_loss,
            g_loss,
            d_real,
            d_fake,
        };
        if self.steps % self.config.log_every == 0 {
            tracing::debug!(
                "step {}: loss_D={:.4} loss_G={:.4} D(x)={:.3} D(G(z))={:.3}",
                self.steps,
                stats.d_loss,
                stats.g_loss,
                stats.d_real,
                stats.d_fake
            );
        }
        Ok(stats)
    }

    /// 在`dataset`（特征为[N, image_dim]）上训练`epochs`轮
    ///
    /// 每轮打乱数据并丢弃不完整的最后一批；配置了`out_dir`时每轮保存一张样本网格。
    pub fn train(&mut self, dataset: &TensorDataset) -> Result<TrainingHistory> {
        let features = dataset.features().shape();
        if features.len() != 2 || features[1] != self.config.image_dim {
            return Err(DataError::ShapeMismatch {
                expected: vec![dataset.len(), self.config.image_dim],
                got: features.to_vec(),
            }
            .into());
        }
        if dataset.len() < self.config.batch_size {
            return Err(Error::Config(format!(
                "样本数{}少于 batch_size {}",
                dataset.len(),
                self.config.batch_size
            )));
        }

        let mut loader = DataLoader::new(dataset.clone(), self.config.batch_size)
            .shuffle(true)
            .drop_last(true)
            .seed(self.config.seed);

        let mut history = TrainingHistory::default();
        for epoch in 1..=self.config.epochs {
            loader.set_epoch(epoch as u64);
            let mut sums = [0.0f32; 4];
            let mut steps = 0;
            for (real, _) in &loader {
                let stats = self.train_step(&real)?;
                for (sum, value) in sums
                    .iter_mut()
                    .zip([stats.d_loss, stats.g_loss, stats.d_real, stats.d_fake])
                {
                    *sum += value;
                }
                steps += 1;
            }

            let mean = |i: usize| sums[i] / steps as f32;
            let epoch_stats = EpochStats {
                epoch,
                steps,
                d_loss: mean(0),
                g_loss: mean(1),
                d_real: mean(2),
                d_fake: mean(3),
            };
            tracing::info!(
                "epoch {}/{}: loss_D={:.4} loss_G={:.4} D(x)={:.3} D(G(z))={:.3}",
                epoch,
                self.config.epochs,
                epoch_stats.d_loss,
                epoch_stats.g_loss,
                epoch_stats.d_real,
                epoch_stats.d_fake
            );
            history.epochs.push(epoch_stats);

            if let Some(out_dir) = self.config.out_dir.clone() {
                self.save_samples(&out_dir.join(format!("epoch_{epoch:03}.png")))?;
            }
        }
        Ok(history)
    }

    /// 固定噪声前`n`行对应的生成样本[n, image_dim]，在 no_grad 下计算。`n`须在1..=num_samples内
    pub fn generate(&self, n: usize) -> Result<Tensor> {
        if n == 0 || n > self.config.num_samples {
            return Err(Error::Config(format!(
                "生成样本数{n}须在1..={}之间",
                self.config.num_samples
            )));
        }
        let samples = self.graph.no_grad_scope(|_| Self::eval_output(&self.fixed_out))?;
        Ok(samples.slice_rows(0..n))
    }

    /// 由给定噪声[n, z_dim]生成样本[n, image_dim]
    pub fn generate_from(&self, z: &Tensor) -> Result<Tensor> {
        self.z_free.set_value(z)?;
        self.graph.no_grad_scope(|_| Self::eval_output(&self.free_out))
    }

    /// 把固定噪声的生成结果拼成网格保存为 PNG
    pub fn save_samples(&self, path: &Path) -> Result<()> {
        let samples = self.generate(self.config.num_samples)?;
        let grid = Vision::make_grid(&samples, grid_columns(self.config.num_samples), 2)?;
        Vision::save_grid_png(&grid, path)?;
        tracing::info!("样本已保存: {}", path.display());
        Ok(())
    }

    pub const fn config(&self) -> &GanConfig {
        &self.config
    }

    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    pub const fn generator(&self) -> &Generator {
        &self.generator
    }

    pub const fn discriminator(&self) -> &Discriminator {
        &self.discriminator
    }

    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// 固定噪声的值
    pub fn fixed_noise(&self) -> Result<Tensor> {
        Self::eval_output(&self.z_fixed)
    }

    fn eval_output(output: &Var) -> Result<Tensor> {
        output.forward()?;
        output
            .value()?
            .ok_or_else(|| GraphError::ComputationError("前向传播后节点仍没有值".to_string()).into())
    }

    fn mean_of(output: &Var) -> Result<f32> {
        let value = output.value()?.ok_or_else(|| {
            GraphError::ComputationError("反向传播后 D 的输出没有保留".to_string())
        })?;
        Ok(value.mean_value())
    }
}

/// 网格每行放几张：不小于√n 的最小整数
pub fn grid_columns(n: usize) -> usize {
    (1..=n.max(1)).find(|c| c * c >= n).unwrap_or(1)
}

impl std::fmt::Debug for GanTrainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GanTrainer")
            .field("config", &self.config)
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}
