/*
 * @Description  : 生成器与判别器，各由两个全连接层组成
 */

use crate::nn::{Graph, GraphError, Linear, Module, Var, VarActivationOps};

use super::GanConfig;

/// 生成器 G：`z_dim → g_hidden → image_dim`
///
/// 隐藏层后接 LeakyReLU，输出接 Tanh，值域(-1, 1)与归一化后的图像一致。
#[derive(Debug)]
pub struct Generator {
    fc1: Linear,
    fc2: Linear,
    slope: f32,
}

impl Generator {
    pub fn new(graph: &Graph, config: &GanConfig) -> Result<Self, GraphError> {
        Ok(Self {
            fc1: Linear::new(graph, config.z_dim, config.g_hidden, true, "gen_fc1")?,
            fc2: Linear::new(graph, config.g_hidden, config.image_dim, true, "gen_fc2")?,
            slope: config.leaky_slope,
        })
    }

    /// z: [batch, z_dim] → [batch, image_dim]
    pub fn forward(&self, z: &Var) -> Result<Var, GraphError> {
        let h = self.fc1.forward(z)?.leaky_relu(self.slope);
        Ok(self.fc2.forward(&h)?.tanh())
    }

    pub const fn z_dim(&self) -> usize {
        self.fc1.in_features()
    }

    pub const fn image_dim(&self) -> usize {
        self.fc2.out_features()
    }
}

impl Module for Generator {
    fn parameters(&self) -> Vec<Var> {
        [self.fc1.parameters(), self.fc2.parameters()].concat()
    }
}

/// 判别器 D：`image_dim → d_hidden → 1`
///
/// 输出接 Sigmoid，表示输入为真实图像的概率。
#[derive(Debug)]
pub struct Discriminator {
    fc1: Linear,
    fc2: Linear,
    slope: f32,
}

impl Discriminator {
    pub fn new(graph: &Graph, config: &GanConfig) -> Result<Self, GraphError> {
        Ok(Self {
            fc1: Linear::new(graph, config.image_dim, config.d_hidden, true, "disc_fc1")?,
            fc2: Linear::new(graph, config.d_hidden, 1, true, "disc_fc2")?,
            slope: config.leaky_slope,
        })
    }

    /// x: [batch, image_dim] → [batch, 1]
    pub fn forward(&self, x: &Var) -> Result<Var, GraphError> {
        let h = self.fc1.forward(x)?.leaky_relu(self.slope);
        Ok(self.fc2.forward(&h)?.sigmoid())
    }

    pub const fn image_dim(&self) -> usize {
        self.fc1.in_features()
    }
}

impl Module for Discriminator {
    fn parameters(&self) -> Vec<Var> {
        [self.fc1.parameters(), self.fc2.parameters()].concat()
    }
}
