mod models;

use super::GanConfig;

/// 便于快速测试的小网络配置
fn tiny_config() -> GanConfig {
    GanConfig {
        z_dim: 4,
        image_dim: 16,
        d_hidden: 8,
        g_hidden: 8,
        batch_size: 4,
        epochs: 2,
        num_samples: 4,
        learning_rate: 1e-2,
        ..GanConfig::default()
    }
}
