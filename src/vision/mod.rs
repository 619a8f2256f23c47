/*
 * @Description  : 本模块负责把生成器的输出变成人能看的东西：
 *                 1. 把一批 28x28 样本拼成一张网格图（值域还原到[0, 1]）；
 *                 2. 保存为 PNG；
 *                 3. 在终端里用字符画预览单个样本。
 *                 约定输入像素处于 Tanh 的值域[-1, 1]。
 */

mod error;


pub use error::VisionError;

use std::path::Path;

use image::GrayImage;

use crate::data::transforms::flatten_images;
use crate::data::{MNIST_IMAGE_PIXELS, MNIST_IMAGE_SIDE};
use crate::tensor::Tensor;

/// 字符画灰度阶梯，由暗到亮
const ASCII_RAMP: &[u8] = b" .:-=+*#%@";

pub struct Vision;

impl Vision {
    /// 将[-1, 1]的像素还原到[0, 1]（超出部分截断）
    pub fn denormalize(tensor: &Tensor) -> Tensor {
        ((tensor + 1.0) * 0.5).clip(0.0, 1.0)
    }

    /// 将一批样本拼成网格图，返回形状为[H, W]、值域[0, 1]的张量
    ///
    /// - `samples`: [N, 784] 或 [N, 1, 28, 28]，像素在[-1, 1]
    /// - `nrow`: 每行放几张图（N 不足一行时按 N 计）
    /// - `padding`: 图与图之间、以及四周的间隔像素数（填 0，即黑色）
    pub fn make_grid(samples: &Tensor, nrow: usize, padding: usize) -> Result<Tensor, VisionError> {
        if nrow == 0 {
            return Err(VisionError::InvalidArgument("nrow 须大于 0".to_string()));
        }
        let flat = Self::as_sample_rows(samples)?;
        let n = flat.shape()[0];
        if n == 0 {
            return Err(VisionError::EmptyBatch);
        }
        let images = Self::denormalize(&flat);

        let cols = nrow.min(n);
        let rows = n.div_ceil(cols);
        let cell = MNIST_IMAGE_SIDE + padding;
        let height = rows * cell + padding;
        let width = cols * cell + padding;

        let mut grid = Tensor::zeros(&[height, width]);
        for k in 0..n {
            let top = (k / cols) * cell + padding;
            let left = (k % cols) * cell + padding;
            for y in 0..MNIST_IMAGE_SIDE {
                for x in 0..MNIST_IMAGE_SIDE {
                    grid[[top + y, left + x]] = images[[k, y * MNIST_IMAGE_SIDE + x]];
                }
            }
        }
        Ok(grid)
    }

    /// 将[H, W]、值域[0, 1]的灰度张量保存为 PNG（父目录不存在时自动创建）
    pub fn save_grid_png(grid: &Tensor, path: &Path) -> Result<(), VisionError> {
        let shape = grid.shape();
        if shape.len() != 2 {
            return Err(VisionError::InvalidSampleShape {
                got: shape.to_vec(),
            });
        }
        let (height, width) = (shape[0], shape[1]);
        let bytes = grid
            .data_as_slice()
            .iter()
            .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect::<Vec<_>>();
        let image = GrayImage::from_raw(width as u32, height as u32, bytes).ok_or_else(|| {
            VisionError::InvalidArgument(format!("无法由{height}x{width}的数据构建图像"))
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        image.save(path)?;
        tracing::debug!("样本网格已保存: {}", path.display());
        Ok(())
    }

    /// 在终端里预览单个样本（像素在[-1, 1]），返回 28 行字符画
    pub fn ascii_preview(sample: &Tensor) -> Result<String, VisionError> {
        if sample.size() != MNIST_IMAGE_PIXELS {
            return Err(VisionError::InvalidSampleShape {
                got: sample.shape().to_vec(),
            });
        }
        let pixels = Self::denormalize(sample).to_vec();
        let last = (ASCII_RAMP.len() - 1) as f32;

        let mut out = String::with_capacity(MNIST_IMAGE_PIXELS + MNIST_IMAGE_SIDE);
        for row in pixels.chunks(MNIST_IMAGE_SIDE) {
            for &v in row {
                out.push(ASCII_RAMP[(v * last).round() as usize] as char);
            }
            out.push('\n');
        }
        Ok(out)
    }

    /// 统一成 [N, 784]
    fn as_sample_rows(samples: &Tensor) -> Result<Tensor, VisionError> {
        let flat = match samples.dimension() {
            2 => samples.clone(),
            4 => flatten_images(samples),
            _ => {
                return Err(VisionError::InvalidSampleShape {
                    got: samples.shape().to_vec(),
                });
            }
        };
        if flat.shape()[1] != MNIST_IMAGE_PIXELS {
            return Err(VisionError::InvalidSampleShape {
                got: samples.shape().to_vec(),
            });
        }
        Ok(flat)
    }
}
