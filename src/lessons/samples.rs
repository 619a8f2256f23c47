//! 第 8 节：展示生成的样本：拼网格、可选保存 PNG、终端字符画预览

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::ShapeDisplay;
use crate::data::transforms::flatten_images;
use crate::error::Result;
use crate::tensor::Tensor;
use crate::vision::Vision;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplesReport {
    pub count: usize,
    pub grid_shape: Vec<usize>,
    pub saved_to: Option<PathBuf>,
    /// 第一个样本的字符画
    pub preview: String,
}

/// `samples`: [N, 784] 或 [N, 1, 28, 28]，像素在[-1, 1]
pub fn show(samples: &Tensor, nrow: usize, out: Option<&Path>) -> Result<SamplesReport> {
    let grid = Vision::make_grid(samples, nrow, 2)?;
    let rows = match samples.dimension() {
        2 => samples.clone(),
        _ => flatten_images(samples),
    };
    let preview = Vision::ascii_preview(&rows.slice_rows(0..1))?;

    if let Some(path) = out {
        Vision::save_grid_png(&grid, path)?;
    }
    Ok(SamplesReport {
        count: rows.shape()[0],
        grid_shape: grid.shape().to_vec(),
        saved_to: out.map(Path::to_path_buf),
        preview,
    })
}

impl fmt::Display for SamplesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} 个样本，网格 {}",
            self.count,
            ShapeDisplay(&self.grid_shape)
        )?;
        if let Some(path) = &self.saved_to {
            writeln!(f, "已保存到 {}", path.display())?;
        }
        write!(f, "{}", self.preview)
    }
}
