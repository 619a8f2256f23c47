//! MNIST 手写数字数据集
//!
//! 支持：
//! - IDX 二进制格式解析（支持 .gz 压缩）
//! - 像素归一化 (0-255 → 0-1) 与标准化 ((x - mean) / std)
//! - 标签 one-hot 编码
//! - 按需下载（带 MD5 校验）
//! - 离线时使用形状相同的合成数据

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::dataloader::TensorDataset;
use crate::data::download;
use crate::data::error::DataError;
use crate::data::transforms::{normalize, normalize_pixels, one_hot};
use crate::tensor::Tensor;

pub const MNIST_IMAGE_SIDE: usize = 28;
pub const MNIST_IMAGE_PIXELS: usize = MNIST_IMAGE_SIDE * MNIST_IMAGE_SIDE;
const NUM_CLASSES: usize = 10;

const IMAGES_MAGIC: u32 = 2051;
const LABELS_MAGIC: u32 = 2049;

/// MNIST 下载地址（AWS S3 镜像，原官网 yann.lecun.com 不稳定）
const MNIST_BASE_URL: &str = "https://ossci-datasets.s3.amazonaws.com/mnist/";

/// (文件名, .gz 文件的 MD5)
const MNIST_FILES: [(&str, &str); 4] = [
    ("train-images-idx3-ubyte", "f68b3c2dcbeaaa9fbdd348bbdeb94873"),
    ("train-labels-idx1-ubyte", "d53e105ee54ea40749a09fcbcd1e9432"),
    ("t10k-images-idx3-ubyte", "9fb629c4189551a2d022fa330f9573f3"),
    ("t10k-labels-idx1-ubyte", "ec29112dd5afa0611ce80d1b7f02629c"),
];

/// MNIST 手写数字数据集
///
/// 训练集 60,000 个样本，测试集 10,000 个。每个样本是 28x28 的灰度图像，标签为 0-9。
#[derive(Debug, Clone)]
pub struct MnistDataset {
    /// [N, 1, 28, 28]，flatten 后为 [N, 784]
    images: Tensor,
    /// [N, 10] (one-hot)
    labels: Tensor,
    len: usize,
    is_flattened: bool,
}

impl MnistDataset {
    /// 完整加载 API
    ///
    /// - `root`: 数据目录，None 则使用`default_data_dir()/mnist`
    /// - `train`: true=训练集, false=测试集
    /// - `download`: 文件缺失时是否自动下载
    ///
    /// 像素值归一化到[0, 1]，图像形状为 [N, 1, 28, 28]
    pub fn load(root: Option<&Path>, train: bool, download: bool) -> Result<Self, DataError> {
        let data_dir = root
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_data_dir().join("mnist"));

        let (images_file, labels_file) = if train {
            (MNIST_FILES[0], MNIST_FILES[1])
        } else {
            (MNIST_FILES[2], MNIST_FILES[3])
        };

        let images_path = ensure_file(&data_dir, images_file, download)?;
        let labels_path = ensure_file(&data_dir, labels_file, download)?;

        let images_raw = parse_idx_images(&images_path)?;
        let labels_raw = parse_idx_labels(&labels_path)?;
        Self::from_raw(&images_raw, &labels_raw)
    }

    /// 训练集（默认路径，自动下载）
    pub fn train() -> Result<Self, DataError> {
        Self::load(None, true, true)
    }

    /// 测试集（默认路径，自动下载）
    pub fn test() -> Result<Self, DataError> {
        Self::load(None, false, true)
    }

    /// 由原始像素[N, 784]（0-255）与类别索引[N]构建
    fn from_raw(images_raw: &Tensor, labels_raw: &Tensor) -> Result<Self, DataError> {
        let len = labels_raw.size();
        if images_raw.shape() != [len, MNIST_IMAGE_PIXELS] {
            return Err(DataError::ShapeMismatch {
                expected: vec![len, MNIST_IMAGE_PIXELS],
                got: images_raw.shape().to_vec(),
            });
        }
        let images = normalize_pixels(images_raw).reshape(&[
            len,
            1,
            MNIST_IMAGE_SIDE,
            MNIST_IMAGE_SIDE,
        ]);
        let labels = one_hot(labels_raw, NUM_CLASSES)?;
        Ok(Self {
            images,
            labels,
            len,
            is_flattened: false,
        })
    }

    /// 合成的“模糊斑点”数字：每个类别的斑点中心位置不同，外加随机抖动。
    /// 形状、值域与`load`一致，用于测试与离线运行
    pub fn synthetic(n: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pixels = Vec::with_capacity(n * MNIST_IMAGE_PIXELS);
        let mut labels = Vec::with_capacity(n);

        for i in 0..n {
            let class = i % NUM_CLASSES;
            let center_x = 6.0 + (class % 5) as f32 * 4.0 + rng.gen_range(-1.0..1.0);
            let center_y = 9.0 + (class / 5) as f32 * 10.0 + rng.gen_range(-1.0..1.0);
            let sigma = rng.gen_range(2.0..3.5_f32);
            for row in 0..MNIST_IMAGE_SIDE {
                for col in 0..MNIST_IMAGE_SIDE {
                    let dx = col as f32 - center_x;
                    let dy = row as f32 - center_y;
                    let blob = (-(dx * dx + dy * dy) / (2.0 * sigma * sigma)).exp();
                    let noise = rng.gen_range(0.0..0.05);
                    pixels.push((blob + noise).min(1.0));
                }
            }
            labels.push(class as f32);
        }

        let images = Tensor::new(&pixels, &[n, 1, MNIST_IMAGE_SIDE, MNIST_IMAGE_SIDE]);
        let labels = one_hot(&Tensor::new(&labels, &[n]), NUM_CLASSES)
            .unwrap_or_else(|_| Tensor::zeros(&[n, NUM_CLASSES]));
        Self {
            images,
            labels,
            len: n,
            is_flattened: false,
        }
    }

    /// 将图像展平为 [N, 784]（用于全连接网络）
    pub fn flatten(mut self) -> Self {
        if !self.is_flattened {
            self.images = self.images.reshape(&[self.len, MNIST_IMAGE_PIXELS]);
            self.is_flattened = true;
        }
        self
    }

    /// 像素标准化：`(x - mean) / std`。`normalize(0.5, 0.5)`把[0, 1]映射到[-1, 1]
    pub fn normalize(mut self, mean: f32, std: f32) -> Result<Self, DataError> {
        self.images = normalize(&self.images, mean, std)?;
        Ok(self)
    }

    /// 只保留前`n`个样本（`n`超过样本数时保留全部）
    pub fn take(mut self, n: usize) -> Self {
        let n = n.min(self.len);
        self.images = self.images.slice_rows(0..n);
        self.labels = self.labels.slice_rows(0..n);
        self.len = n;
        self
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn is_flattened(&self) -> bool {
        self.is_flattened
    }

    /// 第`index`个样本：(image, label)
    /// - image: [1, 28, 28]，flatten 后为 [784]
    /// - label: [10] (one-hot)
    pub fn get(&self, index: usize) -> Result<(Tensor, Tensor), DataError> {
        if index >= self.len {
            return Err(DataError::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }

        let image = self.images.slice_rows(index..index + 1);
        let image = if self.is_flattened {
            image.reshape(&[MNIST_IMAGE_PIXELS])
        } else {
            image.reshape(&[1, MNIST_IMAGE_SIDE, MNIST_IMAGE_SIDE])
        };
        let label = self.labels.slice_rows(index..index + 1).flatten();
        Ok((image, label))
    }

    /// 单个样本的形状（不含 batch 维度）
    pub fn input_shape(&self) -> Vec<usize> {
        if self.is_flattened {
            vec![MNIST_IMAGE_PIXELS]
        } else {
            vec![1, MNIST_IMAGE_SIDE, MNIST_IMAGE_SIDE]
        }
    }

    pub const fn images(&self) -> &Tensor {
        &self.images
    }

    pub const fn labels(&self) -> &Tensor {
        &self.labels
    }

    /// 转为`TensorDataset`，交给`DataLoader`分批
    pub fn to_tensor_dataset(&self) -> Result<TensorDataset, DataError> {
        TensorDataset::new(self.images.clone(), self.labels.clone())
    }
}

/// 默认数据目录：`<系统缓存目录>/gan_primer/datasets`
pub fn default_data_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gan_primer")
        .join("datasets")
}

/// 返回已有文件（优先未压缩版本）的路径，必要时下载 .gz 版本
fn ensure_file(
    data_dir: &Path,
    (base_name, gz_md5): (&str, &str),
    download: bool,
) -> Result<PathBuf, DataError> {
    let uncompressed_path = data_dir.join(base_name);
    if uncompressed_path.exists() {
        return Ok(uncompressed_path);
    }

    let gz_name = format!("{base_name}.gz");
    let gz_path = data_dir.join(&gz_name);
    if gz_path.exists() {
        return Ok(gz_path);
    }

    if !download {
        return Err(DataError::FileNotFound(uncompressed_path));
    }
    let url = format!("{MNIST_BASE_URL}{gz_name}");
    download::download_file(&url, &gz_path, Some(gz_md5))?;
    Ok(gz_path)
}

/// 打开 IDX 文件，`.gz`后缀的自动解压
fn open_idx(path: &Path) -> Result<Box<dyn Read>, DataError> {
    let file = File::open(path).map_err(|_| DataError::FileNotFound(path.to_path_buf()))?;
    let reader: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    Ok(reader)
}

/// 读取大端序的头部字段，并校验第一个字段（magic number）
fn read_header<const N: usize>(
    reader: &mut dyn Read,
    expected_magic: u32,
) -> Result<[u32; N], DataError> {
    let mut fields = [0u32; N];
    for field in &mut fields {
        let mut bytes = [0u8; 4];
        reader
            .read_exact(&mut bytes)
            .map_err(|e| DataError::FormatError(format!("读取头部失败: {e}")))?;
        *field = u32::from_be_bytes(bytes);
    }
    if fields[0] != expected_magic {
        return Err(DataError::FormatError(format!(
            "无效的 magic number: {} (期望 {expected_magic})",
            fields[0]
        )));
    }
    Ok(fields)
}

fn read_body(reader: &mut dyn Read, len: usize, what: &str) -> Result<Vec<f32>, DataError> {
    let mut bytes = vec![0u8; len];
    reader
        .read_exact(&mut bytes)
        .map_err(|e| DataError::FormatError(format!("读取{what}失败: {e}")))?;
    Ok(bytes.into_iter().map(f32::from).collect())
}

/// 解析 IDX 图像文件，返回 [N, 784] 的原始像素（0-255）
///
/// 头部：magic(2051) | 图像数 | 行数 | 列数，之后是逐字节的像素
pub(crate) fn parse_idx_images(path: &Path) -> Result<Tensor, DataError> {
    let mut reader = open_idx(path)?;
    let [_, num_images, num_rows, num_cols] = read_header::<4>(&mut *reader, IMAGES_MAGIC)?;
    let (num_images, num_rows, num_cols) =
        (num_images as usize, num_rows as usize, num_cols as usize);

    if num_rows != MNIST_IMAGE_SIDE || num_cols != MNIST_IMAGE_SIDE {
        return Err(DataError::FormatError(format!(
            "无效的图像尺寸: {num_rows}x{num_cols} (期望 28x28)"
        )));
    }

    let data = read_body(&mut *reader, num_images * MNIST_IMAGE_PIXELS, "像素数据")?;
    Ok(Tensor::new(&data, &[num_images, MNIST_IMAGE_PIXELS]))
}

/// 解析 IDX 标签文件，返回 [N] 的类别索引
///
/// 头部：magic(2049) | 标签数，之后是逐字节的标签
pub(crate) fn parse_idx_labels(path: &Path) -> Result<Tensor, DataError> {
    let mut reader = open_idx(path)?;
    let [_, num_labels] = read_header::<2>(&mut *reader, LABELS_MAGIC)?;
    let num_labels = num_labels as usize;
    let data = read_body(&mut *reader, num_labels, "标签数据")?;
    Ok(Tensor::new(&data, &[num_labels]))
}
