/*
 * @Description  : DataLoader - PyTorch 风格的数据批量加载器
 *
 * 支持：
 * - 自动分批 (batch_size)
 * - 随机打乱 (shuffle)，可固定种子并按轮次(epoch)变化
 * - 丢弃不完整批次 (drop_last)
 */

use crate::data::error::DataError;
use crate::tensor::Tensor;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// 持有特征和标签的数据集，两者第一维都是样本维
///
/// ```ignore
/// let dataset = TensorDataset::new(features, labels)?;
/// println!("样本数: {}", dataset.len());
/// ```
#[derive(Debug, Clone)]
pub struct TensorDataset {
    features: Tensor,
    labels: Tensor,
    len: usize,
}

impl TensorDataset {
    /// `features`与`labels`的样本数必须一致
    pub fn new(features: Tensor, labels: Tensor) -> Result<Self, DataError> {
        let len = features.shape().first().copied().unwrap_or(0);
        let label_len = labels.shape().first().copied().unwrap_or(0);
        if len != label_len {
            return Err(DataError::ShapeMismatch {
                expected: vec![len],
                got: vec![label_len],
            });
        }
        Ok(Self {
            features,
            labels,
            len,
        })
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn features(&self) -> &Tensor {
        &self.features
    }

    pub const fn labels(&self) -> &Tensor {
        &self.labels
    }
}

/// 数据批量加载器
///
/// ```ignore
/// let mut loader = DataLoader::new(dataset, 32)
///     .shuffle(true)
///     .seed(42)
///     .drop_last(true);
///
/// for epoch in 0..epochs {
///     loader.set_epoch(epoch);
///     for (x_batch, y_batch) in loader.iter() {
///         // ...
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DataLoader {
    dataset: TensorDataset,
    batch_size: usize,
    shuffle: bool,
    drop_last: bool,
    seed: Option<u64>,
    epoch: u64,
}

impl DataLoader {
    /// # Panics
    /// `batch_size`为0时
    pub fn new(dataset: TensorDataset, batch_size: usize) -> Self {
        assert!(batch_size > 0, "DataLoader: batch_size 必须大于 0");
        Self {
            dataset,
            batch_size,
            shuffle: false,
            drop_last: false,
            seed: None,
            epoch: 0,
        }
    }

    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// 是否丢弃最后一个不完整的批次
    pub fn drop_last(mut self, drop_last: bool) -> Self {
        self.drop_last = drop_last;
        self
    }

    /// 打乱用的随机种子
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// 设置当前轮次。固定种子时，打乱顺序由`seed + epoch`决定，每轮不同但可复现
    pub const fn set_epoch(&mut self, epoch: u64) {
        self.epoch = epoch;
    }

    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub const fn num_batches(&self) -> usize {
        let n = self.dataset.len();
        if self.drop_last {
            n / self.batch_size
        } else {
            n.div_ceil(self.batch_size)
        }
    }

    pub const fn len(&self) -> usize {
        self.dataset.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    pub fn iter(&self) -> DataLoaderIterator<'_> {
        let mut indices = (0..self.dataset.len()).collect::<Vec<_>>();
        if self.shuffle {
            match self.seed {
                Some(seed) => {
                    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(self.epoch));
                    indices.shuffle(&mut rng);
                }
                None => indices.shuffle(&mut rand::thread_rng()),
            }
        }

        DataLoaderIterator {
            loader: self,
            indices,
            current_batch: 0,
        }
    }
}

impl<'a> IntoIterator for &'a DataLoader {
    type Item = (Tensor, Tensor);
    type IntoIter = DataLoaderIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// DataLoader 迭代器，每次产出`(特征批, 标签批)`
pub struct DataLoaderIterator<'a> {
    loader: &'a DataLoader,
    indices: Vec<usize>,
    current_batch: usize,
}

impl Iterator for DataLoaderIterator<'_> {
    type Item = (Tensor, Tensor);

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.indices.len();
        let batch_size = self.loader.batch_size;
        let start = self.current_batch * batch_size;
        if start >= n {
            return None;
        }

        let end = (start + batch_size).min(n);
        if self.loader.drop_last && end - start < batch_size {
            return None;
        }
        self.current_batch += 1;

        let batch_indices = &self.indices[start..end];
        let dataset = &self.loader.dataset;
        Some((
            dataset.features.select_rows(batch_indices),
            dataset.labels.select_rows(batch_indices),
        ))
    }
}
