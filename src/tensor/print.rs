use crate::tensor::Tensor;
use ndarray::{ArrayD, Axis};
use std::fmt;

/// 每个维度最多完整展示的元素个数，超出则首尾各展示`EDGE_ITEMS`个
const MAX_FULL_ITEMS: usize = 6;
const EDGE_ITEMS: usize = 3;

impl Tensor {
    pub fn print(&self) {
        println!("{self}");
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let shape = self.shape();
        if self.dimension() > 2 && !self.is_scalar() {
            return writeln!(
                f,
                "<对于阶数大于二（rank>2）的张量（形状：{shape:?}）无法展示具体数据>"
            );
        }

        let matrix = match self.dimension() {
            1 => self.data.clone().insert_axis(Axis(0)).into_shape(vec![1, shape[0]]),
            2 => self.data.clone().into_shape(shape.to_vec()),
            _ => self.data.clone().into_shape(vec![1, 1]),
        }
        .map_err(|_| fmt::Error)?;

        write_matrix(f, &matrix)?;
        writeln!(f, "\n形状: {shape:?}")
    }
}

fn visible_indices(len: usize) -> Vec<Option<usize>> {
    if len <= MAX_FULL_ITEMS {
        (0..len).map(Some).collect()
    } else {
        (0..EDGE_ITEMS)
            .map(Some)
            .chain(std::iter::once(None))
            .chain((len - EDGE_ITEMS..len).map(Some))
            .collect()
    }
}

fn write_matrix(f: &mut fmt::Formatter, matrix: &ArrayD<f32>) -> fmt::Result {
    let (rows, cols) = (matrix.shape()[0], matrix.shape()[1]);
    write!(f, "[")?;
    let row_indices = visible_indices(rows);
    for (ri, row) in row_indices.iter().enumerate() {
        if ri > 0 {
            write!(f, "\n ")?;
        }
        match row {
            None => write!(f, " ..")?,
            Some(i) => {
                write!(f, "[")?;
                for (ci, col) in visible_indices(cols).iter().enumerate() {
                    if ci > 0 {
                        write!(f, ", ")?;
                    }
                    match col {
                        None => write!(f, "   ..   ")?,
                        Some(j) => write!(f, "{:8.4}", matrix[[*i, *j]])?,
                    }
                }
                write!(f, "]")?;
            }
        }
    }
    write!(f, "]")
}
