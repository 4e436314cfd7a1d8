//! definitions and implementations of datasets

use crate::config::POINT_ATTRIBUTES;
use crate::data_handling::dataset_traits::Numeric;

/// a row-major matrix of `n` vectors with `dim` entries each; the row index is the id
pub struct VectorDataset<T: Numeric> {
    data: Box<[T]>,
    pub n: usize,
    pub dim: usize,
}

impl<T: Numeric> VectorDataset<T> {
    pub fn new(data: Box<[T]>, n: usize, dim: usize) -> VectorDataset<T> {
        assert!(
            data.len() == n * dim,
            "expected {} elements for a {}x{} dataset, got {}",
            n * dim,
            n,
            dim,
            data.len()
        );

        VectorDataset { data, n, dim }
    }

    pub fn get(&self, i: usize) -> &[T] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    /// the whole matrix, row after row
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl VectorDataset<f32> {
    /// builds a dataset from equal-length rows
    pub fn from_rows(rows: &[Vec<f32>]) -> VectorDataset<f32> {
        let dim = rows.first().map_or(0, Vec::len);
        let data: Vec<f32> = rows.iter().flatten().copied().collect();
        VectorDataset::new(data.into_boxed_slice(), rows.len(), dim)
    }

    pub fn point(&self, i: usize) -> PointView<'_> {
        PointView::new(self.get(i))
    }
}

/// a borrowed data point: a categorical attribute, a scalar attribute, then the features
#[derive(Debug, Clone, Copy)]
pub struct PointView<'a> {
    row: &'a [f32],
}

impl<'a> PointView<'a> {
    pub fn new(row: &'a [f32]) -> PointView<'a> {
        assert!(
            row.len() >= POINT_ATTRIBUTES,
            "a point needs at least {} dimensions, got {}",
            POINT_ATTRIBUTES,
            row.len()
        );
        PointView { row }
    }

    pub fn category(&self) -> f32 {
        self.row[0]
    }

    pub fn attribute(&self) -> f32 {
        self.row[1]
    }

    pub fn features(&self) -> &'a [f32] {
        &self.row[POINT_ATTRIBUTES..]
    }
}
