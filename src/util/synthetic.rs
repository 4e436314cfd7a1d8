//! random points and queries in the on-disk layouts, for smoke tests and benchmarks

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::config::{POINT_ATTRIBUTES, QUERY_HEADER};
use crate::data_handling::dataset::VectorDataset;

/// points with a category in `0..categories`, an attribute in `[0, 1)` and
/// standard normal features
pub fn random_points<R: Rng>(
    rng: &mut R,
    n: usize,
    dim: usize,
    categories: u32,
) -> VectorDataset<f32> {
    assert!(dim >= POINT_ATTRIBUTES, "points need room for their attributes");
    assert!(categories > 0, "need at least one category");
    let normal = Normal::new(0.0f32, 1.0).unwrap();

    let mut data = Vec::with_capacity(n * dim);
    for _ in 0..n {
        data.push(rng.random_range(0..categories) as f32);
        data.push(rng.random::<f32>());
        data.extend((POINT_ATTRIBUTES..dim).map(|_| normal.sample(rng)));
    }
    VectorDataset::new(data.into_boxed_slice(), n, dim)
}

/// queries for points of `dim` dimensions, with kinds spread evenly over all four
/// predicates and ranges a quarter of the attribute domain wide
pub fn random_queries<R: Rng>(
    rng: &mut R,
    n: usize,
    dim: usize,
    categories: u32,
) -> VectorDataset<f32> {
    assert!(dim >= POINT_ATTRIBUTES, "points need room for their attributes");
    assert!(categories > 0, "need at least one category");
    let normal = Normal::new(0.0f32, 1.0).unwrap();
    let query_dim = dim - POINT_ATTRIBUTES + QUERY_HEADER;

    let mut data = Vec::with_capacity(n * query_dim);
    for _ in 0..n {
        let lower = rng.random::<f32>() * 0.75;
        data.push(rng.random_range(0..4u32) as f32);
        data.push(rng.random_range(0..categories) as f32);
        data.push(lower);
        data.push(lower + 0.25);
        data.extend((POINT_ATTRIBUTES..dim).map(|_| normal.sample(rng)));
    }
    VectorDataset::new(data.into_boxed_slice(), n, query_dim)
}
