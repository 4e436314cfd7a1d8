//! loads, holds and computes exact filtered ground truth

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use rayon::prelude::*;
use tracing::info;

use crate::config::{POINT_ATTRIBUTES, QUERY_HEADER};
use crate::data_handling::dataset::VectorDataset;
use crate::distance::sq_euclidean;
use crate::error::{Error, Result};
use crate::query::Query;


/// id written where a query has fewer than `k` qualifying points
pub const MISSING_ID: u32 = u32::MAX;

pub struct GroundTruth {
    neighbors: Box<[u32]>,
    distances: Box<[f32]>,
    pub n: usize,
    pub k: usize,
}

impl GroundTruth {
    /// Reads a groundtruth file.
    ///
    /// File format:
    /// - 2 x u32 (little-endian): num_points, num_neighbors
    /// - num_points*num_neighbors x u32: neighbor ids
    /// - num_points*num_neighbors x f32: distances
    pub fn read(gt_filename: &Path) -> Result<GroundTruth> {
        let mut bytes = Vec::new();
        File::open(gt_filename)
            .and_then(|mut file| file.read_to_end(&mut bytes))
            .map_err(|e| Error::io(gt_filename, e))?;

        if bytes.len() < 8 {
            return Err(Error::Truncated {
                path: gt_filename.to_path_buf(),
                len: bytes.len(),
            });
        }
        let num_points = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
        let num_neighbors = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize;
        let body = &bytes[8..];
        let total = num_points
            .checked_mul(num_neighbors)
            .filter(|total| total.checked_mul(8).is_some_and(|size| size <= body.len()))
            .ok_or_else(|| Error::Truncated {
                path: gt_filename.to_path_buf(),
                len: bytes.len(),
            })?;

        let neighbors: Vec<u32> = body[..total * 4]
            .chunks_exact(4)
            .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        let distances: Vec<f32> = body[total * 4..total * 8]
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        Ok(GroundTruth::new(num_points, num_neighbors, neighbors, distances))
    }

    /// Creates a new ground truth structure
    pub fn new(n: usize, k: usize, neighbors: Vec<u32>, distances: Vec<f32>) -> GroundTruth {
        assert_eq!(neighbors.len(), n * k, "Neighbors array size mismatch");
        assert_eq!(distances.len(), n * k, "Distances array size mismatch");

        GroundTruth {
            neighbors: neighbors.into_boxed_slice(),
            distances: distances.into_boxed_slice(),
            n,
            k,
        }
    }

    /// Writes ground truth to a file in the standard format.
    pub fn write(&self, gt_filename: &Path) -> Result<()> {
        let file = File::create(gt_filename).map_err(|e| Error::io(gt_filename, e))?;
        let mut writer = BufWriter::new(file);

        let write = |writer: &mut BufWriter<File>| -> std::io::Result<()> {
            writer.write_all(&(self.n as u32).to_le_bytes())?;
            writer.write_all(&(self.k as u32).to_le_bytes())?;
            for &neighbor in self.neighbors.iter() {
                writer.write_all(&neighbor.to_le_bytes())?;
            }
            for &distance in self.distances.iter() {
                writer.write_all(&distance.to_le_bytes())?;
            }
            writer.flush()
        };
        write(&mut writer).map_err(|e| Error::io(gt_filename, e))
    }

    /// returns the true neighbors of a query
    pub fn get_neighbors(&self, i: usize) -> &[u32] {
        let start = i * self.k;
        &self.neighbors[start..start + self.k]
    }

    /// returns the distances of a query's true nearest neighbors
    pub fn get_distances(&self, i: usize) -> &[f32] {
        let start = i * self.k;
        &self.distances[start..start + self.k]
    }
}

/// Computes exact filtered nearest neighbors for every query by scanning the whole dataset.
///
/// Only points satisfying the query's predicate are considered. Queries with fewer than
/// `k` qualifying points are padded with `MISSING_ID` / `f32::MAX`.
pub fn compute_ground_truth(
    dataset: &VectorDataset<f32>,
    queries: &VectorDataset<f32>,
    k: usize,
) -> Result<GroundTruth> {
    if k == 0 {
        return Err(Error::InvalidConfig("k must be positive".to_string()));
    }
    if dataset.dim < POINT_ATTRIBUTES {
        return Err(Error::InvalidConfig(format!(
            "points need at least {} dimensions, got {}",
            POINT_ATTRIBUTES, dataset.dim
        )));
    }
    let query_dim = dataset.dim - POINT_ATTRIBUTES + QUERY_HEADER;
    if queries.n > 0 && queries.dim != query_dim {
        return Err(Error::InvalidConfig(format!(
            "queries have {} dimensions, expected {}",
            queries.dim, query_dim
        )));
    }

    let n = queries.n;
    info!(queries = n, points = dataset.n, k, "computing filtered ground truth");

    let results: Vec<(Vec<u32>, Vec<f32>)> = (0..n)
        .into_par_iter()
        .map(|i| {
            let query = Query::parse(queries.get(i));

            let mut distances: Vec<(f32, u32)> = (0..dataset.n)
                .filter_map(|j| {
                    let point = dataset.point(j);
                    query
                        .predicate
                        .matches(&point)
                        .then(|| (sq_euclidean(point.features(), query.features), j as u32))
                })
                .collect();

            distances.sort_by(|a, b| a.0.total_cmp(&b.0));

            let top_k = std::cmp::min(k, distances.len());
            let mut neighbors = Vec::with_capacity(k);
            let mut dists = Vec::with_capacity(k);
            distances.iter().take(top_k).for_each(|&(dist, idx)| {
                neighbors.push(idx);
                dists.push(dist);
            });

            for _ in top_k..k {
                neighbors.push(MISSING_ID);
                dists.push(f32::MAX);
            }

            (neighbors, dists)
        })
        .collect();

    let mut all_neighbors = Vec::with_capacity(n * k);
    let mut all_distances = Vec::with_capacity(n * k);
    for (neighbors, distances) in results {
        all_neighbors.extend(neighbors);
        all_distances.extend(distances);
    }

    Ok(GroundTruth::new(n, k, all_neighbors, all_distances))
}
