#[cfg(feature = "dcmp")]
use std::sync::atomic::{AtomicU64, Ordering};

use crate::data_handling::dataset_traits::Numeric;

#[cfg(feature = "dcmp")]
static DIST_CMP_COUNT: AtomicU64 = AtomicU64::new(0);

/// squared euclidean distance between two feature vectors, summed in f32 from
/// the first feature to the last
///
/// this is the metric the sampling baseline ranks with; attribute dimensions
/// must already be stripped from both sides.
///
/// Example:
/// ```
/// let point = [1.0, 1.0];
/// let query = [0.0, 0.0];
/// assert_eq!(filtered_knn::distance::feature_distance(&point, &query), 2.0);
/// ```
pub fn feature_distance(a: &[f32], b: &[f32]) -> f32 {
    #[cfg(feature = "dcmp")]
    {
        DIST_CMP_COUNT.fetch_add(1, Ordering::Relaxed);
    }
    a.iter().zip(b.iter()).fold(0.0f32, |acc, (&x, &y)| {
        let diff = x - y;
        acc + diff * diff
    })
}

/// simd squared euclidean distance, used for exact ground truth
///
/// ```
/// let a = [3.0f32, 4.0];
/// let b = [0.0f32, 0.0];
/// let d = filtered_knn::distance::sq_euclidean(&a, &b);
/// assert!((d - 25.0).abs() < 1e-4);
/// ```
pub fn sq_euclidean<T>(a: &[T], b: &[T]) -> f32
where
    T: DenseVector,
{
    #[cfg(feature = "dcmp")]
    {
        DIST_CMP_COUNT.fetch_add(1, Ordering::Relaxed);
    }
    T::sq_euclidean(a, b)
}

pub trait DenseVector: Numeric + 'static {
    fn sq_euclidean(a: &[Self], b: &[Self]) -> f32
    where
        Self: Sized;
}

/// fallback for slices simsimd refuses (mismatched lengths)
fn scalar_sq_euclidean<T: Numeric>(a: &[T], b: &[T]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let diff = Into::<f64>::into(x) - Into::<f64>::into(y);
            diff * diff
        })
        .sum::<f64>() as f32
}

impl DenseVector for f32 {
    fn sq_euclidean(a: &[Self], b: &[Self]) -> f32 {
        use simsimd::SpatialSimilarity;
        f32::sqeuclidean(a, b)
            .map(|d| d as f32)
            .unwrap_or_else(|| scalar_sq_euclidean(a, b))
    }
}

/// Returns the number of distance comparisons performed (only if 'dcmp' feature is enabled)
#[inline]
pub fn get_distance_comparison_count() -> u64 {
    #[cfg(feature = "dcmp")]
    {
        DIST_CMP_COUNT.load(Ordering::Relaxed)
    }
    #[cfg(not(feature = "dcmp"))]
    {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_distance() {
        assert_eq!(feature_distance(&[1.0, 1.0], &[0.0, 0.0]), 2.0);
        assert_eq!(feature_distance(&[2.0, 2.0], &[0.0, 0.0]), 8.0);
        assert_eq!(feature_distance(&[], &[]), 0.0);
    }

    #[test]
    fn test_simd_matches_scalar() {
        let a: Vec<f32> = (0..100).map(|i| i as f32 * 0.5).collect();
        let b: Vec<f32> = (0..100).map(|i| (100 - i) as f32 * 0.25).collect();
        let simd = sq_euclidean(&a, &b);
        let scalar = feature_distance(&a, &b);
        assert!((simd - scalar).abs() / scalar < 1e-4);
    }
}
