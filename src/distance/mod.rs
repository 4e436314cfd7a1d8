mod euclidean;

pub use self::euclidean::{
    feature_distance, get_distance_comparison_count, sq_euclidean, DenseVector,
};
