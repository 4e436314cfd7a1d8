//! parameters of the sampling baseline
//!
//! the defaults reproduce the reference setup: 102-dimensional points
//! (2 attributes + 100 features), 104-dimensional queries, 100 neighbors
//! per query and a 0.1% prefix sample.

use crate::error::{Error, Result};

pub const DEFAULT_DATA_DIMENSIONS: usize = 102;
pub const DEFAULT_K: usize = 100;
pub const DEFAULT_SAMPLE_PROPORTION: f64 = 0.001;

pub const DEFAULT_DATA_PATH: &str = "./tests/dummy-data.bin";
pub const DEFAULT_QUERY_PATH: &str = "./tests/dummy-queries.bin";
pub const DEFAULT_OUTPUT_PATH: &str = "./tests/output.bin";

/// number of leading point dimensions that hold attributes rather than features
pub const POINT_ATTRIBUTES: usize = 2;
/// number of leading query fields that describe the predicate
pub const QUERY_HEADER: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatorConfig {
    pub data_dimensions: usize,
    pub k: usize,
    pub sample_proportion: f64,
    pub parallel: bool,
    pub show_progress: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        EvaluatorConfig {
            data_dimensions: DEFAULT_DATA_DIMENSIONS,
            k: DEFAULT_K,
            sample_proportion: DEFAULT_SAMPLE_PROPORTION,
            parallel: false,
            show_progress: false,
        }
    }
}

impl EvaluatorConfig {
    /// queries carry the point's feature tail plus two more header fields
    pub fn query_dimensions(&self) -> usize {
        self.data_dimensions + QUERY_HEADER - POINT_ATTRIBUTES
    }

    /// size of the dataset prefix scanned for each query, truncated toward zero
    pub fn sample_size(&self, n: usize) -> usize {
        (n as f64 * self.sample_proportion) as usize
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_dimensions < POINT_ATTRIBUTES {
            return Err(Error::InvalidConfig(format!(
                "points need at least {} dimensions, got {}",
                POINT_ATTRIBUTES, self.data_dimensions
            )));
        }
        if self.k == 0 {
            return Err(Error::InvalidConfig("k must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.sample_proportion) {
            return Err(Error::InvalidConfig(format!(
                "sample proportion must lie in [0, 1], got {}",
                self.sample_proportion
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EvaluatorConfig::default();
        assert_eq!(config.query_dimensions(), 104);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sample_size_truncates() {
        let config = EvaluatorConfig::default();
        assert_eq!(config.sample_size(100_000), 100);
        assert_eq!(config.sample_size(199_999), 199);
        assert_eq!(config.sample_size(999), 0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = EvaluatorConfig {
            k: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = EvaluatorConfig {
            sample_proportion: 1.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = EvaluatorConfig {
            data_dimensions: 1,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }
}
