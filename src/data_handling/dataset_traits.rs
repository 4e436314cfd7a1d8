//! element types a dataset can hold

use std::ops::Sub;

pub trait Numeric: Copy + Into<f64> + Sub<Output = Self> + Default + Send + Sync {}

impl Numeric for f32 {}
