pub mod config;
pub mod data_handling;
pub mod distance;
pub mod error;
pub mod query;
pub mod util;

pub use error::{Error, Result};
