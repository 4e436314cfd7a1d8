pub mod ground_truth;
pub mod logging;
pub mod recall;
pub mod synthetic;
