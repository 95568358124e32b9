mod error;
mod forest;
mod params;

pub use error::{ForestErr, Result};
pub use forest::{Forest, accuracy};
pub use params::{ClassWeight, DEFAULT_N_TREES, DEFAULT_SEED, ForestParams};
