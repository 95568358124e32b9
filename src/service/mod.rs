mod error;
mod service;
mod validation;

pub use error::ServiceErr;
pub use service::{Prediction, PredictionService};
pub use validation::{ValidationErr, extract_features, read_number};
