pub mod dataset;
pub mod error;
pub mod schema;

pub use dataset::Dataset;
pub use error::{DatasetErr, Result};
pub use schema::{Feature, FeatureSchema, LABEL_COLUMN};
