//! Water-quality suitability prediction service.
//!
//! A CSV dataset is loaded once, a bagged decision-tree forest is fitted on a
//! seeded 70/30 split and the result is served read-only over HTTP.

pub mod config;
pub mod data;
pub mod forest;
pub mod http;
pub mod oxygen;
pub mod service;
pub mod training;

pub use config::{Config, ConfigErr};
pub use data::{Dataset, DatasetErr, FeatureSchema};
pub use service::{Prediction, PredictionService};
pub use training::{TrainingConfig, TrainingReport};
