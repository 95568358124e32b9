//! HTTP surface of the prediction service.
//!
//! Routes:
//! - `POST /predict` water-quality features in, `{"prediction": 0 | 1}` out.
//! - `POST /oxygen` a dissolved oxygen reading in, aeration advice out.
//! - `GET /health` liveness probe.

mod error;
mod handlers;

use actix_cors::Cors;
use actix_web::web;

pub use error::{ErrorBody, json_error_handler};
pub use handlers::{assess_oxygen, health, predict};

/// Registers every route plus the JSON body configuration.
///
/// The `PredictionService` must be registered as app data by the caller.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/predict", web::post().to(predict))
        .route("/oxygen", web::post().to(assess_oxygen))
        .route("/health", web::get().to(health));
}

/// Cross-origin requests are allowed from anywhere.
pub fn cors() -> Cors {
    Cors::permissive()
}
