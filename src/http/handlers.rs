use actix_web::{HttpResponse, web};
use log::debug;
use serde_json::{Map, Value, json};

use crate::{
    data::Feature,
    oxygen::{self, DISSOLVED_OXYGEN},
    service::{PredictionService, ServiceErr, ValidationErr, read_number},
};

/// `POST /predict`
pub async fn predict(
    service: web::Data<PredictionService>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, ServiceErr> {
    let prediction = service.predict(&body)?;
    debug!("predicted label {}", prediction.prediction);
    Ok(HttpResponse::Ok().json(prediction))
}

/// `POST /oxygen`
pub async fn assess_oxygen(
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, ValidationErr> {
    let feature = Feature::non_negative(DISSOLVED_OXYGEN);
    let level = read_number(&body, &feature)?;
    Ok(HttpResponse::Ok().json(oxygen::assess(level)))
}

/// `GET /health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
