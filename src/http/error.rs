use actix_web::{
    HttpRequest, HttpResponse, ResponseError,
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
};
use log::{error, warn};
use serde::Serialize;

use crate::service::{ServiceErr, ValidationErr};

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ResponseError for ValidationErr {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        warn!("rejected request: {}", self);
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

impl ResponseError for ServiceErr {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceErr::Validation(e) => e.status_code(),
            ServiceErr::Model(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceErr::Validation(e) => e.error_response(),
            ServiceErr::Model(e) => {
                error!("prediction failed: {e}");
                HttpResponse::build(self.status_code()).json(ErrorBody {
                    error: self.to_string(),
                })
            }
        }
    }
}

/// Turns body extraction failures (bad JSON, wrong content type, non-object
/// bodies) into the same JSON error shape as validation failures.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = ErrorBody {
        error: format!("Invalid request body: {err}"),
    };
    warn!("{}", body.error);
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}
