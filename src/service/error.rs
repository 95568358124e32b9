use std::{error::Error, fmt};

use super::validation::ValidationErr;
use crate::forest::ForestErr;

/// Failures of a single prediction call.
#[derive(Debug)]
pub enum ServiceErr {
    /// The caller sent an unusable body.
    Validation(ValidationErr),
    /// The model rejected a well-formed feature vector.
    Model(ForestErr),
}

impl fmt::Display for ServiceErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "{e}"),
            Self::Model(e) => write!(f, "model error: {e}"),
        }
    }
}

impl Error for ServiceErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Model(e) => Some(e),
        }
    }
}

impl From<ValidationErr> for ServiceErr {
    fn from(e: ValidationErr) -> Self {
        Self::Validation(e)
    }
}

impl From<ForestErr> for ServiceErr {
    fn from(e: ForestErr) -> Self {
        Self::Model(e)
    }
}
