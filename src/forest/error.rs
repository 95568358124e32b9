use std::{error::Error, fmt};

/// The forest module's result type.
pub type Result<T> = std::result::Result<T, ForestErr>;

/// Failures while fitting or querying the ensemble.
#[derive(Debug)]
pub enum ForestErr {
    InvalidParams(String),
    /// The training set has no samples.
    EmptyDataset,
    /// A member tree could not be fitted.
    Fit { tree: usize, msg: String },
    SizeMismatch { got: usize, expected: usize },
}

impl fmt::Display for ForestErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForestErr::InvalidParams(msg) => write!(f, "invalid forest parameters: {msg}"),
            ForestErr::EmptyDataset => write!(f, "cannot fit a forest on an empty dataset"),
            ForestErr::Fit { tree, msg } => write!(f, "failed to fit tree {tree}: {msg}"),
            ForestErr::SizeMismatch { got, expected } => write!(
                f,
                "feature vector size mismatch, got {got} and expected {expected}"
            ),
        }
    }
}

impl Error for ForestErr {}
