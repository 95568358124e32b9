use std::{error::Error, fmt};

use log::info;

use crate::{
    data::{Dataset, DatasetErr},
    forest::{DEFAULT_SEED, Forest, ForestErr, ForestParams, accuracy},
};

/// How the dataset is partitioned and the forest is fitted at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    /// Fraction of the samples used for fitting; the rest is held out.
    pub train_ratio: f64,
    /// Seed for the train/held-out shuffle.
    pub seed: u64,
    pub forest: ForestParams,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            train_ratio: 0.7,
            seed: DEFAULT_SEED,
            forest: ForestParams::default(),
        }
    }
}

/// Outcome of the one-shot training step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingReport {
    pub train_len: usize,
    pub test_len: usize,
    /// Accuracy over the held-out subset.
    pub accuracy: f64,
}

#[derive(Debug)]
pub enum TrainingErr {
    Dataset(DatasetErr),
    Forest(ForestErr),
}

impl fmt::Display for TrainingErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dataset(e) => write!(f, "dataset error: {e}"),
            Self::Forest(e) => write!(f, "forest error: {e}"),
        }
    }
}

impl Error for TrainingErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Dataset(e) => Some(e),
            Self::Forest(e) => Some(e),
        }
    }
}

impl From<DatasetErr> for TrainingErr {
    fn from(e: DatasetErr) -> Self {
        Self::Dataset(e)
    }
}

impl From<ForestErr> for TrainingErr {
    fn from(e: ForestErr) -> Self {
        Self::Forest(e)
    }
}

/// Splits `dataset`, fits a forest on the training side and scores it on the
/// held-out side.
///
/// # Errors
/// Returns `TrainingErr` if the split leaves an empty side or any tree fails
/// to fit.
pub fn train(
    dataset: &Dataset,
    config: &TrainingConfig,
) -> Result<(Forest, TrainingReport), TrainingErr> {
    let (train, test) = dataset.split(config.train_ratio, config.seed)?;
    info!(
        "split {} samples into {} for training and {} held out",
        dataset.len(),
        train.len(),
        test.len()
    );

    let forest = config.forest.fit(&train)?;
    info!("fitted forest with {} trees", forest.n_trees());

    let predicted = forest.predict(test.records())?;
    let report = TrainingReport {
        train_len: train.len(),
        test_len: test.len(),
        accuracy: accuracy(predicted.view(), test.labels()),
    };

    Ok((forest, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};

    fn dataset(len: usize) -> Dataset {
        let records = Array2::from_shape_fn((len, 1), |(i, _)| i as f64);
        let labels = Array1::from_shape_fn(len, |i| usize::from(i >= len / 2));
        Dataset::new(records, labels)
    }

    #[test]
    fn reports_split_sizes() {
        let config = TrainingConfig {
            forest: ForestParams::new(5),
            ..TrainingConfig::default()
        };

        let (forest, report) = train(&dataset(20), &config).unwrap();
        assert_eq!(forest.n_trees(), 5);
        assert_eq!(report.train_len, 14);
        assert_eq!(report.test_len, 6);
        assert!((0.0..=1.0).contains(&report.accuracy));
    }

    #[test]
    fn training_is_reproducible() {
        let config = TrainingConfig {
            forest: ForestParams::new(5),
            ..TrainingConfig::default()
        };

        let (_, a) = train(&dataset(30), &config).unwrap();
        let (_, b) = train(&dataset(30), &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_split_is_fatal() {
        let err = train(&dataset(1), &TrainingConfig::default()).unwrap_err();
        assert!(matches!(err, TrainingErr::Dataset(DatasetErr::EmptySplit { .. })));
    }
}
