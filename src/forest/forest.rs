use std::fmt;

use linfa::{
    DatasetBase,
    traits::{Fit, Predict},
};
use linfa_trees::{DecisionTree, SplitQuality};
use log::debug;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

use super::{
    error::{ForestErr, Result},
    params::ForestParams,
};
use crate::data::Dataset;

/// A fitted tree and the feature columns it was trained on.
struct Member {
    tree: DecisionTree<f64, usize>,
    columns: Vec<usize>,
}

/// A bagged ensemble of decision trees voting by simple majority.
///
/// Immutable once fitted; prediction takes `&self` and is safe to share
/// between threads.
pub struct Forest {
    members: Vec<Member>,
    n_features: usize,
    n_classes: usize,
}

impl Forest {
    pub(super) fn fit(params: &ForestParams, dataset: &Dataset) -> Result<Self> {
        if dataset.is_empty() {
            return Err(ForestErr::EmptyDataset);
        }

        let len = dataset.len();
        let n_features = dataset.n_features();
        let n_classes = dataset.n_classes().max(2);
        let class_weights = params.class_weight.weights(&dataset.class_counts());

        let n_columns = ((n_features as f32 * params.feature_subsample).ceil() as usize)
            .clamp(1, n_features);

        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut members = Vec::with_capacity(params.n_trees);

        for t in 0..params.n_trees {
            let rows: Vec<usize> = if params.bootstrap {
                (0..len).map(|_| rng.random_range(0..len)).collect()
            } else {
                (0..len).collect()
            };

            let mut columns: Vec<usize> = (0..n_features).collect();
            if n_columns < n_features {
                columns.shuffle(&mut rng);
                columns.truncate(n_columns);
                columns.sort_unstable();
            }

            let sample = dataset.select(&rows);
            let records = sample.records().select(Axis(1), &columns);
            let targets = sample.labels().to_owned();
            let weights = targets.mapv(|label| class_weights[label]);
            let train = DatasetBase::new(records, targets).with_weights(weights);

            let tree = DecisionTree::<f64, usize>::params()
                .split_quality(SplitQuality::Gini)
                .max_depth(params.max_depth)
                .fit(&train)
                .map_err(|e| fit_failed(t, e))?;

            debug!("fitted tree {t} on {len} rows and {} columns", columns.len());
            members.push(Member { tree, columns });
        }

        Ok(Self {
            members,
            n_features,
            n_classes,
        })
    }

    #[inline]
    pub fn n_trees(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Predicts one label per row of `records`. Ties go to the lower label.
    ///
    /// # Errors
    /// Returns `ForestErr::SizeMismatch` if `records` doesn't have one column
    /// per training feature.
    pub fn predict(&self, records: ArrayView2<'_, f64>) -> Result<Array1<usize>> {
        if records.ncols() != self.n_features {
            return Err(ForestErr::SizeMismatch {
                got: records.ncols(),
                expected: self.n_features,
            });
        }

        let mut votes = Array2::<usize>::zeros((records.nrows(), self.n_classes));
        for member in &self.members {
            let view = records.select(Axis(1), &member.columns);
            let predicted: Array1<usize> = member.tree.predict(&view);
            for (row, &label) in predicted.iter().enumerate() {
                votes[[row, label]] += 1;
            }
        }

        let labels = votes
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .fold((0, 0), |best, (label, &count)| {
                        if count > best.1 { (label, count) } else { best }
                    })
                    .0
            })
            .collect();

        Ok(labels)
    }

    /// Predicts the label of a single feature vector.
    pub fn predict_one(&self, features: &[f64]) -> Result<usize> {
        let records = ArrayView2::from_shape((1, features.len()), features).map_err(|_| {
            ForestErr::SizeMismatch {
                got: features.len(),
                expected: self.n_features,
            }
        })?;

        let labels = self.predict(records)?;
        Ok(labels[0])
    }
}

impl fmt::Debug for Forest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Forest")
            .field("n_trees", &self.members.len())
            .field("n_features", &self.n_features)
            .field("n_classes", &self.n_classes)
            .finish()
    }
}

fn fit_failed(tree: usize, e: impl fmt::Display) -> ForestErr {
    ForestErr::Fit {
        tree,
        msg: e.to_string(),
    }
}

/// Fraction of `predicted` labels that match `truth`.
///
/// # Panics
/// - if the views have different lengths
pub fn accuracy(predicted: ArrayView1<'_, usize>, truth: ArrayView1<'_, usize>) -> f64 {
    assert_eq!(predicted.len(), truth.len(), "predicted and truth must have same length");
    if truth.is_empty() {
        return 0.0;
    }

    let hits = predicted
        .iter()
        .zip(truth.iter())
        .filter(|(p, t)| p == t)
        .count();

    hits as f64 / truth.len() as f64
}
