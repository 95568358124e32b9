use super::{
    error::{ForestErr, Result},
    forest::Forest,
};
use crate::data::Dataset;

pub const DEFAULT_N_TREES: usize = 100;
pub const DEFAULT_SEED: u64 = 2529;

/// How each sample's weight is derived from its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassWeight {
    /// `n_samples / (n_classes * count(label))`, so every class carries the
    /// same total weight regardless of how often it appears.
    #[default]
    Balanced,
    Uniform,
}

impl ClassWeight {
    /// Returns one weight per label given how many samples carry each label.
    /// Labels without samples get a weight of zero.
    pub fn weights(self, class_counts: &[usize]) -> Vec<f32> {
        match self {
            ClassWeight::Uniform => vec![1.0; class_counts.len()],
            ClassWeight::Balanced => {
                let total: usize = class_counts.iter().sum();
                let present = class_counts.iter().filter(|&&c| c > 0).count();
                class_counts
                    .iter()
                    .map(|&count| {
                        if count == 0 {
                            0.0
                        } else {
                            total as f32 / (present * count) as f32
                        }
                    })
                    .collect()
            }
        }
    }
}

/// Hyperparameters of a bagged decision-tree ensemble.
#[derive(Debug, Clone, PartialEq)]
pub struct ForestParams {
    pub(super) n_trees: usize,
    pub(super) max_depth: Option<usize>,
    pub(super) bootstrap: bool,
    pub(super) feature_subsample: f32,
    pub(super) class_weight: ClassWeight,
    pub(super) seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: DEFAULT_N_TREES,
            max_depth: None,
            bootstrap: true,
            feature_subsample: 1.0,
            class_weight: ClassWeight::Balanced,
            seed: DEFAULT_SEED,
        }
    }
}

impl ForestParams {
    pub fn new(n_trees: usize) -> Self {
        Self {
            n_trees,
            ..Self::default()
        }
    }

    /// Deepest level a tree may grow to, unlimited when `None`.
    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether every tree is fitted on a sample drawn with replacement.
    pub fn bootstrap(mut self, bootstrap: bool) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    /// Fraction of the feature columns each tree sees, in `(0, 1]`.
    pub fn feature_subsample(mut self, ratio: f32) -> Self {
        self.feature_subsample = ratio;
        self
    }

    pub fn class_weight(mut self, class_weight: ClassWeight) -> Self {
        self.class_weight = class_weight;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// # Errors
    /// Returns `ForestErr::InvalidParams` if there are no trees, the depth
    /// limit is zero or the feature subsample ratio is outside `(0, 1]`.
    pub fn check(&self) -> Result<()> {
        if self.n_trees == 0 {
            return Err(ForestErr::InvalidParams(
                "the forest must have at least one tree".into(),
            ));
        }

        if self.max_depth == Some(0) {
            return Err(ForestErr::InvalidParams("max_depth must be at least 1".into()));
        }

        if !(self.feature_subsample > 0.0 && self.feature_subsample <= 1.0) {
            return Err(ForestErr::InvalidParams(format!(
                "feature_subsample ({}) must be in (0, 1]",
                self.feature_subsample
            )));
        }

        Ok(())
    }

    /// Fits a forest on `dataset`.
    pub fn fit(&self, dataset: &Dataset) -> Result<Forest> {
        self.check()?;
        Forest::fit(self, dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_weights_equalize_class_mass() {
        let w = ClassWeight::Balanced.weights(&[30, 10]);
        assert!((w[0] - 40.0 / 60.0).abs() < 1e-6);
        assert!((w[1] - 2.0).abs() < 1e-6);
        assert!((w[0] * 30.0 - w[1] * 10.0).abs() < 1e-4);
    }

    #[test]
    fn balanced_weights_skip_absent_labels() {
        assert_eq!(ClassWeight::Balanced.weights(&[0, 4]), vec![0.0, 1.0]);
    }

    #[test]
    fn uniform_weights() {
        assert_eq!(ClassWeight::Uniform.weights(&[3, 1]), vec![1.0, 1.0]);
    }

    #[test]
    fn check_rejects_bad_params() {
        assert!(ForestParams::default().check().is_ok());
        assert!(ForestParams::new(0).check().is_err());
        assert!(ForestParams::default().max_depth(Some(0)).check().is_err());
        assert!(ForestParams::default().max_depth(Some(3)).check().is_ok());
        assert!(ForestParams::default().feature_subsample(0.0).check().is_err());
        assert!(ForestParams::default().feature_subsample(1.5).check().is_err());
    }
}
