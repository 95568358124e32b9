use std::{env, error::Error, fmt, path::PathBuf, str::FromStr};

use crate::{
    forest::{ClassWeight, DEFAULT_N_TREES, ForestParams},
    training::TrainingConfig,
};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATASET: &str = "aquaculture_combined.csv";

#[derive(Debug)]
pub enum ConfigErr {
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl fmt::Display for ConfigErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid { key, value, reason } => {
                write!(f, "invalid value '{value}' for {key}: {reason}")
            }
        }
    }
}

impl Error for ConfigErr {}

/// Process configuration, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub dataset_path: PathBuf,
    pub training: TrainingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            dataset_path: PathBuf::from(DEFAULT_DATASET),
            training: TrainingConfig::default(),
        }
    }
}

impl Config {
    /// Reads `HOST`, `PORT`, `DATASET_PATH`, `N_TREES`, `MAX_DEPTH`,
    /// `BOOTSTRAP`, `SEED`, `TRAIN_RATIO` and `CLASS_WEIGHT` from the
    /// environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigErr> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigErr>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let n_trees = parse_or(&lookup, "N_TREES", DEFAULT_N_TREES)?;
        let max_depth: Option<usize> = parse_opt(&lookup, "MAX_DEPTH")?;
        if max_depth == Some(0) {
            return Err(ConfigErr::Invalid {
                key: "MAX_DEPTH",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }
        let bootstrap = parse_or(&lookup, "BOOTSTRAP", true)?;
        let seed = parse_or(&lookup, "SEED", defaults.training.seed)?;
        let train_ratio = parse_or(&lookup, "TRAIN_RATIO", defaults.training.train_ratio)?;
        if !(train_ratio > 0.0 && train_ratio < 1.0) {
            return Err(ConfigErr::Invalid {
                key: "TRAIN_RATIO",
                value: train_ratio.to_string(),
                reason: "must be strictly between 0 and 1".into(),
            });
        }

        let class_weight = match lookup("CLASS_WEIGHT") {
            None => ClassWeight::Balanced,
            Some(v) => match v.to_ascii_lowercase().as_str() {
                "balanced" => ClassWeight::Balanced,
                "uniform" | "none" => ClassWeight::Uniform,
                _ => {
                    return Err(ConfigErr::Invalid {
                        key: "CLASS_WEIGHT",
                        value: v,
                        reason: "expected 'balanced' or 'uniform'".into(),
                    });
                }
            },
        };

        let forest = ForestParams::new(n_trees)
            .max_depth(max_depth)
            .bootstrap(bootstrap)
            .seed(seed)
            .class_weight(class_weight);
        forest.check().map_err(|e| ConfigErr::Invalid {
            key: "N_TREES",
            value: n_trees.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            dataset_path: lookup("DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.dataset_path),
            training: TrainingConfig {
                train_ratio,
                seed,
                forest,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigErr>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    Ok(parse_opt(lookup, key)?.unwrap_or(default))
}

fn parse_opt<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigErr>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigErr::Invalid {
                key,
                reason: e.to_string(),
                value,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_service_contract() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.dataset_path, PathBuf::from("aquaculture_combined.csv"));
        assert_eq!(config.training, TrainingConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("DATASET_PATH", "/data/ponds.csv"),
            ("N_TREES", "10"),
            ("MAX_DEPTH", "6"),
            ("BOOTSTRAP", "false"),
            ("SEED", "7"),
            ("CLASS_WEIGHT", "uniform"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.dataset_path, PathBuf::from("/data/ponds.csv"));
        assert_eq!(config.training.seed, 7);
        assert_eq!(
            config.training.forest,
            ForestParams::new(10)
                .max_depth(Some(6))
                .bootstrap(false)
                .seed(7)
                .class_weight(ClassWeight::Uniform)
        );
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(Config::from_lookup(lookup(&[("PORT", "http")])).is_err());
        assert!(Config::from_lookup(lookup(&[("TRAIN_RATIO", "1.5")])).is_err());
        assert!(Config::from_lookup(lookup(&[("N_TREES", "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[("BOOTSTRAP", "maybe")])).is_err());

        let err = Config::from_lookup(lookup(&[("MAX_DEPTH", "0")])).unwrap_err();
        assert!(err.to_string().contains("MAX_DEPTH"));

        let err = Config::from_lookup(lookup(&[("CLASS_WEIGHT", "heavy")])).unwrap_err();
        assert!(err.to_string().contains("CLASS_WEIGHT"));
    }
}
