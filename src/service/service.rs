use serde::Serialize;
use serde_json::{Map, Value};

use super::{error::ServiceErr, validation::extract_features};
use crate::{
    data::{Dataset, FeatureSchema},
    forest::{Forest, ForestErr},
    training::{self, TrainingConfig, TrainingErr, TrainingReport},
};

/// Body of a successful prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Prediction {
    pub prediction: u8,
}

/// The trained model together with the schema it expects.
///
/// Built once at startup and only read afterwards, so a single instance can
/// serve any number of concurrent requests.
#[derive(Debug)]
pub struct PredictionService {
    schema: FeatureSchema,
    forest: Forest,
}

impl PredictionService {
    /// # Errors
    /// Returns `ForestErr::SizeMismatch` if `forest` wasn't fitted on as many
    /// features as `schema` names.
    pub fn new(schema: FeatureSchema, forest: Forest) -> Result<Self, ForestErr> {
        if forest.n_features() != schema.len() {
            return Err(ForestErr::SizeMismatch {
                got: schema.len(),
                expected: forest.n_features(),
            });
        }

        Ok(Self { schema, forest })
    }

    /// Runs the training step on `dataset`, whose columns must follow
    /// `schema`, and wraps the fitted forest.
    pub fn train(
        dataset: &Dataset,
        schema: FeatureSchema,
        config: &TrainingConfig,
    ) -> Result<(Self, TrainingReport), TrainingErr> {
        let (forest, report) = training::train(dataset, config)?;
        let service = Self::new(schema, forest)?;
        Ok((service, report))
    }

    #[inline]
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Validates `body` against the schema and predicts its label.
    ///
    /// # Errors
    /// Returns `ServiceErr::Validation` if a feature is missing, not a number
    /// or out of range.
    pub fn predict(&self, body: &Map<String, Value>) -> Result<Prediction, ServiceErr> {
        let features = extract_features(&self.schema, body)?;
        self.predict_features(&features)
    }

    /// Predicts the label of a feature vector already in schema order.
    pub fn predict_features(&self, features: &[f64]) -> Result<Prediction, ServiceErr> {
        let label = self.forest.predict_one(features)?;
        Ok(Prediction {
            prediction: u8::from(label != 0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::{Feature, LABEL_COLUMN},
        forest::ForestParams,
        service::ValidationErr,
    };
    use serde_json::json;

    fn schema() -> FeatureSchema {
        FeatureSchema::new(vec![
            Feature::unbounded("oxygen"),
            Feature::unbounded("salinity"),
        ])
    }

    fn service() -> PredictionService {
        let mut csv = String::from("oxygen,salinity,Suitable\n");
        for i in 0..30 {
            let oxygen = (i % 10) as f64;
            csv.push_str(&format!("{oxygen},{},{}\n", i % 4, u8::from(oxygen >= 5.0)));
        }

        let ds = Dataset::from_csv_str(&csv, &schema(), LABEL_COLUMN).unwrap();
        let config = TrainingConfig {
            forest: ForestParams::new(10),
            ..TrainingConfig::default()
        };
        PredictionService::train(&ds, schema(), &config).unwrap().0
    }

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn predicts_binary_labels() {
        let service = service();

        let low = service.predict(&body(json!({"oxygen": 1, "salinity": 2}))).unwrap();
        let high = service.predict(&body(json!({"oxygen": 9, "salinity": 2}))).unwrap();
        assert_eq!(low, Prediction { prediction: 0 });
        assert_eq!(high, Prediction { prediction: 1 });
    }

    #[test]
    fn validation_errors_skip_the_model() {
        let err = service()
            .predict(&body(json!({"salinity": 2})))
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceErr::Validation(ValidationErr::MissingFeature(ref k)) if k == "oxygen"
        ));
    }

    #[test]
    fn schema_must_match_forest() {
        let csv = "oxygen,salinity,Suitable\n1,1,0\n9,1,1\n";
        let ds = Dataset::from_csv_str(csv, &schema(), LABEL_COLUMN).unwrap();
        let forest = ForestParams::new(2).fit(&ds).unwrap();

        let err = PredictionService::new(FeatureSchema::water_quality(), forest).unwrap_err();
        assert!(matches!(err, ForestErr::SizeMismatch { got: 8, expected: 2 }));
    }
}
