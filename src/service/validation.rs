use std::{error::Error, fmt};

use serde_json::{Map, Value};

use crate::data::{Feature, FeatureSchema};

/// Why a request body could not be turned into a feature vector.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationErr {
    MissingFeature(String),
    WrongType {
        feature: String,
        found: &'static str,
    },
    OutOfRange {
        feature: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl fmt::Display for ValidationErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFeature(name) => write!(f, "Missing feature: '{name}'"),
            Self::WrongType { feature, found } => {
                write!(f, "Invalid feature: '{feature}' must be a number, got {found}")
            }
            Self::OutOfRange {
                feature,
                value,
                min,
                max,
            } if *max == f64::MAX => write!(
                f,
                "Invalid feature: '{feature}' must be at least {min}, got {value}"
            ),
            Self::OutOfRange {
                feature,
                value,
                min,
                max,
            } => write!(
                f,
                "Invalid feature: '{feature}' must be between {min} and {max}, got {value}"
            ),
        }
    }
}

impl Error for ValidationErr {}

/// Pulls the schema's features out of `body`, in schema order.
///
/// Presence is checked for the whole schema first, so a body missing several
/// keys always reports the first of them.
///
/// # Errors
/// Returns the first `ValidationErr` found.
pub fn extract_features(
    schema: &FeatureSchema,
    body: &Map<String, Value>,
) -> Result<Vec<f64>, ValidationErr> {
    if let Some(missing) = schema.names().find(|name| !body.contains_key(*name)) {
        return Err(ValidationErr::MissingFeature(missing.to_string()));
    }

    schema.iter().map(|feature| read_number(body, feature)).collect()
}

/// Reads a single numeric feature and checks it against its range.
pub fn read_number(body: &Map<String, Value>, feature: &Feature) -> Result<f64, ValidationErr> {
    let value = body
        .get(&feature.name)
        .ok_or_else(|| ValidationErr::MissingFeature(feature.name.clone()))?;

    let number = value.as_f64().ok_or_else(|| ValidationErr::WrongType {
        feature: feature.name.clone(),
        found: kind(value),
    })?;

    if !feature.range.contains(&number) {
        return Err(ValidationErr::OutOfRange {
            feature: feature.name.clone(),
            value: number,
            min: *feature.range.start(),
            max: *feature.range.end(),
        });
    }

    Ok(number)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a json object"),
        }
    }

    fn full() -> Value {
        json!({
            "pH": 7.5,
            "CO3": 10,
            "Salinity": 5,
            "HCO3": 120,
            "Alkalinity": 100,
            "Hardness": 150,
            "Ca:Mg Ratio": 3.5,
            "Dissolved Oxygen": 6.2
        })
    }

    #[test]
    fn extracts_in_schema_order() {
        let features = extract_features(&FeatureSchema::water_quality(), &body(full())).unwrap();
        assert_eq!(features, vec![7.5, 10.0, 5.0, 120.0, 100.0, 150.0, 3.5, 6.2]);
    }

    #[test]
    fn reports_first_missing_key() {
        let schema = FeatureSchema::water_quality();

        let err = extract_features(&schema, &body(json!({"pH": 7.5}))).unwrap_err();
        assert_eq!(err, ValidationErr::MissingFeature("CO3".into()));
        assert_eq!(err.to_string(), "Missing feature: 'CO3'");

        let mut partial = body(full());
        partial.remove("Ca:Mg Ratio");
        partial.remove("Dissolved Oxygen");
        let err = extract_features(&schema, &partial).unwrap_err();
        assert_eq!(err.to_string(), "Missing feature: 'Ca:Mg Ratio'");
    }

    #[test]
    fn missing_wins_over_wrong_type() {
        let mut partial = body(full());
        partial.insert("pH".into(), json!("seven"));
        partial.remove("Hardness");

        let err = extract_features(&FeatureSchema::water_quality(), &partial).unwrap_err();
        assert_eq!(err, ValidationErr::MissingFeature("Hardness".into()));
    }

    #[test]
    fn rejects_non_numbers() {
        let mut b = body(full());
        b.insert("Salinity".into(), json!("5"));

        let err = extract_features(&FeatureSchema::water_quality(), &b).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid feature: 'Salinity' must be a number, got a string"
        );

        b.insert("Salinity".into(), Value::Null);
        let err = extract_features(&FeatureSchema::water_quality(), &b).unwrap_err();
        assert!(matches!(err, ValidationErr::WrongType { found: "null", .. }));
    }

    #[test]
    fn water_quality_values_are_not_range_checked() {
        let mut b = body(full());
        b.insert("pH".into(), json!(14.5));
        b.insert("Hardness".into(), json!(-1.5));
        let features = extract_features(&FeatureSchema::water_quality(), &b).unwrap();
        assert_eq!(features[0], 14.5);
        assert_eq!(features[5], -1.5);
    }

    #[test]
    fn bounded_features_reject_out_of_range() {
        let schema = FeatureSchema::new(vec![
            Feature::new("pH", 0.0..=14.0),
            Feature::non_negative("Hardness"),
        ]);

        let err = extract_features(&schema, &body(json!({"pH": 15, "Hardness": 1}))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid feature: 'pH' must be between 0 and 14, got 15"
        );

        let err =
            extract_features(&schema, &body(json!({"pH": 7, "Hardness": -1.5}))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid feature: 'Hardness' must be at least 0, got -1.5"
        );
    }
}
