use std::ops::RangeInclusive;

/// Name of the binary label column in the training file.
pub const LABEL_COLUMN: &str = "Suitable";

/// A single named model input and the values it accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub name: String,
    pub range: RangeInclusive<f64>,
}

impl Feature {
    pub fn new(name: impl Into<String>, range: RangeInclusive<f64>) -> Self {
        Self {
            name: name.into(),
            range,
        }
    }

    /// A feature that accepts any finite value.
    pub fn unbounded(name: impl Into<String>) -> Self {
        Self::new(name, f64::MIN..=f64::MAX)
    }

    /// A feature that accepts any non-negative value.
    pub fn non_negative(name: impl Into<String>) -> Self {
        Self::new(name, 0.0..=f64::MAX)
    }
}

/// Ordered list of the features a model was trained on.
///
/// The position of a feature in the schema is the column it occupies in the
/// model's record matrix, so requests are always extracted in this order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    features: Vec<Feature>,
}

impl FeatureSchema {
    /// # Panics
    /// - if `features` is empty
    pub fn new(features: Vec<Feature>) -> Self {
        assert!(!features.is_empty(), "schema must have at least one feature");
        Self { features }
    }

    /// The eight water-quality measurements, in training column order.
    ///
    /// None of them is range checked: any number is handed to the model.
    pub fn water_quality() -> Self {
        Self::new(
            [
                "pH",
                "CO3",
                "Salinity",
                "HCO3",
                "Alkalinity",
                "Hardness",
                "Ca:Mg Ratio",
                "Dissolved Oxygen",
            ]
            .into_iter()
            .map(Feature::unbounded)
            .collect(),
        )
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|f| f.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn water_quality_order_is_fixed() {
        let schema = FeatureSchema::water_quality();
        let names: Vec<_> = schema.names().collect();
        assert_eq!(
            names,
            [
                "pH",
                "CO3",
                "Salinity",
                "HCO3",
                "Alkalinity",
                "Hardness",
                "Ca:Mg Ratio",
                "Dissolved Oxygen"
            ]
        );
    }

    #[test]
    fn water_quality_accepts_any_number() {
        for feature in FeatureSchema::water_quality().iter() {
            assert!(feature.range.contains(&-3.0), "{}", feature.name);
            assert!(feature.range.contains(&14.5), "{}", feature.name);
            assert!(feature.range.contains(&1e12), "{}", feature.name);
        }
    }

    #[test]
    fn non_negative_rejects_below_zero() {
        let oxygen = Feature::non_negative("Dissolved Oxygen");
        assert!(oxygen.range.contains(&0.0));
        assert!(!oxygen.range.contains(&-0.5));
    }
}
