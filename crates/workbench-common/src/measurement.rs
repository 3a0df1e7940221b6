//! Semantic unit of raster values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// What raster values mean.
///
/// Wire form: `"unitless"`, `{"continuous": {...}}` or `{"classification": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Measurement {
    #[default]
    Unitless,
    Continuous {
        measurement: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
    },
    Classification {
        measurement: String,
        classes: BTreeMap<i64, String>,
    },
}

impl Measurement {
    pub fn continuous(measurement: impl Into<String>, unit: Option<String>) -> Self {
        Measurement::Continuous {
            measurement: measurement.into(),
            unit,
        }
    }

    pub fn classification(
        measurement: impl Into<String>,
        classes: impl IntoIterator<Item = (i64, String)>,
    ) -> Self {
        Measurement::Classification {
            measurement: measurement.into(),
            classes: classes.into_iter().collect(),
        }
    }

    pub fn is_classification(&self) -> bool {
        matches!(self, Measurement::Classification { .. })
    }

    /// Class label for a raster value, if this is a classification.
    pub fn class_name(&self, class: i64) -> Option<&str> {
        match self {
            Measurement::Classification { classes, .. } => classes.get(&class).map(String::as_str),
            _ => None,
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measurement::Unitless => f.write_str("unitless"),
            Measurement::Continuous {
                measurement,
                unit: Some(unit),
            } => write!(f, "{} ({})", measurement, unit),
            Measurement::Continuous { measurement, .. } => f.write_str(measurement),
            Measurement::Classification { measurement, .. } => f.write_str(measurement),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_shapes() {
        let unitless: Measurement = serde_json::from_value(json!("unitless")).unwrap();
        assert_eq!(unitless, Measurement::Unitless);

        let cont: Measurement = serde_json::from_value(json!({
            "continuous": {"measurement": "temperature", "unit": "K"}
        }))
        .unwrap();
        assert_eq!(
            cont,
            Measurement::continuous("temperature", Some("K".to_string()))
        );
        assert_eq!(cont.to_string(), "temperature (K)");

        let class: Measurement = serde_json::from_value(json!({
            "classification": {"measurement": "land cover", "classes": {"1": "forest", "2": "water"}}
        }))
        .unwrap();
        assert_eq!(class.class_name(2), Some("water"));
        assert_eq!(class.class_name(3), None);
        assert_eq!(
            serde_json::to_value(&class).unwrap()["classification"]["classes"]["1"],
            json!("forest")
        );
    }

    #[test]
    fn test_unknown_measurement_rejected() {
        assert!(serde_json::from_value::<Measurement>(json!("ratio")).is_err());
    }
}
