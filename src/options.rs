use serde::{Deserialize, Serialize};

use crate::metrics::KM_PER_MILE;

/// Options for building a track summary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryOptions {
    /// Unit for distance and pace (default: kilometers)
    #[serde(default)]
    pub unit: DistanceUnit,

    /// Include the min/max elevation (default: true)
    #[serde(default = "default_true")]
    pub include_elevation: bool,

    /// Include the track line as a GeoJSON feature (default: true)
    #[serde(default = "default_true")]
    pub include_route: bool,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            unit: DistanceUnit::default(),
            include_elevation: true,
            include_route: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Miles,
}

impl DistanceUnit {
    pub fn convert(self, km: f64) -> f64 {
        match self {
            Self::Kilometers => km,
            Self::Miles => km / KM_PER_MILE,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_object() {
        let opts: SummaryOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts.unit, DistanceUnit::Kilometers);
        assert!(opts.include_elevation);
        assert!(opts.include_route);
    }

    #[test]
    fn test_camel_case_keys() {
        let opts: SummaryOptions =
            serde_json::from_str(r#"{"unit":"miles","includeRoute":false}"#).unwrap();
        assert_eq!(opts.unit, DistanceUnit::Miles);
        assert!(opts.include_elevation);
        assert!(!opts.include_route);
    }

    #[test]
    fn test_unknown_unit_rejected() {
        assert!(serde_json::from_str::<SummaryOptions>(r#"{"unit":"furlongs"}"#).is_err());
    }

    #[test]
    fn test_convert() {
        assert_eq!(DistanceUnit::Kilometers.convert(5.0), 5.0);
        assert!((DistanceUnit::Miles.convert(KM_PER_MILE) - 1.0).abs() < 1e-12);
    }
}
