//! Environmental readings sent as the request body

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::reading::Reading;

/// Accepted range for readings in degrees celsius
const CELSIUS_RANGE: (f64, f64) = (-100.0, 100.0);
/// Accepted range for percentages
const PERCENTAGE_RANGE: (f64, f64) = (0.0, 100.0);
/// Accepted range for a raw 10-bit analog read
const RAW_ANALOG_RANGE: (f64, f64) = (0.0, 1024.0);

/// The five telemetry fields, in wire order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Telemetry {
    pub air_temperature_celsius: Reading,
    pub air_humidity_percentage: Reading,
    pub air_heat_index_celsius: Reading,
    pub soil_resistivity_raw: Reading,
    pub soil_temperature_celsius: Reading,
}

impl Telemetry {
    /// Field name to reading, in wire order
    pub fn readings(&self) -> IndexMap<&'static str, Reading> {
        IndexMap::from([
            ("air_temperature_celsius", self.air_temperature_celsius),
            ("air_humidity_percentage", self.air_humidity_percentage),
            ("air_heat_index_celsius", self.air_heat_index_celsius),
            ("soil_resistivity_raw", self.soil_resistivity_raw),
            ("soil_temperature_celsius", self.soil_temperature_celsius),
        ])
    }

    /// Body record: field name to text form of the reading
    pub fn body_record(&self) -> IndexMap<&'static str, String> {
        self.readings().into_iter().map(|(k, v)| (k, v.to_string())).collect()
    }

    /// Names of readings that are NaN or infinite
    pub fn non_finite(&self) -> Vec<&'static str> {
        self.readings()
            .into_iter()
            .filter(|(_, v)| !v.is_finite())
            .map(|(k, _)| k)
            .collect()
    }

    /// Readings the event endpoint would reject as out of range
    pub fn range_warnings(&self) -> Vec<String> {
        let checks = [
            ("air_temperature_celsius", self.air_temperature_celsius, CELSIUS_RANGE),
            ("air_humidity_percentage", self.air_humidity_percentage, PERCENTAGE_RANGE),
            ("air_heat_index_celsius", self.air_heat_index_celsius, CELSIUS_RANGE),
            ("soil_resistivity_raw", self.soil_resistivity_raw, RAW_ANALOG_RANGE),
            ("soil_temperature_celsius", self.soil_temperature_celsius, CELSIUS_RANGE),
        ];

        let mut warnings = Vec::new();
        for (name, reading, (min, max)) in checks {
            let value = reading.as_f64();
            if value < min || value > max {
                warnings.push(format!("{} = {} is outside {}..={}", name, reading, min, max));
            }
        }

        // The endpoint reads soil_resistivity_raw as an integer
        if matches!(self.soil_resistivity_raw, Reading::Float(_)) {
            warnings.push(format!(
                "soil_resistivity_raw = {} is not a whole number",
                self.soil_resistivity_raw
            ));
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Telemetry {
        Telemetry {
            air_temperature_celsius: Reading::Float(22.5),
            air_humidity_percentage: Reading::Int(60),
            air_heat_index_celsius: Reading::Float(23.1),
            soil_resistivity_raw: Reading::Int(512),
            soil_temperature_celsius: Reading::Float(19.0),
        }
    }

    #[test]
    fn test_default_is_all_zero() {
        let record = Telemetry::default().body_record();
        assert_eq!(record.len(), 5);
        assert!(record.values().all(|v| v == "0"));
    }

    #[test]
    fn test_body_record_exact_fields_and_values() {
        let record = scenario().body_record();
        let pairs: Vec<(&str, &str)> = record.iter().map(|(k, v)| (*k, v.as_str())).collect();
        assert_eq!(
            pairs,
            vec![
                ("air_temperature_celsius", "22.5"),
                ("air_humidity_percentage", "60"),
                ("air_heat_index_celsius", "23.1"),
                ("soil_resistivity_raw", "512"),
                ("soil_temperature_celsius", "19.0"),
            ]
        );
    }

    #[test]
    fn test_no_warnings_in_range() {
        assert!(scenario().range_warnings().is_empty());
        assert!(Telemetry::default().range_warnings().is_empty());
    }

    #[test]
    fn test_range_warnings() {
        let telemetry = Telemetry {
            air_temperature_celsius: Reading::Float(150.0),
            air_humidity_percentage: Reading::Int(-1),
            soil_resistivity_raw: Reading::Int(2048),
            ..Telemetry::default()
        };
        let warnings = telemetry.range_warnings();
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].starts_with("air_temperature_celsius"));
        assert!(warnings[2].contains("2048"));
    }

    #[test]
    fn test_fractional_raw_read_warns() {
        let telemetry = Telemetry {
            soil_resistivity_raw: Reading::Float(12.5),
            ..Telemetry::default()
        };
        let warnings = telemetry.range_warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("whole number"));
    }

    #[test]
    fn test_non_finite() {
        let telemetry = Telemetry {
            air_heat_index_celsius: Reading::Float(f64::NAN),
            ..Telemetry::default()
        };
        assert_eq!(telemetry.non_finite(), vec!["air_heat_index_celsius"]);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let telemetry: Telemetry = serde_yaml::from_str("soil_resistivity_raw: 300").unwrap();
        assert_eq!(telemetry.soil_resistivity_raw, Reading::Int(300));
        assert_eq!(telemetry.air_temperature_celsius, Reading::Int(0));
    }
}
