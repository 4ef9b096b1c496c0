//! Alert rule data models

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Pollutant variable measured by a monitoring station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Pollutant {
    /// Particulate matter up to 2.5 micrometers
    Pm25,
    /// Particulate matter up to 10 micrometers
    Pm10,
    /// Sulfur dioxide
    So2,
    /// Nitrogen dioxide
    No2,
    /// Ozone
    O3,
    /// Carbon monoxide
    Co,
}

impl Pollutant {
    /// Wire code used by the console and the station feeds
    pub fn code(&self) -> &'static str {
        match self {
            Self::Pm25 => "PM25",
            Self::Pm10 => "PM10",
            Self::So2 => "SO2",
            Self::No2 => "NO2",
            Self::O3 => "O3",
            Self::Co => "CO",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Pollutant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PM25" => Ok(Self::Pm25),
            "PM10" => Ok(Self::Pm10),
            "SO2" => Ok(Self::So2),
            "NO2" => Ok(Self::No2),
            "O3" => Ok(Self::O3),
            "CO" => Ok(Self::Co),
            "" => Err(Error::validation("pollutant variable is required")),
            other => Err(Error::validation(format!(
                "unknown pollutant variable: {other}"
            ))),
        }
    }
}

/// Comparison operator of a threshold condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    /// Greater than
    #[serde(rename = ">")]
    Gt,
    /// Less than
    #[serde(rename = "<")]
    Lt,
    /// Equal to
    #[serde(rename = "=")]
    Eq,
    /// Greater than or equal to
    #[serde(rename = ">=")]
    Gte,
    /// Less than or equal to
    #[serde(rename = "<=")]
    Lte,
}

impl Comparator {
    /// Symbol used on the wire and in the console forms
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Eq => "=",
            Self::Gte => ">=",
            Self::Lte => "<=",
        }
    }

    /// Whether `value` satisfies the condition against `threshold`
    pub fn holds(&self, value: f64, threshold: f64) -> bool {
        match self {
            Self::Gt => value > threshold,
            Self::Lt => value < threshold,
            Self::Eq => (value - threshold).abs() < f64::EPSILON,
            Self::Gte => value >= threshold,
            Self::Lte => value <= threshold,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Comparator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // The console form submits a placeholder option until the user
        // picks one; anything that is not a known symbol stays out.
        match s {
            ">" => Ok(Self::Gt),
            "<" => Ok(Self::Lt),
            "=" => Ok(Self::Eq),
            ">=" => Ok(Self::Gte),
            "<=" => Ok(Self::Lte),
            _ => Err(Error::validation("condition is required")),
        }
    }
}

/// A user-defined threshold condition on a (station, pollutant) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRule {
    /// Unique identifier
    pub id: Uuid,

    /// Station the rule watches
    pub station: String,

    /// Pollutant variable the rule watches
    pub pollutant: Pollutant,

    /// Comparison operator
    pub comparator: Comparator,

    /// Threshold value, always finite and > 0
    pub threshold: f64,

    /// When the rule was created
    pub created_at: DateTime<Utc>,
}

impl AlertRule {
    /// Check if a measured value triggers this rule
    pub fn is_triggered(&self, value: f64) -> bool {
        self.comparator.holds(value, self.threshold)
    }
}

/// Raw form submission for a new alert rule
///
/// All fields arrive as strings, exactly as the console posts them.
/// [`AlertRuleDraft::validate`] is the only path into [`AlertRule`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertRuleDraft {
    /// Selected station identifier
    #[serde(default)]
    pub station: String,

    /// Selected pollutant code
    #[serde(default)]
    pub pollutant: String,

    /// Selected comparison symbol
    #[serde(default)]
    pub comparator: String,

    /// Threshold as typed into the form
    #[serde(default)]
    pub threshold: String,
}

impl AlertRuleDraft {
    /// Validate the draft and build the rule it describes
    ///
    /// A draft is valid only if every field is set, the pollutant and
    /// comparator parse, and the threshold is a finite number > 0.
    pub fn validate(self) -> Result<AlertRule> {
        if self.station.trim().is_empty() {
            return Err(Error::validation("station is required"));
        }

        let pollutant: Pollutant = self.pollutant.trim().parse()?;
        let comparator: Comparator = self.comparator.trim().parse()?;

        let raw = self.threshold.trim();
        if raw.is_empty() {
            return Err(Error::validation("threshold is required"));
        }
        let threshold: f64 = raw
            .parse()
            .map_err(|_| Error::validation("threshold must be a number"))?;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(Error::validation("threshold must be greater than zero"));
        }

        Ok(AlertRule {
            id: Uuid::new_v4(),
            station: self.station.trim().to_string(),
            pollutant,
            comparator,
            threshold,
            created_at: Utc::now(),
        })
    }
}

/// A single pollutant sample reported for a station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Station the sample came from
    pub station: String,

    /// Measured pollutant
    pub pollutant: Pollutant,

    /// Measured value
    pub value: f64,

    /// When the sample was taken
    pub recorded_at: DateTime<Utc>,
}

/// A rule that fired for a reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    /// Unique identifier
    pub id: Uuid,

    /// The rule that fired
    pub rule_id: Uuid,

    /// Station the rule watches
    pub station: String,

    /// Pollutant the rule watches
    pub pollutant: Pollutant,

    /// Comparison operator of the rule
    pub comparator: Comparator,

    /// Configured threshold
    pub threshold: f64,

    /// The measured value that crossed it
    pub value: f64,

    /// When the triggering sample was taken
    pub triggered_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn draft(station: &str, pollutant: &str, comparator: &str, threshold: &str) -> AlertRuleDraft {
        AlertRuleDraft {
            station: station.to_string(),
            pollutant: pollutant.to_string(),
            comparator: comparator.to_string(),
            threshold: threshold.to_string(),
        }
    }

    #[test]
    fn valid_draft_builds_a_rule() {
        let rule = draft("estacion1", "PM25", ">", "50").validate().unwrap();

        assert_eq!(rule.station, "estacion1");
        assert_eq!(rule.pollutant, Pollutant::Pm25);
        assert_eq!(rule.comparator, Comparator::Gt);
        assert_eq!(rule.threshold, 50.0);
    }

    #[rstest]
    #[case::empty_station("", "PM25", ">", "50")]
    #[case::empty_pollutant("estacion1", "", ">", "50")]
    #[case::unknown_pollutant("estacion1", "PM99", ">", "50")]
    #[case::placeholder_comparator("estacion1", "PM25", "condicion", "50")]
    #[case::empty_comparator("estacion1", "PM25", "", "50")]
    #[case::empty_threshold("estacion1", "PM25", ">", "")]
    #[case::non_numeric_threshold("estacion1", "PM25", ">", "abc")]
    #[case::zero_threshold("estacion1", "PM25", ">", "0")]
    #[case::negative_threshold("estacion1", "PM25", ">", "-3.5")]
    #[case::nan_threshold("estacion1", "PM25", ">", "NaN")]
    #[case::infinite_threshold("estacion1", "PM25", ">", "inf")]
    fn invalid_drafts_are_rejected(
        #[case] station: &str,
        #[case] pollutant: &str,
        #[case] comparator: &str,
        #[case] threshold: &str,
    ) {
        let result = draft(station, pollutant, comparator, threshold).validate();

        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn decimal_threshold_is_accepted() {
        let rule = draft("estacion2", "CO", "<=", "12.5").validate().unwrap();

        assert_eq!(rule.threshold, 12.5);
    }

    #[rstest]
    #[case(">", 51.0, 50.0, true)]
    #[case(">", 50.0, 50.0, false)]
    #[case("<", 49.9, 50.0, true)]
    #[case("=", 50.0, 50.0, true)]
    #[case("=", 50.1, 50.0, false)]
    #[case(">=", 50.0, 50.0, true)]
    #[case("<=", 50.0, 50.0, true)]
    #[case("<=", 50.1, 50.0, false)]
    fn comparator_semantics(
        #[case] symbol: &str,
        #[case] value: f64,
        #[case] threshold: f64,
        #[case] expected: bool,
    ) {
        let comparator: Comparator = symbol.parse().unwrap();

        assert_eq!(comparator.holds(value, threshold), expected);
    }

    #[test]
    fn pollutant_codes_round_trip() {
        for code in ["PM25", "PM10", "SO2", "NO2", "O3", "CO"] {
            let pollutant: Pollutant = code.parse().unwrap();
            assert_eq!(pollutant.code(), code);
        }
    }

    #[test]
    fn pollutant_serde_uses_wire_codes() {
        let json = serde_json::to_string(&Pollutant::Pm25).unwrap();
        assert_eq!(json, "\"PM25\"");

        let back: Pollutant = serde_json::from_str("\"SO2\"").unwrap();
        assert_eq!(back, Pollutant::So2);
    }

    #[test]
    fn comparator_serde_uses_symbols() {
        let json = serde_json::to_string(&Comparator::Gte).unwrap();
        assert_eq!(json, "\">=\"");

        let back: Comparator = serde_json::from_str("\"<\"").unwrap();
        assert_eq!(back, Comparator::Lt);
    }
}
