//! Checking readings against the configured alert rules

use tracing::debug;
use uuid::Uuid;

use crate::models::{AlertEvent, AlertRule, Reading};

/// Evaluate a reading against a rule list
///
/// A rule fires when its (station, pollutant) scope matches the reading
/// and its condition holds for the measured value. Returns one event per
/// firing rule, in rule order. Pure: no scheduling and no delivery.
pub fn evaluate(rules: &[AlertRule], reading: &Reading) -> Vec<AlertEvent> {
    let events: Vec<AlertEvent> = rules
        .iter()
        .filter(|rule| rule.station == reading.station && rule.pollutant == reading.pollutant)
        .filter(|rule| rule.is_triggered(reading.value))
        .map(|rule| AlertEvent {
            id: Uuid::new_v4(),
            rule_id: rule.id,
            station: rule.station.clone(),
            pollutant: rule.pollutant,
            comparator: rule.comparator,
            threshold: rule.threshold,
            value: reading.value,
            triggered_at: reading.recorded_at,
        })
        .collect();

    if !events.is_empty() {
        debug!(
            station = %reading.station,
            pollutant = %reading.pollutant,
            value = reading.value,
            fired = events.len(),
            "reading triggered alert rules"
        );
    }

    events
}
