//! In-memory store for user-defined alert rules

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{AlertRule, AlertRuleDraft};

/// Ordered collection of alert rules with a confirmation-gated delete
///
/// Rules keep insertion order, which is also display order. Removal is a
/// two-step interaction: [`AlertRuleStore::request_delete`] stages the
/// target, and only [`AlertRuleStore::confirm`] performs the removal;
/// [`AlertRuleStore::cancel`] discards the staged request. The store is
/// process-local and reset on restart.
#[derive(Debug, Default)]
pub struct AlertRuleStore {
    rules: Vec<AlertRule>,
    pending: Option<usize>,
}

impl AlertRuleStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a draft and append the resulting rule
    ///
    /// Invalid drafts are never admitted; the store is unchanged on
    /// rejection. Duplicate rules are permitted.
    pub fn create(&mut self, draft: AlertRuleDraft) -> Result<Uuid> {
        let rule = draft.validate()?;
        let id = rule.id;

        debug!(
            station = %rule.station,
            pollutant = %rule.pollutant,
            condition = %rule.comparator,
            threshold = rule.threshold,
            "alert rule created"
        );

        self.rules.push(rule);
        Ok(id)
    }

    /// Current rules in store order
    pub fn rules(&self) -> &[AlertRule] {
        &self.rules
    }

    /// Number of rules in the store
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the store holds no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Stage a rule for deletion
    ///
    /// The rule is not removed until [`AlertRuleStore::confirm`]. Staging
    /// again overwrites the previous target. Out-of-bounds indexes are
    /// rejected and leave the store untouched.
    pub fn request_delete(&mut self, index: usize) -> Result<()> {
        if index >= self.rules.len() {
            return Err(Error::not_found("alert rule", index));
        }

        debug!(index, "alert rule delete staged");
        self.pending = Some(index);
        Ok(())
    }

    /// Perform the staged deletion, if any
    ///
    /// Returns the removed rule, or `Ok(None)` when nothing was staged.
    /// Relative order of the remaining rules is preserved. A staged index
    /// that no longer resolves clears the staged state and reports
    /// NotFound instead of touching the list.
    pub fn confirm(&mut self) -> Result<Option<AlertRule>> {
        let Some(index) = self.pending.take() else {
            return Ok(None);
        };

        if index >= self.rules.len() {
            warn!(index, "staged alert rule index no longer resolves");
            return Err(Error::not_found("alert rule", index));
        }

        let rule = self.rules.remove(index);
        debug!(rule_id = %rule.id, index, "alert rule deleted");
        Ok(Some(rule))
    }

    /// Discard the staged deletion without touching the list
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Index staged for deletion, if a confirmation is pending
    pub fn pending_delete(&self) -> Option<usize> {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn draft(station: &str, threshold: &str) -> AlertRuleDraft {
        AlertRuleDraft {
            station: station.to_string(),
            pollutant: "PM25".to_string(),
            comparator: ">".to_string(),
            threshold: threshold.to_string(),
        }
    }

    fn store_with(stations: &[&str]) -> AlertRuleStore {
        let mut store = AlertRuleStore::new();
        for station in stations {
            store.create(draft(station, "50")).unwrap();
        }
        store
    }

    fn stations(store: &AlertRuleStore) -> Vec<String> {
        store.rules().iter().map(|r| r.station.clone()).collect()
    }

    #[test]
    fn create_appends_in_submission_order() {
        let mut store = AlertRuleStore::new();

        store.create(draft("estacion1", "50")).unwrap();
        store.create(draft("estacion2", "30")).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(stations(&store), ["estacion1", "estacion2"]);
    }

    #[test]
    fn create_accepts_the_console_example() {
        let mut store = AlertRuleStore::new();

        assert!(store.create(draft("estacion1", "50")).is_ok());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn create_rejects_placeholder_condition() {
        let mut store = store_with(&["estacion1"]);
        let mut bad = draft("estacion1", "50");
        bad.comparator = "condicion".to_string();

        let before = store.rules().to_vec();
        assert!(matches!(store.create(bad), Err(Error::Validation(_))));
        assert_eq!(store.rules(), before.as_slice());
    }

    #[test]
    fn create_rejects_non_positive_threshold() {
        let mut store = store_with(&["estacion1"]);

        let before = store.rules().to_vec();
        assert!(store.create(draft("estacion1", "0")).is_err());
        assert_eq!(store.rules(), before.as_slice());
    }

    #[test]
    fn duplicates_are_permitted() {
        let mut store = AlertRuleStore::new();

        store.create(draft("estacion1", "50")).unwrap();
        store.create(draft("estacion1", "50")).unwrap();

        assert_eq!(store.len(), 2);
    }

    #[test]
    fn confirmed_delete_removes_only_the_target() {
        let mut store = store_with(&["estacion1", "estacion2", "estacion3"]);

        store.request_delete(1).unwrap();
        let removed = store.confirm().unwrap().unwrap();

        assert_eq!(removed.station, "estacion2");
        assert_eq!(stations(&store), ["estacion1", "estacion3"]);
    }

    #[test]
    fn cancelled_delete_leaves_the_store_unchanged() {
        let mut store = store_with(&["estacion1", "estacion2"]);
        let before = store.rules().to_vec();

        store.request_delete(0).unwrap();
        store.cancel();

        assert_eq!(store.rules(), before.as_slice());
        assert_eq!(store.pending_delete(), None);
        assert_eq!(store.confirm().unwrap(), None);
    }

    #[test]
    fn confirm_without_a_staged_delete_is_a_no_op() {
        let mut store = store_with(&["estacion1"]);

        assert_eq!(store.confirm().unwrap(), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn out_of_bounds_delete_is_rejected() {
        let mut store = store_with(&["estacion1"]);

        let err = store.request_delete(5).unwrap_err();

        assert!(matches!(err, Error::NotFound { index: 5, .. }));
        assert_eq!(store.len(), 1);
        assert_eq!(store.pending_delete(), None);
    }

    #[test]
    fn restaging_overwrites_the_previous_target() {
        let mut store = store_with(&["estacion1", "estacion2"]);

        store.request_delete(0).unwrap();
        store.request_delete(1).unwrap();
        let removed = store.confirm().unwrap().unwrap();

        assert_eq!(removed.station, "estacion2");
        assert_eq!(stations(&store), ["estacion1"]);
    }

    proptest! {
        #[test]
        fn confirmed_delete_preserves_relative_order(len in 1usize..8, seed in 0usize..8) {
            let index = seed % len;
            let names: Vec<String> = (0..len).map(|i| format!("estacion{i}")).collect();

            let mut store = AlertRuleStore::new();
            for name in &names {
                store.create(draft(name, "50")).unwrap();
            }

            store.request_delete(index).unwrap();
            let removed = store.confirm().unwrap().unwrap();

            let mut expected = names;
            let expected_removed = expected.remove(index);
            prop_assert_eq!(removed.station, expected_removed);
            prop_assert_eq!(stations(&store), expected);
        }
    }
}
