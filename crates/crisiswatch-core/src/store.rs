//! Current indicator per kind.

use std::collections::BTreeMap;

use crate::domain::{EconomicIndicator, IndicatorKind};

/// Holds at most one indicator per kind. A write replaces the previous record
/// for that kind and leaves other kinds alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorStore {
    slots: BTreeMap<IndicatorKind, EconomicIndicator>,
}

impl IndicatorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: IndicatorKind) -> Option<&EconomicIndicator> {
        self.slots.get(&kind)
    }

    /// Store `indicator` in its kind's slot, returning the record it replaced.
    pub fn put(&mut self, indicator: EconomicIndicator) -> Option<EconomicIndicator> {
        self.slots.insert(indicator.kind(), indicator)
    }

    pub fn remove(&mut self, kind: IndicatorKind) -> Option<EconomicIndicator> {
        self.slots.remove(&kind)
    }

    /// Point-in-time copy of every stored indicator in kind order.
    pub fn snapshot(&self) -> Vec<EconomicIndicator> {
        self.slots.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;
    use crate::classifier::Thresholds;
    use crate::domain::{ObservationPeriod, RefreshStamp};

    fn indicator(kind: IndicatorKind, value: f64) -> EconomicIndicator {
        EconomicIndicator::new(
            kind,
            value,
            ObservationPeriod::Day(date!(2025 - 03 - 04)),
            RefreshStamp::now(),
            &Thresholds::default(),
        )
        .expect("indicator")
    }

    #[test]
    fn put_replaces_only_its_own_slot() {
        let mut store = IndicatorStore::new();
        store.put(indicator(IndicatorKind::Bond, 3.5));
        store.put(indicator(IndicatorKind::Exchange, 1380.0));

        let previous = store.put(indicator(IndicatorKind::Bond, 3.9));

        assert_eq!(previous.map(|old| old.value()), Some(3.5));
        assert_eq!(store.get(IndicatorKind::Bond).map(EconomicIndicator::value), Some(3.9));
        assert_eq!(store.get(IndicatorKind::Exchange).map(EconomicIndicator::value), Some(1380.0));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn snapshot_follows_kind_order() {
        let mut store = IndicatorStore::new();
        store.put(indicator(IndicatorKind::Rp, 2.0));
        store.put(indicator(IndicatorKind::Bond, 3.5));

        let kinds: Vec<_> = store.snapshot().iter().map(EconomicIndicator::kind).collect();
        assert_eq!(kinds, vec![IndicatorKind::Bond, IndicatorKind::Rp]);
    }
}
