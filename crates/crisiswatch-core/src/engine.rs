//! Crisis level aggregation.
//!
//! Rules are evaluated in fixed priority order and the first match wins:
//! CRITICAL, then CAUTION, then CONCERN, else STABLE. Within a level the
//! count-based rules come before single-indicator overrides. A rule that
//! names a kind falls through when that kind is absent from the input.

use serde::{Deserialize, Serialize};

use crate::domain::{CrisisLevel, EconomicIndicator, IndicatorKind, Status};
use crate::format::format_number;

/// Thresholds used only by the aggregation cascade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrisisRules {
    /// CRITICAL when exchange `>=` this.
    pub exchange_critical: f64,
    /// CRITICAL when rp `>=` this.
    pub rp_critical: f64,
    /// CRITICAL when reserve `<` this.
    pub reserve_critical: f64,
    /// CAUTION when bond `>` this.
    pub bond_caution: f64,
    /// CAUTION when exchange `>` this.
    pub exchange_caution: f64,
    /// CAUTION when exchange `>` this and stock `<` `flight_stock`.
    pub flight_exchange: f64,
    pub flight_stock: f64,
    /// CONCERN when bond `>` this.
    pub bond_concern: f64,
    /// CONCERN when pf `>` this.
    pub pf_concern: f64,
}

impl Default for CrisisRules {
    fn default() -> Self {
        Self {
            exchange_critical: 1500.0,
            rp_critical: 5.0,
            reserve_critical: 3800.0,
            bond_caution: 4.0,
            exchange_caution: 1470.0,
            flight_exchange: 1400.0,
            flight_stock: -1000.0,
            bond_concern: 3.8,
            pf_concern: 8.0,
        }
    }
}

/// Which rule produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    NoData,
    MultipleDanger,
    ExchangeCritical,
    RpCritical,
    ReserveCritical,
    DangerWithWarnings,
    CombinedSignals,
    BondCaution,
    ExchangeCaution,
    CapitalFlight,
    MultipleWarning,
    SingleDanger,
    BondConcern,
    PfConcern,
    AllClear,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisLevelResult {
    pub level: CrisisLevel,
    /// Justification citing the rule and the indicators involved. Never empty.
    pub reason: String,
    pub trigger: Trigger,
}

impl CrisisLevelResult {
    fn new(level: CrisisLevel, trigger: Trigger, reason: String) -> Self {
        Self {
            level,
            reason,
            trigger,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CrisisEngine {
    rules: CrisisRules,
}

impl CrisisEngine {
    pub const fn new(rules: CrisisRules) -> Self {
        Self { rules }
    }

    pub const fn rules(&self) -> &CrisisRules {
        &self.rules
    }

    pub fn aggregate(&self, indicators: &[EconomicIndicator]) -> CrisisLevelResult {
        if indicators.is_empty() {
            return CrisisLevelResult::new(
                CrisisLevel::Stable,
                Trigger::NoData,
                String::from("지표 데이터가 없습니다."),
            );
        }

        let rules = &self.rules;
        let danger = names_with(indicators, Status::Danger);
        let warning = names_with(indicators, Status::Warning);
        let safe_count = indicators.len() - danger.len() - warning.len();
        let value = |kind: IndicatorKind| {
            indicators
                .iter()
                .rev()
                .find(|indicator| indicator.kind() == kind)
                .map(EconomicIndicator::value)
        };

        let bond = value(IndicatorKind::Bond);
        let exchange = value(IndicatorKind::Exchange);
        let reserve = value(IndicatorKind::Reserve);
        let pf = value(IndicatorKind::Pf);
        let stock = value(IndicatorKind::Stock);
        let rp = value(IndicatorKind::Rp);

        // CRITICAL
        if danger.len() >= 2 {
            return CrisisLevelResult::new(
                CrisisLevel::Critical,
                Trigger::MultipleDanger,
                format!("위험 지표 {}개: {}", danger.len(), danger.join(", ")),
            );
        }
        if let Some(rate) = exchange.filter(|rate| *rate >= rules.exchange_critical) {
            return CrisisLevelResult::new(
                CrisisLevel::Critical,
                Trigger::ExchangeCritical,
                format!(
                    "원/달러 환율이 {}원으로 위기 임계점({}원)에 도달해 시스템 붕괴 직전 수준입니다.",
                    format_number(rate),
                    format_number(rules.exchange_critical)
                ),
            );
        }
        if let Some(volume) = rp.filter(|volume| *volume >= rules.rp_critical) {
            return CrisisLevelResult::new(
                CrisisLevel::Critical,
                Trigger::RpCritical,
                format!(
                    "한국은행 RP 매입 규모가 {}조원으로 긴급 유동성 공급 임계점({}조원)을 넘었습니다.",
                    format_number(volume),
                    format_number(rules.rp_critical)
                ),
            );
        }
        if let Some(amount) = reserve.filter(|amount| *amount < rules.reserve_critical) {
            return CrisisLevelResult::new(
                CrisisLevel::Critical,
                Trigger::ReserveCritical,
                format!("외환보유액이 {}억 달러로 급감했습니다.", format_number(amount)),
            );
        }

        // CAUTION
        if danger.len() == 1 && warning.len() >= 2 {
            return CrisisLevelResult::new(
                CrisisLevel::Caution,
                Trigger::DangerWithWarnings,
                format!(
                    "위험 지표 1개({})와 주의 지표 {}개({})가 동시에 발생했습니다.",
                    danger.join(", "),
                    warning.len(),
                    warning.join(", ")
                ),
            );
        }
        if danger.len() + warning.len() >= 3 {
            let flagged: Vec<&str> = danger.iter().chain(warning.iter()).copied().collect();
            return CrisisLevelResult::new(
                CrisisLevel::Caution,
                Trigger::CombinedSignals,
                format!(
                    "주의 및 위험 지표가 총 {}개({})로 경제 위기 징후가 가시화되고 있습니다.",
                    flagged.len(),
                    flagged.join(", ")
                ),
            );
        }
        if let Some(yield_rate) = bond.filter(|rate| *rate > rules.bond_caution) {
            return CrisisLevelResult::new(
                CrisisLevel::Caution,
                Trigger::BondCaution,
                format!(
                    "국고채 10년물 금리가 {}%로 채권시장 불안이 확대되고 있습니다.",
                    format_number(yield_rate)
                ),
            );
        }
        if let Some(rate) = exchange.filter(|rate| *rate > rules.exchange_caution) {
            return CrisisLevelResult::new(
                CrisisLevel::Caution,
                Trigger::ExchangeCaution,
                format!(
                    "원/달러 환율이 {}원으로 급등해 외환시장 불안이 커지고 있습니다.",
                    format_number(rate)
                ),
            );
        }
        if let (Some(rate), Some(flow)) = (exchange, stock) {
            if rate > rules.flight_exchange && flow < rules.flight_stock {
                return CrisisLevelResult::new(
                    CrisisLevel::Caution,
                    Trigger::CapitalFlight,
                    format!(
                        "원/달러 환율 {}원과 외국인 순매도 {}억원으로 자본 이탈이 가시화되고 있습니다.",
                        format_number(rate),
                        format_number(flow.abs())
                    ),
                );
            }
        }

        // CONCERN
        if warning.len() >= 2 {
            return CrisisLevelResult::new(
                CrisisLevel::Concern,
                Trigger::MultipleWarning,
                format!("주의 지표 {}개: {}", warning.len(), warning.join(", ")),
            );
        }
        if danger.len() == 1 {
            return CrisisLevelResult::new(
                CrisisLevel::Concern,
                Trigger::SingleDanger,
                format!("위험 지표 1개: {}", danger.join(", ")),
            );
        }
        if let Some(yield_rate) = bond.filter(|rate| *rate > rules.bond_concern) {
            return CrisisLevelResult::new(
                CrisisLevel::Concern,
                Trigger::BondConcern,
                format!(
                    "국고채 10년물 금리가 {}%로 내부 시스템 균열 징후가 나타나고 있습니다.",
                    format_number(yield_rate)
                ),
            );
        }
        if let Some(rate) = pf.filter(|rate| *rate > rules.pf_concern) {
            return CrisisLevelResult::new(
                CrisisLevel::Concern,
                Trigger::PfConcern,
                format!(
                    "PF 대출 연체율이 {}%로 내부 균열 징후가 나타나고 있습니다.",
                    format_number(rate)
                ),
            );
        }

        CrisisLevelResult::new(
            CrisisLevel::Stable,
            Trigger::AllClear,
            format!(
                "모든 지표가 안정적인 범위 내에 있습니다. (안전: {}개, 주의: {}개)",
                safe_count,
                warning.len()
            ),
        )
    }
}

/// Aggregate with the compiled-in rules.
pub fn aggregate(indicators: &[EconomicIndicator]) -> CrisisLevelResult {
    CrisisEngine::default().aggregate(indicators)
}

fn names_with(indicators: &[EconomicIndicator], status: Status) -> Vec<&'static str> {
    indicators
        .iter()
        .filter(|indicator| indicator.status() == status)
        .map(EconomicIndicator::name)
        .collect()
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
    fn empty_input_is_stable_with_reason() {
        let result = aggregate(&[]);
        assert_eq!(result.level, CrisisLevel::Stable);
        assert_eq!(result.trigger, Trigger::NoData);
        assert!(!result.reason.is_empty());
    }

    #[test]
    fn two_dangers_are_critical_and_named() {
        let result = aggregate(&[
            indicator(IndicatorKind::Bond, 4.1),
            indicator(IndicatorKind::Pf, 11.0),
        ]);

        assert_eq!(result.level, CrisisLevel::Critical);
        assert_eq!(result.trigger, Trigger::MultipleDanger);
        assert_eq!(result.reason, "위험 지표 2개: 국고채 10년물 금리, PF 대출 연체율");
    }

    #[test]
    fn single_indicator_overrides_reach_critical() {
        let exchange = aggregate(&[indicator(IndicatorKind::Exchange, 1500.0)]);
        assert_eq!(exchange.trigger, Trigger::ExchangeCritical);
        assert!(exchange.reason.contains("1,500원"));

        let rp = aggregate(&[indicator(IndicatorKind::Rp, 5.0)]);
        assert_eq!(rp.trigger, Trigger::RpCritical);

        let reserve = aggregate(&[indicator(IndicatorKind::Reserve, 3799.0)]);
        assert_eq!(reserve.level, CrisisLevel::Critical);
        assert_eq!(reserve.trigger, Trigger::ReserveCritical);
    }

    #[test]
    fn reserve_at_critical_floor_is_not_critical() {
        let result = aggregate(&[indicator(IndicatorKind::Reserve, 3800.0)]);
        assert_eq!(result.level, CrisisLevel::Concern);
        assert_eq!(result.trigger, Trigger::SingleDanger);
    }

    #[test]
    fn capital_flight_needs_both_signals() {
        let both = aggregate(&[
            indicator(IndicatorKind::Exchange, 1420.0),
            indicator(IndicatorKind::Stock, -1200.0),
        ]);
        assert_eq!(both.trigger, Trigger::CapitalFlight);
        assert!(both.reason.contains("1,200억원"));

        let exchange_only = aggregate(&[indicator(IndicatorKind::Exchange, 1420.0)]);
        assert_eq!(exchange_only.level, CrisisLevel::Stable);
    }

    #[test]
    fn concern_thresholds_are_strict() {
        assert_eq!(aggregate(&[indicator(IndicatorKind::Bond, 3.8)]).level, CrisisLevel::Stable);
        assert_eq!(aggregate(&[indicator(IndicatorKind::Bond, 3.85)]).trigger, Trigger::BondConcern);
        assert_eq!(aggregate(&[indicator(IndicatorKind::Pf, 8.0)]).level, CrisisLevel::Stable);
        assert_eq!(aggregate(&[indicator(IndicatorKind::Pf, 8.5)]).trigger, Trigger::PfConcern);
    }

    #[test]
    fn custom_rules_shift_critical_point() {
        let engine = CrisisEngine::new(CrisisRules {
            exchange_critical: 1550.0,
            ..CrisisRules::default()
        });

        let result = engine.aggregate(&[indicator(IndicatorKind::Exchange, 1520.0)]);
        assert_eq!(result.level, CrisisLevel::Caution);
        assert_eq!(result.trigger, Trigger::ExchangeCaution);
    }
}
