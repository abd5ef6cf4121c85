//! Level-specific recommendations.
//!
//! Each level has a fixed title, asset strategy and base item list. For
//! CONCERN, CAUTION and CRITICAL a more specific item is put in front when a
//! secondary value condition holds. Those conditions read raw indicator values
//! against [`PlanTriggers`], which is kept apart from the engine's rules.

use serde::{Deserialize, Serialize};

use crate::domain::{CrisisLevel, EconomicIndicator, IndicatorKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPlan {
    pub title: String,
    pub asset_strategy: String,
    pub action_items: Vec<String>,
}

/// Value conditions that specialize a plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanTriggers {
    /// CONCERN: bond `>` this adds a foreign-currency allocation item.
    pub concern_bond: f64,
    /// CAUTION: bond `>` this, or exchange `>` `caution_exchange`, adds a
    /// real-asset item.
    pub caution_bond: f64,
    pub caution_exchange: f64,
    /// CRITICAL: rp `>=` this, or exchange `>=` `critical_exchange`, adds an
    /// emergency liquidity item.
    pub critical_rp: f64,
    pub critical_exchange: f64,
}

impl Default for PlanTriggers {
    fn default() -> Self {
        Self {
            concern_bond: 3.8,
            caution_bond: 4.0,
            caution_exchange: 1470.0,
            critical_rp: 5.0,
            critical_exchange: 1500.0,
        }
    }
}

struct BasePlan {
    title: &'static str,
    asset_strategy: &'static str,
    action_items: &'static [&'static str],
}

const STABLE_PLAN: BasePlan = BasePlan {
    title: "현재 안정적인 상태입니다",
    asset_strategy: "기존 자산 배분 유지, 여유 자금은 단기 채권이나 예금에 보관",
    action_items: &[
        "정기적인 경제 지표 모니터링",
        "긴급 자금 비상금 확보 (생활비 3~6개월분)",
        "변동금리 대출 상환 계획 수립",
    ],
};

const CONCERN_PLAN: BasePlan = BasePlan {
    title: "안전벨트를 매세요",
    asset_strategy: "현금 비중을 20~30%로 확대, 변동성 자산 비중 축소",
    action_items: &[
        "변동금리 대출 점검 및 고정금리 전환 검토",
        "불필요한 지출 차단",
        "비상금을 현금 또는 단기 채권으로 전환",
        "투자 포트폴리오 리밸런싱",
    ],
};

const CAUTION_PLAN: BasePlan = BasePlan {
    title: "긴급 대응이 필요합니다",
    asset_strategy: "현금 비중 40~50%로 확대, 리스크 자산 대폭 축소",
    action_items: &[
        "모든 변동금리 대출 즉시 고정금리 전환",
        "비필수 지출 전면 중단",
        "외화 자산 비중 확대 검토",
        "가계 부채 상환 계획 수립",
    ],
};

const CRITICAL_PLAN: BasePlan = BasePlan {
    title: "비상 상황입니다",
    asset_strategy: "현금 비중 70% 이상, 모든 리스크 자산 매도",
    action_items: &[
        "모든 투자 자산 즉시 현금화",
        "비상금을 외화(달러)로 전환",
        "모든 대출 조기 상환 또는 재조정",
        "생활 필수품 비축",
        "소득원 다각화 검토",
        "전문가 상담 및 자산 보호 전략 수립",
    ],
};

const FOREIGN_CURRENCY_ITEM: &str = "금리 상승에 대비해 자산 일부(10~20%)를 달러 등 외화로 분산";
const REAL_ASSET_ITEM: &str = "채권·외환 불안에 대비해 투자 자산 일부를 금 등 실물 자산으로 재배분";
const LIQUIDATION_ITEM: &str = "투자 자산의 50% 이상을 현금화";
const CURRENCY_DIVERSIFICATION_ITEM: &str = "원화 자산 편중을 줄이고 통화 분산 점검";
const EMERGENCY_LIQUIDITY_ITEM: &str = "금융 시스템 유동성 경색에 대비해 즉시 인출 가능한 현금 확보";

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActionPlanGenerator {
    triggers: PlanTriggers,
}

impl ActionPlanGenerator {
    pub const fn new(triggers: PlanTriggers) -> Self {
        Self { triggers }
    }

    pub const fn triggers(&self) -> &PlanTriggers {
        &self.triggers
    }

    pub fn generate(&self, level: CrisisLevel, indicators: &[EconomicIndicator]) -> ActionPlan {
        let value = |kind: IndicatorKind| {
            indicators
                .iter()
                .rev()
                .find(|indicator| indicator.kind() == kind)
                .map(EconomicIndicator::value)
        };
        let above = |kind, threshold: f64| value(kind).is_some_and(|v| v > threshold);
        let at_least = |kind, threshold: f64| value(kind).is_some_and(|v| v >= threshold);
        let triggers = &self.triggers;

        let (base, mut front, mut back) = (plan_for(level), Vec::new(), Vec::new());
        match level {
            CrisisLevel::Stable => {}
            CrisisLevel::Concern => {
                if above(IndicatorKind::Bond, triggers.concern_bond) {
                    front.push(FOREIGN_CURRENCY_ITEM);
                }
            }
            CrisisLevel::Caution => {
                if above(IndicatorKind::Bond, triggers.caution_bond)
                    || above(IndicatorKind::Exchange, triggers.caution_exchange)
                {
                    front.push(REAL_ASSET_ITEM);
                } else {
                    front.push(LIQUIDATION_ITEM);
                    back.push(CURRENCY_DIVERSIFICATION_ITEM);
                }
            }
            CrisisLevel::Critical => {
                if at_least(IndicatorKind::Rp, triggers.critical_rp)
                    || at_least(IndicatorKind::Exchange, triggers.critical_exchange)
                {
                    front.push(EMERGENCY_LIQUIDITY_ITEM);
                }
            }
        }

        ActionPlan {
            title: base.title.to_owned(),
            asset_strategy: base.asset_strategy.to_owned(),
            action_items: front
                .into_iter()
                .chain(base.action_items.iter().copied())
                .chain(back)
                .map(str::to_owned)
                .collect(),
        }
    }

    /// Generate from a level label. Unrecognized labels get the STABLE plan.
    pub fn generate_for_label(&self, label: &str, indicators: &[EconomicIndicator]) -> ActionPlan {
        let level = CrisisLevel::parse(label).unwrap_or_else(|_| {
            tracing::debug!(label, "unrecognized crisis level, using stable plan");
            CrisisLevel::Stable
        });
        self.generate(level, indicators)
    }
}

/// Generate with the compiled-in triggers.
pub fn generate(level: CrisisLevel, indicators: &[EconomicIndicator]) -> ActionPlan {
    ActionPlanGenerator::default().generate(level, indicators)
}

const fn plan_for(level: CrisisLevel) -> &'static BasePlan {
    match level {
        CrisisLevel::Stable => &STABLE_PLAN,
        CrisisLevel::Concern => &CONCERN_PLAN,
        CrisisLevel::Caution => &CAUTION_PLAN,
        CrisisLevel::Critical => &CRITICAL_PLAN,
    }
}
