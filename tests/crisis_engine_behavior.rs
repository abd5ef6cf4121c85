//! Behavior tests for classification, aggregation and action plans.

use crisiswatch_core::{
    aggregate, classify, generate, ActionPlanGenerator, CrisisEngine, CrisisLevel, CrisisRules,
    EconomicIndicator, IndicatorKind, ObservationPeriod, Status, Thresholds, Trigger, RefreshStamp,
};
use time::macros::date;

fn indicator(kind: IndicatorKind, value: f64) -> EconomicIndicator {
    EconomicIndicator::new(
        kind,
        value,
        ObservationPeriod::Day(date!(2025 - 03 - 04)),
        RefreshStamp::now(),
        &Thresholds::default(),
    )
    .expect("finite value")
}

fn baseline() -> Vec<EconomicIndicator> {
    vec![
        indicator(IndicatorKind::Bond, 3.8),
        indicator(IndicatorKind::Exchange, 1380.0),
        indicator(IndicatorKind::Reserve, 4100.0),
        indicator(IndicatorKind::Pf, 8.5),
        indicator(IndicatorKind::Stock, -2000.0),
    ]
}

// =============================================================================
// Classification
// =============================================================================

#[test]
fn boundaries_fall_into_the_stricter_bucket() {
    assert_eq!(classify(IndicatorKind::Pf, 8.99), Status::Safe);
    assert_eq!(classify(IndicatorKind::Pf, 9.0), Status::Warning);
    assert_eq!(classify(IndicatorKind::Pf, 10.0), Status::Danger);
    assert_eq!(classify(IndicatorKind::Stock, -1000.0), Status::Warning);
    assert_eq!(classify(IndicatorKind::Stock, -5000.0), Status::Danger);
    assert_eq!(classify(IndicatorKind::Exchange, 1450.0), Status::Warning);
    assert_eq!(classify(IndicatorKind::Exchange, 1500.0), Status::Danger);
    assert_eq!(classify(IndicatorKind::Rp, 5.0), Status::Danger);
    assert_eq!(classify(IndicatorKind::Rp, 4.99), Status::Safe);
}

#[test]
fn reserve_uses_strict_comparisons_on_both_boundaries() {
    assert_eq!(classify(IndicatorKind::Reserve, 4200.0), Status::Safe);
    assert_eq!(classify(IndicatorKind::Reserve, 4199.99), Status::Warning);
    assert_eq!(classify(IndicatorKind::Reserve, 4000.01), Status::Warning);
    assert_eq!(classify(IndicatorKind::Reserve, 4000.0), Status::Warning);
    assert_eq!(classify(IndicatorKind::Reserve, 3999.99), Status::Danger);
}

#[test]
fn classification_is_monotonic_in_the_worsening_direction() {
    for kind in IndicatorKind::ALL {
        let profile = kind.profile();
        let (min, max) = profile.display_range;
        let step = (max - min) / 400.0;
        let worsening: Vec<f64> = match profile.direction {
            crisiswatch_core::Direction::HigherIsWorse => {
                (0..=800).map(|i| min - (max - min) + step * f64::from(i)).collect()
            }
            crisiswatch_core::Direction::LowerIsWorse => {
                (0..=800).map(|i| max + (max - min) - step * f64::from(i)).collect()
            }
        };

        let statuses: Vec<Status> = worsening.iter().map(|value| classify(kind, *value)).collect();
        assert!(
            statuses.windows(2).all(|pair| pair[0] <= pair[1]),
            "{kind} became less severe while worsening"
        );
    }
}

// =============================================================================
// Aggregation
// =============================================================================

#[test]
fn empty_set_is_stable_with_a_no_data_reason() {
    let result = aggregate(&[]);

    assert_eq!(result.level, CrisisLevel::Stable);
    assert!(!result.reason.is_empty());
}

#[test]
fn documented_baseline_is_concern_with_warning_count() {
    // Given: the mock baseline, where reserve and stock read WARNING
    let indicators = baseline();

    // When: the set is aggregated
    let result = aggregate(&indicators);

    // Then: two warnings put the level at CONCERN and the reason names them
    assert_eq!(result.level, CrisisLevel::Concern);
    assert_eq!(result.trigger, Trigger::MultipleWarning);
    assert!(result.reason.contains("주의 지표 2개"));
    assert!(result.reason.contains("외환보유액"));
    assert!(result.reason.contains("외국인 순매수"));
}

#[test]
fn multiple_dangers_outrank_single_indicator_caution_rules() {
    // Given: two DANGER indicators while bond alone would trigger CAUTION
    let indicators = vec![
        indicator(IndicatorKind::Bond, 4.2),
        indicator(IndicatorKind::Stock, -6000.0),
        indicator(IndicatorKind::Exchange, 1420.0),
    ];

    // When: the set is aggregated
    let result = aggregate(&indicators);

    // Then: the count rule wins
    assert_eq!(result.level, CrisisLevel::Critical);
    assert_eq!(result.trigger, Trigger::MultipleDanger);
    assert!(result.reason.contains("국고채 10년물 금리"));
    assert!(result.reason.contains("외국인 순매수"));
}

#[test]
fn combined_signals_list_every_flagged_indicator() {
    let result = aggregate(&[
        indicator(IndicatorKind::Bond, 3.95),
        indicator(IndicatorKind::Reserve, 4100.0),
        indicator(IndicatorKind::Pf, 9.5),
    ]);

    assert_eq!(result.level, CrisisLevel::Caution);
    assert_eq!(result.trigger, Trigger::CombinedSignals);
    assert!(result.reason.contains("총 3개"));
    assert!(result.reason.contains("PF 대출 연체율"));
}

#[test]
fn danger_with_two_warnings_is_caution() {
    let result = aggregate(&[
        indicator(IndicatorKind::Pf, 10.5),
        indicator(IndicatorKind::Reserve, 4100.0),
        indicator(IndicatorKind::Stock, -1500.0),
    ]);

    assert_eq!(result.level, CrisisLevel::Caution);
    assert_eq!(result.trigger, Trigger::DangerWithWarnings);
}

#[test]
fn bond_above_caution_line_outranks_single_danger() {
    // Given: every other kind sits in its safe band
    let calm = |bond: f64| {
        vec![
            indicator(IndicatorKind::Bond, bond),
            indicator(IndicatorKind::Exchange, 1380.0),
            indicator(IndicatorKind::Reserve, 4300.0),
            indicator(IndicatorKind::Pf, 7.0),
            indicator(IndicatorKind::Stock, 500.0),
            indicator(IndicatorKind::Rp, 2.0),
        ]
    };

    // When: bond alone is past 4.0
    let above = aggregate(&calm(4.05));

    // Then: the bond rule lifts its single danger to CAUTION
    assert_eq!(above.level, CrisisLevel::Caution);
    assert_eq!(above.trigger, Trigger::BondCaution);
    assert!(above.reason.contains("4.05"));

    // And: exactly at the line it is only a single danger
    let at_line = aggregate(&calm(4.0));
    assert_eq!(at_line.level, CrisisLevel::Concern);
    assert_eq!(at_line.trigger, Trigger::SingleDanger);
}

#[test]
fn absent_kinds_never_fire_their_rules() {
    // Only stock present: the capital-flight rule needs exchange too
    let result = aggregate(&[indicator(IndicatorKind::Stock, -4000.0)]);

    assert_eq!(result.level, CrisisLevel::Stable);
    assert_eq!(result.trigger, Trigger::AllClear);
}

#[test]
fn worsening_one_indicator_never_lowers_the_level() {
    let engine = CrisisEngine::default();
    let mut previous = CrisisLevel::Stable;

    for step in 0..=40 {
        let exchange = 1300.0 + f64::from(step) * 6.0;
        let mut indicators = baseline();
        indicators[1] = indicator(IndicatorKind::Exchange, exchange);

        let level = engine.aggregate(&indicators).level;
        assert!(level >= previous, "level dropped at exchange {exchange}");
        previous = level;
    }
    assert_eq!(previous, CrisisLevel::Critical);
}

#[test]
fn configured_critical_point_moves_the_cascade() {
    let engine = CrisisEngine::new(CrisisRules {
        rp_critical: 3.0,
        ..CrisisRules::default()
    });

    let result = engine.aggregate(&[indicator(IndicatorKind::Rp, 3.2)]);
    assert_eq!(result.level, CrisisLevel::Critical);
    assert_eq!(result.trigger, Trigger::RpCritical);
}

// =============================================================================
// Action plans
// =============================================================================

#[test]
fn generate_is_idempotent() {
    let indicators = baseline();
    for level in CrisisLevel::ALL {
        assert_eq!(generate(level, &indicators), generate(level, &indicators));
    }
}

#[test]
fn plan_follows_the_aggregated_level() {
    let indicators = baseline();
    let level = aggregate(&indicators).level;

    let plan = generate(level, &indicators);

    assert_eq!(plan.title, "안전벨트를 매세요");
    assert!(!plan.action_items.is_empty());
}

#[test]
fn unknown_level_label_yields_stable_plan() {
    let generator = ActionPlanGenerator::default();

    let plan = generator.generate_for_label("UNKNOWN", &baseline());

    assert_eq!(plan, generate(CrisisLevel::Stable, &baseline()));
}
