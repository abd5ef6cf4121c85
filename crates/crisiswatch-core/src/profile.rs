//! Per-kind configuration table.
//!
//! Everything that differs between indicator kinds lives here: display
//! metadata, status bands, how far back to search, which upstream series and
//! row to read, and how to convert the raw figure into the display unit.

use serde::Serialize;

use crate::classifier::{Bound, Direction, StatusBands};
use crate::domain::{Granularity, IndicatorKind};

/// Static display metadata for a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndicatorMetadata {
    pub name: &'static str,
    pub unit: &'static str,
    pub source: &'static str,
    pub description: &'static str,
    /// Human-readable basis of the figure, e.g. "당일 종가 기준".
    pub period_label: &'static str,
}

/// Upstream query service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EcosService {
    StatisticSearch,
    KeyStatisticList,
}

impl EcosService {
    pub const fn path(self) -> &'static str {
        match self {
            Self::StatisticSearch => "StatisticSearch",
            Self::KeyStatisticList => "KeyStatisticList",
        }
    }
}

/// Which row of the upstream table carries the figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RowSelector {
    Index(usize),
    /// First row whose `KEYSTAT_NAME` contains any needle, else the first row.
    KeyStatName(&'static [&'static str]),
}

/// Upstream series coordinates for one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EcosSeries {
    pub service: EcosService,
    pub stat_code: Option<&'static str>,
    pub item_code: Option<&'static str>,
    pub row: RowSelector,
    /// Rows requested per call.
    pub page_size: u32,
}

/// How a kind obtains its figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Acquisition {
    Ecos(EcosSeries),
    /// No live upstream; the value is supplied externally.
    Manual { placeholder: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorProfile {
    pub kind: IndicatorKind,
    pub metadata: IndicatorMetadata,
    pub direction: Direction,
    pub bands: StatusBands,
    pub granularity: Granularity,
    /// Maximum number of periods tried, anchor included.
    pub retry_bound: u32,
    pub acquisition: Acquisition,
    /// Raw upstream figure is divided by this to reach the display unit.
    pub divisor: f64,
    /// Decimal places kept after conversion.
    pub precision: u32,
    /// Gauge range `(min, max)` for rendering.
    pub display_range: (f64, f64),
}

impl IndicatorProfile {
    pub fn convert(&self, raw: f64) -> f64 {
        round_to(raw / self.divisor, self.precision)
    }

    /// Position of `value` in the display range, clamped to `[0, 1]`.
    pub fn gauge_fraction(&self, value: f64) -> f64 {
        let (min, max) = self.display_range;
        if max <= min || !value.is_finite() {
            return 0.0;
        }
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    }

    pub const fn series(&self) -> Option<&EcosSeries> {
        match &self.acquisition {
            Acquisition::Ecos(series) => Some(series),
            Acquisition::Manual { .. } => None,
        }
    }
}

fn round_to(value: f64, precision: u32) -> f64 {
    let scale = 10_f64.powi(precision as i32);
    (value * scale).round() / scale
}

const DAY_WINDOW: u32 = 30;
const MONTH_WINDOW: u32 = 12;
const ECOS: &str = "한국은행 ECOS";

static PROFILES: [IndicatorProfile; 6] = [
    IndicatorProfile {
        kind: IndicatorKind::Bond,
        metadata: IndicatorMetadata {
            name: "국고채 10년물 금리",
            unit: "%",
            source: ECOS,
            description: "이 금리가 4%를 넘어선다면 내부 시스템의 균열이 생각보다 훨씬 심각하다는 경고등으로 봐야 함.",
            period_label: "당일 종가 기준",
        },
        direction: Direction::HigherIsWorse,
        bands: StatusBands::new(Bound::AtLeast(4.0), Some(Bound::AtLeast(3.9))),
        granularity: Granularity::Day,
        retry_bound: DAY_WINDOW,
        acquisition: Acquisition::Ecos(EcosSeries {
            service: EcosService::StatisticSearch,
            stat_code: Some("817Y002"),
            item_code: Some("010210000"),
            row: RowSelector::Index(0),
            page_size: 10,
        }),
        divisor: 1.0,
        precision: 1,
        display_range: (2.0, 5.0),
    },
    IndicatorProfile {
        kind: IndicatorKind::Exchange,
        metadata: IndicatorMetadata {
            name: "원/달러 환율",
            unit: "원",
            source: ECOS,
            description: "한국 시장에서 돈을 빼서 달러로 바꿔 나가기 시작하면 환율은 치솟게 됨. 환율 1,500원 달성 시 강력한 위기 신호.",
            period_label: "당일 종가 기준",
        },
        direction: Direction::HigherIsWorse,
        bands: StatusBands::new(Bound::AtLeast(1500.0), Some(Bound::AtLeast(1450.0))),
        granularity: Granularity::Day,
        retry_bound: DAY_WINDOW,
        acquisition: Acquisition::Ecos(EcosSeries {
            service: EcosService::KeyStatisticList,
            stat_code: None,
            item_code: None,
            row: RowSelector::KeyStatName(&["환율", "원/달러"]),
            page_size: 4,
        }),
        divisor: 1.0,
        precision: 1,
        display_range: (1200.0, 1600.0),
    },
    IndicatorProfile {
        kind: IndicatorKind::Reserve,
        metadata: IndicatorMetadata {
            name: "외환보유액",
            unit: "억 달러",
            source: ECOS,
            description: "환율 방어에 쓰이는 총알. 4,300억 달러 수준의 외환보유고가 급격히 줄어들기 시작한다면 방어선이 빠르게 소진되고 있다는 신호임.",
            period_label: "전월 말 기준",
        },
        direction: Direction::LowerIsWorse,
        bands: StatusBands::new(Bound::Below(4000.0), Some(Bound::Below(4200.0))),
        granularity: Granularity::Month,
        retry_bound: MONTH_WINDOW,
        acquisition: Acquisition::Ecos(EcosSeries {
            service: EcosService::StatisticSearch,
            stat_code: Some("732Y001"),
            item_code: Some("99"),
            row: RowSelector::Index(0),
            page_size: 10,
        }),
        // thousand USD -> 억 USD
        divisor: 100_000.0,
        precision: 2,
        display_range: (3500.0, 4500.0),
    },
    IndicatorProfile {
        kind: IndicatorKind::Pf,
        metadata: IndicatorMetadata {
            name: "PF 대출 연체율",
            unit: "%",
            source: "수동 입력",
            description: "취약 업권(저축은행 등)의 연체율이 10%에 육박하면 뇌관 폭발 직전. 전체 평균이 아닌 취약 수치를 봐야 함.",
            period_label: "전월 말 기준",
        },
        direction: Direction::HigherIsWorse,
        bands: StatusBands::new(Bound::AtLeast(10.0), Some(Bound::AtLeast(9.0))),
        granularity: Granularity::Month,
        retry_bound: 1,
        acquisition: Acquisition::Manual { placeholder: 8.5 },
        divisor: 1.0,
        precision: 2,
        display_range: (0.0, 15.0),
    },
    IndicatorProfile {
        kind: IndicatorKind::Stock,
        metadata: IndicatorMetadata {
            name: "외국인 순매수",
            unit: "억원",
            source: ECOS,
            description: "외국인이 주식/채권을 꾸준히 팔아치우면(Sell Korea) 위기 감지의 증거.",
            period_label: "당일 기준",
        },
        direction: Direction::LowerIsWorse,
        bands: StatusBands::new(Bound::AtMost(-5000.0), Some(Bound::AtMost(-1000.0))),
        granularity: Granularity::Day,
        retry_bound: DAY_WINDOW,
        acquisition: Acquisition::Ecos(EcosSeries {
            service: EcosService::StatisticSearch,
            stat_code: Some("802Y001"),
            item_code: Some("0030000"),
            row: RowSelector::Index(0),
            page_size: 10,
        }),
        divisor: 1.0,
        precision: 2,
        display_range: (-10_000.0, 10_000.0),
    },
    IndicatorProfile {
        kind: IndicatorKind::Rp,
        metadata: IndicatorMetadata {
            name: "한국은행 RP 매입 규모",
            unit: "조원",
            source: ECOS,
            description: "단기자금시장이 경색되면 한국은행이 RP 매입으로 유동성을 공급함. 매입 규모가 5조원을 넘어서면 자금시장 경색 신호.",
            period_label: "월간 기준",
        },
        direction: Direction::HigherIsWorse,
        bands: StatusBands::new(Bound::AtLeast(5.0), None),
        granularity: Granularity::Month,
        retry_bound: MONTH_WINDOW,
        acquisition: Acquisition::Ecos(EcosSeries {
            service: EcosService::StatisticSearch,
            stat_code: Some("603Y001"),
            item_code: Some("O44000"),
            // row 0 is the transaction count
            row: RowSelector::Index(1),
            page_size: 10,
        }),
        // 억원 -> 조원
        divisor: 10_000.0,
        precision: 2,
        display_range: (0.0, 10.0),
    },
];

impl IndicatorKind {
    pub fn profile(self) -> &'static IndicatorProfile {
        match self {
            Self::Bond => &PROFILES[0],
            Self::Exchange => &PROFILES[1],
            Self::Reserve => &PROFILES[2],
            Self::Pf => &PROFILES[3],
            Self::Stock => &PROFILES[4],
            Self::Rp => &PROFILES[5],
        }
    }
}
