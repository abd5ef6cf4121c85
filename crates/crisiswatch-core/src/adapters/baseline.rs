use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use serde_json::{json, Value};
use time::Weekday;

use crate::domain::{IndicatorKind, ObservationPeriod};
use crate::source::{SeriesQuery, SourceError, StatisticsSource};

/// Offline source serving the documented baseline figures.
///
/// Values are held in display units and converted back to the upstream's raw
/// units, so the full parse/convert path runs unchanged. Weekend days answer
/// with the upstream's "no data" message, which exercises the period walk.
#[derive(Debug, Clone)]
pub struct BaselineSource {
    values: BTreeMap<IndicatorKind, f64>,
    skip_weekends: bool,
}

impl Default for BaselineSource {
    fn default() -> Self {
        let values = BTreeMap::from([
            (IndicatorKind::Bond, 3.8),
            (IndicatorKind::Exchange, 1380.0),
            (IndicatorKind::Reserve, 4100.0),
            (IndicatorKind::Pf, 8.5),
            (IndicatorKind::Stock, -2000.0),
            (IndicatorKind::Rp, 2.0),
        ]);
        Self {
            values,
            skip_weekends: true,
        }
    }
}

impl BaselineSource {
    pub fn with_value(mut self, kind: IndicatorKind, value: f64) -> Self {
        self.values.insert(kind, value);
        self
    }

    /// Answer every day, weekends included.
    pub fn without_weekend_gaps(mut self) -> Self {
        self.skip_weekends = false;
        self
    }

    pub fn value(&self, kind: IndicatorKind) -> Option<f64> {
        self.values.get(&kind).copied()
    }

    fn payload(&self, query: &SeriesQuery) -> Value {
        let closed = matches!(query.period, ObservationPeriod::Day(date)
            if self.skip_weekends && matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday));
        let Some(value) = self.value(query.kind).filter(|_| !closed) else {
            return no_data();
        };

        let time = query.period.code();
        let raw = value * query.kind.profile().divisor;
        match query.kind {
            IndicatorKind::Exchange => json!({
                "KeyStatisticList": {
                    "list_total_count": 2,
                    "row": [
                        { "CLASS_NAME": "시장금리", "KEYSTAT_NAME": "한국은행 기준금리", "DATA_VALUE": "3", "CYCLE": time, "UNIT_NAME": "%" },
                        { "CLASS_NAME": "환율", "KEYSTAT_NAME": "원/달러 환율(종가)", "DATA_VALUE": raw.to_string(), "CYCLE": time, "UNIT_NAME": "원" }
                    ]
                }
            }),
            IndicatorKind::Rp => json!({
                "StatisticSearch": {
                    "list_total_count": 2,
                    "row": [
                        { "TIME": time, "ITEM_NAME1": "RP매입(건수)", "DATA_VALUE": "4" },
                        { "TIME": time, "ITEM_NAME1": "RP매입(금액)", "DATA_VALUE": raw.to_string() }
                    ]
                }
            }),
            _ => json!({
                "StatisticSearch": {
                    "list_total_count": 1,
                    "row": [{ "TIME": time, "ITEM_NAME1": query.kind.profile().metadata.name, "DATA_VALUE": raw.to_string() }]
                }
            }),
        }
    }
}

fn no_data() -> Value {
    json!({ "RESULT": { "CODE": "INFO-200", "MESSAGE": "해당하는 데이터가 없습니다." } })
}

impl StatisticsSource for BaselineSource {
    fn id(&self) -> &'static str {
        "baseline"
    }

    fn query<'a>(
        &'a self,
        query: &'a SeriesQuery,
    ) -> Pin<Box<dyn Future<Output = Result<Value, SourceError>> + Send + 'a>> {
        Box::pin(async move { Ok(self.payload(query)) })
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;
    use crate::response::parse_observation;

    fn query(kind: IndicatorKind, period: ObservationPeriod) -> SeriesQuery {
        SeriesQuery::new(kind, *kind.profile().series().expect("series"), period)
    }

    #[tokio::test]
    async fn reserve_round_trips_through_raw_units() {
        let source = BaselineSource::default();
        let q = query(IndicatorKind::Reserve, ObservationPeriod::Month(date!(2025 - 02 - 01)));

        let payload = source.query(&q).await.expect("payload");
        let observation = parse_observation(&q.series, &payload).expect("usable");

        assert_eq!(IndicatorKind::Reserve.profile().convert(observation.raw_value), 4100.0);
    }

    #[tokio::test]
    async fn weekends_have_no_data() {
        let source = BaselineSource::default();
        // 2025-03-08 is a Saturday
        let q = query(IndicatorKind::Bond, ObservationPeriod::Day(date!(2025 - 03 - 08)));

        let payload = source.query(&q).await.expect("payload");
        assert!(parse_observation(&q.series, &payload).is_err());

        let open = BaselineSource::default().without_weekend_gaps();
        let payload = open.query(&q).await.expect("payload");
        assert!(parse_observation(&q.series, &payload).is_ok());
    }
}
