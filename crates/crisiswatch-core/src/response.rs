//! Upstream payload parsing.
//!
//! [`parse_observation`] turns a raw JSON payload into either a typed
//! [`Observation`] or a [`ParseFailure`]; [`is_usable`] is the boolean half of
//! the same step. A failure never aborts a fetch, it only means "try an
//! earlier period".

use serde::Deserialize;
use serde_json::Value;

use crate::profile::{EcosSeries, EcosService, RowSelector};
use crate::ParseFailure;

#[derive(Debug, Deserialize)]
struct EcosEnvelope {
    #[serde(rename = "StatisticSearch")]
    statistic_search: Option<EcosTable>,
    #[serde(rename = "KeyStatisticList")]
    key_statistic_list: Option<EcosTable>,
    #[serde(rename = "RESULT")]
    result: Option<EcosResult>,
}

#[derive(Debug, Deserialize)]
struct EcosTable {
    #[serde(default)]
    row: Vec<EcosRow>,
}

#[derive(Debug, Deserialize)]
struct EcosResult {
    #[serde(rename = "CODE", default)]
    code: String,
    #[serde(rename = "MESSAGE", default)]
    message: String,
}

#[derive(Debug, Clone, Deserialize)]
struct EcosRow {
    #[serde(rename = "DATA_VALUE")]
    data_value: Option<String>,
    #[serde(rename = "TIME")]
    time: Option<String>,
    #[serde(rename = "KEYSTAT_NAME")]
    keystat_name: Option<String>,
    #[serde(rename = "ITEM_NAME1")]
    item_name: Option<String>,
}

/// A validated numeric observation, before unit conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub raw_value: f64,
    /// Upstream `TIME` field, when present.
    pub time: Option<String>,
    /// Row label (`KEYSTAT_NAME` or `ITEM_NAME1`), when present.
    pub label: Option<String>,
}

/// Parse the designated row of `payload` for `series`.
pub fn parse_observation(series: &EcosSeries, payload: &Value) -> Result<Observation, ParseFailure> {
    let envelope = EcosEnvelope::deserialize(payload).map_err(|error| ParseFailure::Malformed {
        reason: error.to_string(),
    })?;

    let table = match series.service {
        EcosService::StatisticSearch => envelope.statistic_search,
        EcosService::KeyStatisticList => envelope.key_statistic_list,
    };
    let Some(table) = table else {
        if let Some(result) = envelope.result {
            return Err(ParseFailure::UpstreamMessage {
                code: result.code,
                message: result.message,
            });
        }
        return Err(ParseFailure::MissingTable {
            table: series.service.path(),
        });
    };

    if table.row.is_empty() {
        return Err(ParseFailure::NoRows);
    }

    let row = select_row(&table.row, series.row)?;
    let raw = row
        .data_value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(ParseFailure::EmptyValue)?;

    let raw_value: f64 = raw
        .replace(',', "")
        .parse()
        .map_err(|_| ParseFailure::NotNumeric {
            raw: raw.to_owned(),
        })?;
    if !raw_value.is_finite() {
        return Err(ParseFailure::NonFinite {
            raw: raw.to_owned(),
        });
    }

    Ok(Observation {
        raw_value,
        time: row.time.clone(),
        label: row.keystat_name.clone().or_else(|| row.item_name.clone()),
    })
}

/// Whether `payload` carries a usable observation for `series`.
pub fn is_usable(series: &EcosSeries, payload: &Value) -> bool {
    parse_observation(series, payload).is_ok()
}

fn select_row(rows: &[EcosRow], selector: RowSelector) -> Result<&EcosRow, ParseFailure> {
    match selector {
        RowSelector::Index(index) => rows.get(index).ok_or(ParseFailure::RowMissing { index }),
        RowSelector::KeyStatName(needles) => rows
            .iter()
            .find(|row| {
                row.keystat_name
                    .as_deref()
                    .is_some_and(|name| needles.iter().any(|needle| name.contains(needle)))
            })
            .or_else(|| rows.first())
            .ok_or(ParseFailure::NoRows),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::IndicatorKind;

    fn series(kind: IndicatorKind) -> &'static EcosSeries {
        kind.profile().series().expect("ecos-backed kind")
    }

    #[test]
    fn parses_first_statistic_search_row() {
        let payload = json!({
            "StatisticSearch": {
                "list_total_count": 1,
                "row": [{ "TIME": "20250304", "DATA_VALUE": " 3.354 ", "ITEM_NAME1": "국고채(10년)" }]
            }
        });

        let observation = parse_observation(series(IndicatorKind::Bond), &payload).expect("usable");
        assert_eq!(observation.raw_value, 3.354);
        assert_eq!(observation.time.as_deref(), Some("20250304"));
        assert_eq!(observation.label.as_deref(), Some("국고채(10년)"));
    }

    #[test]
    fn empty_or_missing_value_is_unusable() {
        let bond = series(IndicatorKind::Bond);
        for payload in [
            json!({ "StatisticSearch": { "row": [{ "DATA_VALUE": "   " }] } }),
            json!({ "StatisticSearch": { "row": [{ "DATA_VALUE": null }] } }),
            json!({ "StatisticSearch": { "row": [{ "TIME": "20250304" }] } }),
        ] {
            assert_eq!(parse_observation(bond, &payload), Err(ParseFailure::EmptyValue));
            assert!(!is_usable(bond, &payload));
        }
    }

    #[test]
    fn upstream_no_data_message_is_unusable() {
        let payload = json!({ "RESULT": { "CODE": "INFO-200", "MESSAGE": "해당하는 데이터가 없습니다." } });
        let failure = parse_observation(series(IndicatorKind::Stock), &payload).expect_err("unusable");
        assert!(matches!(failure, ParseFailure::UpstreamMessage { ref code, .. } if code == "INFO-200"));
    }

    #[test]
    fn unexpected_shapes_are_unusable_not_fatal() {
        let bond = series(IndicatorKind::Bond);
        assert!(matches!(
            parse_observation(bond, &json!([1, 2, 3])),
            Err(ParseFailure::Malformed { .. })
        ));
        assert!(matches!(
            parse_observation(bond, &json!({})),
            Err(ParseFailure::MissingTable { .. })
        ));
        assert_eq!(
            parse_observation(bond, &json!({ "StatisticSearch": { "row": [] } })),
            Err(ParseFailure::NoRows)
        );
        assert!(matches!(
            parse_observation(bond, &json!({ "StatisticSearch": { "row": [{ "DATA_VALUE": "n/a" }] } })),
            Err(ParseFailure::NotNumeric { .. })
        ));
    }

    #[test]
    fn rp_reads_second_row() {
        let rp = series(IndicatorKind::Rp);
        let payload = json!({
            "StatisticSearch": { "row": [
                { "DATA_VALUE": "12", "ITEM_NAME1": "건수" },
                { "DATA_VALUE": "23456", "ITEM_NAME1": "금액" }
            ] }
        });
        assert_eq!(parse_observation(rp, &payload).expect("usable").raw_value, 23456.0);

        let count_only = json!({ "StatisticSearch": { "row": [{ "DATA_VALUE": "12" }] } });
        assert_eq!(parse_observation(rp, &count_only), Err(ParseFailure::RowMissing { index: 1 }));
    }

    #[test]
    fn exchange_prefers_named_row() {
        let exchange = series(IndicatorKind::Exchange);
        let payload = json!({
            "KeyStatisticList": { "row": [
                { "KEYSTAT_NAME": "한국은행 기준금리", "DATA_VALUE": "3.0", "CYCLE": "D" },
                { "KEYSTAT_NAME": "원/달러 환율(종가)", "DATA_VALUE": "1,380.5", "CYCLE": "D" }
            ] }
        });
        let observation = parse_observation(exchange, &payload).expect("usable");
        assert_eq!(observation.raw_value, 1380.5);
        assert_eq!(observation.label.as_deref(), Some("원/달러 환율(종가)"));
    }

    #[test]
    fn exchange_falls_back_to_first_row() {
        let exchange = series(IndicatorKind::Exchange);
        let payload = json!({
            "KeyStatisticList": { "row": [{ "KEYSTAT_NAME": "기타", "DATA_VALUE": "1401" }] }
        });
        assert_eq!(parse_observation(exchange, &payload).expect("usable").raw_value, 1401.0);
    }
}
