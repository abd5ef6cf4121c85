use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;

use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::profile::EcosService;
use crate::retry::RetryConfig;
use crate::source::{SeriesQuery, SourceError, StatisticsSource};

pub const DEFAULT_BASE_URL: &str = "https://ecos.bok.or.kr/api";

/// Bank of Korea ECOS open API client.
#[derive(Clone)]
pub struct EcosClient {
    http_client: Arc<dyn HttpClient>,
    api_key: String,
    base_url: String,
    timeout_ms: u64,
    retry: RetryConfig,
}

impl Debug for EcosClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcosClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("retry", &self.retry)
            .finish()
    }
}

impl EcosClient {
    pub fn new(http_client: Arc<dyn HttpClient>, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            api_key: api_key.into(),
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: 5_000,
            retry: RetryConfig::default(),
        }
    }

    /// Client over the production reqwest transport.
    pub fn with_reqwest(api_key: impl Into<String>) -> Self {
        Self::new(Arc::new(ReqwestHttpClient::new()), api_key)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Build the single-point lookup URL for `query`.
    pub fn url_for(&self, query: &SeriesQuery) -> Result<String, SourceError> {
        let series = &query.series;
        let period = query.period.code();
        let cycle = query.period.granularity().cycle();
        let key = urlencoding::encode(&self.api_key);
        let prefix = format!(
            "{}/{}/{}/json/kr/1/{}",
            self.base_url,
            series.service.path(),
            key,
            series.page_size
        );

        match series.service {
            EcosService::StatisticSearch => {
                let stat_code = series.stat_code.ok_or_else(|| {
                    SourceError::invalid_request(format!("{} series has no stat code", query.kind))
                })?;
                let mut url = format!("{prefix}/{stat_code}/{cycle}/{period}/{period}");
                if let Some(item_code) = series.item_code {
                    url.push('/');
                    url.push_str(item_code);
                }
                Ok(url)
            }
            EcosService::KeyStatisticList => Ok(format!("{prefix}/{cycle}/{period}/{period}")),
        }
    }

    async fn call(&self, query: &SeriesQuery) -> Result<Value, SourceError> {
        let url = self.url_for(query)?;
        let mut attempt = 0;

        loop {
            let request = HttpRequest::get(url.as_str())
                .with_header("accept", "application/json")
                .with_timeout_ms(self.timeout_ms);
            let outcome = self.http_client.execute(request).await;

            let transient = match &outcome {
                Ok(response) => {
                    !response.is_success() && self.retry.should_retry_status(response.status)
                }
                Err(error) => error.retryable(),
            };
            if transient && self.retry.allows_retry(attempt) {
                let delay = self.retry.delay_for_attempt(attempt);
                tracing::debug!(
                    kind = %query.kind,
                    period = %query.period,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "ecos transport retry"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            let response = outcome.map_err(|error| {
                SourceError::unavailable(format!("ecos transport error: {}", error.message()))
            })?;

            if !response.is_success() {
                let message = format!("ecos returned status {}", response.status);
                return Err(if response.status == 429 {
                    SourceError::rate_limited(message)
                } else {
                    SourceError::unavailable(message)
                });
            }

            return serde_json::from_str(&response.body).map_err(|error| {
                SourceError::internal(format!("failed to decode ecos response: {error}"))
            });
        }
    }
}

impl StatisticsSource for EcosClient {
    fn id(&self) -> &'static str {
        "ecos"
    }

    fn query<'a>(
        &'a self,
        query: &'a SeriesQuery,
    ) -> Pin<Box<dyn Future<Output = Result<Value, SourceError>> + Send + 'a>> {
        Box::pin(self.call(query))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    use time::macros::date;

    use super::*;
    use crate::domain::{IndicatorKind, ObservationPeriod};
    use crate::http_client::{HttpError, HttpResponse};
    use crate::source::SourceErrorKind;

    #[derive(Default)]
    struct ScriptedHttp {
        replies: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
        urls: Mutex<Vec<String>>,
    }

    impl ScriptedHttp {
        fn with(replies: Vec<Result<HttpResponse, HttpError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                urls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.urls.lock().expect("lock").len()
        }
    }

    impl HttpClient for ScriptedHttp {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.urls.lock().expect("lock").push(request.url);
            let reply = self
                .replies
                .lock()
                .expect("lock")
                .pop_front()
                .unwrap_or_else(|| Err(HttpError::non_retryable("script exhausted")));
            Box::pin(async move { reply })
        }
    }

    fn query(kind: IndicatorKind, period: ObservationPeriod) -> SeriesQuery {
        let series = *kind.profile().series().expect("ecos-backed kind");
        SeriesQuery::new(kind, series, period)
    }

    fn client(http: Arc<ScriptedHttp>) -> EcosClient {
        EcosClient::new(http, "sample key").with_retry(RetryConfig::fixed(Duration::ZERO, 2))
    }

    #[test]
    fn builds_statistic_search_url() {
        let client = client(ScriptedHttp::with(Vec::new()));
        let url = client
            .url_for(&query(IndicatorKind::Bond, ObservationPeriod::Day(date!(2025 - 03 - 04))))
            .expect("url");

        assert_eq!(
            url,
            "https://ecos.bok.or.kr/api/StatisticSearch/sample%20key/json/kr/1/10/817Y002/D/20250304/20250304/010210000"
        );
    }

    #[test]
    fn builds_monthly_and_key_statistic_urls() {
        let client = client(ScriptedHttp::with(Vec::new())).with_base_url("http://localhost:9000/api/");
        let reserve = client
            .url_for(&query(IndicatorKind::Reserve, ObservationPeriod::Month(date!(2025 - 02 - 01))))
            .expect("url");
        assert_eq!(
            reserve,
            "http://localhost:9000/api/StatisticSearch/sample%20key/json/kr/1/10/732Y001/M/202502/202502/99"
        );

        let exchange = client
            .url_for(&query(IndicatorKind::Exchange, ObservationPeriod::Day(date!(2025 - 03 - 04))))
            .expect("url");
        assert_eq!(
            exchange,
            "http://localhost:9000/api/KeyStatisticList/sample%20key/json/kr/1/4/D/20250304/20250304"
        );
    }

    #[tokio::test]
    async fn retries_transient_status_then_decodes_body() {
        let http = ScriptedHttp::with(vec![
            Ok(HttpResponse { status: 503, body: String::new() }),
            Ok(HttpResponse::ok_json(r#"{"StatisticSearch":{"row":[]}}"#)),
        ]);
        let client = client(http.clone());

        let payload = client
            .query(&query(IndicatorKind::Stock, ObservationPeriod::Day(date!(2025 - 03 - 04))))
            .await
            .expect("payload");

        assert!(payload.get("StatisticSearch").is_some());
        assert_eq!(http.calls(), 2);
    }

    #[tokio::test]
    async fn gives_up_after_transport_budget() {
        let http = ScriptedHttp::with(vec![
            Err(HttpError::transient("connection reset")),
            Err(HttpError::transient("connection reset")),
            Err(HttpError::transient("connection reset")),
            Ok(HttpResponse::ok_json("{}")),
        ]);
        let client = client(http.clone());

        let error = client
            .query(&query(IndicatorKind::Bond, ObservationPeriod::Day(date!(2025 - 03 - 04))))
            .await
            .expect_err("must fail");

        assert_eq!(error.kind(), SourceErrorKind::Unavailable);
        assert_eq!(http.calls(), 3);
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let http = ScriptedHttp::with(vec![Ok(HttpResponse { status: 400, body: String::new() })]);
        let client = client(http.clone());

        let error = client
            .query(&query(IndicatorKind::Bond, ObservationPeriod::Day(date!(2025 - 03 - 04))))
            .await
            .expect_err("must fail");

        assert!(error.message().contains("400"));
        assert_eq!(http.calls(), 1);
    }

    #[test]
    fn debug_output_hides_api_key() {
        let client = client(ScriptedHttp::with(Vec::new()));
        assert!(!format!("{client:?}").contains("sample key"));
    }
}
