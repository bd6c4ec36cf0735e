use crate::format::format_number;
use crate::page::{Page, WidgetId};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

pub const DEFAULT_STATS_URL: &str = "https://disease.sh/v3/covid-19";

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("stats request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("stats endpoint returned {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed stats response: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region {
    Global,
    Country(String),
}

impl Region {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "global" | "all" => Region::Global,
            code => Region::Country(code.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Region::Global => "global",
            Region::Country(code) => code,
        }
    }

    fn path(&self) -> String {
        match self {
            Region::Global => "all".to_string(),
            Region::Country(code) => format!("countries/{}", urlencoding::encode(code)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryStats {
    pub cases: u64,
    pub recovered: u64,
    pub deaths: u64,
    #[serde(default)]
    pub updated: Option<i64>,
}

impl CountryStats {
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated.and_then(DateTime::from_timestamp_millis)
    }

    pub fn apply(&self, page: &mut Page) {
        page.set_text(WidgetId::CovidConfirmed, format_number(self.cases));
        page.set_text(WidgetId::CovidRecovered, format_number(self.recovered));
        page.set_text(WidgetId::CovidDeaths, format_number(self.deaths));
        let stamp = self
            .updated_at()
            .map(|at| at.format("Updated %Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_default();
        page.set_text(WidgetId::CovidUpdated, stamp);
    }
}

#[derive(Debug, Clone)]
pub struct StatsClient {
    client: Client,
    base_url: String,
}

impl StatsClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, StatsError> {
        let client = Client::builder()
            .user_agent(concat!("pulse_dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, region: &Region) -> String {
        format!("{}/{}", self.base_url, region.path())
    }

    pub async fn fetch(&self, region: &Region) -> Result<CountryStats, StatsError> {
        let url = self.url_for(region);
        debug!(%url, "fetching country stats");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StatsError::Status(status));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn fetch_or_log(&self, region: &Region) -> Option<CountryStats> {
        match self.fetch(region).await {
            Ok(stats) => Some(stats),
            Err(err) => {
                error!(region = region.as_str(), "error fetching country stats: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::StatusCode, routing::get};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn stub() -> Router {
        Router::new()
            .route(
                "/all",
                get(|| async {
                    r#"{"cases":704753890,"recovered":675619811,"deaths":7010681,"updated":1700000000000,"active":1}"#
                }),
            )
            .route(
            "/countries/de",
            get(|| async { r#"{"cases":38437756,"recovered":38240600,"deaths":174979}"# }),
        )
            .route("/countries/xx", get(|| async { r#"{"cases":"many","recovered":1}"# }))
            .route("/countries/zz", get(|| async { (StatusCode::NOT_FOUND, "{}") }))
    }

    #[test]
    fn region_sentinels_map_to_global() {
        assert_eq!(Region::parse("global"), Region::Global);
        assert_eq!(Region::parse("all"), Region::Global);
        assert_eq!(Region::parse(" de "), Region::Country("de".to_string()));
    }

    #[test]
    fn urls_follow_region() {
        let client = StatsClient::new("http://stats.local/v3/covid-19/").unwrap();
        assert_eq!(client.url_for(&Region::Global), "http://stats.local/v3/covid-19/all");
        assert_eq!(
            client.url_for(&Region::Country("usa".to_string())),
            "http://stats.local/v3/covid-19/countries/usa"
        );
    }

    #[tokio::test]
    async fn parses_global_and_country_stats() {
        let base = serve(stub()).await;
        let client = StatsClient::new(base).unwrap();

        let global = client.fetch(&Region::Global).await.unwrap();
        assert_eq!(global.cases, 704_753_890);
        assert_eq!(global.updated_at().unwrap().timestamp(), 1_700_000_000);

        let germany = client.fetch(&Region::parse("de")).await.unwrap();
        assert_eq!(germany.deaths, 174_979);
        assert_eq!(germany.updated, None);
    }

    #[tokio::test]
    async fn mistyped_fields_are_malformed() {
        let base = serve(stub()).await;
        let client = StatsClient::new(base).unwrap();
        let err = client.fetch(&Region::parse("xx")).await.unwrap_err();
        assert!(matches!(err, StatsError::Malformed(_)));
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let base = serve(stub()).await;
        let client = StatsClient::new(base).unwrap();
        let err = client.fetch(&Region::parse("zz")).await.unwrap_err();
        assert!(matches!(err, StatsError::Status(code) if code == StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn unreachable_endpoint_yields_none() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = StatsClient::new(format!("http://{addr}")).unwrap();
        assert!(client.fetch_or_log(&Region::Global).await.is_none());
    }

    #[test]
    fn apply_writes_grouped_numbers() {
        let mut page = Page::full();
        let stats = CountryStats {
            cases: 1_234_567,
            recovered: 1_000,
            deaths: 12,
            updated: Some(0),
        };
        stats.apply(&mut page);
        assert_eq!(page.text(WidgetId::CovidConfirmed), Some("1,234,567"));
        assert_eq!(page.text(WidgetId::CovidRecovered), Some("1,000"));
        assert_eq!(page.text(WidgetId::CovidDeaths), Some("12"));
        assert_eq!(page.text(WidgetId::CovidUpdated), Some("Updated 1970-01-01 00:00 UTC"));
    }

    #[test]
    fn missing_timestamp_clears_previous_one() {
        let mut page = Page::full();
        let mut stats = CountryStats {
            cases: 5,
            recovered: 4,
            deaths: 1,
            updated: Some(1_700_000_000_000),
        };
        stats.apply(&mut page);
        assert!(page.text(WidgetId::CovidUpdated).is_some());

        stats.updated = None;
        stats.apply(&mut page);
        assert_eq!(page.text(WidgetId::CovidUpdated), Some(""));
    }
}
