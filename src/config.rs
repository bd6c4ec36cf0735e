use crate::counter::CounterTiming;
use crate::stats::DEFAULT_STATS_URL;
use std::{env, path::PathBuf};

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub theme_path: PathBuf,
    pub stats_url: String,
    pub country: String,
    pub counter: CounterTiming,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);
        let theme_path = lookup("DASHBOARD_THEME_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/theme.json"));
        let stats_url = lookup("STATS_API_URL").unwrap_or_else(|| DEFAULT_STATS_URL.to_string());
        let country = lookup("DASHBOARD_COUNTRY").unwrap_or_else(|| "global".to_string());

        Self {
            port,
            theme_path,
            stats_url,
            country,
            counter: CounterTiming::default(),
        }
    }
}
