use crate::{
    Config, Metar, Taf,
    error::FetchError,
    provider::aviationweather::AviationWeatherProvider,
    station::StationCode,
};
use anyhow::Context;
use async_trait::async_trait;
use std::fmt::Debug;

pub mod aviationweather;

/// Somewhere METARs and TAFs come from.
///
/// Implementations issue one request per call, with all stations batched.
#[async_trait]
pub trait ReportSource: Send + Sync + Debug {
    async fn metars(&self, stations: &[StationCode]) -> Result<Vec<Metar>, FetchError>;

    async fn tafs(&self, stations: &[StationCode]) -> Result<Vec<Taf>, FetchError>;
}

/// Construct the report source described by the config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ReportSource>> {
    let provider = AviationWeatherProvider::new(config.base_url(), config.timeout())
        .context("Failed to build HTTP client for aviationweather.gov")?;

    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_default_config() {
        let provider = provider_from_config(&Config::default());
        assert!(provider.is_ok());
    }

    #[test]
    fn provider_from_custom_config() {
        let cfg = Config {
            api_base_url: Some("http://localhost:8080/".into()),
            timeout_secs: Some(3),
            ..Config::default()
        };

        let provider = provider_from_config(&cfg).expect("provider should build");
        assert!(format!("{provider:?}").contains("localhost:8080"));
    }
}
