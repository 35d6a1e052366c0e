use std::time::Duration;

use crate::airwave::AirWaveSource;
use crate::common::{Result, Source};
use crate::filter::SiteFilter;

pub const ENV_PREFIX: &str = "APSCAN";

#[derive(Clone, serde::Deserialize)]
pub struct Config {
    pub airwave: crate::airwave::Config,

    #[serde(default)]
    pub filter: crate::filter::Config,
}

impl Config {
    /// Loads the configuration from `APSCAN_*` environment variables, nested
    /// keys separated by `__` (e.g. `APSCAN_AIRWAVE__URLS`).
    #[cfg(feature = "cli")]
    pub fn from_env() -> Result<Self> {
        Self::from_env_source(None)
    }

    /// Same as [`Config::from_env`], reading from `vars` instead of the
    /// process environment when provided.
    #[cfg(feature = "cli")]
    pub fn from_env_source(vars: Option<config::Map<String, String>>) -> Result<Self> {
        use crate::common::ConfigSnafu;

        config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .source(vars),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|err| {
                ConfigSnafu {
                    message: err.to_string(),
                    prefix: "environment",
                }
                .build()
            })
    }

    pub fn with_urls(mut self, urls: Vec<String>) -> Self {
        self.airwave.urls = urls.join(",");
        self
    }

    pub fn with_site_code(mut self, site_code: String) -> Self {
        self.filter.site_code = site_code;
        self
    }

    pub fn with_pattern(mut self, pattern: String) -> Self {
        self.filter.pattern = Some(pattern);
        self
    }

    pub fn get_service(self) -> Result<crate::service::APInventory> {
        let filter = SiteFilter::new(&self.filter)?;
        let sources = self.into_sources()?;
        Ok(crate::service::APInventory::new(sources, filter))
    }

    pub fn into_sources(self) -> Result<Vec<Box<dyn Source>>> {
        let timeout = self.airwave.timeout.map(Duration::from_secs);
        let mut sources: Vec<Box<dyn Source>> = Vec::new();

        for endpoint in self.airwave.endpoints()? {
            sources.push(Box::new(AirWaveSource::new(endpoint, timeout)?));
        }

        Ok(sources)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::common::Error;
    use pretty_assertions::assert_eq;

    fn vars(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn loads_nested_keys() {
        let config = Config::from_env_source(vars(&[
            ("APSCAN_AIRWAVE__URLS", "https://amp-01.example.edu,https://amp-02.example.edu"),
            ("APSCAN_AIRWAVE__USERNAME", "reporter"),
            ("APSCAN_AIRWAVE__PASSWORD", "0123"),
            ("APSCAN_AIRWAVE__TIMEOUT", "30"),
            ("APSCAN_FILTER__SITE_CODE", "EA"),
        ]))
        .unwrap();

        assert_eq!(config.airwave.username, "reporter");
        assert_eq!(config.airwave.password, "0123");
        assert_eq!(config.airwave.timeout, Some(30));
        assert_eq!(config.filter.site_code, "EA");
        assert_eq!(config.filter.pattern, None);
        assert_eq!(config.into_sources().unwrap().len(), 2);
    }

    #[test]
    fn filter_defaults_to_wa() {
        let config = Config::from_env_source(vars(&[
            ("APSCAN_AIRWAVE__URLS", "https://amp.example.edu"),
            ("APSCAN_AIRWAVE__USERNAME", "reporter"),
            ("APSCAN_AIRWAVE__PASSWORD", "pw"),
        ]))
        .unwrap();

        assert_eq!(config.filter.site_code, "WA");
        assert_eq!(config.airwave.timeout, None);
    }

    #[test]
    fn missing_credentials_are_rejected() {
        let result = Config::from_env_source(vars(&[("APSCAN_AIRWAVE__URLS", "https://amp")]));
        assert!(matches!(result, Err(Error::ConfigError { .. })));
    }

    #[test]
    fn cli_overrides_replace_env_values() {
        let config = Config::from_env_source(vars(&[
            ("APSCAN_AIRWAVE__USERNAME", "reporter"),
            ("APSCAN_AIRWAVE__PASSWORD", "pw"),
        ]))
        .unwrap()
        .with_urls(vec!["https://a.example.edu".into(), "https://b.example.edu".into()])
        .with_pattern(r"\w+-(WA|EA)".into());

        assert_eq!(config.airwave.urls, "https://a.example.edu,https://b.example.edu");

        let service = config.get_service().unwrap();
        assert_eq!(service.sources(), 2);
    }

    #[test]
    fn service_requires_urls() {
        let config = Config::from_env_source(vars(&[
            ("APSCAN_AIRWAVE__USERNAME", "reporter"),
            ("APSCAN_AIRWAVE__PASSWORD", "pw"),
        ]))
        .unwrap();

        assert!(matches!(
            config.get_service(),
            Err(Error::ConfigError { .. })
        ));
    }
}
