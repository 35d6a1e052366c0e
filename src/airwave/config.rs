use snafu::ensure;

use crate::common::{key_file_or_string, split_list, ConfigSnafu, Result};

#[derive(Clone, serde::Deserialize)]
pub struct Config {
    /// Comma separated list of server base URLs, processed in order.
    #[serde(default)]
    pub urls: String,
    pub username: String,
    pub password: String,
    /// Per-request timeout in seconds.
    pub timeout: Option<u64>,
}

/// A server base URL plus the credentials used against it.
#[derive(Clone)]
pub struct Endpoint {
    pub base_url: url::Url,
    pub username: String,
    pub password: String,
}

impl Config {
    pub fn endpoints(&self) -> Result<Vec<Endpoint>> {
        let password = key_file_or_string(self.password.clone(), "airwave.password".into())?;

        let urls = split_list(&self.urls);
        ensure!(
            !urls.is_empty(),
            ConfigSnafu {
                message: "At least one server URL is required",
                prefix: "airwave.urls",
            }
        );

        urls.into_iter()
            .map(|raw| -> Result<Endpoint> {
                let base_url = url::Url::parse(raw).map_err(|err| {
                    ConfigSnafu {
                        message: format!("Invalid URL {raw}: {err}"),
                        prefix: "airwave.urls",
                    }
                    .build()
                })?;
                ensure!(
                    matches!(base_url.scheme(), "http" | "https"),
                    ConfigSnafu {
                        message: format!("{raw} is not a HTTP URL"),
                        prefix: "airwave.urls",
                    }
                );
                Ok(Endpoint {
                    base_url,
                    username: self.username.clone(),
                    password: password.clone(),
                })
            })
            .collect()
    }
}
