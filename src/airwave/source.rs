use std::io::BufReader;
use std::time::Duration;

use snafu::ResultExt;

use crate::common::{
    AccessPoint, AuthRejectedSnafu, AuthSnafu, ConfigSnafu, ListStatusSnafu, ParseSnafu,
    RequestSnafu, Result, Source,
};

use super::models::parse_ap_list;
use super::Endpoint;

pub const SOURCE_NAME: &str = "AirWave";

const BISCOTTI_HEADER: &str = "X-BISCOTTI";

/// An authenticated AirWave session. The agent carries the session cookie.
struct Session {
    agent: ureq::Agent,
    biscotti: Option<String>,
}

impl Session {
    fn get(&self, url: &url::Url) -> ureq::Request {
        let req = self.agent.get(url.as_str());
        match &self.biscotti {
            Some(token) => req.set(BISCOTTI_HEADER, token),
            None => req,
        }
    }
}

pub struct AirWaveSource {
    host: String,
    username: String,
    password: String,
    timeout: Option<Duration>,
    login_url: url::Url,
    list_url: url::Url,
    logout_url: url::Url,
}

fn endpoint_url(base_url: &url::Url, segment: &str) -> Result<url::Url> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| {
            ConfigSnafu {
                message: format!("{base_url} cannot be used as a base URL"),
                prefix: "airwave.urls",
            }
            .build()
        })?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}

impl AirWaveSource {
    pub fn new(endpoint: Endpoint, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            host: endpoint.base_url.to_string(),
            login_url: endpoint_url(&endpoint.base_url, "LOGIN")?,
            list_url: endpoint_url(&endpoint.base_url, "ap_list.xml")?,
            logout_url: endpoint_url(&endpoint.base_url, "LOGOUT")?,
            username: endpoint.username,
            password: endpoint.password,
            timeout,
        })
    }

    fn login(&self) -> Result<Session> {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let agent = builder.build();

        tracing::debug!(
            url = self.login_url.as_str(),
            method = "POST",
            source = SOURCE_NAME,
            "Sending request"
        );
        let response = match agent.post(self.login_url.as_str()).send_form(&[
            ("credential_0", self.username.as_str()),
            ("credential_1", self.password.as_str()),
            ("destination", "/"),
            ("next_action", ""),
        ]) {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => {
                return AuthRejectedSnafu {
                    url: self.login_url.as_str(),
                    status,
                }
                .fail();
            }
            Err(err) => {
                return Err(err).context(AuthSnafu {
                    url: self.login_url.as_str(),
                });
            }
        };

        if response.status() != 200 {
            return AuthRejectedSnafu {
                url: self.login_url.as_str(),
                status: response.status(),
            }
            .fail();
        }

        let biscotti = response.header(BISCOTTI_HEADER).map(str::to_string);
        Ok(Session { agent, biscotti })
    }

    fn list(&self, session: &Session) -> Result<Vec<AccessPoint>> {
        let url = self.list_url.as_str();
        tracing::debug!(url = url, method = "GET", source = SOURCE_NAME, "Sending request");

        let response = match session.get(&self.list_url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => {
                return ListStatusSnafu { url, status }.fail();
            }
            Err(err) => {
                return Err(err).context(RequestSnafu { url, method: "GET" });
            }
        };

        if response.status() != 200 {
            return ListStatusSnafu {
                url,
                status: response.status(),
            }
            .fail();
        }

        parse_ap_list(BufReader::new(response.into_reader())).context(ParseSnafu { url })
    }

    fn logout(&self, session: Session) {
        tracing::debug!(
            url = self.logout_url.as_str(),
            method = "GET",
            source = SOURCE_NAME,
            "Sending request"
        );
        if let Err(err) = session.get(&self.logout_url).call() {
            tracing::warn!(
                source = SOURCE_NAME,
                url = self.logout_url.as_str(),
                error = err.to_string(),
                "Logout failed"
            );
        }
    }
}

impl Source for AirWaveSource {
    fn name(&self) -> &str {
        &self.host
    }

    fn read_access_points(&self) -> Result<Vec<AccessPoint>> {
        let session = self.login()?;
        let result = self.list(&session);
        self.logout(session);
        let access_points = result?;

        tracing::info!(
            source = SOURCE_NAME,
            host = self.host,
            access_points = access_points.len(),
            "Read completed",
        );

        Ok(access_points)
    }
}
