use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Login to {url} failed: {source}"))]
    AuthError { url: String, source: ureq::Error },
    #[snafu(display("Login to {url} rejected with status {status}"))]
    AuthRejectedError { url: String, status: u16 },
    #[snafu(display("{method} {url} failed: {source}"))]
    RequestError {
        url: String,
        method: String,
        source: ureq::Error,
    },
    #[snafu(display("GET {url} returned status {status}"))]
    ListStatusError { url: String, status: u16 },
    #[snafu(display("Failed to read access point list from {url}: {source}"))]
    ParseError {
        url: String,
        source: quick_xml::Error,
    },
    #[snafu(display("Invalid configuration for {prefix}: {message}"))]
    ConfigError { message: String, prefix: String },
    #[snafu(display("Failed to write report: {source}"))]
    OutputError { source: std::io::Error },
}

impl Error {
    /// Failures confined to a single server once logged in. The caller drops
    /// that server's data and carries on with the next one.
    pub fn skips_server(&self) -> bool {
        matches!(
            self,
            Error::RequestError { .. }
                | Error::ListStatusError { .. }
                | Error::ParseError { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_failures_skip_the_server() {
        let err = ListStatusSnafu {
            url: "https://amp/ap_list.xml",
            status: 500u16,
        }
        .build();
        assert!(err.skips_server());
        assert_eq!(
            err.to_string(),
            "GET https://amp/ap_list.xml returned status 500"
        );
    }

    #[test]
    fn auth_failures_abort() {
        let err = AuthRejectedSnafu {
            url: "https://amp/LOGIN",
            status: 403u16,
        }
        .build();
        assert!(!err.skips_server());
    }
}
