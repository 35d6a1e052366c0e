pub const DEFAULT_SITE_CODE: &str = "WA";

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Config {
    #[serde(default = "default_site_code")]
    pub site_code: String,
    /// Replaces the site code pattern entirely when set.
    pub pattern: Option<String>,
}

fn default_site_code() -> String {
    DEFAULT_SITE_CODE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_code: default_site_code(),
            pattern: None,
        }
    }
}
