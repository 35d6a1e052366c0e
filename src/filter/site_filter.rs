use regex::{Regex, RegexBuilder};

use crate::common::{AccessPoint, ConfigSnafu, Device, Result};

/// Selects access points by name. Matching is case-insensitive and anchored
/// at the start of the name.
#[derive(Clone, Debug)]
pub struct SiteFilter {
    pattern: Regex,
}

impl SiteFilter {
    pub fn new(config: &super::Config) -> Result<Self> {
        let (source, prefix) = match &config.pattern {
            Some(pattern) => (format!("^(?:{pattern})"), "filter.pattern"),
            None => (
                format!(r"^\w+-{}", regex::escape(config.site_code.trim())),
                "filter.site_code",
            ),
        };

        let pattern = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|err| {
                ConfigSnafu {
                    message: format!("Invalid name pattern {source}: {err}"),
                    prefix,
                }
                .build()
            })?;

        Ok(Self { pattern })
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }

    /// Keeps the matching access points and extracts their identifying fields.
    pub fn extract(&self, access_points: Vec<AccessPoint>) -> Vec<Device> {
        access_points
            .into_iter()
            .filter(|ap| self.matches(&ap.name))
            .map(Device::from)
            .collect()
    }
}
