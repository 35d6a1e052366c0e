/// A radio child of an access point, classified while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RadioEntry {
    Radio { mac: Option<String> },
    Malformed,
}

/// An access point as reported by a management server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPoint {
    pub id: Option<String>,
    pub name: String,
    pub lan_ip: Option<String>,
    pub radios: Vec<RadioEntry>,
}

impl AccessPoint {
    pub fn mac_radios(&self) -> Vec<String> {
        self.radios
            .iter()
            .filter_map(|radio| match radio {
                RadioEntry::Radio { mac } => mac.clone(),
                RadioEntry::Malformed => None,
            })
            .collect()
    }
}

/// The identifying fields extracted from a matching access point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub name: String,
    pub lan_ip: Option<String>,
    pub mac_radios: Vec<String>,
}

impl From<AccessPoint> for Device {
    fn from(value: AccessPoint) -> Self {
        let mac_radios = value.mac_radios();
        Self {
            name: value.name,
            lan_ip: value.lan_ip,
            mac_radios,
        }
    }
}

pub trait Source {
    /// Human readable identifier used in logs.
    fn name(&self) -> &str;

    /// Runs one login, list and logout cycle against the server.
    fn read_access_points(&self) -> super::Result<Vec<AccessPoint>>;
}
