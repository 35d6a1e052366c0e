use std::collections::BTreeMap;

use super::Device;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub lan_ip: Option<String>,
    pub mac_radios: Vec<String>,
}

/// Devices keyed by name, iterated in ascending lexical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    entries: BTreeMap<String, Entry>,
}

impl Inventory {
    /// Folds `devices` into the inventory. A name that is already present is
    /// replaced wholesale by the later device.
    pub fn merge(mut self, origin: &str, devices: impl IntoIterator<Item = Device>) -> Self {
        for device in devices {
            let entry = Entry {
                lan_ip: device.lan_ip,
                mac_radios: device.mac_radios,
            };
            if let Some(previous) = self.entries.insert(device.name.clone(), entry) {
                tracing::warn!(
                    source = origin,
                    name = device.name,
                    previous_lan_ip = previous.lan_ip,
                    "Replacing device reported by an earlier server"
                );
            }
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Entry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
