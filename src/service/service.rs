use std::io::Write;

use crate::common::{Inventory, Result, Source};
use crate::filter::SiteFilter;
use crate::report::write_report;

type Sources = Vec<Box<dyn Source>>;

pub struct APInventory {
    sources: Sources,
    filter: SiteFilter,
}

impl APInventory {
    pub fn new(sources: Sources, filter: SiteFilter) -> Self {
        Self { sources, filter }
    }

    pub fn sources(&self) -> usize {
        self.sources.len()
    }

    /// Reads every source in order and folds the matching devices into one
    /// inventory. Failures confined to one server drop that server's data,
    /// anything else aborts.
    pub fn collect(&self) -> Result<Inventory> {
        self.sources
            .iter()
            .try_fold(Inventory::default(), |inventory, source| {
                match source.read_access_points() {
                    Ok(access_points) => {
                        let read = access_points.len();
                        let devices = self.filter.extract(access_points);
                        tracing::info!(
                            source = source.name(),
                            access_points = read,
                            devices = devices.len(),
                            "Filtered access points"
                        );
                        Ok(inventory.merge(source.name(), devices))
                    }
                    Err(err) if err.skips_server() => {
                        tracing::warn!(
                            source = source.name(),
                            error = err.to_string(),
                            "Skipping server"
                        );
                        Ok(inventory)
                    }
                    Err(err) => Err(err),
                }
            })
    }

    /// Collects from every source, then writes the report. Nothing is written
    /// unless collection finished.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<()> {
        let inventory = self.collect()?;
        tracing::info!(devices = inventory.len(), "Writing report");
        write_report(&inventory, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{
        AccessPoint, AuthRejectedSnafu, Error, ListStatusSnafu, RadioEntry,
    };
    use crate::filter;
    use pretty_assertions::assert_eq;

    struct StaticSource {
        name: String,
        result: fn() -> Result<Vec<AccessPoint>>,
    }

    impl Source for StaticSource {
        fn name(&self) -> &str {
            &self.name
        }

        fn read_access_points(&self) -> Result<Vec<AccessPoint>> {
            (self.result)()
        }
    }

    fn source(name: &str, result: fn() -> Result<Vec<AccessPoint>>) -> Box<dyn Source> {
        Box::new(StaticSource {
            name: name.into(),
            result,
        })
    }

    fn ap(name: &str, lan_ip: Option<&str>, macs: &[&str]) -> AccessPoint {
        AccessPoint {
            id: None,
            name: name.into(),
            lan_ip: lan_ip.map(Into::into),
            radios: macs
                .iter()
                .map(|mac| RadioEntry::Radio {
                    mac: Some(mac.to_string()),
                })
                .collect(),
        }
    }

    fn service(sources: Sources) -> APInventory {
        APInventory::new(
            sources,
            SiteFilter::new(&filter::Config::default()).unwrap(),
        )
    }

    fn report(service: &APInventory) -> Result<String> {
        let mut out = Vec::new();
        service.run(&mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn later_server_wins_on_name_collision() {
        let service = service(vec![
            source("first", || {
                Ok(vec![
                    ap("hall-WA01", Some("10.0.0.1"), &["aa:bb", "cc:dd"]),
                    ap("gym-WA01", None, &[]),
                ])
            }),
            source("second", || Ok(vec![ap("hall-WA01", Some("10.9.9.9"), &["ee:ff"])])),
        ]);

        assert_eq!(
            report(&service).unwrap(),
            "gym-WA01,,\nhall-WA01,10.9.9.9,ee:ff\n"
        );
    }

    #[test]
    fn failed_list_does_not_affect_other_servers() {
        let service = service(vec![
            source("first", || Ok(vec![ap("hall-WA01", Some("10.0.0.1"), &[])])),
            source("broken", || {
                ListStatusSnafu {
                    url: "https://broken/ap_list.xml",
                    status: 503u16,
                }
                .fail()
            }),
            source("third", || Ok(vec![ap("lab-WA02", None, &["aa:bb"])])),
        ]);

        assert_eq!(
            report(&service).unwrap(),
            "hall-WA01,10.0.0.1,\nlab-WA02,,aa:bb\n"
        );
    }

    #[test]
    fn only_matching_names_are_reported() {
        let service = service(vec![source("only", || {
            Ok(vec![
                ap("bldg-EA12", Some("10.0.0.2"), &[]),
                ap("bldg-WA12", Some("10.0.0.1"), &[]),
            ])
        })]);

        assert_eq!(report(&service).unwrap(), "bldg-WA12,10.0.0.1,\n");
    }

    #[test]
    fn auth_failure_aborts_without_output() {
        let service = service(vec![
            source("first", || Ok(vec![ap("hall-WA01", None, &[])])),
            source("locked", || {
                AuthRejectedSnafu {
                    url: "https://locked/LOGIN",
                    status: 403u16,
                }
                .fail()
            }),
        ]);

        let mut out = Vec::new();
        let err = service.run(&mut out).unwrap_err();

        assert!(matches!(err, Error::AuthRejectedError { status: 403, .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn no_sources_gives_empty_report() {
        let service = service(vec![]);
        assert_eq!(service.sources(), 0);
        assert_eq!(report(&service).unwrap(), "");
    }
}
