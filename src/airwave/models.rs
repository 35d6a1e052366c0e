use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::common::{AccessPoint, RadioEntry};

// Depth of the parent path when an element of interest opens.
const AP_DEPTH: usize = 1;
const AP_FIELD_DEPTH: usize = 2;
const RADIO_FIELD_DEPTH: usize = 3;

#[derive(Default)]
struct PendingAccessPoint {
    id: Option<String>,
    name: Option<String>,
    lan_ip: Option<String>,
    radios: Vec<RadioEntry>,
}

#[derive(Default)]
struct PendingRadio {
    structured: bool,
    mac: Option<String>,
}

impl From<PendingRadio> for RadioEntry {
    fn from(value: PendingRadio) -> Self {
        match value.structured {
            true => RadioEntry::Radio { mac: value.mac },
            false => RadioEntry::Malformed,
        }
    }
}

#[derive(Default)]
struct ApListParser {
    path: Vec<String>,
    text: String,
    current: Option<PendingAccessPoint>,
    radio: Option<PendingRadio>,
    access_points: Vec<AccessPoint>,
    seen_root: bool,
}

fn local_name(element: &BytesStart) -> String {
    String::from_utf8_lossy(element.local_name().as_ref()).into_owned()
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl ApListParser {
    fn open(&mut self, element: &BytesStart) -> quick_xml::Result<()> {
        let name = local_name(element);
        let depth = self.path.len();

        if depth == 0 {
            self.seen_root = true;
        } else if depth == AP_DEPTH && name == "ap" {
            let id = match element.try_get_attribute("id")? {
                Some(attr) => Some(attr.unescape_value()?.into_owned()),
                None => None,
            };
            self.current = Some(PendingAccessPoint {
                id,
                ..Default::default()
            });
        } else if depth == AP_FIELD_DEPTH && name == "radio" && self.current.is_some() {
            self.radio = Some(PendingRadio {
                structured: element.attributes().next().is_some(),
                mac: None,
            });
        } else if depth == RADIO_FIELD_DEPTH {
            if let Some(radio) = self.radio.as_mut() {
                radio.structured = true;
            }
        }

        self.path.push(name);
        self.text.clear();
        Ok(())
    }

    fn close(&mut self) {
        let Some(name) = self.path.pop() else {
            return;
        };
        let depth = self.path.len();
        let text = std::mem::take(&mut self.text);

        match (depth, name.as_str()) {
            (RADIO_FIELD_DEPTH, "radio_mac") => {
                if let Some(radio) = self.radio.as_mut() {
                    radio.mac = non_empty(&text);
                }
            }
            (AP_FIELD_DEPTH, "radio") => {
                if let (Some(ap), Some(radio)) = (self.current.as_mut(), self.radio.take()) {
                    ap.radios.push(radio.into());
                }
            }
            (AP_FIELD_DEPTH, "name") => {
                if let Some(ap) = self.current.as_mut() {
                    ap.name = non_empty(&text);
                }
            }
            (AP_FIELD_DEPTH, "lan_ip") => {
                if let Some(ap) = self.current.as_mut() {
                    ap.lan_ip = non_empty(&text);
                }
            }
            (AP_DEPTH, "ap") => {
                if let Some(ap) = self.current.take() {
                    self.finish(ap);
                }
            }
            _ => {}
        }
    }

    fn finish(&mut self, ap: PendingAccessPoint) {
        match ap.name {
            Some(name) => self.access_points.push(AccessPoint {
                id: ap.id,
                name,
                lan_ip: ap.lan_ip,
                radios: ap.radios,
            }),
            None => tracing::warn!(id = ap.id, "Skipping access point without a name"),
        }
    }
}

/// Parses an AirWave `ap_list.xml` document into access points, in
/// document order. The whole document must be present: a missing root
/// element or an unclosed one is an error.
pub(crate) fn parse_ap_list<R: BufRead>(source: R) -> quick_xml::Result<Vec<AccessPoint>> {
    let mut reader = Reader::from_reader(source);
    reader.trim_text(true);

    let mut parser = ApListParser::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(element) => parser.open(&element)?,
            Event::Empty(element) => {
                parser.open(&element)?;
                parser.close();
            }
            Event::End(_) => parser.close(),
            Event::Text(text) => parser.text.push_str(&text.unescape()?),
            Event::CData(data) => parser
                .text
                .push_str(&String::from_utf8_lossy(&data.into_inner())),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !parser.seen_root {
        return Err(quick_xml::Error::UnexpectedEof(
            "document has no root element".into(),
        ));
    }
    if let Some(open) = parser.path.last() {
        return Err(quick_xml::Error::UnexpectedEof(format!(
            "element {open} is not closed"
        )));
    }

    Ok(parser.access_points)
}
