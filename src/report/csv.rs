use std::io::Write;

use snafu::ResultExt;

use crate::common::{Entry, Inventory, OutputSnafu, Result};

/// Renders one device as `name,lan_ip,mac1,mac2,...`.
///
/// A missing address leaves its field empty, and a device without radios
/// gets a single empty trailing field. Fields are not quoted.
pub fn format_line(name: &str, entry: &Entry) -> String {
    let mut line = format!("{name},{}", entry.lan_ip.as_deref().unwrap_or_default());

    if entry.mac_radios.is_empty() {
        line.push(',');
    }
    for mac in &entry.mac_radios {
        line.push(',');
        line.push_str(mac);
    }

    line
}

/// Writes every device in name order, one line each, without a header.
pub fn write_report<W: Write>(inventory: &Inventory, out: &mut W) -> Result<()> {
    for (name, entry) in inventory.iter() {
        writeln!(out, "{}", format_line(name, entry)).context(OutputSnafu)?;
    }
    out.flush().context(OutputSnafu)
}
