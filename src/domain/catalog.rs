use crate::domain::model::NetworkDescriptor;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use unicode_width::UnicodeWidthStr;

const HEADERS: [&str; 5] = ["SSID", "Channel", "PHY Mode", "Security", "Signal/Noise"];

/// Networks seen by one scan, keyed by SSID.
///
/// Entries keep first-insertion order for display. Inserting an SSID that is
/// already present replaces its fields in place (last writer wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkCatalog {
    entries: Vec<NetworkDescriptor>,
    index: HashMap<String, usize>,
}

impl NetworkCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the tree parser builds catalogs.
    pub(crate) fn upsert(&mut self, descriptor: NetworkDescriptor) {
        match self.index.get(&descriptor.ssid) {
            Some(&position) => self.entries[position] = descriptor,
            None => {
                self.index
                    .insert(descriptor.ssid.clone(), self.entries.len());
                self.entries.push(descriptor);
            }
        }
    }

    pub fn lookup(&self, ssid: &str) -> Option<&NetworkDescriptor> {
        self.index.get(ssid).map(|&position| &self.entries[position])
    }

    pub fn contains(&self, ssid: &str) -> bool {
        self.index.contains_key(ssid)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NetworkDescriptor> {
        self.entries.iter()
    }

    pub fn ssids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|d| d.ssid.as_str())
    }

    /// 以表格格式輸出 (SSID, Channel, PHY Mode, Security, Signal/Noise)
    pub fn render(&self) -> String {
        let rows: Vec<[&str; 5]> = self
            .entries
            .iter()
            .map(|d| {
                [
                    d.ssid.as_str(),
                    d.channel.as_str(),
                    d.phy_mode.as_str(),
                    d.security.as_str(),
                    d.signal_noise.as_str(),
                ]
            })
            .collect();

        let mut widths = HEADERS.map(UnicodeWidthStr::width);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.width());
            }
        }

        let mut lines = Vec::with_capacity(rows.len() * 2 + 3);
        lines.push(border(&widths, '-'));
        lines.push(row_line(&widths, &HEADERS));
        lines.push(border(&widths, '='));
        for row in &rows {
            lines.push(row_line(&widths, row));
            lines.push(border(&widths, '-'));
        }
        lines.join("\n")
    }

    pub fn to_json(&self) -> crate::utils::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for NetworkCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.entries)
    }
}

fn border(widths: &[usize; 5], fill: char) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&fill.to_string().repeat(width + 2));
        line.push('+');
    }
    line
}

fn row_line(widths: &[usize; 5], cells: &[&str; 5]) -> String {
    let mut line = String::from("|");
    for (width, cell) in widths.iter().zip(cells.iter()) {
        let padding = width - cell.width();
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(padding + 1));
        line.push('|');
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(ssid: &str, channel: &str) -> NetworkDescriptor {
        NetworkDescriptor {
            channel: channel.to_string(),
            ..NetworkDescriptor::unknown(ssid)
        }
    }

    #[test]
    fn test_upsert_keeps_first_position_and_last_values() {
        let mut catalog = NetworkCatalog::new();
        catalog.upsert(descriptor("Home", "1"));
        catalog.upsert(descriptor("Office", "11"));
        catalog.upsert(descriptor("Home", "36"));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.ssids().collect::<Vec<_>>(), vec!["Home", "Office"]);
        assert_eq!(catalog.lookup("Home").unwrap().channel, "36");
        assert!(catalog.lookup("Cafe").is_none());
    }

    #[test]
    fn test_render_grid() {
        let mut catalog = NetworkCatalog::new();
        catalog.upsert(descriptor("Home", "6"));

        let table = catalog.render();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[1],
            "| SSID | Channel | PHY Mode | Security | Signal/Noise |"
        );
        assert_eq!(
            lines[3],
            "| Home | 6       | Unknown  | Unknown  | Unknown      |"
        );
        assert!(lines[2].starts_with("+======+"));
        assert!(lines.iter().all(|line| line.width() == lines[0].width()));
    }

    #[test]
    fn test_render_wide_characters_stay_aligned() {
        let mut catalog = NetworkCatalog::new();
        catalog.upsert(descriptor("咖啡店", "149"));
        catalog.upsert(descriptor("Home", "6"));

        let table = catalog.render();
        let widths: Vec<usize> = table.lines().map(UnicodeWidthStr::width).collect();
        assert!(widths.iter().all(|w| *w == widths[0]));
    }

    #[test]
    fn test_empty_catalog_renders_header_only() {
        let catalog = NetworkCatalog::new();
        assert_eq!(catalog.render().lines().count(), 3);
        assert_eq!(catalog.to_json().unwrap(), "[]");
    }

    #[test]
    fn test_json_output_in_display_order() {
        let mut catalog = NetworkCatalog::new();
        catalog.upsert(descriptor("Office", "11"));
        catalog.upsert(descriptor("Home", "6"));

        let value: serde_json::Value = serde_json::from_str(&catalog.to_json().unwrap()).unwrap();
        assert_eq!(value[0]["ssid"], "Office");
        assert_eq!(value[1]["phy_mode"], "Unknown");
    }
}
