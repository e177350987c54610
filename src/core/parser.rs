use crate::domain::catalog::NetworkCatalog;
use crate::domain::model::{NetworkDescriptor, ParseSignal, RawNode, UNKNOWN};
use serde::{Deserialize, Serialize};

/// Keys used to locate networks inside the inventory tree.
///
/// Defaults match `system_profiler SPAirPortDataType`. Every key can be
/// overridden from the `[schema]` table of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventorySchema {
    pub items: String,
    pub interfaces: String,
    pub local_networks: String,
    pub name: String,
    pub channel: String,
    pub phy_mode: String,
    pub security: String,
    pub signal_noise: String,
}

impl Default for InventorySchema {
    fn default() -> Self {
        Self {
            items: "_items".to_string(),
            interfaces: "spairport_airport_interfaces".to_string(),
            local_networks: "spairport_airport_local_wireless_networks".to_string(),
            name: "_name".to_string(),
            channel: "spairport_network_channel".to_string(),
            phy_mode: "spairport_network_phymode".to_string(),
            security: "spairport_security_mode".to_string(),
            signal_noise: "spairport_signal_noise".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReport {
    pub catalog: NetworkCatalog,
    pub signal: Option<ParseSignal>,
}

impl ParseReport {
    fn empty(signal: ParseSignal) -> Self {
        tracing::warn!("{}", signal);
        Self {
            catalog: NetworkCatalog::new(),
            signal: Some(signal),
        }
    }
}

/// 將盤點樹轉成扁平的網路目錄
///
/// 結構不符預期時不會失敗，而是回傳空目錄並附帶 [`ParseSignal`]。
#[derive(Debug, Clone, Default)]
pub struct NetworkTreeParser {
    schema: InventorySchema,
}

impl NetworkTreeParser {
    pub fn new(schema: InventorySchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &InventorySchema {
        &self.schema
    }

    pub fn parse(&self, raw: &RawNode) -> ParseReport {
        let first = match raw.as_sequence().and_then(|roots| roots.first()) {
            Some(first) => first,
            None => return ParseReport::empty(ParseSignal::EmptyInput),
        };

        let items = match first
            .get(&self.schema.items)
            .and_then(RawNode::as_sequence)
        {
            Some(items) if !items.is_empty() => items,
            _ => return ParseReport::empty(ParseSignal::NoItems),
        };

        let mut catalog = NetworkCatalog::new();
        for item in items {
            let interfaces = item
                .get(&self.schema.interfaces)
                .and_then(RawNode::as_sequence)
                .unwrap_or_default();

            for interface in interfaces {
                match interface.get(&self.schema.local_networks) {
                    Some(RawNode::Sequence(networks)) => self.extract_networks(networks, &mut catalog),
                    Some(_) => tracing::debug!(
                        "Ignoring '{}' that is not a list",
                        self.schema.local_networks
                    ),
                    None => {}
                }
            }
        }

        if catalog.is_empty() {
            tracing::warn!("{}", ParseSignal::NoNetworksFound);
            return ParseReport {
                catalog,
                signal: Some(ParseSignal::NoNetworksFound),
            };
        }

        tracing::debug!("Parsed {} networks", catalog.len());
        ParseReport {
            catalog,
            signal: None,
        }
    }

    fn extract_networks(&self, networks: &[RawNode], catalog: &mut NetworkCatalog) {
        for network in networks.iter().filter(|n| n.is_map()) {
            let descriptor = NetworkDescriptor {
                ssid: self.field(network, &self.schema.name),
                channel: self.field(network, &self.schema.channel),
                phy_mode: self.field(network, &self.schema.phy_mode),
                security: self.field(network, &self.schema.security),
                signal_noise: self.field(network, &self.schema.signal_noise),
            };
            catalog.upsert(descriptor);
        }
    }

    fn field(&self, network: &RawNode, key: &str) -> String {
        network
            .get(key)
            .and_then(RawNode::as_display_text)
            .unwrap_or_else(|| UNKNOWN.to_string())
    }
}
