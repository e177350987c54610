use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

/// 欄位缺失時使用的預設值
pub const UNKNOWN: &str = "Unknown";

/// 外部工具輸出解碼後的通用樹狀結構 (plist / JSON 都會先轉成這個)
#[derive(Debug, Clone, PartialEq)]
pub enum RawNode {
    Map(BTreeMap<String, RawNode>),
    Sequence(Vec<RawNode>),
    Scalar(ScalarValue),
    Null,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Bytes(Vec<u8>),
}

impl RawNode {
    pub fn text(value: impl Into<String>) -> Self {
        RawNode::Scalar(ScalarValue::Text(value.into()))
    }

    /// Looks up `key` when this node is a map.
    pub fn get(&self, key: &str) -> Option<&RawNode> {
        match self {
            RawNode::Map(entries) => entries.get(key),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[RawNode]> {
        match self {
            RawNode::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, RawNode::Map(_))
    }

    /// Text form of a scalar leaf. Bytes, containers and null have none.
    pub fn as_display_text(&self) -> Option<String> {
        match self {
            RawNode::Scalar(ScalarValue::Text(s)) => Some(s.clone()),
            RawNode::Scalar(ScalarValue::Integer(i)) => Some(i.to_string()),
            RawNode::Scalar(ScalarValue::Float(f)) => Some(f.to_string()),
            RawNode::Scalar(ScalarValue::Bool(b)) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for RawNode {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => RawNode::Null,
            serde_json::Value::Bool(b) => RawNode::Scalar(ScalarValue::Bool(b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => RawNode::Scalar(ScalarValue::Integer(i)),
                None => n
                    .as_f64()
                    .map(|f| RawNode::Scalar(ScalarValue::Float(f)))
                    .unwrap_or_else(|| RawNode::text(n.to_string())),
            },
            serde_json::Value::String(s) => RawNode::Scalar(ScalarValue::Text(s)),
            serde_json::Value::Array(items) => {
                RawNode::Sequence(items.into_iter().map(RawNode::from).collect())
            }
            serde_json::Value::Object(obj) => RawNode::Map(
                obj.into_iter()
                    .map(|(key, value)| (key, RawNode::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<plist::Value> for RawNode {
    fn from(value: plist::Value) -> Self {
        match value {
            plist::Value::Array(items) => {
                RawNode::Sequence(items.into_iter().map(RawNode::from).collect())
            }
            plist::Value::Dictionary(dict) => RawNode::Map(
                dict.into_iter()
                    .map(|(key, value)| (key, RawNode::from(value)))
                    .collect(),
            ),
            plist::Value::Boolean(b) => RawNode::Scalar(ScalarValue::Bool(b)),
            plist::Value::Data(bytes) => RawNode::Scalar(ScalarValue::Bytes(bytes)),
            plist::Value::Date(date) => {
                let time: std::time::SystemTime = date.into();
                let time: chrono::DateTime<chrono::Utc> = time.into();
                RawNode::text(time.to_rfc3339())
            }
            plist::Value::Real(f) => RawNode::Scalar(ScalarValue::Float(f)),
            plist::Value::Integer(i) => match i.as_signed() {
                Some(signed) => RawNode::Scalar(ScalarValue::Integer(signed)),
                None => i
                    .as_unsigned()
                    .map(|unsigned| RawNode::text(unsigned.to_string()))
                    .unwrap_or(RawNode::Null),
            },
            plist::Value::String(s) => RawNode::Scalar(ScalarValue::Text(s)),
            plist::Value::Uid(uid) => RawNode::text(uid.get().to_string()),
            _ => RawNode::Null,
        }
    }
}

/// 單一 Wi-Fi 網路的正規化資料
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDescriptor {
    pub ssid: String,
    pub channel: String,
    pub phy_mode: String,
    pub security: String,
    pub signal_noise: String,
}

impl NetworkDescriptor {
    /// A descriptor where every field except the SSID is [`UNKNOWN`].
    pub fn unknown(ssid: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            channel: UNKNOWN.to_string(),
            phy_mode: UNKNOWN.to_string(),
            security: UNKNOWN.to_string(),
            signal_noise: UNKNOWN.to_string(),
        }
    }
}

/// Wi-Fi 密碼，drop 時清除記憶體，Debug 不會印出內容
#[derive(Clone, Default)]
pub struct Credential(Zeroizing<String>);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for Credential {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Credential::new(s))
    }
}

impl<'de> Deserialize<'de> for Credential {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Credential::new)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[derive(Debug, Clone)]
pub struct ConnectionAttempt {
    pub ssid: String,
    pub credential: Credential,
}

impl ConnectionAttempt {
    pub fn new(ssid: impl Into<String>, credential: Credential) -> Self {
        Self {
            ssid: ssid.into(),
            credential,
        }
    }
}

/// Non-fatal anomalies reported by the tree parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseSignal {
    EmptyInput,
    NoItems,
    NoNetworksFound,
}

impl fmt::Display for ParseSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ParseSignal::EmptyInput => "no valid raw data to parse",
            ParseSignal::NoItems => "no Wi-Fi data found in raw data",
            ParseSignal::NoNetworksFound => "no networks found after parsing",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reachability {
    Reachable,
    Unreachable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BluetoothOutcome {
    Connected { address: String },
    NotFound,
    ConnectError { reason: String },
}

impl BluetoothOutcome {
    pub fn is_connected(&self) -> bool {
        matches!(self, BluetoothOutcome::Connected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_tree_conversion() {
        let node = RawNode::from(serde_json::json!({
            "name": "Home",
            "channel": 6,
            "hidden": false,
            "extra": null,
            "list": [1.5]
        }));

        assert_eq!(node.get("name").and_then(RawNode::as_display_text).as_deref(), Some("Home"));
        assert_eq!(node.get("channel").and_then(RawNode::as_display_text).as_deref(), Some("6"));
        assert_eq!(node.get("hidden").and_then(RawNode::as_display_text).as_deref(), Some("false"));
        assert_eq!(node.get("extra"), Some(&RawNode::Null));
        assert!(node.get("list").and_then(RawNode::as_sequence).is_some());
        assert!(node.get("missing").is_none());
    }

    #[test]
    fn test_containers_have_no_display_text() {
        assert!(RawNode::Sequence(vec![]).as_display_text().is_none());
        assert!(RawNode::Null.as_display_text().is_none());
        assert!(RawNode::Scalar(ScalarValue::Bytes(vec![1, 2])).as_display_text().is_none());
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("hunter2");
        assert_eq!(format!("{:?}", credential), "Credential(***)");
        assert_eq!(credential.expose(), "hunter2");
    }
}
