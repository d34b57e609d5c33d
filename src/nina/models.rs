//! Response models of the NINA API.
//!
//! Every field is optional because the API omits whatever a provider does
//! not fill in. Fields not modelled here survive in `extra`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::NinaError;

pub type Extra = BTreeMap<String, Value>;

/// Timestamps as providers actually send them. RFC 3339 is parsed as is,
/// a missing offset is read as UTC, and anything else becomes `None`.
pub(crate) mod lenient_datetime {
    use chrono::{DateTime, FixedOffset, NaiveDateTime};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(Value::as_str).and_then(parse))
    }

    pub fn parse(raw: &str) -> Option<DateTime<FixedOffset>> {
        let raw = raw.trim();
        DateTime::parse_from_rfc3339(raw).ok().or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|naive| naive.and_utc().fixed_offset())
        })
    }
}

/// Warning sources that publish a `mapData.json` feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapProvider {
    Mowas,
    Katwarn,
    Biwapp,
    Dwd,
    Lhp,
    Police,
}

impl MapProvider {
    pub const ALL: [MapProvider; 6] = [
        MapProvider::Mowas,
        MapProvider::Katwarn,
        MapProvider::Biwapp,
        MapProvider::Dwd,
        MapProvider::Lhp,
        MapProvider::Police,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MapProvider::Mowas => "mowas",
            MapProvider::Katwarn => "katwarn",
            MapProvider::Biwapp => "biwapp",
            MapProvider::Dwd => "dwd",
            MapProvider::Lhp => "lhp",
            MapProvider::Police => "police",
        }
    }
}

impl fmt::Display for MapProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MapProvider {
    type Err = NinaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        MapProvider::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| {
                let options: Vec<&str> = MapProvider::ALL.iter().map(MapProvider::as_str).collect();
                NinaError::InvalidArgument {
                    message: format!(
                        "Unknown provider '{}'. Valid options: {}",
                        s,
                        options.join(", ")
                    ),
                }
            })
    }
}

/// One entry of `/dashboard/{ars}.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<DashboardPayload>,
    #[serde(
        rename = "i18nTitle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub i18n_title: Option<BTreeMap<String, String>>,
    #[serde(
        default,
        deserialize_with = "lenient_datetime::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub sent: Option<DateTime<FixedOffset>>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl DashboardItem {
    /// Headline of the warning, falling back to the German title.
    pub fn headline(&self) -> Option<&str> {
        self.payload
            .as_ref()
            .and_then(|p| p.data.as_ref())
            .and_then(|d| d.headline.as_deref())
            .or_else(|| self.i18n_title.as_ref()?.get("de").map(String::as_str))
    }

    pub fn severity(&self) -> Option<&str> {
        self.payload.as_ref()?.data.as_ref()?.severity.as_deref()
    }

    pub fn provider(&self) -> Option<&str> {
        self.payload.as_ref()?.data.as_ref()?.provider.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DashboardData>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trans_keys: Option<TransKeys>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransKeys {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// CAP message returned by `/warnings/{id}.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_datetime::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub sent: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incidents: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<Vec<WarningInfo>>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarningInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certainty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_code: Option<Vec<KeyValue>>,
    #[serde(
        default,
        deserialize_with = "lenient_datetime::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub effective: Option<DateTime<FixedOffset>>,
    #[serde(
        default,
        deserialize_with = "lenient_datetime::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub expires: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<Vec<KeyValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<Vec<WarningArea>>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarningArea {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geocode: Option<Vec<KeyValue>>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// One entry of `/{provider}/mapData.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapWarning {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(
        default,
        deserialize_with = "lenient_datetime::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(
        rename = "i18nTitle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub i18n_title: Option<BTreeMap<String, String>>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Regional rules from `/appdata/covid/covidrules/DE/{ars}.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CovidRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regulations: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common: Option<Vec<CovidRuleItem>>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CovidRuleItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}
