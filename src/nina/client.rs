//! HTTP client for the NINA warning API of the Federal Office of Civil
//! Protection (BBK).

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::models::{CovidRules, DashboardItem, MapProvider, MapWarning, Warning};
use super::{NinaError, NinaResult};

pub const DEFAULT_BASE_URL: &str = "https://warnung.bund.de/api31";

/// Thin typed wrapper over the NINA REST endpoints.
#[derive(Clone)]
pub struct NinaClient {
    base_url: String,
    client: Client,
}

impl NinaClient {
    /// Create a client for the given API root, e.g. `https://warnung.bund.de/api31`.
    pub fn new(base_url: impl Into<String>) -> NinaResult<Self> {
        // reqwest is built without a bundled crypto provider
        let _ = rustls::crypto::ring::default_provider().install_default();

        let client = Client::builder()
            .user_agent(concat!("staffalert/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current warnings for a district-level regional key (12 digits).
    pub async fn dashboard(&self, ars: &str) -> NinaResult<Vec<DashboardItem>> {
        let ars = path_segment("ars", ars)?;
        self.get_json(&format!("/dashboard/{}.json", ars)).await
    }

    /// Full CAP message of a warning.
    pub async fn warning(&self, id: &str) -> NinaResult<Warning> {
        let id = path_segment("warning_id", id)?;
        self.get_json(&format!("/warnings/{}.json", id)).await
    }

    /// Affected area of a warning as GeoJSON.
    pub async fn warning_geojson(&self, id: &str) -> NinaResult<Value> {
        let id = path_segment("warning_id", id)?;
        self.get_json(&format!("/warnings/{}.geojson", id)).await
    }

    /// All warnings currently published by one provider.
    pub async fn map_warnings(&self, provider: MapProvider) -> NinaResult<Vec<MapWarning>> {
        self.get_json(&format!("/{}/mapData.json", provider)).await
    }

    /// Update history of a MoWaS warning.
    pub async fn warning_history(&self, id: &str) -> NinaResult<Value> {
        let id = path_segment("warning_id", id)?;
        self.get_json(&format!("/archive.mowas/{}-mapping.json", id))
            .await
    }

    pub async fn covid_rules(&self, ars: &str) -> NinaResult<CovidRules> {
        let ars = path_segment("ars", ars)?;
        self.get_json(&format!("/appdata/covid/covidrules/DE/{}.json", ars))
            .await
    }

    pub async fn covid_infos(&self) -> NinaResult<Value> {
        self.get_json("/appdata/covid/covidinfos/DE/covidinfos.json")
            .await
    }

    pub async fn covid_ticker(&self) -> NinaResult<Value> {
        self.get_json("/appdata/covid/covidticker/DE/covidticker.json")
            .await
    }

    pub async fn faqs(&self) -> NinaResult<Value> {
        self.get_json("/appdata/gsb/faqs/DE/faq.json").await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> NinaResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "NINA request");

        let response = self.client.get(&url).send().await?;
        Self::handle_response(response).await
    }

    /// Deserialize a successful response, or turn the status and body into
    /// `NinaError::Status`.
    async fn handle_response<T: DeserializeOwned>(response: Response) -> NinaResult<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(NinaError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| NinaError::Decode {
            message: e.to_string(),
        })
    }
}

fn path_segment<'a>(name: &str, value: &'a str) -> NinaResult<&'a str> {
    let value = value.trim();
    if value.is_empty() || value.contains(['/', '?', '#']) {
        return Err(NinaError::InvalidArgument {
            message: format!("Invalid {} '{}'", name, value),
        });
    }
    Ok(value)
}
