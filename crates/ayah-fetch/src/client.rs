use crate::error::UpstreamError;
use ayah_model::{AyahData, TranslationCatalog, VerseRecord, VerseReference};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.alquran.cloud/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`VerseClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root without a trailing slash (e.g., "https://api.alquran.cloud/v1").
    pub base_url: String,
    /// Applied to each request separately.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// A fetched verse plus any non-fatal problems met along the way.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub record: VerseRecord,
    pub warnings: Vec<String>,
}

/// The JSON wrapper around every API response.
#[derive(Debug, Deserialize)]
struct Envelope {
    code: u16,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    data: serde_json::Value,
}

/// Fetches verses from the AlQuran.cloud REST API.
pub struct VerseClient {
    http: reqwest::Client,
    base_url: String,
}

impl VerseClient {
    pub fn new(config: ClientConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("ayah/", env!("CARGO_PKG_VERSION"), " (verse fetcher)"))
            .timeout(config.timeout)
            .build()
            .map_err(UpstreamError::from_transport)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the Arabic text of `reference` and, if `translation` is given,
    /// that translation too.
    ///
    /// `translation` is a catalog key or, failing that, a raw upstream
    /// edition identifier. A failed translation fetch leaves
    /// `record.translation` empty and adds a warning for the caller to show;
    /// only the Arabic fetch can fail the call.
    pub async fn fetch_verse(
        &self,
        reference: VerseReference,
        translation: Option<&str>,
    ) -> Result<FetchOutcome, UpstreamError> {
        tracing::info!(reference = %reference, "Fetching Arabic text");
        let arabic = self.fetch_edition(reference, None).await?;
        let mut record = VerseRecord::new(reference, arabic);
        let mut warnings = Vec::new();

        if let Some(key) = translation {
            let edition = TranslationCatalog::resolve(key);
            tracing::info!(reference = %reference, key, edition, "Fetching translation");

            match self.fetch_edition(reference, Some(edition)).await {
                Ok(data) => record = record.with_translation(data),
                Err(UpstreamError::Api { .. }) => {
                    warnings.push(format!(
                        "Could not fetch translation '{key}'. Using Arabic only."
                    ));
                }
                Err(e) => {
                    warnings.push(format!("Translation request failed: {e}"));
                }
            }
        }

        for w in &warnings {
            tracing::debug!(reference = %reference, "{w}");
        }

        Ok(FetchOutcome { record, warnings })
    }

    /// Fetch a single edition of a verse. `None` means the default Arabic text.
    pub async fn fetch_edition(
        &self,
        reference: VerseReference,
        edition: Option<&str>,
    ) -> Result<AyahData, UpstreamError> {
        let url = match edition {
            Some(edition) => format!("{}/ayah/{reference}/{edition}", self.base_url),
            None => format!("{}/ayah/{reference}", self.base_url),
        };

        tracing::debug!(url = %url, "GET");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(UpstreamError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::from_status(status, &url));
        }

        let body = response.text().await.map_err(UpstreamError::from_transport)?;
        tracing::debug!(bytes = body.len(), "Received response");
        decode_envelope(&body)
    }
}

/// Unwrap the `{code, status, data}` envelope into verse data.
fn decode_envelope(body: &str) -> Result<AyahData, UpstreamError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| UpstreamError::Malformed(e.to_string()))?;

    if envelope.code != 200 {
        return Err(UpstreamError::Api {
            code: envelope.code,
            status: envelope.status.unwrap_or_else(|| "Unknown error".to_string()),
        });
    }

    serde_json::from_value(envelope.data).map_err(|e| UpstreamError::Malformed(e.to_string()))
}
