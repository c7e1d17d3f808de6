//! HTTP client for the Koi & Fox backend

use crate::api::types::{
    AnalyzeEndpoint, AnalyzeRequest, AnalyzeResponse, Persona, PersonaListResponse,
};
use crate::error::{KoiFoxError, KoiFoxResult};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// Operations the client needs from the analysis backend
#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetch the persona catalog in backend order
    async fn list_personas(&self) -> KoiFoxResult<Vec<Persona>>;

    /// Run one analysis against the given endpoint
    async fn analyze(
        &self,
        endpoint: AnalyzeEndpoint,
        request: &AnalyzeRequest,
    ) -> KoiFoxResult<AnalyzeResponse>;
}

/// Backend reached over plain HTTP
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend client for the given base address
    pub fn new(base_url: &str) -> KoiFoxResult<Self> {
        Url::parse(base_url).map_err(|e| {
            KoiFoxError::config(format!("invalid backend address '{}': {}", base_url, e))
        })?;

        let client = Client::builder()
            .build()
            .map_err(|e| KoiFoxError::transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base address requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list_personas(&self) -> KoiFoxResult<Vec<Persona>> {
        let url = self.url("/personas");
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Persona catalog request failed with {}", status);
            return Err(KoiFoxError::status(status.as_u16(), body));
        }

        let list: PersonaListResponse = response
            .json()
            .await
            .map_err(|e| KoiFoxError::decode(format!("failed to parse personas: {}", e)))?;

        tracing::info!("Loaded {} personas", list.personas.len());
        Ok(list.personas)
    }

    async fn analyze(
        &self,
        endpoint: AnalyzeEndpoint,
        request: &AnalyzeRequest,
    ) -> KoiFoxResult<AnalyzeResponse> {
        let url = self.url(endpoint.path());
        tracing::debug!("POST {}", url);

        let response = self.client.post(&url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            tracing::warn!("Analysis request failed with {}", status);
            return Err(KoiFoxError::status(status.as_u16(), body));
        }

        let analysis: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| KoiFoxError::decode(format!("failed to parse analysis: {}", e)))?;

        tracing::info!(
            "Analysis returned {} reply options",
            analysis.fox.reply_options.len()
        );
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(matches!(
            HttpBackend::new("not a url"),
            Err(KoiFoxError::Config { .. })
        ));
    }

    #[test]
    fn test_trailing_slash_is_dropped() {
        let backend = HttpBackend::new("http://127.0.0.1:8000/").unwrap();
        assert_eq!(backend.base_url(), "http://127.0.0.1:8000");
        assert_eq!(backend.url("/v2/analyze"), "http://127.0.0.1:8000/v2/analyze");
    }
}
