use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;

use super::{PersistenceError, SaveResponse, TemplateBackend, TemplateConfig, TemplateId};

const CSRF_HEADER: &str = "X-CSRFToken";

/// Editor endpoints under `{base_url}/editor/`.
#[derive(Debug, Clone)]
pub struct HttpTemplateBackend {
    client: Client,
    base_url: String,
    csrf_token: Option<String>,
}

impl HttpTemplateBackend {
    pub fn new(
        base_url: &str,
        csrf_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, PersistenceError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            csrf_token: csrf_token.filter(|t| !t.is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn save_url(&self, id: Option<&TemplateId>) -> String {
        match id {
            Some(id) => format!("{}/editor/save-template/{id}/", self.base_url),
            None => format!("{}/editor/save-template/", self.base_url),
        }
    }

    pub fn load_url(&self, id: &TemplateId) -> String {
        format!("{}/editor/load-template/{id}/", self.base_url)
    }

    fn csrf_token(&self) -> &str {
        match &self.csrf_token {
            Some(token) => token,
            None => {
                tracing::error!("CSRF token not found");
                ""
            }
        }
    }
}

impl TemplateBackend for HttpTemplateBackend {
    async fn save(
        &self,
        id: Option<&TemplateId>,
        config: &TemplateConfig,
    ) -> Result<SaveResponse, PersistenceError> {
        let url = self.save_url(id);
        let response = self
            .client
            .post(&url)
            .header(CSRF_HEADER, self.csrf_token())
            .json(config)
            .send()
            .await?;

        // Failures come back as 400 with an error body; prefer that message.
        let status = response.status();
        let body = response.bytes().await?;
        match serde_json::from_slice::<SaveResponse>(&body) {
            Ok(reply) => Ok(reply),
            Err(_) if !status.is_success() => {
                tracing::warn!(%url, status = status.as_u16(), "save rejected without a body");
                Err(PersistenceError::SaveStatus(status.as_u16()))
            }
            Err(err) => Err(PersistenceError::Decode(err)),
        }
    }

    async fn load(&self, id: &TemplateId) -> Result<TemplateConfig, PersistenceError> {
        let url = self.load_url(id);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "load failed");
            return Err(PersistenceError::LoadStatus(status.as_u16()));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
