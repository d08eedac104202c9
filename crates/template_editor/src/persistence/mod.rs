//! Template wire format and the save/load gateway.
//!
//! `TemplateBackend` is the transport seam: `HttpTemplateBackend` talks to the
//! editor endpoints, `DraftTemplateBackend` keeps templates as JSON files for
//! offline work. `PersistenceGateway` turns backend replies into plain results.

mod drafts;
mod http;

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::model::{ElementCounts, FieldElement};

pub use drafts::DraftTemplateBackend;
pub use http::HttpTemplateBackend;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to save template (HTTP {0})")]
    SaveStatus(u16),

    #[error("Failed to load template (HTTP {0})")]
    LoadStatus(u16),

    /// Message reported by the server with `status: "error"`.
    #[error("{0}")]
    Server(String),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid template id `{0}`")]
    InvalidTemplateId(String),

    #[error("template {0} not found")]
    NotFound(TemplateId),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Server-assigned template identifier, safe to splice into a URL path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TemplateId(String);

impl TemplateId {
    pub fn parse(raw: &str) -> Result<Self, PersistenceError> {
        let valid = !raw.is_empty()
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(PersistenceError::InvalidTemplateId(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path the browser location shows for a bound template.
    pub fn editor_location(&self) -> String {
        format!("/editor/{}/", self.0)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for TemplateId {
    type Err = PersistenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for TemplateId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        let raw = match Raw::deserialize(deserializer)? {
            Raw::Number(n) => n.to_string(),
            Raw::Text(s) => s,
        };
        TemplateId::parse(&raw).map_err(serde::de::Error::custom)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The unit that is saved and loaded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub elements: Vec<FieldElement>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub element_counts: ElementCounts,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SaveResponse {
    Success {
        #[serde(default, rename = "templateId", alias = "template_id")]
        template_id: Option<TemplateId>,
    },
    Error {
        #[serde(default)]
        message: String,
    },
}

/// Transport for templates.
pub trait TemplateBackend: Send + Sync {
    fn save(
        &self,
        id: Option<&TemplateId>,
        config: &TemplateConfig,
    ) -> impl Future<Output = Result<SaveResponse, PersistenceError>> + Send;

    fn load(
        &self,
        id: &TemplateId,
    ) -> impl Future<Output = Result<TemplateConfig, PersistenceError>> + Send;
}

#[derive(Debug, Clone)]
pub struct PersistenceGateway<B> {
    backend: B,
}

impl<B: TemplateBackend> PersistenceGateway<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Create (no id) or update a template. Returns the id the server reported.
    pub async fn save(
        &self,
        id: Option<&TemplateId>,
        config: &TemplateConfig,
    ) -> Result<Option<TemplateId>, PersistenceError> {
        tracing::info!(
            template = id.map(TemplateId::as_str).unwrap_or("<new>"),
            elements = config.elements.len(),
            "saving template"
        );
        match self.backend.save(id, config).await? {
            SaveResponse::Success { template_id } => Ok(template_id),
            SaveResponse::Error { message } => Err(PersistenceError::Server(message)),
        }
    }

    pub async fn load(&self, id: &TemplateId) -> Result<TemplateConfig, PersistenceError> {
        tracing::info!(template = %id, "loading template");
        let config = self.backend.load(id).await?;
        tracing::debug!(template = %id, elements = config.elements.len(), "template loaded");
        Ok(config)
    }
}
