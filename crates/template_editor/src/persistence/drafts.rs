use std::path::{Path, PathBuf};

use tokio::fs;

use super::{PersistenceError, SaveResponse, TemplateBackend, TemplateConfig, TemplateId};

/// Templates as `<dir>/<id>.json`, with numeric ids handed out like the server does.
#[derive(Debug, Clone)]
pub struct DraftTemplateBackend {
    dir: PathBuf,
}

impl DraftTemplateBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, id: &TemplateId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    async fn next_id(&self) -> Result<TemplateId, PersistenceError> {
        let mut highest = 0u64;
        let mut entries = fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(n) = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .and_then(|s| s.parse::<u64>().ok())
                {
                    highest = highest.max(n);
                }
            }
        }
        let next = highest
            .checked_add(1)
            .ok_or_else(|| PersistenceError::InvalidTemplateId(format!("{highest}+1")))?;
        TemplateId::parse(&next.to_string())
    }

    async fn write(&self, id: &TemplateId, config: &TemplateConfig) -> Result<(), PersistenceError> {
        let path = self.file_for(id);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(config)?).await?;
        fs::rename(&tmp, &path).await?;
        tracing::debug!(file = %path.display(), "draft written");
        Ok(())
    }
}

impl TemplateBackend for DraftTemplateBackend {
    async fn save(
        &self,
        id: Option<&TemplateId>,
        config: &TemplateConfig,
    ) -> Result<SaveResponse, PersistenceError> {
        fs::create_dir_all(&self.dir).await?;
        let id = match id {
            Some(id) => {
                if !fs::try_exists(self.file_for(id)).await? {
                    return Ok(SaveResponse::Error {
                        message: format!("template {id} does not exist"),
                    });
                }
                id.clone()
            }
            None => self.next_id().await?,
        };
        self.write(&id, config).await?;
        Ok(SaveResponse::Success {
            template_id: Some(id),
        })
    }

    async fn load(&self, id: &TemplateId) -> Result<TemplateConfig, PersistenceError> {
        let path = self.file_for(id);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(PersistenceError::NotFound(id.clone()));
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ElementId, FieldElement, FieldType};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_then_update_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let backend = DraftTemplateBackend::new(dir.path());

        let mut config = TemplateConfig {
            name: "Review".into(),
            ..TemplateConfig::default()
        };
        let SaveResponse::Success { template_id: Some(id) } =
            backend.save(None, &config).await.unwrap()
        else {
            panic!("expected an id");
        };
        assert_eq!(id.as_str(), "1");

        config
            .elements
            .push(FieldElement::new(ElementId(5), FieldType::Number, "Score".into()));
        backend.save(Some(&id), &config).await.unwrap();

        let loaded = backend.load(&id).await.unwrap();
        assert_eq!(loaded, config);

        let second = backend.save(None, &config).await.unwrap();
        assert_eq!(
            second,
            SaveResponse::Success { template_id: Some(TemplateId::parse("2").unwrap()) }
        );
    }

    #[tokio::test]
    async fn unknown_ids_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let backend = DraftTemplateBackend::new(dir.path());
        let id = TemplateId::parse("77").unwrap();

        assert!(matches!(backend.load(&id).await, Err(PersistenceError::NotFound(_))));
        assert!(matches!(
            backend.save(Some(&id), &TemplateConfig::default()).await,
            Ok(SaveResponse::Error { .. })
        ));
    }

    #[tokio::test]
    async fn exhausted_id_range_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(format!("{}.json", u64::MAX)), "{}").unwrap();
        let backend = DraftTemplateBackend::new(dir.path());

        let result = backend.save(None, &TemplateConfig::default()).await;
        assert!(matches!(result, Err(PersistenceError::InvalidTemplateId(_))), "{result:?}");
    }
}
