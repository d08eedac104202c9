//! Performs reducer effects: network calls, file reads and user dialogs.
//!
//! Each effect runs to completion before the next one starts. Results come
//! back as follow-up actions; errors are turned into messages here and never
//! retried.

use std::path::Path;

use super::action::Action;
use super::effects::Effect;
use super::prompt::UserPrompt;
use crate::model::{picture_data_url, ElementId};
use crate::persistence::{PersistenceGateway, TemplateBackend};

pub struct Executor<B, P> {
    gateway: PersistenceGateway<B>,
    prompt: P,
}

impl<B: TemplateBackend, P: UserPrompt> Executor<B, P> {
    pub fn new(gateway: PersistenceGateway<B>, prompt: P) -> Self {
        Self { gateway, prompt }
    }

    pub fn gateway(&self) -> &PersistenceGateway<B> {
        &self.gateway
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn prompt_mut(&mut self) -> &mut P {
        &mut self.prompt
    }

    pub async fn run(&mut self, effect: Effect) -> Option<Action> {
        tracing::debug!(%effect, "running effect");
        match effect {
            Effect::Save { id, config } => {
                let result = self.gateway.save(id.as_ref(), &config).await;
                if let Err(err) = &result {
                    tracing::warn!(error = %err, "save failed");
                }
                Some(Action::SaveFinished(result.map_err(|e| e.to_string())))
            }
            Effect::Load(id) => {
                let result = self.gateway.load(&id).await;
                if let Err(err) = &result {
                    tracing::warn!(template = %id, error = %err, "load failed");
                }
                Some(Action::LoadFinished(result.map_err(|e| e.to_string())))
            }
            Effect::Alert(message) => {
                self.prompt.alert(&message);
                None
            }
            Effect::Confirm { message, then } => {
                if self.prompt.confirm(&message) {
                    Some(*then)
                } else {
                    tracing::debug!("confirmation declined");
                    None
                }
            }
            Effect::ReadPicture { id, path } => self.read_picture(id, &path).await,
            Effect::Log(message) => {
                tracing::info!("{message}");
                None
            }
        }
    }

    async fn read_picture(&mut self, id: ElementId, path: &Path) -> Option<Action> {
        match tokio::fs::read(path).await {
            Ok(bytes) => {
                let file_name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or_default();
                Some(Action::PictureLoaded {
                    id,
                    data_url: picture_data_url(file_name, &bytes),
                })
            }
            Err(err) => {
                tracing::warn!(file = %path.display(), error = %err, "picture not readable");
                self.prompt
                    .alert(&format!("Error reading picture: {err}"));
                None
            }
        }
    }
}
