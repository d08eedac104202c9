//! Side effects the reducer asks for. The executor performs them and may
//! answer with a follow-up `Action`.

use std::fmt;
use std::path::PathBuf;

use super::action::Action;
use crate::model::ElementId;
use crate::persistence::{TemplateConfig, TemplateId};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Save {
        id: Option<TemplateId>,
        config: TemplateConfig,
    },
    Load(TemplateId),
    Alert(String),
    /// Ask the user; dispatch `then` only if they accept.
    Confirm {
        message: String,
        then: Box<Action>,
    },
    ReadPicture {
        id: ElementId,
        path: PathBuf,
    },
    Log(String),
}

impl Effect {
    pub fn alert<T: Into<String>>(message: T) -> Self {
        Effect::Alert(message.into())
    }

    pub fn log<T: Into<String>>(message: T) -> Self {
        Effect::Log(message.into())
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Save { id: Some(id), .. } => write!(f, "Save({id})"),
            Effect::Save { id: None, .. } => write!(f, "Save(new)"),
            Effect::Load(id) => write!(f, "Load({id})"),
            Effect::Alert(_) => write!(f, "Alert"),
            Effect::Confirm { then, .. } => write!(f, "Confirm(then {then})"),
            Effect::ReadPicture { id, .. } => write!(f, "ReadPicture({id})"),
            Effect::Log(_) => write!(f, "Log"),
        }
    }
}
