use std::path::PathBuf;

use serde::Deserialize;
use strum::Display;

use crate::geometry::Viewport;
use crate::inline_edit::{EditKey, EditTarget};
use crate::interaction::PointerEvent;
use crate::model::{ElementId, FieldType};
use crate::persistence::{TemplateConfig, TemplateId};

/// Everything that can happen to an editor session.
///
/// Host input arrives as JSON (`{"action": "addElement", "type": "text"}`);
/// the `#[serde(skip)]` variants only come back from the executor.
#[derive(Debug, Clone, PartialEq, Display, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Action {
    AddElement {
        #[serde(rename = "type")]
        field_type: FieldType,
    },
    RemoveElement {
        id: ElementId,
    },
    Select {
        id: ElementId,
    },
    Pointer(PointerEvent),
    /// The host container moved or changed size.
    SetViewport(Viewport),

    BeginEdit {
        edit: EditTarget,
    },
    EditKey {
        key: EditKey,
    },
    /// Shorthand for one `EditKey::Char` per character.
    TypeText {
        text: String,
    },
    Blur,
    SetDescription {
        text: String,
    },

    SetPictureUrl {
        id: ElementId,
        url: String,
    },
    UploadPicture {
        id: ElementId,
        path: PathBuf,
    },
    AddOption {
        id: ElementId,
    },
    SetOption {
        id: ElementId,
        index: usize,
        value: String,
    },
    RemoveOption {
        id: ElementId,
        index: usize,
    },

    Save,
    Load,
    Reset,

    #[serde(skip)]
    PictureLoaded { id: ElementId, data_url: String },
    #[serde(skip)]
    SaveFinished(Result<Option<TemplateId>, String>),
    #[serde(skip)]
    LoadFinished(Result<TemplateConfig, String>),
}

impl Action {
    /// Actions that move focus away from an open inline edit, committing it.
    pub fn blurs_inline_edit(&self) -> bool {
        match self {
            Action::EditKey { .. }
            | Action::TypeText { .. }
            | Action::Blur
            | Action::SetViewport(_)
            | Action::PictureLoaded { .. }
            | Action::SaveFinished(_)
            | Action::LoadFinished(_) => false,
            Action::Pointer(event) => event.kind == crate::interaction::PointerKind::Down,
            _ => true,
        }
    }
}
