//! Applies one `Action` to the session and returns the effects it needs.
//!
//! The reducer never performs I/O. Every mutation re-renders both views
//! before returning.

use super::action::Action;
use super::effects::Effect;
use super::session::EditorSession;
use crate::inline_edit::{EditKey, EditOutcome, EditSignal, EditTarget, InlineEditor};
use crate::interaction::PointerTarget;
use crate::model::{ElementId, FieldType, TextField};

pub const SAVE_OK: &str = "Template saved successfully!";
pub const RESET_PROMPT: &str = "Are you sure you want to reset all changes?";

pub fn reduce(session: &mut EditorSession, action: Action) -> Vec<Effect> {
    let mut effects = Vec::new();
    let mut changed = false;

    if action.blurs_inline_edit() {
        changed |= commit_edit(session);
    }

    changed |= match action {
        Action::AddElement { field_type } => {
            session.store.add(field_type);
            true
        }
        Action::RemoveElement { id } => remove_element(session, id),
        Action::Select { id } => session.select(id),
        Action::Pointer(event) => {
            let viewport = session.viewport;
            let outcome = session
                .controller
                .handle(event, &mut session.store, &viewport);
            let mut touched = outcome.geometry_changed || outcome.gesture_ended;
            if let Some(id) = outcome.select {
                touched |= session.select(id);
            }
            if let Some(target) = outcome.click {
                touched |= click(session, target, &mut effects);
            }
            touched
        }
        Action::SetViewport(viewport) => {
            session.viewport = viewport;
            if session.constrain_elements() {
                tracing::debug!(size = ?viewport.size, "elements clamped to new viewport");
            }
            true
        }

        Action::BeginEdit { edit } => begin_edit(session, edit, &mut effects),
        Action::EditKey { key } => match session.inline_editor.as_mut() {
            Some(editor) => {
                match editor.handle_key(key) {
                    EditSignal::Continue => {}
                    EditSignal::Commit => {
                        commit_edit(session);
                    }
                    EditSignal::Cancel => cancel_edit(session),
                }
                true
            }
            None => false,
        },
        Action::TypeText { text } => match session.inline_editor.as_mut() {
            Some(editor) => {
                for c in text.chars() {
                    editor.handle_key(EditKey::Char(c));
                }
                true
            }
            None => false,
        },
        Action::Blur => commit_edit(session),
        Action::SetDescription { text } => {
            let text = text.trim();
            if session.description == text {
                false
            } else {
                session.description = text.to_string();
                true
            }
        }

        Action::SetPictureUrl { id, url } => set_picture(session, id, url),
        Action::PictureLoaded { id, data_url } => set_picture(session, id, data_url),
        Action::UploadPicture { id, path } => {
            match session.store.find(id) {
                Some(el) if el.field_type == FieldType::Picture => {
                    effects.push(Effect::ReadPicture { id, path });
                }
                _ => effects.push(Effect::log(format!("upload ignored for element {id}"))),
            }
            false
        }
        Action::AddOption { id } => session
            .store
            .find_mut(id)
            .is_some_and(|el| el.push_option()),
        Action::SetOption { id, index, value } => session
            .store
            .find_mut(id)
            .is_some_and(|el| el.set_option(index, value)),
        Action::RemoveOption { id, index } => session
            .store
            .find_mut(id)
            .is_some_and(|el| el.remove_option(index)),

        Action::Save => {
            effects.push(Effect::Save {
                id: session.template_id.clone(),
                config: session.to_config(),
            });
            false
        }
        Action::SaveFinished(Ok(assigned)) => {
            let bind = assigned.filter(|_| session.template_id.is_none());
            if let Some(id) = bind {
                tracing::info!(template = %id, "template bound");
                session.bind_template(id);
            }
            effects.push(Effect::alert(SAVE_OK));
            false
        }
        Action::SaveFinished(Err(message)) => {
            effects.push(Effect::alert(format!("Error saving template: {message}")));
            false
        }
        Action::Load => match session.template_id.clone() {
            Some(id) => {
                effects.push(Effect::Load(id));
                false
            }
            None => {
                session.clear();
                true
            }
        },
        Action::LoadFinished(Ok(config)) => {
            session.apply_config(config);
            true
        }
        Action::LoadFinished(Err(message)) => {
            effects.push(Effect::alert(format!("Error loading template: {message}")));
            false
        }
        Action::Reset => {
            effects.push(Effect::Confirm {
                message: RESET_PROMPT.to_string(),
                then: Box::new(Action::Load),
            });
            false
        }
    };

    if changed {
        session.rerender();
    }
    effects
}

fn remove_element(session: &mut EditorSession, id: ElementId) -> bool {
    if session.store.remove(id).is_none() {
        return false;
    }
    if session.selected == Some(id) {
        session.selected = None;
    }
    let editing_removed = matches!(
        session.inline_editor.as_ref().map(InlineEditor::target),
        Some(EditTarget::Element { id: edit_id, .. }) if edit_id == id
    );
    if editing_removed {
        session.inline_editor = None;
    }
    let gesture_on_removed = session.controller.dragging_id() == Some(id)
        || session.controller.resizing().is_some_and(|(rid, _)| rid == id);
    if gesture_on_removed {
        session.controller.cancel();
    }
    true
}

fn click(session: &mut EditorSession, target: PointerTarget, effects: &mut Vec<Effect>) -> bool {
    match target {
        PointerTarget::Body(id) | PointerTarget::FormCard(id) => session.select(id),
        PointerTarget::Delete(id) => remove_element(session, id),
        PointerTarget::EditButton(edit) => begin_edit(session, edit, effects),
        PointerTarget::ResizeHandle { .. } | PointerTarget::Background => false,
    }
}

fn begin_edit(session: &mut EditorSession, target: EditTarget, effects: &mut Vec<Effect>) -> bool {
    commit_edit(session);
    let current = match target {
        EditTarget::FormName => session.form_name.clone(),
        EditTarget::Element { id, field } => match session.store.find(id) {
            Some(el) if field == TextField::Name || el.field_type.has_placeholder_editor() => {
                let value = el.text_field(field).to_string();
                session.select(id);
                value
            }
            _ => {
                effects.push(Effect::log(format!("no editable {field} on element {id}")));
                return false;
            }
        },
    };
    tracing::debug!(?target, "inline edit started");
    session.inline_editor = Some(InlineEditor::begin(target, &current));
    true
}

/// Blur semantics. Returns whether an edit was open.
fn commit_edit(session: &mut EditorSession) -> bool {
    let Some(editor) = session.inline_editor.take() else {
        return false;
    };
    match editor.finish() {
        EditOutcome::Commit {
            target: EditTarget::FormName,
            value,
        } => session.form_name = value,
        EditOutcome::Commit {
            target: EditTarget::Element { id, field },
            value,
        } => {
            if let Some(el) = session.store.find_mut(id) {
                el.set_text_field(field, value);
            }
        }
        EditOutcome::Revert { .. } => {}
    }
    true
}

fn cancel_edit(session: &mut EditorSession) {
    if let Some(editor) = session.inline_editor.take() {
        editor.cancel();
    }
}

fn set_picture(session: &mut EditorSession, id: ElementId, url: String) -> bool {
    match session.store.find_mut(id) {
        Some(el) if el.field_type == FieldType::Picture => {
            el.picture_url = url;
            true
        }
        _ => false,
    }
}
