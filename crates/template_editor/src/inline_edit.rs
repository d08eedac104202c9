//! Inline text editing: a display span swapped for a single-line input.
//!
//! The buffer starts as the current value, fully selected, so the first typed
//! character replaces it. Enter or blur commits, Escape reverts.

use serde::{Deserialize, Serialize};
use tui_input::{Input, InputRequest};

use crate::model::{ElementId, TextField};

pub const UNTITLED_TEMPLATE: &str = "Untitled template";

/// What an inline edit writes back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "target")]
pub enum EditTarget {
    Element { id: ElementId, field: TextField },
    FormName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditKey {
    Char(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Enter,
    Escape,
}

/// Whether the edit is still open after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditSignal {
    Continue,
    Commit,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Trimmed, non-empty value to write back.
    Commit { target: EditTarget, value: String },
    /// Leave the stored value untouched.
    Revert { target: EditTarget },
}

#[derive(Debug, Clone)]
pub struct InlineEditor {
    target: EditTarget,
    original: String,
    input: Input,
    all_selected: bool,
}

impl InlineEditor {
    pub fn begin(target: EditTarget, current: &str) -> Self {
        Self {
            target,
            original: current.to_string(),
            input: Input::new(current.to_string()),
            all_selected: !current.is_empty(),
        }
    }

    pub fn target(&self) -> EditTarget {
        self.target
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn cursor(&self) -> usize {
        self.input.cursor()
    }

    pub fn is_all_selected(&self) -> bool {
        self.all_selected
    }

    pub fn handle_key(&mut self, key: EditKey) -> EditSignal {
        let request = match key {
            EditKey::Enter => return EditSignal::Commit,
            EditKey::Escape => return EditSignal::Cancel,
            EditKey::Char(c) => {
                self.clear_selection_contents();
                InputRequest::InsertChar(c)
            }
            EditKey::Backspace | EditKey::Delete if self.all_selected => {
                self.clear_selection_contents();
                return EditSignal::Continue;
            }
            EditKey::Backspace => InputRequest::DeletePrevChar,
            EditKey::Delete => InputRequest::DeleteNextChar,
            // Collapsing a full selection puts the caret on that side.
            EditKey::Left | EditKey::Home => {
                let collapse = self.all_selected;
                self.all_selected = false;
                if key == EditKey::Home || collapse {
                    InputRequest::GoToStart
                } else {
                    InputRequest::GoToPrevChar
                }
            }
            EditKey::Right | EditKey::End => {
                let collapse = self.all_selected;
                self.all_selected = false;
                if key == EditKey::End || collapse {
                    InputRequest::GoToEnd
                } else {
                    InputRequest::GoToNextChar
                }
            }
        };
        self.input.handle(request);
        EditSignal::Continue
    }

    fn clear_selection_contents(&mut self) {
        if self.all_selected {
            self.input = Input::default();
            self.all_selected = false;
        }
    }

    /// Commit semantics shared by Enter and blur.
    pub fn finish(self) -> EditOutcome {
        let trimmed = self.input.value().trim();
        match (trimmed.is_empty(), self.target) {
            (false, target) => EditOutcome::Commit {
                target,
                value: trimmed.to_string(),
            },
            (true, EditTarget::FormName) => EditOutcome::Commit {
                target: EditTarget::FormName,
                value: UNTITLED_TEMPLATE.to_string(),
            },
            (true, target) => EditOutcome::Revert { target },
        }
    }

    pub fn cancel(self) -> EditOutcome {
        EditOutcome::Revert {
            target: self.target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn name_of(id: i64) -> EditTarget {
        EditTarget::Element {
            id: ElementId(id),
            field: TextField::Name,
        }
    }

    fn type_str(editor: &mut InlineEditor, text: &str) {
        for c in text.chars() {
            editor.handle_key(EditKey::Char(c));
        }
    }

    #[test]
    fn first_keystroke_replaces_selection() {
        let mut editor = InlineEditor::begin(name_of(1), "TextField1");
        type_str(&mut editor, "Title");
        assert_eq!(editor.value(), "Title");
    }

    #[test]
    fn enter_commits_trimmed_value() {
        let mut editor = InlineEditor::begin(name_of(1), "TextField1");
        type_str(&mut editor, "  Title  ");
        assert_eq!(editor.handle_key(EditKey::Enter), EditSignal::Commit);
        assert_eq!(
            editor.finish(),
            EditOutcome::Commit {
                target: name_of(1),
                value: "Title".into()
            }
        );
    }

    #[test]
    fn empty_commit_reverts_element_field() {
        let mut editor = InlineEditor::begin(name_of(2), "Keep");
        editor.handle_key(EditKey::Backspace);
        assert_eq!(editor.value(), "");
        assert_eq!(editor.finish(), EditOutcome::Revert { target: name_of(2) });
    }

    #[test]
    fn empty_form_name_falls_back() {
        let mut editor = InlineEditor::begin(EditTarget::FormName, "Old");
        type_str(&mut editor, "   ");
        assert_eq!(
            editor.finish(),
            EditOutcome::Commit {
                target: EditTarget::FormName,
                value: UNTITLED_TEMPLATE.into()
            }
        );
    }

    #[test]
    fn escape_signals_cancel() {
        let mut editor = InlineEditor::begin(name_of(3), "Name");
        type_str(&mut editor, "X");
        assert_eq!(editor.handle_key(EditKey::Escape), EditSignal::Cancel);
        assert_eq!(editor.cancel(), EditOutcome::Revert { target: name_of(3) });
    }

    #[test]
    fn cursor_keys_edit_in_place() {
        let mut editor = InlineEditor::begin(name_of(4), "abc");
        editor.handle_key(EditKey::End);
        assert!(!editor.is_all_selected());
        editor.handle_key(EditKey::Left);
        editor.handle_key(EditKey::Backspace);
        assert_eq!(editor.value(), "ac");
        editor.handle_key(EditKey::Home);
        editor.handle_key(EditKey::Delete);
        assert_eq!(editor.value(), "c");
        editor.handle_key(EditKey::Char('x'));
        assert_eq!(editor.value(), "xc");
    }

    #[test]
    fn left_on_fresh_selection_goes_to_start() {
        let mut editor = InlineEditor::begin(name_of(5), "abc");
        editor.handle_key(EditKey::Left);
        editor.handle_key(EditKey::Char('>'));
        assert_eq!(editor.value(), ">abc");
    }
}
