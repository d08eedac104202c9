//! Headless template editor: form fields laid out over a document preview,
//! with drag/resize, inline editing, dual rendering and remote persistence.

pub mod config;
pub mod core;
pub mod dom;
pub mod errors;
pub mod geometry;
pub mod inline_edit;
pub mod interaction;
pub mod model;
pub mod persistence;
pub mod render;
pub mod search;

pub use crate::core::{Action, Editor, EditorSession, RecordingPrompt, SessionOptions, UserPrompt};
pub use errors::EditorError;
