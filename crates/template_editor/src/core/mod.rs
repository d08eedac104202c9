//! Action → reducer → effect pipeline.
//!
//!   - `action`   : host input and executor results
//!   - `reducer`  : applies an action to the session, returns effects
//!   - `effects`  : declarative side effects
//!   - `executor` : performs effects, answers with follow-up actions
//!   - `session`  : the editor state
//!   - `app`      : `Editor`, which ties them together
pub mod action;
pub mod app;
pub mod effects;
pub mod executor;
pub mod prompt;
pub mod reducer;
pub mod session;

pub use action::Action;
pub use app::Editor;
pub use effects::Effect;
pub use prompt::{RecordingPrompt, UserPrompt};
pub use session::{EditorSession, SessionOptions};
