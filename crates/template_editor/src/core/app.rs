use std::collections::VecDeque;

use super::action::Action;
use super::executor::Executor;
use super::prompt::UserPrompt;
use super::reducer::reduce;
use super::session::EditorSession;
use crate::persistence::{PersistenceGateway, TemplateBackend};

/// Owns one session and drives actions through reducer and executor.
///
/// `dispatch` takes `&mut self` and awaits every effect, so a save or load
/// can never overlap with another one.
pub struct Editor<B, P> {
    session: EditorSession,
    executor: Executor<B, P>,
}

impl<B: TemplateBackend, P: UserPrompt> Editor<B, P> {
    pub fn new(session: EditorSession, gateway: PersistenceGateway<B>, prompt: P) -> Self {
        Self {
            session,
            executor: Executor::new(gateway, prompt),
        }
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn prompt(&self) -> &P {
        self.executor.prompt()
    }

    pub fn prompt_mut(&mut self) -> &mut P {
        self.executor.prompt_mut()
    }

    pub fn gateway(&self) -> &PersistenceGateway<B> {
        self.executor.gateway()
    }

    /// Load the bound template, or start empty.
    pub async fn start(&mut self) {
        self.dispatch(Action::Load).await;
    }

    pub async fn dispatch(&mut self, action: Action) {
        let mut queue = VecDeque::from([action]);
        while let Some(action) = queue.pop_front() {
            tracing::trace!(%action, "dispatch");
            for effect in reduce(&mut self.session, action) {
                if let Some(follow_up) = self.executor.run(effect).await {
                    queue.push_back(follow_up);
                }
            }
        }
    }

    pub async fn dispatch_all(&mut self, actions: impl IntoIterator<Item = Action>) {
        for action in actions {
            self.dispatch(action).await;
        }
    }
}
