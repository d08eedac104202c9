/// Blocking user dialogs: an alert box and a yes/no confirmation.
pub trait UserPrompt: Send {
    fn alert(&mut self, message: &str);
    fn confirm(&mut self, message: &str) -> bool;
}

/// Records every dialog and answers confirmations with a fixed reply.
#[derive(Debug, Clone, Default)]
pub struct RecordingPrompt {
    pub alerts: Vec<String>,
    pub confirmations: Vec<String>,
    pub accept: bool,
}

impl RecordingPrompt {
    pub fn accepting() -> Self {
        Self {
            accept: true,
            ..Self::default()
        }
    }

    pub fn declining() -> Self {
        Self::default()
    }

    pub fn last_alert(&self) -> Option<&str> {
        self.alerts.last().map(String::as_str)
    }
}

impl UserPrompt for RecordingPrompt {
    fn alert(&mut self, message: &str) {
        tracing::info!(message, "alert");
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirmations.push(message.to_string());
        self.accept
    }
}
