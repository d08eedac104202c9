use std::time::Duration;

use serde::{Deserialize, Serialize};
use settings::Settings;

use crate::core::SessionOptions;
use crate::geometry::{Point, Size, Viewport};
use crate::persistence::TemplateId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub base_url: String,
    pub request_timeout_secs: u64,
    /// Sent as `X-CSRFToken`; usually scraped from the editor page.
    pub csrf_token: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            request_timeout_secs: 10,
            csrf_token: None,
        }
    }
}

/// Size of the document preview the elements live in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub server: ServerSettings,
    pub canvas: CanvasSettings,
    pub picture_placeholder_url: String,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            canvas: CanvasSettings::default(),
            picture_placeholder_url: "/static/images/picture-placeholder.png".to_string(),
        }
    }
}

impl Settings for EditorSettings {
    const SECTION: &'static str = "editor";
}

impl EditorSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs.max(1))
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            Point::default(),
            Size::new(self.canvas.width, self.canvas.height),
        )
    }

    pub fn session_options(&self, template_id: Option<TemplateId>) -> SessionOptions {
        SessionOptions {
            viewport: self.viewport(),
            picture_placeholder_url: self.picture_placeholder_url.clone(),
            template_id,
        }
    }
}
