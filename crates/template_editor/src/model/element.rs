//! Field descriptors and their per-type defaults.

use std::fmt;

use base64::Engine;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::geometry::Rect;

pub const DEFAULT_POSITION: f64 = 20.0;
pub const DEFAULT_WIDTH: f64 = 200.0;
pub const DEFAULT_HEIGHT: f64 = 40.0;
pub const PICTURE_HEIGHT: f64 = 150.0;
pub const MIN_WIDTH: f64 = 50.0;
pub const MIN_HEIGHT: f64 = 30.0;

/// Kind of form field. Wire and CSS names are lowercase.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Select,
    Picture,
}

impl FieldType {
    /// Human label, also the prefix of generated names.
    pub fn type_name(self) -> &'static str {
        match self {
            FieldType::Text => "TextField",
            FieldType::Textarea => "TextArea",
            FieldType::Number => "NumberField",
            FieldType::Select => "Dropdown",
            FieldType::Picture => "Picture",
        }
    }

    pub fn default_height(self) -> f64 {
        match self {
            FieldType::Picture => PICTURE_HEIGHT,
            _ => DEFAULT_HEIGHT,
        }
    }

    pub fn default_placeholder(self) -> String {
        match self {
            FieldType::Select => String::new(),
            FieldType::Picture => "No picture uploaded".to_string(),
            other => format!("Enter {other} here"),
        }
    }

    pub fn default_options(self) -> Vec<String> {
        match self {
            FieldType::Select => vec!["Option 1".to_string(), "Option 2".to_string()],
            _ => Vec::new(),
        }
    }

    /// Whether the form view shows an editable placeholder line.
    pub fn has_placeholder_editor(self) -> bool {
        !matches!(self, FieldType::Select | FieldType::Picture)
    }
}

/// Creation-time millisecond timestamp; unique within one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub i64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One form field instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldElement {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub name: String,
    #[serde(default)]
    pub placeholder: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub picture_url: String,
}

impl FieldElement {
    /// A fresh element with the type defaults and the given name.
    pub fn new(id: ElementId, field_type: FieldType, name: String) -> Self {
        Self {
            id,
            field_type,
            name,
            placeholder: field_type.default_placeholder(),
            x: DEFAULT_POSITION,
            y: DEFAULT_POSITION,
            width: DEFAULT_WIDTH,
            height: field_type.default_height(),
            options: field_type.default_options(),
            picture_url: String::new(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
    }

    pub fn text_field(&self, field: TextField) -> &str {
        match field {
            TextField::Name => &self.name,
            TextField::Placeholder => &self.placeholder,
        }
    }

    pub fn set_text_field(&mut self, field: TextField, value: String) {
        match field {
            TextField::Name => self.name = value,
            TextField::Placeholder => self.placeholder = value,
        }
    }

    /// Appends `"Option <n+1>"`. Only dropdowns carry options.
    pub fn push_option(&mut self) -> bool {
        if self.field_type != FieldType::Select {
            return false;
        }
        let label = format!("Option {}", self.options.len() + 1);
        self.options.push(label);
        true
    }

    pub fn set_option(&mut self, index: usize, value: String) -> bool {
        match self.options.get_mut(index) {
            Some(slot) if self.field_type == FieldType::Select => {
                *slot = value;
                true
            }
            _ => false,
        }
    }

    pub fn remove_option(&mut self, index: usize) -> bool {
        if self.field_type != FieldType::Select || index >= self.options.len() {
            return false;
        }
        self.options.remove(index);
        true
    }
}

/// Text properties editable inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TextField {
    Name,
    Placeholder,
}

/// Per-type counters seeding default names.
///
/// Drifts from the live element count once names are edited; only
/// `ElementStore::replace` recomputes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementCounts {
    pub text: u32,
    pub textarea: u32,
    pub number: u32,
    pub select: u32,
    pub picture: u32,
}

impl ElementCounts {
    pub fn from_elements<'a>(elements: impl IntoIterator<Item = &'a FieldElement>) -> Self {
        let mut counts = Self::default();
        for element in elements {
            counts.increment(element.field_type);
        }
        counts
    }

    pub fn get(&self, field_type: FieldType) -> u32 {
        match field_type {
            FieldType::Text => self.text,
            FieldType::Textarea => self.textarea,
            FieldType::Number => self.number,
            FieldType::Select => self.select,
            FieldType::Picture => self.picture,
        }
    }

    fn slot_mut(&mut self, field_type: FieldType) -> &mut u32 {
        match field_type {
            FieldType::Text => &mut self.text,
            FieldType::Textarea => &mut self.textarea,
            FieldType::Number => &mut self.number,
            FieldType::Select => &mut self.select,
            FieldType::Picture => &mut self.picture,
        }
    }

    /// Returns the new count.
    pub fn increment(&mut self, field_type: FieldType) -> u32 {
        let slot = self.slot_mut(field_type);
        *slot += 1;
        *slot
    }

    pub fn decrement(&mut self, field_type: FieldType) {
        let slot = self.slot_mut(field_type);
        *slot = slot.saturating_sub(1);
    }
}

/// Encode picture bytes as a `data:` URL, the way a browser file reader would.
pub fn picture_data_url(file_name: &str, bytes: &[u8]) -> String {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    let mime = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    };
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{encoded}")
}
