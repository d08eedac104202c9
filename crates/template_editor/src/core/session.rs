//! Everything the editor knows at one moment: elements, selection, header
//! fields, the bound template and the in-flight gesture or inline edit.

use crate::geometry::{self, Viewport};
use crate::inline_edit::{EditTarget, InlineEditor, UNTITLED_TEMPLATE};
use crate::interaction::{CaptureRegistry, InteractionController};
use crate::model::{ElementId, ElementStore};
use crate::persistence::{TemplateConfig, TemplateId};
use crate::render::{self, RenderedViews};

pub const NEW_TEMPLATE_LOCATION: &str = "/editor/new-template/";

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub viewport: Viewport,
    pub picture_placeholder_url: String,
    pub template_id: Option<TemplateId>,
}

#[derive(Debug)]
pub struct EditorSession {
    pub store: ElementStore,
    pub selected: Option<ElementId>,
    pub form_name: String,
    pub description: String,
    pub template_id: Option<TemplateId>,
    /// Path the host shows in its address bar.
    pub location: String,
    pub viewport: Viewport,
    pub picture_placeholder_url: String,
    pub controller: InteractionController,
    pub inline_editor: Option<InlineEditor>,
    views: RenderedViews,
}

impl EditorSession {
    pub fn new(options: SessionOptions) -> Self {
        let location = options
            .template_id
            .as_ref()
            .map(TemplateId::editor_location)
            .unwrap_or_else(|| NEW_TEMPLATE_LOCATION.to_string());

        let mut session = Self {
            store: ElementStore::new(),
            selected: None,
            form_name: UNTITLED_TEMPLATE.to_string(),
            description: String::new(),
            template_id: options.template_id,
            location,
            viewport: options.viewport,
            picture_placeholder_url: options.picture_placeholder_url,
            controller: InteractionController::new(CaptureRegistry::default()),
            inline_editor: None,
            views: RenderedViews::default(),
        };
        session.rerender();
        session
    }

    pub fn views(&self) -> &RenderedViews {
        &self.views
    }

    pub fn rerender(&mut self) {
        self.views = render::render(self);
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected == Some(id)
    }

    /// Select `id` and drop any other selection. Unknown ids are ignored.
    pub fn select(&mut self, id: ElementId) -> bool {
        if !self.store.contains(id) {
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn active_edit(&self, target: EditTarget) -> Option<&InlineEditor> {
        self.inline_editor
            .as_ref()
            .filter(|editor| editor.target() == target)
    }

    pub fn to_config(&self) -> TemplateConfig {
        TemplateConfig {
            name: self.form_name.clone(),
            description: self.description.clone(),
            elements: self.store.elements().to_vec(),
            element_counts: self.store.counts(),
        }
    }

    /// Replace everything with a loaded template.
    pub fn apply_config(&mut self, config: TemplateConfig) {
        self.reset_transient();
        self.store.replace(config.elements);
        self.constrain_elements();
        self.form_name = config.name;
        self.description = config.description;
    }

    /// Pull every element back inside the viewport and above the size floor.
    /// Returns whether any element moved or changed size.
    pub fn constrain_elements(&mut self) -> bool {
        let container = self.viewport.size;
        let mut changed = false;
        for element in self.store.iter_mut() {
            let rect = geometry::constrain(element.rect(), container);
            if rect != element.rect() {
                element.set_rect(rect);
                changed = true;
            }
        }
        changed
    }

    /// Back to an empty, untitled template.
    pub fn clear(&mut self) {
        self.reset_transient();
        self.store.clear();
        self.form_name = UNTITLED_TEMPLATE.to_string();
        self.description.clear();
    }

    pub fn bind_template(&mut self, id: TemplateId) {
        self.location = id.editor_location();
        self.template_id = Some(id);
    }

    fn reset_transient(&mut self) {
        self.selected = None;
        self.inline_editor = None;
        self.controller.cancel();
    }
}
