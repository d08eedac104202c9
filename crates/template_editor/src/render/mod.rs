//! Projects a session into the header, document and form trees.
//!
//! Rendering is a pure function of the session; callers re-run it after every
//! mutation and swap the trees wholesale.

mod document;
mod form;

use crate::core::session::EditorSession;
use crate::dom::Node;
use crate::inline_edit::{EditTarget, InlineEditor};

pub use document::render_document;
pub use form::render_form;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderedViews {
    pub header: Node,
    pub document: Node,
    pub form: Node,
}

impl RenderedViews {
    pub fn to_html(&self) -> String {
        [&self.header, &self.document, &self.form]
            .iter()
            .map(|node| node.to_html())
            .collect()
    }
}

pub fn render(session: &EditorSession) -> RenderedViews {
    RenderedViews {
        header: render_header(session),
        document: render_document(session),
        form: render_form(session),
    }
}

/// Input swapped in for a display span while it is being edited.
fn edit_input(editor: &InlineEditor) -> Node {
    Node::new("input")
        .attr("type", "text")
        .class("form-control form-control-sm")
        .attr("value", editor.value())
}

fn render_header(session: &EditorSession) -> Node {
    let name = match session.active_edit(EditTarget::FormName) {
        Some(editor) => vec![edit_input(editor).style("width", "200px")],
        None => vec![
            Node::new("span")
                .with_id("formNameBtn")
                .style("cursor", "pointer")
                .text(session.form_name.as_str()),
            Node::new("i")
                .class("bi bi-pencil ms-2")
                .style("cursor", "pointer"),
        ],
    };

    Node::new("div")
        .class("template-header")
        .child(Node::new("div").with_id("formNameContainer").children(name))
        .child(
            Node::new("textarea")
                .with_id("descriptionField")
                .class("form-control")
                .attr("placeholder", "Description")
                .text(session.description.as_str()),
        )
}
