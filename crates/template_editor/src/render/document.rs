use crate::core::session::EditorSession;
use crate::dom::Node;
use crate::geometry::ResizeDirection;
use crate::model::{FieldElement, FieldType};

fn px(value: f64) -> String {
    format!("{value}px")
}

/// `div#pdfPreview` holding one absolutely positioned node per element.
pub fn render_document(session: &EditorSession) -> Node {
    let size = session.viewport.size;
    Node::new("div")
        .with_id("pdfPreview")
        .class("pdf-preview position-relative")
        .style("width", px(size.width))
        .style("height", px(size.height))
        .children(session.store.iter().map(|el| document_element(session, el)))
}

fn document_element(session: &EditorSession, element: &FieldElement) -> Node {
    let dragging = session.controller.dragging_id() == Some(element.id);
    Node::new("div")
        .with_id(format!("element-{}", element.id))
        .class("element draggable")
        .class_if(session.is_selected(element.id), "selected")
        .class_if(dragging, "dragging")
        .style("left", px(element.x))
        .style("top", px(element.y))
        .style("width", px(element.width))
        .style("min-height", px(element.height))
        .child(Node::new("button").class("btn btn-danger remove-btn").text("X"))
        .child(Node::new("div").class("pdf-field-name").text(element.name.as_str()))
        .child(preview(session, element))
        .children(
            ResizeDirection::HANDLE_ORDER
                .iter()
                .map(|dir| Node::new("div").class("resize-handle").class(dir.as_ref())),
        )
}

fn disabled_input(tag: &str, element: &FieldElement) -> Node {
    Node::new(tag)
        .class("form-control mt-1")
        .attr("placeholder", element.placeholder.as_str())
        .flag("disabled")
}

fn preview(session: &EditorSession, element: &FieldElement) -> Node {
    match element.field_type {
        FieldType::Text => disabled_input("input", element).attr("type", "text"),
        FieldType::Number => disabled_input("input", element).attr("type", "number"),
        FieldType::Textarea => disabled_input("textarea", element),
        FieldType::Select => Node::new("div")
            .class("form-control mt-1")
            .style("color", "#6c757d")
            .text("Selected option"),
        FieldType::Picture => Node::new("div")
            .class("picture-preview")
            .style("display", "flex")
            .style("align-items", "center")
            .style("justify-content", "center")
            .style("overflow", "hidden")
            .child(
                Node::new("img")
                    .attr("src", session.picture_placeholder_url.as_str())
                    .style("width", "100%")
                    .style("height", "100%")
                    .style("object-fit", "cover"),
            ),
    }
}
