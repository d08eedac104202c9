use crate::core::session::EditorSession;
use crate::dom::Node;
use crate::inline_edit::EditTarget;
use crate::model::{FieldElement, FieldType, TextField};

use super::edit_input;

/// `div#formElements` with one card per element, in store order.
pub fn render_form(session: &EditorSession) -> Node {
    Node::new("div")
        .with_id("formElements")
        .children(session.store.iter().map(|el| form_card(session, el)))
}

fn form_card(session: &EditorSession, element: &FieldElement) -> Node {
    let body = match element.field_type {
        FieldType::Picture => picture_controls(element),
        FieldType::Select => option_controls(element),
        _ => editable_line(session, element, TextField::Placeholder, "field-placeholder"),
    };

    Node::new("div")
        .with_id(format!("form-{}", element.id))
        .class("mb-3 position-relative form-element-container")
        .class_if(session.is_selected(element.id), "selected")
        .child(
            Node::new("span")
                .class("badge bg-secondary mb-2")
                .text(element.field_type.type_name()),
        )
        .child(Node::new("button").class("btn btn-danger remove-btn").text("X"))
        .child(editable_line(session, element, TextField::Name, "field-name"))
        .child(body)
}

fn editable_line(
    session: &EditorSession,
    element: &FieldElement,
    field: TextField,
    span_class: &str,
) -> Node {
    let target = EditTarget::Element {
        id: element.id,
        field,
    };
    let display = match session.active_edit(target) {
        Some(editor) => edit_input(editor),
        None => Node::new("span")
            .class(span_class)
            .text(element.text_field(field)),
    };
    Node::new("div")
        .class("editable-container")
        .child(display)
        .child(
            Node::new("button")
                .class("edit-btn")
                .attr("data-field", field.to_string())
                .text("✎"),
        )
}

fn picture_controls(element: &FieldElement) -> Node {
    let button = |label: &str| Node::new("button").class("btn btn-outline-secondary").text(label);
    Node::new("div")
        .class("picture-container mt-2")
        .child(
            Node::new("div")
                .class("input-group mb-2")
                .child(
                    Node::new("input")
                        .attr("type", "text")
                        .class("form-control")
                        .attr("placeholder", "Enter picture URL")
                        .attr("value", element.picture_url.as_str()),
                )
                .child(button("Set URL")),
        )
        .child(
            Node::new("div")
                .class("input-group")
                .child(
                    Node::new("input")
                        .attr("type", "file")
                        .class("form-control")
                        .attr("accept", "image/*"),
                )
                .child(button("Upload")),
        )
}

fn option_controls(element: &FieldElement) -> Node {
    let rows = element.options.iter().enumerate().map(|(index, option)| {
        Node::new("div")
            .class("option-row d-flex align-items-center mb-1")
            .attr("data-index", index.to_string())
            .child(
                Node::new("input")
                    .attr("type", "text")
                    .class("form-control form-control-sm me-2")
                    .attr("value", option.as_str()),
            )
            .child(Node::new("button").class("btn btn-sm btn-danger").text("X"))
    });

    Node::new("div")
        .class("options-container mt-2")
        .child(Node::new("div").class("options-list").children(rows))
        .child(
            Node::new("button")
                .class("btn btn-sm btn-outline-primary mt-1")
                .text("+ Add Option"),
        )
}

#[cfg(test)]
mod tests {
    use super::super::tests::session;
    use crate::dom::Node;
    use crate::inline_edit::{EditTarget, InlineEditor};
    use crate::model::{FieldType, TextField};
    use pretty_assertions::assert_eq;

    #[test]
    fn text_card_has_badge_name_and_placeholder() {
        let mut s = session();
        let id = s.store.add(FieldType::Number).id;
        s.rerender();
        let card = s.views().form.find_by_id(&format!("form-{id}")).unwrap();

        assert!(!card.has_class("selected"));
        assert_eq!(card.descendants_with_class("badge")[0].text_content(), "NumberField");
        assert_eq!(card.descendants_with_class("field-name")[0].text_content(), "NumberField1");
        assert_eq!(
            card.descendants_with_class("field-placeholder")[0].text_content(),
            "Enter number here"
        );
    }

    #[test]
    fn select_card_lists_options() {
        let mut s = session();
        s.store.add(FieldType::Select);
        s.rerender();
        let rows = s.views().form.descendants_with_class("option-row");
        let values: Vec<_> = rows
            .iter()
            .filter_map(|row| row.children[0].attr_value("value"))
            .collect();
        assert_eq!(values, ["Option 1", "Option 2"]);
        assert!(s.views().form.to_html().contains("+ Add Option"));
        assert!(s.views().form.descendants_with_class("field-placeholder").is_empty());
    }

    #[test]
    fn picture_card_has_url_and_upload_controls() {
        let mut s = session();
        s.store.add(FieldType::Picture);
        s.rerender();
        let form = &s.views().form;
        let file = form
            .find(&|n: &Node| n.attr_value("type") == Some("file"))
            .unwrap();
        assert_eq!(file.attr_value("accept"), Some("image/*"));
        let html = form.to_html();
        assert!(html.contains("Set URL"));
        assert!(html.contains("Upload"));
    }

    #[test]
    fn active_edit_replaces_span() {
        let mut s = session();
        let id = s.store.add(FieldType::Text).id;
        s.inline_editor = Some(InlineEditor::begin(
            EditTarget::Element { id, field: TextField::Name },
            "TextField1",
        ));
        s.rerender();
        let form = &s.views().form;
        assert!(form.descendants_with_class("field-name").is_empty());
        let input = form
            .find(&|n: &Node| n.has_class("form-control-sm") && n.tag == "input")
            .unwrap();
        assert_eq!(input.attr_value("value"), Some("TextField1"));
    }
}
