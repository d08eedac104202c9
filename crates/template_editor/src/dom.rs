//! Minimal element tree the renderer produces and the search filter mutates.
//!
//! Nodes carry a tag, attributes, an ordered class list, inline styles, an
//! optional text payload and children. `to_html` serializes with escaping so
//! user-entered names and options never break the markup.

use std::collections::BTreeMap;
use std::fmt;

const VOID_TAGS: &[&str] = &["input", "img", "br", "hr", "meta", "link"];

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub classes: Vec<String>,
    pub styles: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Adds every whitespace-separated class in `classes`.
    pub fn class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.add_class(class);
        }
        self
    }

    pub fn class_if(self, condition: bool, classes: &str) -> Self {
        if condition {
            self.class(classes)
        } else {
            self
        }
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Boolean attribute such as `disabled`.
    pub fn flag(self, key: &str) -> Self {
        self.attr(key, "")
    }

    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.push((property.into(), value.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.attr_value("id")
    }

    pub fn attr_value(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn style_value(&self, property: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Depth-first search including `self`.
    pub fn find(&self, predicate: &dyn Fn(&Node) -> bool) -> Option<&Node> {
        if predicate(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(predicate))
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Node> {
        self.find(&|node| node.id() == Some(id))
    }

    /// Every descendant (not `self`) carrying `class`, in document order.
    pub fn descendants_with_class(&self, class: &str) -> Vec<&Node> {
        let mut out = Vec::new();
        for child in &self.children {
            if child.has_class(class) {
                out.push(child);
            }
            out.extend(child.descendants_with_class(class));
        }
        out
    }

    pub fn for_each_with_class_mut(&mut self, class: &str, f: &mut dyn FnMut(&mut Node)) {
        for child in &mut self.children {
            if child.has_class(class) {
                f(child);
            }
            child.for_each_with_class_mut(class, f);
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone().unwrap_or_default();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out, 0);
        out
    }

    fn write_html(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push('<');
        out.push_str(&self.tag);

        if let Some(id) = self.id() {
            push_attr(out, "id", id);
        }
        if !self.classes.is_empty() {
            push_attr(out, "class", &self.classes.join(" "));
        }
        for (key, value) in self.attrs.iter().filter(|(k, _)| k.as_str() != "id") {
            if value.is_empty() {
                out.push(' ');
                out.push_str(key);
            } else {
                push_attr(out, key, value);
            }
        }
        if !self.styles.is_empty() {
            let style = self
                .styles
                .iter()
                .map(|(p, v)| format!("{p}: {v};"))
                .collect::<Vec<_>>()
                .join(" ");
            push_attr(out, "style", &style);
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag.as_str()) {
            out.push('\n');
            return;
        }

        if let Some(text) = &self.text {
            out.push_str(&escape_html(text));
        }
        if self.children.is_empty() {
            out.push_str("</");
            out.push_str(&self.tag);
            out.push_str(">\n");
            return;
        }

        out.push('\n');
        for child in &self.children {
            child.write_html(out, depth + 1);
        }
        out.push_str(&indent);
        out.push_str("</");
        out.push_str(&self.tag);
        out.push_str(">\n");
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

fn push_attr(out: &mut String, key: &str, value: &str) {
    out.push(' ');
    out.push_str(key);
    out.push_str("=\"");
    out.push_str(&escape_html(value));
    out.push('"');
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
