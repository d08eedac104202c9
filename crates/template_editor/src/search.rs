//! Case-insensitive filter over the diary entry list.

use serde::{Deserialize, Serialize};

use crate::dom::Node;

pub const ITEM_CLASS: &str = "game";
pub const HIGHLIGHT_CLASS: &str = "highlight";

const MATCH: &str = "text-warning";
const NO_MATCH: &str = "text-white";
const VISIBLE: &str = "d-flex";
const HIDDEN: &str = "d-none";

/// One row of the diary list as the host page lays it out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub title: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

impl DiaryEntry {
    /// The title is itself a highlight, followed by the extra ones.
    pub fn to_node(&self, index: usize) -> Node {
        let highlight = |text: &str| {
            Node::new("span")
                .class(HIGHLIGHT_CLASS)
                .class(NO_MATCH)
                .text(text)
        };
        Node::new("li")
            .with_id(format!("entry-{index}"))
            .class(ITEM_CLASS)
            .class(VISIBLE)
            .child(highlight(&self.title))
            .children(self.highlights.iter().map(|h| highlight(h)))
    }
}

pub fn entry_list(entries: &[DiaryEntry]) -> Node {
    Node::new("ul")
        .with_id("gameList")
        .class("list-unstyled")
        .children(entries.iter().enumerate().map(|(i, e)| e.to_node(i)))
}

#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    query: String,
}

impl SearchFilter {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_lowercase(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.query)
    }

    /// Restyle highlights and show or hide every item under `root`.
    /// Returns how many items stay visible.
    pub fn apply(&self, root: &mut Node) -> usize {
        let mut visible = 0;
        root.for_each_with_class_mut(ITEM_CLASS, &mut |item| {
            if self.apply_item(item) {
                visible += 1;
            }
        });
        tracing::debug!(query = %self.query, visible, "search filter applied");
        visible
    }

    fn apply_item(&self, item: &mut Node) -> bool {
        let empty = self.query.is_empty();
        let mut any_match = false;
        item.for_each_with_class_mut(HIGHLIGHT_CLASS, &mut |highlight| {
            if !empty && self.matches(&highlight.text_content()) {
                any_match = true;
                highlight.remove_class(NO_MATCH);
                highlight.add_class(MATCH);
            } else {
                highlight.remove_class(MATCH);
                highlight.add_class(NO_MATCH);
            }
        });

        let show = empty || any_match;
        if show {
            item.remove_class(HIDDEN);
            item.add_class(VISIBLE);
        } else {
            item.remove_class(VISIBLE);
            item.add_class(HIDDEN);
        }
        show
    }
}
