use chrono::Utc;

use super::element::{ElementCounts, ElementId, FieldElement, FieldType};

/// Ordered element list plus the counters used for default names.
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    elements: Vec<FieldElement>,
    counts: ElementCounts,
    last_id: i64,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> ElementId {
        let now = Utc::now().timestamp_millis();
        let id = match self.last_id.checked_add(1) {
            Some(next) => now.max(next),
            // A loaded id sits at the top of the range: take the first free one.
            None => self.first_free_id(now),
        };
        self.last_id = self.last_id.max(id);
        ElementId(id)
    }

    fn first_free_id(&self, from: i64) -> i64 {
        (from..=i64::MAX)
            .chain(i64::MIN..from)
            .find(|&candidate| !self.contains(ElementId(candidate)))
            .unwrap_or(from)
    }

    /// Append a new element with the type defaults and a `<TypeName><n>` name.
    pub fn add(&mut self, field_type: FieldType) -> &FieldElement {
        let id = self.next_id();
        let n = self.counts.increment(field_type);
        let name = format!("{}{}", field_type.type_name(), n);
        let index = self.elements.len();
        self.elements.push(FieldElement::new(id, field_type, name));
        tracing::debug!(%id, %field_type, "element added");
        &self.elements[index]
    }

    pub fn remove(&mut self, id: ElementId) -> Option<FieldElement> {
        let index = self.elements.iter().position(|el| el.id == id)?;
        let removed = self.elements.remove(index);
        self.counts.decrement(removed.field_type);
        tracing::debug!(%id, "element removed");
        Some(removed)
    }

    pub fn find(&self, id: ElementId) -> Option<&FieldElement> {
        self.elements.iter().find(|el| el.id == id)
    }

    pub fn find_mut(&mut self, id: ElementId) -> Option<&mut FieldElement> {
        self.elements.iter_mut().find(|el| el.id == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.find(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldElement> {
        self.elements.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut FieldElement> {
        self.elements.iter_mut()
    }

    pub fn elements(&self) -> &[FieldElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn counts(&self) -> ElementCounts {
        self.counts
    }

    /// Swap in a loaded element list. Counters are recomputed from it.
    pub fn replace(&mut self, elements: Vec<FieldElement>) {
        self.counts = ElementCounts::from_elements(&elements);
        if let Some(max) = elements.iter().map(|el| el.id.0).max() {
            self.last_id = self.last_id.max(max);
        }
        self.elements = elements;
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.counts = ElementCounts::default();
    }
}
