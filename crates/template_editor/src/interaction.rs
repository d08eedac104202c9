//! Pointer state machine: drag-move, eight-way resize and click detection.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::geometry::{self, Point, Rect, ResizeDirection, Viewport};
use crate::inline_edit::EditTarget;
use crate::model::{ElementId, ElementStore};

/// What the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PointerTarget {
    /// Element in the document view.
    Body(ElementId),
    /// Element card in the form view.
    FormCard(ElementId),
    /// Remove button in either view.
    Delete(ElementId),
    ResizeHandle {
        id: ElementId,
        direction: ResizeDirection,
    },
    EditButton(EditTarget),
    #[default]
    Background,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// Pointer event in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub target: PointerTarget,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f64, y: f64, target: PointerTarget) -> Self {
        Self { kind, x, y, target }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Counts the global pointer listeners currently installed by gestures.
#[derive(Debug, Clone, Default)]
pub struct CaptureRegistry {
    active: Arc<AtomicUsize>,
}

impl CaptureRegistry {
    pub fn acquire(&self) -> InputCapture {
        self.active.fetch_add(1, Ordering::SeqCst);
        InputCapture {
            active: Arc::clone(&self.active),
        }
    }

    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

/// Held for the lifetime of one gesture; dropping it unregisters the listeners.
#[derive(Debug)]
pub struct InputCapture {
    active: Arc<AtomicUsize>,
}

impl Drop for InputCapture {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Debug)]
enum Gesture {
    Idle,
    Dragging {
        id: ElementId,
        offset: Point,
        _capture: InputCapture,
    },
    Resizing {
        id: ElementId,
        direction: ResizeDirection,
        start_pointer: Point,
        start_rect: Rect,
        _capture: InputCapture,
    },
}

#[derive(Debug, Clone, Copy)]
struct Press {
    target: PointerTarget,
    at: Point,
    moved: bool,
}

/// What a pointer event did, for the caller to act on.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerOutcome {
    pub select: Option<ElementId>,
    pub geometry_changed: bool,
    pub gesture_ended: bool,
    pub click: Option<PointerTarget>,
}

#[derive(Debug)]
pub struct InteractionController {
    gesture: Gesture,
    press: Option<Press>,
    registry: CaptureRegistry,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(CaptureRegistry::default())
    }
}

impl InteractionController {
    pub fn new(registry: CaptureRegistry) -> Self {
        Self {
            gesture: Gesture::Idle,
            press: None,
            registry,
        }
    }

    pub fn registry(&self) -> &CaptureRegistry {
        &self.registry
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.gesture, Gesture::Idle)
    }

    pub fn dragging_id(&self) -> Option<ElementId> {
        match self.gesture {
            Gesture::Dragging { id, .. } => Some(id),
            _ => None,
        }
    }

    pub fn resizing(&self) -> Option<(ElementId, ResizeDirection)> {
        match self.gesture {
            Gesture::Resizing { id, direction, .. } => Some((id, direction)),
            _ => None,
        }
    }

    /// Abort any gesture, releasing its capture.
    pub fn cancel(&mut self) {
        self.gesture = Gesture::Idle;
        self.press = None;
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        store: &mut ElementStore,
        viewport: &Viewport,
    ) -> PointerOutcome {
        match event.kind {
            PointerKind::Down => self.pointer_down(event, store, viewport),
            PointerKind::Move => self.pointer_move(event, store, viewport),
            PointerKind::Up => self.pointer_up(event),
        }
    }

    fn pointer_down(
        &mut self,
        event: PointerEvent,
        store: &ElementStore,
        viewport: &Viewport,
    ) -> PointerOutcome {
        // A lost pointer-up must not leak the previous capture.
        self.gesture = Gesture::Idle;
        self.press = Some(Press {
            target: event.target,
            at: event.point(),
            moved: false,
        });

        let mut outcome = PointerOutcome::default();
        match event.target {
            PointerTarget::Body(id) => {
                let Some(element) = store.find(id) else {
                    return outcome;
                };
                let offset = viewport
                    .to_local(event.point())
                    .offset_from(element.rect().origin());
                tracing::debug!(%id, ?offset, "drag started");
                self.gesture = Gesture::Dragging {
                    id,
                    offset,
                    _capture: self.registry.acquire(),
                };
                outcome.select = Some(id);
            }
            PointerTarget::ResizeHandle { id, direction } => {
                let Some(element) = store.find(id) else {
                    return outcome;
                };
                tracing::debug!(%id, %direction, "resize started");
                self.gesture = Gesture::Resizing {
                    id,
                    direction,
                    start_pointer: event.point(),
                    start_rect: element.rect(),
                    _capture: self.registry.acquire(),
                };
            }
            _ => {}
        }
        outcome
    }

    fn pointer_move(
        &mut self,
        event: PointerEvent,
        store: &mut ElementStore,
        viewport: &Viewport,
    ) -> PointerOutcome {
        if let Some(press) = self.press.as_mut() {
            if press.at != event.point() {
                press.moved = true;
            }
        }

        let mut outcome = PointerOutcome::default();
        let (id, rect) = match &self.gesture {
            Gesture::Idle => return outcome,
            Gesture::Dragging { id, offset, .. } => {
                let Some(element) = store.find(*id) else {
                    return outcome;
                };
                let target = viewport.to_local(event.point()).offset_from(*offset);
                let moved = Rect {
                    x: target.x,
                    y: target.y,
                    ..element.rect()
                };
                (*id, geometry::clamp_position(moved, viewport.size))
            }
            Gesture::Resizing {
                id,
                direction,
                start_pointer,
                start_rect,
                ..
            } => {
                let delta = event.point().offset_from(*start_pointer);
                (
                    *id,
                    geometry::resize(*start_rect, *direction, delta, viewport.size),
                )
            }
        };

        if let Some(element) = store.find_mut(id) {
            if element.rect() != rect {
                element.set_rect(rect);
                outcome.geometry_changed = true;
            }
        }
        outcome
    }

    fn pointer_up(&mut self, event: PointerEvent) -> PointerOutcome {
        let gesture_ended = !self.is_idle();
        if gesture_ended {
            tracing::debug!("gesture finished");
        }
        self.gesture = Gesture::Idle;

        let click = self
            .press
            .take()
            .filter(|press| !press.moved && press.target == event.target)
            .map(|press| press.target);

        PointerOutcome {
            gesture_ended,
            click,
            ..PointerOutcome::default()
        }
    }
}
