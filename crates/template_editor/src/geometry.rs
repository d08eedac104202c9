//! Canvas coordinates, clamping and the eight-way resize transform.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::model::element::{MIN_HEIGHT, MIN_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset_from(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether the rect satisfies every layout invariant inside `container`.
    pub fn fits(&self, container: Size) -> bool {
        let fits_axis = |pos: f64, len: f64, limit: f64, floor: f64| {
            pos >= 0.0 && len >= floor && (pos + len <= limit || (pos == 0.0 && len == floor))
        };
        fits_axis(self.x, self.width, container.width, MIN_WIDTH)
            && fits_axis(self.y, self.height, container.height, MIN_HEIGHT)
    }
}

/// Where the element container sits in client coordinates, and how big it is.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub origin: Point,
    pub size: Size,
}

impl Viewport {
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Client coordinates to container coordinates.
    pub fn to_local(&self, client: Point) -> Point {
        client.offset_from(self.origin)
    }
}

/// Lower bound wins when the range is inverted.
fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Keep `rect`'s size and clamp its position into the container.
pub fn clamp_position(rect: Rect, container: Size) -> Rect {
    Rect {
        x: clamp(rect.x, 0.0, container.width - rect.width),
        y: clamp(rect.y, 0.0, container.height - rect.height),
        ..rect
    }
}

/// Enforce size floors first, then containment.
pub fn constrain(rect: Rect, container: Size) -> Rect {
    let width = clamp(rect.width, MIN_WIDTH, container.width.max(MIN_WIDTH));
    let height = clamp(rect.height, MIN_HEIGHT, container.height.max(MIN_HEIGHT));
    clamp_position(Rect { width, height, ..rect }, container)
}

/// Resize handle position, named after the edges it moves.
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
pub enum ResizeDirection {
    Nw,
    Ne,
    Sw,
    Se,
    N,
    S,
    E,
    W,
}

impl ResizeDirection {
    /// Handle order in the document view.
    pub const HANDLE_ORDER: [ResizeDirection; 8] = [
        ResizeDirection::Nw,
        ResizeDirection::Ne,
        ResizeDirection::Sw,
        ResizeDirection::Se,
        ResizeDirection::N,
        ResizeDirection::S,
        ResizeDirection::E,
        ResizeDirection::W,
    ];

    pub fn moves_north(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    pub fn moves_south(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    pub fn moves_east(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    pub fn moves_west(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }
}

/// Apply a pointer delta to `start` through the handle `direction`.
///
/// The edge opposite to each moving edge stays put; moving edges stop at the
/// container border and at the minimum size.
pub fn resize(start: Rect, direction: ResizeDirection, delta: Point, container: Size) -> Rect {
    let mut left = start.x;
    let mut top = start.y;
    let mut right = start.right();
    let mut bottom = start.bottom();

    if direction.moves_west() {
        left = clamp(start.x + delta.x, 0.0, right - MIN_WIDTH);
    }
    if direction.moves_east() {
        right = clamp(right + delta.x, left + MIN_WIDTH, container.width);
    }
    if direction.moves_north() {
        top = clamp(start.y + delta.y, 0.0, bottom - MIN_HEIGHT);
    }
    if direction.moves_south() {
        bottom = clamp(bottom + delta.y, top + MIN_HEIGHT, container.height);
    }

    constrain(Rect::from_edges(left, top, right, bottom), container)
}
