//! Resize handles and the corner-anchored resize algorithm.

use crate::item::CanvasItem;
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Handle size in canvas units.
pub const HANDLE_SIZE: f64 = 12.0;

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// -1 for left corners, +1 for right corners.
    pub fn x_sign(self) -> f64 {
        match self {
            Corner::TopLeft | Corner::BottomLeft => -1.0,
            Corner::TopRight | Corner::BottomRight => 1.0,
        }
    }

    /// -1 for top corners, +1 for bottom corners.
    pub fn y_sign(self) -> f64 {
        match self {
            Corner::TopLeft | Corner::TopRight => -1.0,
            Corner::BottomLeft | Corner::BottomRight => 1.0,
        }
    }

    /// The diagonally opposite corner.
    pub fn opposite(self) -> Corner {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomLeft => Corner::TopRight,
            Corner::BottomRight => Corner::TopLeft,
        }
    }

    /// Position of this corner for a frame with the given center and size.
    pub fn locate(self, center: Point, size: Size) -> Point {
        Point::new(
            center.x + self.x_sign() * size.width / 2.0,
            center.y + self.y_sign() * size.height / 2.0,
        )
    }
}

/// A resize handle with its position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in canvas coordinates.
    pub position: Point,
    pub corner: Corner,
}

impl Handle {
    pub fn new(position: Point, corner: Corner) -> Self {
        Self { position, corner }
    }

    /// Check if a point (in canvas coordinates) hits this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// The four corner handles of an item, following its rotation.
pub fn get_handles(item: &CanvasItem) -> [Handle; 4] {
    let transform = item.transform();
    Corner::ALL.map(|corner| Handle::new(transform * corner.locate(item.position, item.size), corner))
}

/// Find which handle (if any) is hit at the given point.
pub fn hit_test_handles(item: &CanvasItem, point: Point, tolerance: f64) -> Option<Corner> {
    get_handles(item)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.corner)
}

/// Item geometry captured when a resize starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeOrigin {
    pub position: Point,
    pub size: Size,
}

impl ResizeOrigin {
    pub fn of(item: &CanvasItem) -> Self {
        Self {
            position: item.position,
            size: item.size,
        }
    }
}

/// Compute the center and size of an item dragged by `corner`.
///
/// `translation` is the cumulative pointer movement since the resize began.
/// Width and height never drop below `min_size`, and the corner opposite the
/// dragged one stays where it was.
pub fn resize_from(
    origin: ResizeOrigin,
    corner: Corner,
    translation: Vec2,
    min_size: f64,
) -> (Point, Size) {
    let dw = translation.x * corner.x_sign();
    let dh = translation.y * corner.y_sign();
    let width = (origin.size.width + dw).max(min_size);
    let height = (origin.size.height + dh).max(min_size);
    let position = Point::new(
        origin.position.x + (width - origin.size.width) / 2.0 * corner.x_sign(),
        origin.position.y + (height - origin.size.height) / 2.0 * corner.y_sign(),
    );
    (position, Size::new(width, height))
}
