//! Canvas item definitions.

use crate::error::{EditError, EditResult};
use kurbo::{Affine, Point, Rect, Size, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Unique identifier for canvas items.
pub type ItemId = Uuid;

/// Item color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ItemColor {
    pub const BLUE: Self = Self::new(0, 122, 255, 255);
    pub const GREEN: Self = Self::new(52, 199, 89, 255);
    pub const YELLOW: Self = Self::new(255, 204, 0, 255);
    pub const ORANGE: Self = Self::new(255, 149, 0, 255);
    pub const RED: Self = Self::new(255, 59, 48, 255);
    pub const PURPLE: Self = Self::new(175, 82, 222, 255);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const GRAY: Self = Self::new(142, 142, 147, 255);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const CYAN: Self = Self::new(50, 173, 230, 255);
    /// Foreground label color (used for text).
    pub const PRIMARY: Self = Self::new(28, 28, 30, 255);

    /// Colors offered by the color picker, in display order.
    pub const PALETTE: [Self; 9] = [
        Self::BLUE,
        Self::GREEN,
        Self::YELLOW,
        Self::ORANGE,
        Self::RED,
        Self::PURPLE,
        Self::BLACK,
        Self::GRAY,
        Self::WHITE,
    ];

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Return this color with its alpha scaled by `opacity` (clamped to 0..=1).
    pub fn with_opacity(self, opacity: f64) -> Self {
        let alpha = (self.a as f64 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a: alpha, ..self }
    }
}

impl From<Color> for ItemColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<ItemColor> for Color {
    fn from(color: ItemColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Encoded image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    WebP,
}

impl ImageFormat {
    /// Get MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
        }
    }

    /// Detect format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 4 {
            return None;
        }

        // PNG: 89 50 4E 47
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(ImageFormat::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::WebP);
        }

        None
    }
}

/// Encoded image bytes, shared between history snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    bytes: Arc<[u8]>,
}

impl ImageData {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle to the bytes (cheap to clone).
    pub fn shared(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    pub fn format(&self) -> Option<ImageFormat> {
        ImageFormat::from_magic_bytes(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// What an item draws.
///
/// The variant is fixed when the item is created. Text items may have their
/// content replaced; nothing else about the kind ever changes.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Rectangle,
    Circle,
    Ellipse,
    Line,
    Text(String),
    Image(ImageData),
}

impl ItemKind {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Rectangle => "rectangle",
            ItemKind::Circle => "circle",
            ItemKind::Ellipse => "ellipse",
            ItemKind::Line => "line",
            ItemKind::Text(_) => "text",
            ItemKind::Image(_) => "image",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ItemKind::Text(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ItemKind::Text(content) => Some(content),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageData> {
        match self {
            ItemKind::Image(data) => Some(data),
            _ => None,
        }
    }
}

/// Visual style of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStyle {
    /// Fill color. For text this is the font color.
    pub color: Option<ItemColor>,
    pub border_width: Option<f64>,
    pub border_color: Option<ItemColor>,
    /// Rotation angle in radians (around the center).
    #[serde(default)]
    pub rotation: f64,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

fn default_opacity() -> f64 {
    1.0
}

impl Default for ItemStyle {
    fn default() -> Self {
        Self {
            color: None,
            border_width: None,
            border_color: None,
            rotation: 0.0,
            opacity: 1.0,
        }
    }
}

impl ItemStyle {
    /// Style with only a fill color set.
    pub fn filled(color: ItemColor) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    /// Set the opacity, clamped to 0..=1.
    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }
}

/// One drawable object on a board.
///
/// Equality is structural over every field. UI-only state such as selection
/// lives in the editor, so it never makes two snapshots differ.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasItem {
    pub(crate) id: ItemId,
    kind: ItemKind,
    /// Center of the item.
    pub position: Point,
    pub size: Size,
    pub style: ItemStyle,
}

impl CanvasItem {
    /// Create a new item with a fresh id and default style.
    pub fn new(kind: ItemKind, position: Point, size: Size) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            position,
            size,
            style: ItemStyle::default(),
        }
    }

    pub fn with_style(mut self, style: ItemStyle) -> Self {
        self.style = style;
        self
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// Text content, if this is a text item.
    pub fn text(&self) -> Option<&str> {
        self.kind.as_text()
    }

    /// Replace the content of a text item.
    pub fn set_text(&mut self, text: impl Into<String>) -> EditResult<()> {
        match &mut self.kind {
            ItemKind::Text(content) => {
                *content = text.into();
                Ok(())
            }
            _ => Err(EditError::NotText(self.id)),
        }
    }

    /// Unrotated frame in canvas coordinates.
    pub fn frame(&self) -> Rect {
        Rect::from_center_size(self.position, self.size)
    }

    pub fn top_left(&self) -> Point {
        Point::new(
            self.position.x - self.size.width / 2.0,
            self.position.y - self.size.height / 2.0,
        )
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Rotation of the item about its center.
    pub fn transform(&self) -> Affine {
        Affine::rotate_about(self.style.rotation, self.position)
    }

    /// Check if a point (in canvas coordinates) hits this item.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let local = if self.style.rotation == 0.0 {
            point
        } else {
            self.transform().inverse() * point
        };
        self.frame().inflate(tolerance, tolerance).contains(local)
    }
}
