//! Backend-neutral renderer that records a flat list of draw commands.
//!
//! Any 2D backend (vello, tiny-skia, a canvas element) can replay the list:
//! every command carries a `kurbo` path in canvas coordinates plus the
//! transform to draw it with.

use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use drawpad_core::item::{CanvasItem, ImageData, ItemColor, ItemId, ItemKind};
use drawpad_core::selection::{HANDLE_SIZE, Handle};
use drawpad_core::view::{RenderItem, TEXT_EDIT_PADDING, TextEditOverlay};
use image::ImageReader;
use kurbo::{Affine, BezPath, Circle, Ellipse, Point, Rect, RoundedRect, Shape};
use peniko::Color;
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

/// Corner radius items are clipped to.
pub const CORNER_RADIUS: f64 = 10.0;
/// How far the selection outline sits outside the item.
pub const SELECTION_OUTSET: f64 = 5.0;
/// Selection outline width.
pub const SELECTION_WIDTH: f64 = 2.0;
/// Body text size.
pub const FONT_SIZE: f64 = 17.0;
/// Line width used when a line item has no border width.
pub const DEFAULT_LINE_WIDTH: f64 = 2.0;

const PATH_TOLERANCE: f64 = 0.1;

/// One drawing operation.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// Clear the whole viewport.
    Clear(Color),
    /// Start a layer clipped to `clip` and composited with `alpha`.
    PushLayer {
        clip: BezPath,
        transform: Affine,
        alpha: f32,
    },
    /// End the most recent layer.
    PopLayer,
    Fill {
        path: BezPath,
        transform: Affine,
        color: Color,
    },
    Stroke {
        path: BezPath,
        transform: Affine,
        color: Color,
        width: f64,
    },
    /// Text laid out centered inside `rect`.
    Text {
        text: String,
        rect: Rect,
        transform: Affine,
        color: Color,
        font_size: f64,
    },
    /// Encoded image. `transform` maps image pixels to canvas coordinates.
    Image {
        item: ItemId,
        data: Arc<[u8]>,
        width: u32,
        height: u32,
        transform: Affine,
    },
    /// Warning marker for an image that could not be decoded.
    Placeholder { rect: Rect, transform: Affine },
}

/// Renderer producing a [`DrawCommand`] list per frame.
#[derive(Debug)]
pub struct DisplayListRenderer {
    commands: Vec<DrawCommand>,
    /// Decoded image dimensions by item, `None` if decoding failed.
    image_cache: HashMap<ItemId, Option<(u32, u32)>>,
    selection_color: Color,
}

impl Default for DisplayListRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayListRenderer {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            image_cache: HashMap::new(),
            selection_color: Color::from_rgba8(0, 122, 255, 255),
        }
    }

    /// Commands of the last built frame.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the commands of the last built frame, leaving the list empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of images whose decode result is cached.
    pub fn cached_images(&self) -> usize {
        self.image_cache.len()
    }

    fn render_item(&mut self, entry: &RenderItem) {
        let item = entry.item;
        let style = &item.style;
        let transform = Affine::translate(entry.offset) * item.transform();
        let frame = item.frame();

        self.commands.push(DrawCommand::PushLayer {
            clip: RoundedRect::from_rect(frame, CORNER_RADIUS).to_path(PATH_TOLERANCE),
            transform,
            alpha: style.opacity.clamp(0.0, 1.0) as f32,
        });

        match item.kind() {
            ItemKind::Rectangle => {
                self.fill_with_border(frame.to_path(PATH_TOLERANCE), item, ItemColor::BLUE, transform);
            }
            ItemKind::Circle => {
                let radius = frame.width().min(frame.height()) / 2.0;
                let circle = Circle::new(frame.center(), radius).to_path(PATH_TOLERANCE);
                self.fill_with_border(circle, item, ItemColor::ORANGE, transform);
            }
            ItemKind::Ellipse => {
                let ellipse = Ellipse::from_rect(frame).to_path(PATH_TOLERANCE);
                self.fill_with_border(ellipse, item, ItemColor::PURPLE, transform);
            }
            ItemKind::Line => {
                let mut path = BezPath::new();
                path.move_to(Point::new(frame.x0, frame.y0));
                path.line_to(Point::new(frame.x1, frame.y0));
                self.commands.push(DrawCommand::Stroke {
                    path,
                    transform,
                    color: style.color.unwrap_or(ItemColor::BLACK).into(),
                    width: style.border_width.unwrap_or(DEFAULT_LINE_WIDTH),
                });
            }
            ItemKind::Text(content) => {
                self.commands.push(DrawCommand::Text {
                    text: content.clone(),
                    rect: frame.inset(-TEXT_EDIT_PADDING),
                    transform,
                    color: style.color.unwrap_or(ItemColor::PRIMARY).into(),
                    font_size: FONT_SIZE,
                });
            }
            ItemKind::Image(data) => self.render_image(item.id(), data, frame, transform),
        }

        self.commands.push(DrawCommand::PopLayer);

        if entry.selected {
            let outline = RoundedRect::from_rect(
                frame.inflate(SELECTION_OUTSET, SELECTION_OUTSET),
                CORNER_RADIUS,
            );
            let color = ItemColor::from(self.selection_color).with_opacity(style.opacity);
            self.commands.push(DrawCommand::Stroke {
                path: outline.to_path(PATH_TOLERANCE),
                transform,
                color: color.into(),
                width: SELECTION_WIDTH,
            });
        }
        if let Some(handles) = entry.handles {
            for handle in handles {
                self.render_handle(&handle);
            }
        }
    }

    fn fill_with_border(&mut self, path: BezPath, item: &CanvasItem, default: ItemColor, transform: Affine) {
        let style = &item.style;
        self.commands.push(DrawCommand::Fill {
            path: path.clone(),
            transform,
            color: style.color.unwrap_or(default).into(),
        });
        if let (Some(width), Some(color)) = (style.border_width, style.border_color) {
            if width > 0.0 {
                self.commands.push(DrawCommand::Stroke {
                    path,
                    transform,
                    color: color.into(),
                    width,
                });
            }
        }
    }

    /// Render an image, scaled to cover the item frame.
    fn render_image(&mut self, id: ItemId, data: &ImageData, frame: Rect, transform: Affine) {
        let dimensions = *self
            .image_cache
            .entry(id)
            .or_insert_with(|| match decode_dimensions(data) {
                Ok(dimensions) => Some(dimensions),
                Err(e) => {
                    log::warn!("Image {id}: {e}");
                    None
                }
            });

        let Some((width, height)) = dimensions else {
            self.render_image_placeholder(frame, transform);
            return;
        };

        let scale = (frame.width() / width as f64).max(frame.height() / height as f64);
        let image_transform = transform
            * Affine::translate(frame.center().to_vec2())
            * Affine::scale(scale)
            * Affine::translate((-(width as f64) / 2.0, -(height as f64) / 2.0));
        self.commands.push(DrawCommand::Image {
            item: id,
            data: data.shared(),
            width,
            height,
            transform: image_transform,
        });
    }

    /// Render a placeholder for images that couldn't be loaded.
    fn render_image_placeholder(&mut self, frame: Rect, transform: Affine) {
        self.commands.push(DrawCommand::Fill {
            path: frame.to_path(PATH_TOLERANCE),
            transform,
            color: Color::from_rgba8(229, 229, 234, 255),
        });
        self.commands.push(DrawCommand::Placeholder {
            rect: frame,
            transform,
        });
    }

    fn render_handle(&mut self, handle: &Handle) {
        let circle = Circle::new(handle.position, HANDLE_SIZE / 2.0);
        self.commands.push(DrawCommand::Fill {
            path: circle.to_path(PATH_TOLERANCE),
            transform: Affine::IDENTITY,
            color: self.selection_color,
        });
    }

    fn render_text_overlay(&mut self, overlay: &TextEditOverlay) {
        let transform = Affine::rotate_about(overlay.rotation, overlay.frame.center());
        let path = overlay.frame.to_path(PATH_TOLERANCE);
        self.commands.push(DrawCommand::Fill {
            path: path.clone(),
            transform,
            color: Color::from_rgba8(255, 255, 255, 230),
        });
        self.commands.push(DrawCommand::Stroke {
            path,
            transform,
            color: self.selection_color,
            width: 1.0,
        });
        self.commands.push(DrawCommand::Text {
            text: overlay.text.clone(),
            rect: overlay.content_rect(),
            transform,
            color: ItemColor::PRIMARY.into(),
            font_size: FONT_SIZE,
        });
    }
}

/// Read just enough of an image header to learn its pixel size.
fn decode_dimensions(data: &ImageData) -> RenderResult<(u32, u32)> {
    let reader = ImageReader::new(Cursor::new(data.bytes()))
        .with_guessed_format()
        .map_err(|e| RendererError::ImageDecode(e.to_string()))?;
    reader
        .into_dimensions()
        .map_err(|e| RendererError::ImageDecode(e.to_string()))
}

impl Renderer for DisplayListRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.commands.clear();
        self.selection_color = ctx.selection_color;
        self.commands.push(DrawCommand::Clear(self.background_color(ctx)));

        for entry in &ctx.items {
            self.render_item(entry);
        }

        if let Some(overlay) = &ctx.text_overlay {
            self.render_text_overlay(overlay);
        }
    }
}
