//! Renderer trait abstraction.

use drawpad_core::board::Board;
use drawpad_core::editor::Editor;
use drawpad_core::view::{RenderItem, TextEditOverlay};
use kurbo::{Size, Vec2};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Image decode failed: {0}")]
    ImageDecode(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// Items in paint order, with drag offsets and selection applied.
    pub items: Vec<RenderItem<'a>>,
    /// Text field drawn in place of the item under edit.
    pub text_overlay: Option<TextEditOverlay>,
    /// Viewport size in canvas units.
    pub viewport_size: Size,
    /// Background color.
    pub background_color: Color,
    /// Selection highlight and handle color.
    pub selection_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a render context for the editor's current state.
    pub fn new(editor: &'a Editor<'_>, viewport_size: Size) -> Self {
        Self {
            items: editor.render_items(),
            text_overlay: editor.text_edit_overlay(),
            ..Self::empty(viewport_size)
        }
    }

    /// Create a render context for a board with nothing selected
    /// (e.g. gallery thumbnails).
    pub fn for_board(board: &'a Board, viewport_size: Size) -> Self {
        let items = board
            .items()
            .iter()
            .map(|item| RenderItem {
                item,
                offset: Vec2::ZERO,
                selected: false,
                handles: None,
            })
            .collect();
        Self {
            items,
            ..Self::empty(viewport_size)
        }
    }

    fn empty(viewport_size: Size) -> Self {
        Self {
            items: Vec::new(),
            text_overlay: None,
            viewport_size,
            background_color: Color::from_rgba8(242, 242, 247, 255),
            selection_color: Color::from_rgba8(0, 122, 255, 255), // Accent blue
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the selection color.
    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }
}

/// Trait for rendering backends.
///
/// Implementations must draw all item kinds and apply fill color, border,
/// rotation about the item center, opacity and the selection highlight.
pub trait Renderer: Send + Sync {
    /// Build the scene/command buffer for a frame.
    ///
    /// This method is called once per frame and should prepare all drawing commands.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
