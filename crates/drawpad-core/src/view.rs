//! Read-only view state handed to the presentation layer.

use crate::item::{CanvasItem, ItemId};
use crate::selection::Handle;
use kurbo::{Rect, Vec2};

/// Padding inside the text edit overlay.
pub const TEXT_EDIT_PADDING: f64 = 8.0;

/// One item as it should be drawn this frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderItem<'a> {
    pub item: &'a CanvasItem,
    /// Visual offset of an in-progress drag. Not yet applied to the item.
    pub offset: Vec2,
    pub selected: bool,
    /// Resize handles, present only for the selected item.
    pub handles: Option<[Handle; 4]>,
}

/// The text field shown in place of a text item while it is edited.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEditOverlay {
    pub item: ItemId,
    /// Frame of the item being edited.
    pub frame: Rect,
    pub rotation: f64,
    /// Current, uncommitted buffer.
    pub text: String,
}

impl TextEditOverlay {
    /// Area available for text inside the overlay.
    pub fn content_rect(&self) -> Rect {
        self.frame.inset(-TEXT_EDIT_PADDING)
    }
}

/// Which toolbar actions are enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolbarState {
    pub can_undo: bool,
    pub can_redo: bool,
    pub can_delete: bool,
    /// Color inspector toggle.
    pub can_recolor: bool,
    /// Whether the color palette is currently shown.
    pub color_picker_visible: bool,
}
