//! Transient interaction state of the editor.

use crate::item::ItemId;
use crate::selection::{Corner, ResizeOrigin};
use kurbo::Vec2;

/// The gesture currently in progress.
///
/// At most one gesture is live at a time, so an item can never be dragged
/// and resized at once, and text editing ends before either starts.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    /// Nothing in progress.
    #[default]
    Idle,
    /// An item is being moved. `offset` is only applied to the item on release.
    Dragging { item: ItemId, offset: Vec2 },
    /// An item is being resized from one of its corner handles.
    Resizing {
        item: ItemId,
        corner: Corner,
        origin: ResizeOrigin,
    },
    /// A text item's content is being edited.
    EditingText { item: ItemId, text: String },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    /// The item this gesture acts on, if any.
    pub fn item(&self) -> Option<ItemId> {
        match self {
            Gesture::Idle => None,
            Gesture::Dragging { item, .. }
            | Gesture::Resizing { item, .. }
            | Gesture::EditingText { item, .. } => Some(*item),
        }
    }

    pub fn dragged_item(&self) -> Option<ItemId> {
        match self {
            Gesture::Dragging { item, .. } => Some(*item),
            _ => None,
        }
    }

    /// Visual offset to apply to `id` while it is dragged.
    pub fn drag_offset(&self, id: ItemId) -> Vec2 {
        match self {
            Gesture::Dragging { item, offset } if *item == id => *offset,
            _ => Vec2::ZERO,
        }
    }

    pub fn resizing_item(&self) -> Option<ItemId> {
        match self {
            Gesture::Resizing { item, .. } => Some(*item),
            _ => None,
        }
    }

    pub fn editing_item(&self) -> Option<ItemId> {
        match self {
            Gesture::EditingText { item, .. } => Some(*item),
            _ => None,
        }
    }

    pub fn editing_text(&self) -> Option<&str> {
        match self {
            Gesture::EditingText { text, .. } => Some(text),
            _ => None,
        }
    }
}
