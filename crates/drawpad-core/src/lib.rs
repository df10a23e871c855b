//! DrawPad Core Library
//!
//! Platform-agnostic data model, undo history and interaction logic for
//! DrawPad boards.

pub mod board;
pub mod config;
pub mod editor;
pub mod error;
pub mod gallery;
pub mod gesture;
pub mod history;
pub mod import;
pub mod input;
pub mod item;
pub mod selection;
pub mod view;

pub use board::{Board, BoardEvent, BoardId, BoardSubscription, DEFAULT_BOARD_NAME};
pub use config::{ConfigError, EditorConfig};
pub use editor::{Editor, image_display_size};
pub use error::{EditError, EditResult};
pub use gallery::{BoardSummary, Gallery};
pub use gesture::Gesture;
pub use history::{History, ItemSnapshot};
pub use import::{ImportError, ImportEvent, ImportQueue, ImportTicket, ImportedImage, MediaImporter};
pub use input::{GestureAction, GestureRecognizer, PointerEvent, PointerTarget};
pub use item::{CanvasItem, ImageData, ImageFormat, ItemColor, ItemId, ItemKind, ItemStyle};
pub use selection::{Corner, HANDLE_SIZE, Handle, ResizeOrigin};
pub use view::{RenderItem, TextEditOverlay, ToolbarState};
