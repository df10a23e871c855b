//! DrawPad Render Library
//!
//! Renderer abstraction for DrawPad boards, plus a display-list renderer
//! that any 2D backend can replay.

mod display_list;
mod renderer;

pub use display_list::{
    CORNER_RADIUS, DEFAULT_LINE_WIDTH, DisplayListRenderer, DrawCommand, FONT_SIZE, SELECTION_OUTSET,
    SELECTION_WIDTH,
};
pub use drawpad_core::view::TEXT_EDIT_PADDING;
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
