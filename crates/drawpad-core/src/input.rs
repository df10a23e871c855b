//! Pointer input and gesture recognition.
//!
//! Raw press/move/release events are turned into taps, double taps and
//! drags against whatever the pointer went down on.

use crate::config::EditorConfig;
use crate::item::ItemId;
use crate::selection::Corner;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
}

/// What the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Empty canvas.
    Canvas,
    /// The body of an item.
    Item(ItemId),
    /// A resize handle of the selected item.
    Handle(ItemId, Corner),
    /// The text field of the item being edited. It keeps its own touches.
    TextOverlay(ItemId),
}

/// A recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureAction {
    Tap(PointerTarget),
    DoubleTap(PointerTarget),
    /// The pointer moved while dragging. `translation` is cumulative.
    DragChanged {
        target: PointerTarget,
        translation: Vec2,
    },
    /// The pointer was released after dragging.
    DragEnded {
        target: PointerTarget,
        translation: Vec2,
    },
}

#[derive(Debug, Clone)]
struct Press {
    target: PointerTarget,
    start: Point,
    threshold: f64,
    dragging: bool,
}

#[derive(Debug, Clone)]
struct LastTap {
    time: Instant,
    position: Point,
    target: PointerTarget,
}

/// Tracks one pointer across press, move and release.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    press: Option<Press>,
    last_tap: Option<LastTap>,
    drag_threshold: f64,
    handle_drag_threshold: f64,
    double_tap_interval: Duration,
    double_tap_distance: f64,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl GestureRecognizer {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            press: None,
            last_tap: None,
            drag_threshold: config.drag_threshold,
            handle_drag_threshold: config.handle_drag_threshold,
            double_tap_interval: Duration::from_millis(config.double_tap_interval_ms),
            double_tap_distance: config.double_tap_distance,
        }
    }

    /// Check if the pointer is currently down.
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Check if the current press has turned into a drag.
    pub fn is_dragging(&self) -> bool {
        self.press.as_ref().is_some_and(|p| p.dragging)
    }

    pub fn pressed_target(&self) -> Option<PointerTarget> {
        self.press.as_ref().map(|p| p.target)
    }

    /// Pointer went down on `target`.
    pub fn press(&mut self, target: PointerTarget, position: Point) {
        let threshold = match target {
            PointerTarget::Handle(..) => self.handle_drag_threshold,
            _ => self.drag_threshold,
        };
        self.press = Some(Press {
            target,
            start: position,
            threshold,
            dragging: false,
        });
    }

    /// Pointer moved. Returns a drag update once the move threshold is passed.
    pub fn moved(&mut self, position: Point) -> Option<GestureAction> {
        let press = self.press.as_mut()?;
        let translation = position - press.start;
        if !press.dragging && translation.hypot() > press.threshold {
            press.dragging = true;
        }
        press.dragging.then_some(GestureAction::DragChanged {
            target: press.target,
            translation,
        })
    }

    /// Pointer released at `now`.
    pub fn release(&mut self, position: Point, now: Instant) -> Option<GestureAction> {
        let press = self.press.take()?;
        let translation = position - press.start;
        if press.dragging || translation.hypot() > press.threshold {
            self.last_tap = None;
            return Some(GestureAction::DragEnded {
                target: press.target,
                translation,
            });
        }

        if let Some(last) = self.last_tap.take() {
            let elapsed = now.duration_since(last.time);
            let distance = (position - last.position).hypot();
            if last.target == press.target
                && elapsed <= self.double_tap_interval
                && distance < self.double_tap_distance
            {
                // Reset so a third tap starts over
                return Some(GestureAction::DoubleTap(press.target));
            }
        }

        self.last_tap = Some(LastTap {
            time: now,
            position,
            target: press.target,
        });
        Some(GestureAction::Tap(press.target))
    }

    /// Abandon the current press without producing an action.
    pub fn cancel(&mut self) {
        self.press = None;
    }
}
