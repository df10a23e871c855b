//! Interaction controller for a single open board.
//!
//! The [`Editor`] turns taps, drags and toolbar actions into board mutations
//! and decides when a change becomes an undo step. Live gestures (drag,
//! resize, text editing) are tracked in a [`Gesture`]; the history only sees
//! the state once a gesture ends.

use crate::board::Board;
use crate::config::EditorConfig;
use crate::gesture::Gesture;
use crate::history::{History, ItemSnapshot};
use crate::import::{ImportEvent, ImportQueue, ImportTicket, ImportedImage, MediaImporter};
use crate::input::{GestureAction, GestureRecognizer, PointerEvent, PointerTarget};
use crate::item::{CanvasItem, ItemColor, ItemId, ItemKind, ItemStyle};
use crate::selection::{Corner, Handle, ResizeOrigin, get_handles, hit_test_handles, resize_from};
use crate::view::{RenderItem, TextEditOverlay, ToolbarState};
use kurbo::{Point, Size, Vec2};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Display size for an image with the given pixel dimensions.
///
/// Images larger than `max_dimension` on either side are scaled down so the
/// longer side equals `max_dimension`; smaller images keep their pixel size.
pub fn image_display_size(width: u32, height: u32, max_dimension: f64) -> Size {
    let (width, height) = (width as f64, height as f64);
    if width <= max_dimension && height <= max_dimension {
        return Size::new(width, height);
    }
    let aspect = width / height;
    if aspect > 1.0 {
        Size::new(max_dimension, max_dimension / aspect)
    } else {
        Size::new(max_dimension * aspect, max_dimension)
    }
}

/// Editing session on one board.
///
/// The editor borrows its board mutably for its whole lifetime, so every
/// change lands directly in the board and outlives the editor.
#[derive(Debug)]
pub struct Editor<'b> {
    board: &'b mut Board,
    history: History,
    config: EditorConfig,
    selected: Option<ItemId>,
    gesture: Gesture,
    color_picker_open: bool,
    canvas_size: Size,
    recognizer: GestureRecognizer,
    imports: Option<ImportQueue>,
    /// Ticket of the picker result currently being imported.
    picker_selection: Option<ImportTicket>,
}

impl<'b> Editor<'b> {
    /// Open an editing session. The board's current items become the
    /// history baseline.
    pub fn open(board: &'b mut Board, config: EditorConfig) -> Self {
        let mut history = History::with_limit(config.history_limit);
        history.initialize(board.items());
        log::info!(
            "Opened board \"{}\" ({} items)",
            board.name(),
            board.len()
        );
        Self {
            board,
            history,
            recognizer: GestureRecognizer::new(&config),
            config,
            selected: None,
            gesture: Gesture::Idle,
            color_picker_open: false,
            canvas_size: Size::ZERO,
            imports: None,
            picker_selection: None,
        }
    }

    /// Use `importer` for images picked with [`Editor::pick_image`].
    pub fn with_importer(mut self, importer: Arc<dyn MediaImporter>) -> Self {
        self.imports = Some(ImportQueue::new(importer));
        self
    }

    pub fn board(&self) -> &Board {
        &*self.board
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn selected(&self) -> Option<ItemId> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&CanvasItem> {
        self.selected.and_then(|id| self.board.item(id))
    }

    // --- Canvas geometry ---

    /// Report the size of the visible canvas.
    pub fn set_canvas_size(&mut self, size: Size) {
        self.canvas_size = size;
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    /// Where new items are placed.
    pub fn canvas_center(&self) -> Point {
        if self.canvas_size.width > 0.0 && self.canvas_size.height > 0.0 {
            Point::new(self.canvas_size.width / 2.0, self.canvas_size.height / 2.0)
        } else {
            self.config.fallback_center
        }
    }

    /// Topmost target under `point`: the open text field first, then a
    /// handle of the selected item, then items from front to back, then
    /// the canvas.
    pub fn hit_test(&self, point: Point) -> PointerTarget {
        let editing = self.gesture.editing_item();
        if let Some(item) = editing.and_then(|id| self.board.item(id)) {
            if item.hit_test(point, 0.0) {
                return PointerTarget::TextOverlay(item.id());
            }
        }
        if let Some(item) = self.selected_item().filter(|item| Some(item.id()) != editing) {
            if let Some(corner) = hit_test_handles(item, point, self.config.handle_hit_tolerance) {
                return PointerTarget::Handle(item.id(), corner);
            }
        }
        self.board
            .items()
            .iter()
            .rev()
            .find(|item| item.hit_test(point, 0.0))
            .map_or(PointerTarget::Canvas, |item| PointerTarget::Item(item.id()))
    }

    // --- Selection and text editing ---

    /// Tap on empty canvas.
    pub fn tap_canvas(&mut self) {
        self.end_text_edit();
        self.selected = None;
        self.color_picker_open = false;
    }

    /// Tap on an item.
    pub fn tap_item(&mut self, id: ItemId) {
        self.end_text_edit();
        if self.board.contains(id) {
            self.selected = Some(id);
        } else {
            log::debug!("Tap on missing item {id}");
        }
    }

    /// Double tap on an item. Starts editing if it is a text item.
    /// Returns true if text editing started.
    pub fn double_tap_item(&mut self, id: ItemId) -> bool {
        let Some(text) = self.board.item(id).and_then(|item| item.text()) else {
            return false;
        };
        if self.gesture.editing_item() == Some(id) {
            return true;
        }
        let text = text.to_string();
        self.end_text_edit();
        log::debug!("Editing text of {id}");
        self.gesture = Gesture::EditingText { item: id, text };
        true
    }

    /// Item whose text is being edited.
    pub fn editing_item(&self) -> Option<ItemId> {
        self.gesture.editing_item()
    }

    /// Current text edit buffer.
    pub fn editing_text(&self) -> Option<&str> {
        self.gesture.editing_text()
    }

    /// Replace the text edit buffer. Returns false if no text is being edited.
    pub fn set_editing_text(&mut self, text: impl Into<String>) -> bool {
        match &mut self.gesture {
            Gesture::EditingText { text: buffer, .. } => {
                *buffer = text.into();
                true
            }
            _ => false,
        }
    }

    /// Finish text editing, writing the buffer back if it changed.
    /// Returns true if the item's text was updated.
    pub fn end_text_edit(&mut self) -> bool {
        if self.gesture.editing_item().is_none() {
            return false;
        }
        let Gesture::EditingText { item, text } = std::mem::take(&mut self.gesture) else {
            return false;
        };

        let Some(current) = self.board.item(item).and_then(|i| i.text()) else {
            log::debug!("Text item {item} disappeared while editing");
            return false;
        };
        if current == text {
            return false;
        }

        match self.board.update_item(item, |i| i.set_text(text)) {
            Ok(Ok(())) => {
                self.commit();
                true
            }
            Ok(Err(e)) | Err(e) => {
                log::debug!("Text edit dropped: {e}");
                false
            }
        }
    }

    /// The text field lost focus.
    pub fn focus_lost(&mut self) -> bool {
        self.end_text_edit()
    }

    // --- Drag to move ---

    /// The pointer moved while dragging `id`. `translation` is cumulative.
    pub fn drag_changed(&mut self, id: ItemId, translation: Vec2) {
        if let Gesture::Dragging { item, offset } = &mut self.gesture {
            if *item == id {
                *offset = translation;
            } else {
                log::debug!("Ignoring drag of {id} while {item} is dragged");
            }
            return;
        }
        if self.gesture.resizing_item().is_some() {
            log::debug!("Ignoring drag of {id} during resize");
            return;
        }
        if !self.board.contains(id) {
            log::debug!("Drag on missing item {id}");
            return;
        }
        self.end_text_edit();
        log::debug!("Drag start {id}");
        self.gesture = Gesture::Dragging {
            item: id,
            offset: translation,
        };
    }

    /// Dragging `id` ended. Moves the item by `translation` and commits.
    pub fn drag_ended(&mut self, id: ItemId, translation: Vec2) {
        match self.gesture.dragged_item() {
            Some(item) if item != id => {
                log::debug!("Ignoring drag end of {id} while {item} is dragged");
                return;
            }
            Some(_) => self.gesture = Gesture::Idle,
            None if self.gesture.resizing_item().is_some() => {
                log::debug!("Ignoring drag end of {id} during resize");
                return;
            }
            None => {
                self.end_text_edit();
            }
        }

        if let Err(e) = self.board.update_item(id, |item| item.translate(translation)) {
            log::debug!("Drag end: {e}");
        }
        self.commit();
    }

    /// Visual offset of `id` while it is dragged.
    pub fn drag_offset(&self, id: ItemId) -> Vec2 {
        self.gesture.drag_offset(id)
    }

    // --- Handle resize ---

    /// The pointer moved while dragging `corner` of `id`. Updates the item's
    /// center and size live.
    pub fn resize_changed(&mut self, id: ItemId, corner: Corner, translation: Vec2) {
        let active = match &self.gesture {
            Gesture::Resizing {
                item,
                corner,
                origin,
            } => Some((*item, *corner, *origin)),
            _ => None,
        };

        let (corner, origin) = match active {
            Some((item, corner, origin)) if item == id => (corner, origin),
            Some((item, ..)) => {
                log::debug!("Ignoring resize of {id} while {item} is resized");
                return;
            }
            None => {
                if let Some(item) = self.gesture.dragged_item() {
                    log::debug!("Ignoring resize of {id} while {item} is dragged");
                    return;
                }
                let Some(item) = self.board.item(id) else {
                    log::debug!("Resize on missing item {id}");
                    return;
                };
                let origin = ResizeOrigin::of(item);
                self.end_text_edit();
                log::debug!("Resize start {id} from {corner:?}");
                self.gesture = Gesture::Resizing {
                    item: id,
                    corner,
                    origin,
                };
                (corner, origin)
            }
        };

        let (position, size) = resize_from(origin, corner, translation, self.config.min_item_size);
        let updated = self.board.update_item(id, |item| {
            item.position = position;
            item.size = size;
        });
        if let Err(e) = updated {
            log::debug!("Resize: {e}");
            self.gesture = Gesture::Idle;
        }
    }

    /// Resizing `id` ended. Commits the new geometry.
    pub fn resize_ended(&mut self, id: ItemId) {
        match self.gesture.resizing_item() {
            Some(item) if item != id => {
                log::debug!("Ignoring resize end of {id} while {item} is resized");
                return;
            }
            Some(_) => self.gesture = Gesture::Idle,
            None => {}
        }
        self.commit();
    }

    // --- Toolbar actions ---

    pub fn add_rectangle(&mut self) -> ItemId {
        let item = CanvasItem::new(ItemKind::Rectangle, self.canvas_center(), self.config.shape_size)
            .with_style(ItemStyle::filled(ItemColor::CYAN));
        self.add_item(item)
    }

    pub fn add_circle(&mut self) -> ItemId {
        let item = CanvasItem::new(ItemKind::Circle, self.canvas_center(), self.config.shape_size)
            .with_style(ItemStyle::filled(ItemColor::ORANGE));
        self.add_item(item)
    }

    pub fn add_text(&mut self) -> ItemId {
        let item = CanvasItem::new(
            ItemKind::Text(self.config.default_text.clone()),
            self.canvas_center(),
            self.config.text_size,
        )
        .with_style(ItemStyle::filled(ItemColor::PRIMARY));
        self.add_item(item)
    }

    /// Add a normalized image, capped to the configured display size.
    pub fn add_image(&mut self, image: &ImportedImage) -> ItemId {
        let size = image_display_size(image.width, image.height, self.config.max_image_dimension);
        let item = CanvasItem::new(ItemKind::Image(image.data.clone()), self.canvas_center(), size);
        self.add_item(item)
    }

    /// Append an item on top of the others and commit.
    pub fn add_item(&mut self, item: CanvasItem) -> ItemId {
        let id = item.id();
        self.board.push_item(item);
        self.commit();
        id
    }

    /// Remove the selected item. Returns the removed item.
    pub fn delete_selected(&mut self) -> Option<CanvasItem> {
        let id = self.selected.take()?;
        if self.gesture.item() == Some(id) {
            self.recognizer.cancel();
            self.gesture = Gesture::Idle;
        }
        match self.board.remove_item(id) {
            Ok(item) => {
                self.commit();
                Some(item)
            }
            Err(e) => {
                log::debug!("Delete: {e}");
                None
            }
        }
    }

    /// Set the fill color of the selected item. Returns false if nothing is
    /// selected.
    pub fn recolor_selected(&mut self, color: ItemColor) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        match self.board.update_item(id, |item| item.style.color = Some(color)) {
            Ok(()) => {
                self.commit();
                true
            }
            Err(e) => {
                log::debug!("Recolor: {e}");
                false
            }
        }
    }

    pub fn toggle_color_picker(&mut self) {
        self.color_picker_open = !self.color_picker_open;
    }

    /// The palette shows only while toggled on and something is selected.
    pub fn is_color_picker_visible(&self) -> bool {
        self.color_picker_open && self.selected.is_some()
    }

    pub fn toolbar(&self) -> ToolbarState {
        let has_selection = self.selected.is_some();
        ToolbarState {
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
            can_delete: has_selection,
            can_recolor: has_selection,
            color_picker_visible: self.is_color_picker_visible(),
        }
    }

    // --- History ---

    /// Record the board's items as a history state.
    pub fn commit(&mut self) -> bool {
        let pushed = self.history.commit(self.board.items());
        if pushed {
            log::debug!(
                "Commit: {} undo / {} redo",
                self.history.undo_len(),
                self.history.redo_len()
            );
        }
        pushed
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(items) => {
                self.restore(items);
                true
            }
            None => {
                log::debug!("Nothing to undo");
                false
            }
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(items) => {
                self.restore(items);
                true
            }
            None => {
                log::debug!("Nothing to redo");
                false
            }
        }
    }

    fn restore(&mut self, items: ItemSnapshot) {
        // A live gesture refers to the state being replaced
        self.recognizer.cancel();
        self.gesture = Gesture::Idle;
        self.board.replace_items(items);
        if self.selected.is_some_and(|id| !self.board.contains(id)) {
            self.selected = None;
        }
    }

    // --- Image import ---

    /// Start importing a picked image in the background. Returns None if no
    /// importer is configured.
    pub fn pick_image(&mut self, raw: Vec<u8>) -> Option<ImportTicket> {
        let Some(queue) = self.imports.as_mut() else {
            log::warn!("No media importer configured, dropping picked image");
            return None;
        };
        let ticket = queue.submit(raw);
        self.picker_selection = Some(ticket);
        Some(ticket)
    }

    /// Ticket of the picked image still being imported.
    pub fn picker_selection(&self) -> Option<ImportTicket> {
        self.picker_selection
    }

    pub fn is_importing(&self) -> bool {
        self.imports.as_ref().is_some_and(|queue| !queue.is_idle())
    }

    /// Apply finished imports (non-blocking). Returns the number of images added.
    pub fn poll_imports(&mut self) -> usize {
        let events = match self.imports.as_mut() {
            Some(queue) => queue.poll_events(),
            None => return 0,
        };
        self.apply_import_events(events)
    }

    /// Block until all pending imports finish or `timeout` passes, then apply
    /// them. Returns the number of images added.
    pub fn wait_for_imports(&mut self, timeout: Duration) -> usize {
        let events = match self.imports.as_mut() {
            Some(queue) => queue.wait_idle(timeout),
            None => return 0,
        };
        self.apply_import_events(events)
    }

    fn apply_import_events(&mut self, events: Vec<ImportEvent>) -> usize {
        let mut added = 0;
        for event in events {
            match event {
                ImportEvent::Ready { ticket, image } => {
                    let id = self.add_image(&image);
                    log::info!("Import {ticket}: added image {id} ({}x{})", image.width, image.height);
                    added += 1;
                }
                ImportEvent::Failed { ticket, error } => {
                    log::warn!("Import {ticket} failed: {error}");
                }
                ImportEvent::Finished { ticket } => {
                    if self.picker_selection == Some(ticket) {
                        self.picker_selection = None;
                    }
                }
            }
        }
        added
    }

    // --- Pointer input ---

    /// Feed a raw pointer event. `now` is the time the event happened.
    pub fn handle_pointer(&mut self, event: PointerEvent, now: Instant) {
        let action = match event {
            PointerEvent::Down { position } => {
                let target = self.hit_test(position);
                self.recognizer.press(target, position);
                None
            }
            PointerEvent::Move { position } => self.recognizer.moved(position),
            PointerEvent::Up { position } => self.recognizer.release(position, now),
        };
        if let Some(action) = action {
            self.apply_action(action);
        }
    }

    /// Apply a recognized gesture.
    pub fn apply_action(&mut self, action: GestureAction) {
        match action {
            GestureAction::Tap(PointerTarget::Canvas)
            | GestureAction::DoubleTap(PointerTarget::Canvas) => self.tap_canvas(),
            GestureAction::Tap(PointerTarget::Item(id) | PointerTarget::Handle(id, _)) => {
                self.tap_item(id)
            }
            GestureAction::DoubleTap(PointerTarget::Item(id) | PointerTarget::Handle(id, _)) => {
                self.double_tap_item(id);
            }
            GestureAction::DragChanged {
                target: PointerTarget::Item(id),
                translation,
            } => self.drag_changed(id, translation),
            GestureAction::DragEnded {
                target: PointerTarget::Item(id),
                translation,
            } => self.drag_ended(id, translation),
            GestureAction::DragChanged {
                target: PointerTarget::Handle(id, corner),
                translation,
            } => self.resize_changed(id, corner, translation),
            GestureAction::DragEnded {
                target: PointerTarget::Handle(id, corner),
                translation,
            } => {
                self.resize_changed(id, corner, translation);
                self.resize_ended(id);
            }
            GestureAction::DragChanged {
                target: PointerTarget::Canvas,
                ..
            }
            | GestureAction::DragEnded {
                target: PointerTarget::Canvas,
                ..
            } => {}
            GestureAction::Tap(PointerTarget::TextOverlay(_))
            | GestureAction::DoubleTap(PointerTarget::TextOverlay(_))
            | GestureAction::DragChanged {
                target: PointerTarget::TextOverlay(_),
                ..
            }
            | GestureAction::DragEnded {
                target: PointerTarget::TextOverlay(_),
                ..
            } => {}
        }
    }

    // --- View state ---

    /// Items in paint order with their per-frame decoration. The item being
    /// text-edited is left out; draw [`Editor::text_edit_overlay`] instead.
    pub fn render_items(&self) -> Vec<RenderItem<'_>> {
        let editing = self.gesture.editing_item();
        self.board
            .items()
            .iter()
            .filter(|item| Some(item.id()) != editing)
            .map(|item| {
                let offset = self.gesture.drag_offset(item.id());
                let selected = self.selected == Some(item.id());
                let handles = selected.then(|| {
                    get_handles(item).map(|handle| Handle::new(handle.position + offset, handle.corner))
                });
                RenderItem {
                    item,
                    offset,
                    selected,
                    handles,
                }
            })
            .collect()
    }

    pub fn text_edit_overlay(&self) -> Option<TextEditOverlay> {
        let Gesture::EditingText { item, text } = &self.gesture else {
            return None;
        };
        let edited = self.board.item(*item)?;
        Some(TextEditOverlay {
            item: *item,
            frame: edited.frame(),
            rotation: edited.style.rotation,
            text: text.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ImageData;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn open(board: &mut Board) -> Editor<'_> {
        init_logging();
        Editor::open(board, EditorConfig::default())
    }

    #[test]
    fn test_image_display_size() {
        assert_eq!(image_display_size(600, 300, 300.0), Size::new(300.0, 150.0));
        assert_eq!(image_display_size(300, 600, 300.0), Size::new(150.0, 300.0));
        assert_eq!(image_display_size(1000, 1000, 300.0), Size::new(300.0, 300.0));
        assert_eq!(image_display_size(120, 80, 300.0), Size::new(120.0, 80.0));
        assert_eq!(image_display_size(300, 300, 300.0), Size::new(300.0, 300.0));
    }

    #[test]
    fn test_canvas_center() {
        let mut board = Board::default();
        let mut editor = open(&mut board);
        assert_eq!(editor.canvas_center(), Point::new(200.0, 200.0));
        editor.set_canvas_size(Size::new(800.0, 600.0));
        assert_eq!(editor.canvas_center(), Point::new(400.0, 300.0));
    }

    #[test]
    fn test_add_shapes_defaults() {
        let mut board = Board::default();
        let mut editor = open(&mut board);
        let rect = editor.add_rectangle();
        let circle = editor.add_circle();
        let text = editor.add_text();

        let board = editor.board();
        let rect = board.item(rect).unwrap();
        assert_eq!(rect.size, Size::new(100.0, 100.0));
        assert_eq!(rect.style.color, Some(ItemColor::CYAN));
        assert_eq!(board.item(circle).unwrap().style.color, Some(ItemColor::ORANGE));
        let text = board.item(text).unwrap();
        assert_eq!(text.text(), Some("New Text"));
        assert_eq!(text.size, Size::new(150.0, 50.0));
        assert_eq!(editor.history().undo_len(), 4);
    }

    #[test]
    fn test_drag_moves_on_release_only() {
        let mut board = Board::default();
        let mut editor = open(&mut board);
        let id = editor.add_rectangle();

        editor.drag_changed(id, Vec2::new(30.0, 10.0));
        assert_eq!(editor.drag_offset(id), Vec2::new(30.0, 10.0));
        assert_eq!(editor.board().item(id).unwrap().position, Point::new(200.0, 200.0));

        editor.drag_ended(id, Vec2::new(40.0, 10.0));
        assert!(editor.gesture().is_idle());
        assert_eq!(editor.board().item(id).unwrap().position, Point::new(240.0, 210.0));
        assert_eq!(editor.history().undo_len(), 3);
    }

    #[test]
    fn test_drag_locks_to_first_item() {
        let mut board = Board::default();
        let mut editor = open(&mut board);
        let a = editor.add_rectangle();
        let b = editor.add_circle();

        editor.drag_changed(a, Vec2::new(10.0, 0.0));
        editor.drag_changed(b, Vec2::new(50.0, 0.0));
        assert_eq!(editor.gesture().dragged_item(), Some(a));
        assert_eq!(editor.drag_offset(b), Vec2::ZERO);

        editor.drag_ended(b, Vec2::new(50.0, 0.0));
        assert_eq!(editor.board().item(b).unwrap().position, Point::new(200.0, 200.0));
    }

    #[test]
    fn test_zero_drag_commits_nothing() {
        let mut board = Board::default();
        let mut editor = open(&mut board);
        let id = editor.add_rectangle();
        let before = editor.history().undo_len();

        editor.drag_changed(id, Vec2::new(6.0, 0.0));
        editor.drag_ended(id, Vec2::ZERO);
        assert_eq!(editor.history().undo_len(), before);
    }

    #[test]
    fn test_resize_live_then_commit() {
        let mut board = Board::default();
        let mut editor = open(&mut board);
        let id = editor.add_rectangle();

        editor.resize_changed(id, Corner::BottomRight, Vec2::new(20.0, 40.0));
        let item = editor.board().item(id).unwrap();
        assert_eq!(item.size, Size::new(120.0, 140.0));
        assert_eq!(item.position, Point::new(210.0, 220.0));
        assert_eq!(editor.history().undo_len(), 2);

        // Translation is cumulative from the start of the resize.
        editor.resize_changed(id, Corner::BottomRight, Vec2::new(-500.0, -500.0));
        assert_eq!(editor.board().item(id).unwrap().size, Size::new(20.0, 20.0));

        editor.resize_ended(id);
        assert!(editor.gesture().is_idle());
        assert_eq!(editor.history().undo_len(), 3);
    }

    #[test]
    fn test_drag_commits_pending_text_edit() {
        let mut board = Board::default();
        let mut editor = open(&mut board);
        let text = editor.add_text();
        let rect = editor.add_rectangle();

        assert!(editor.double_tap_item(text));
        editor.set_editing_text("Draft");
        editor.drag_changed(rect, Vec2::new(10.0, 0.0));

        assert_eq!(editor.editing_item(), None);
        assert_eq!(editor.board().item(text).unwrap().text(), Some("Draft"));
    }

    #[test]
    fn test_selection_is_not_recorded() {
        let mut board = Board::default();
        let mut editor = open(&mut board);
        let rect = editor.add_rectangle();
        let circle = editor.add_circle();
        let before = editor.history().undo_len();

        editor.tap_item(rect);
        editor.tap_item(circle);
        editor.tap_canvas();
        editor.tap_item(circle);
        assert_eq!(editor.history().undo_len(), before);
        assert_eq!(editor.history().redo_len(), 0);
    }

    #[test]
    fn test_double_tap_while_editing_keeps_buffer() {
        let mut board = Board::default();
        let mut editor = open(&mut board);
        let id = editor.add_text();
        assert!(editor.double_tap_item(id));
        editor.set_editing_text("Half typ");

        assert!(editor.double_tap_item(id));
        assert_eq!(editor.editing_item(), Some(id));
        assert_eq!(editor.editing_text(), Some("Half typ"));
        assert_eq!(editor.board().item(id).unwrap().text(), Some("New Text"));
    }

    #[test]
    fn test_double_tap_non_text_is_ignored() {
        let mut board = Board::default();
        let mut editor = open(&mut board);
        let id = editor.add_circle();
        assert!(!editor.double_tap_item(id));
        assert!(editor.gesture().is_idle());
    }

    #[test]
    fn test_text_edit_on_deleted_item_clears_state() {
        let mut board = Board::default();
        let mut editor = open(&mut board);
        let id = editor.add_text();
        editor.tap_item(id);
        editor.double_tap_item(id);
        editor.set_editing_text("Gone");

        editor.delete_selected();
        assert!(!editor.end_text_edit());
        assert_eq!(editor.editing_item(), None);
    }

    #[test]
    fn test_undo_cancels_editing() {
        let mut board = Board::default();
        let mut editor = open(&mut board);
        let id = editor.add_text();
        editor.tap_item(id);
        editor.double_tap_item(id);
        editor.set_editing_text("Unsaved");

        assert!(editor.undo());
        assert!(editor.gesture().is_idle());
        assert_eq!(editor.selected(), None);
        assert!(editor.board().is_empty());
    }

    #[test]
    fn test_recolor_and_picker_visibility() {
        let mut board = Board::default();
        let mut editor = open(&mut board);
        assert!(!editor.recolor_selected(ItemColor::RED));

        let id = editor.add_rectangle();
        editor.toggle_color_picker();
        assert!(!editor.is_color_picker_visible());

        editor.tap_item(id);
        assert!(editor.is_color_picker_visible());
        let before = editor.history().undo_len();
        assert!(editor.recolor_selected(ItemColor::RED));
        assert_eq!(editor.board().item(id).unwrap().style.color, Some(ItemColor::RED));
        assert_eq!(editor.history().undo_len(), before + 1);

        // Same color again leaves no entry.
        assert!(editor.recolor_selected(ItemColor::RED));
        assert_eq!(editor.history().undo_len(), before + 1);

        editor.tap_canvas();
        assert_eq!(editor.selected(), None);
        assert!(!editor.toolbar().color_picker_visible);
    }

    #[test]
    fn test_toolbar_state() {
        let mut board = Board::default();
        let mut editor = open(&mut board);
        assert_eq!(editor.toolbar(), ToolbarState::default());

        let id = editor.add_circle();
        editor.tap_item(id);
        let toolbar = editor.toolbar();
        assert!(toolbar.can_undo);
        assert!(!toolbar.can_redo);
        assert!(toolbar.can_delete);
        assert!(toolbar.can_recolor);
    }

    #[test]
    fn test_render_items() {
        let mut board = Board::default();
        let mut editor = open(&mut board);
        let rect = editor.add_rectangle();
        let text = editor.add_text();
        editor.tap_item(rect);
        editor.drag_changed(rect, Vec2::new(10.0, 0.0));

        let items = editor.render_items();
        assert_eq!(items.len(), 2);
        assert!(items[0].selected);
        assert_eq!(items[0].offset, Vec2::new(10.0, 0.0));
        let handles = items[0].handles.unwrap();
        assert_eq!(handles[0].position, Point::new(160.0, 150.0));
        assert!(items[1].handles.is_none());

        editor.drag_ended(rect, Vec2::new(10.0, 0.0));
        editor.double_tap_item(text);
        let items = editor.render_items();
        assert_eq!(items.len(), 1);
        let overlay = editor.text_edit_overlay().unwrap();
        assert_eq!(overlay.item, text);
        assert_eq!(overlay.text, "New Text");
    }

    #[test]
    fn test_add_image_caps_size() {
        let mut board = Board::default();
        let mut editor = open(&mut board);
        let image = ImportedImage {
            data: ImageData::new(vec![0xFF, 0xD8, 0xFF, 0xE0]),
            width: 1200,
            height: 800,
            format: crate::item::ImageFormat::Jpeg,
        };
        let id = editor.add_image(&image);
        let item = editor.board().item(id).unwrap();
        assert_eq!(item.size, Size::new(300.0, 200.0));
        assert!(item.kind().as_image().is_some());
    }

    #[test]
    fn test_pick_without_importer() {
        let mut board = Board::default();
        let mut editor = open(&mut board);
        assert_eq!(editor.pick_image(vec![1, 2, 3]), None);
        assert_eq!(editor.poll_imports(), 0);
        assert!(!editor.is_importing());
    }
}
