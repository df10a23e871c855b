//! Boards and board change notification.
//!
//! A [`Board`] owns its items. Every mutation goes through a method on the
//! board so that the version counter advances and subscribers are told.

use crate::error::{EditError, EditResult};
use crate::item::{CanvasItem, ItemId};
use chrono::{DateTime, Utc};
use std::sync::mpsc::{Receiver, Sender, channel};
use uuid::Uuid;

/// Unique identifier for boards.
pub type BoardId = Uuid;

/// Name given to freshly created boards.
pub const DEFAULT_BOARD_NAME: &str = "Untitled Board";

/// Change published by a board.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardEvent {
    /// The item sequence changed.
    ItemsChanged {
        board: BoardId,
        version: u64,
        item_count: usize,
    },
    /// The board was renamed.
    Renamed { board: BoardId, name: String },
}

/// Receiving end of a board's change notifications.
///
/// Dropping the subscription unsubscribes; the board prunes it on its next
/// publish.
#[derive(Debug)]
pub struct BoardSubscription {
    board: BoardId,
    rx: Receiver<BoardEvent>,
}

impl BoardSubscription {
    /// The board this subscription listens to.
    pub fn board(&self) -> BoardId {
        self.board
    }

    /// Next pending event, if any (non-blocking).
    pub fn try_next(&self) -> Option<BoardEvent> {
        self.rx.try_recv().ok()
    }

    /// All pending events (non-blocking).
    pub fn drain(&self) -> Vec<BoardEvent> {
        self.rx.try_iter().collect()
    }
}

/// A named, ordered collection of canvas items.
///
/// Item order is paint order: later items draw on top.
#[derive(Debug)]
pub struct Board {
    id: BoardId,
    name: String,
    items: Vec<CanvasItem>,
    last_modified: DateTime<Utc>,
    version: u64,
    subscribers: Vec<Sender<BoardEvent>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_NAME)
    }
}

impl Board {
    /// Create an empty board.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_items(name, Vec::new())
    }

    /// Create a board with initial items.
    pub fn with_items(name: impl Into<String>, items: Vec<CanvasItem>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            items,
            last_modified: Utc::now(),
            version: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn id(&self) -> BoardId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.last_modified = Utc::now();
        let event = BoardEvent::Renamed {
            board: self.id,
            name: self.name.clone(),
        };
        self.publish(event);
    }

    /// Items in paint order (back to front).
    pub fn items(&self) -> &[CanvasItem] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&CanvasItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    /// Monotonic counter bumped on every item change.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Subscribe to changes of this board.
    pub fn subscribe(&mut self) -> BoardSubscription {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        BoardSubscription { board: self.id, rx }
    }

    /// Append an item on top of all others.
    pub fn push_item(&mut self, item: CanvasItem) {
        log::debug!("Board {}: add {} {}", self.id, item.kind().name(), item.id());
        self.items.push(item);
        self.touch();
    }

    /// Remove an item, keeping the order of the rest.
    pub fn remove_item(&mut self, id: ItemId) -> EditResult<CanvasItem> {
        let index = self.index_of(id).ok_or(EditError::ItemNotFound(id))?;
        let removed = self.items.remove(index);
        self.touch();
        Ok(removed)
    }

    /// Mutate a single item in place.
    pub fn update_item<R>(
        &mut self,
        id: ItemId,
        f: impl FnOnce(&mut CanvasItem) -> R,
    ) -> EditResult<R> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or(EditError::ItemNotFound(id))?;
        let result = f(item);
        self.touch();
        Ok(result)
    }

    /// Replace the whole item sequence (used by undo/redo).
    pub fn replace_items(&mut self, items: Vec<CanvasItem>) {
        self.items = items;
        self.touch();
    }

    fn touch(&mut self) {
        self.version += 1;
        self.last_modified = Utc::now();
        let event = BoardEvent::ItemsChanged {
            board: self.id,
            version: self.version,
            item_count: self.items.len(),
        };
        self.publish(event);
    }

    fn publish(&mut self, event: BoardEvent) {
        // A failed send means the subscription was dropped.
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
