//! The list of boards shown on the start screen.

use crate::board::{Board, BoardId, DEFAULT_BOARD_NAME};
use crate::config::EditorConfig;
use crate::editor::Editor;
use chrono::{DateTime, Utc};

/// What the gallery shows for one board.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSummary {
    pub id: BoardId,
    pub name: String,
    pub item_count: usize,
    pub last_modified: DateTime<Utc>,
}

/// All boards, newest first.
#[derive(Debug, Default)]
pub struct Gallery {
    boards: Vec<Board>,
}

impl Gallery {
    /// Create an empty gallery.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gallery with the two starter boards.
    pub fn with_sample_boards() -> Self {
        Self {
            boards: vec![Board::new("My First Idea"), Board::new("Project Brainstorm")],
        }
    }

    /// Insert a new empty board at the front and return its id.
    pub fn create_board(&mut self) -> BoardId {
        let board = Board::new(DEFAULT_BOARD_NAME);
        let id = board.id();
        log::info!("Created board {id}");
        self.boards.insert(0, board);
        id
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn board(&self, id: BoardId) -> Option<&Board> {
        self.boards.iter().find(|board| board.id() == id)
    }

    pub fn board_mut(&mut self, id: BoardId) -> Option<&mut Board> {
        self.boards.iter_mut().find(|board| board.id() == id)
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Summaries in display order.
    pub fn summaries(&self) -> Vec<BoardSummary> {
        self.boards
            .iter()
            .map(|board| BoardSummary {
                id: board.id(),
                name: board.name().to_string(),
                item_count: board.len(),
                last_modified: board.last_modified(),
            })
            .collect()
    }

    /// Open a board for editing. Edits stay in the gallery's board after the
    /// editor is dropped.
    pub fn open(&mut self, id: BoardId, config: EditorConfig) -> Option<Editor<'_>> {
        let Some(board) = self.board_mut(id) else {
            log::debug!("Open on missing board {id}");
            return None;
        };
        Some(Editor::open(board, config))
    }
}
