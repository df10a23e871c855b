//! Background image import.
//!
//! Decoding and re-encoding a picked image can take a while, so each import
//! runs on its own worker thread. Results come back over a channel that the
//! editor drains on its own thread, the same way network events are polled.

use crate::item::{ImageData, ImageFormat};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Identifies one submitted import.
pub type ImportTicket = u64;

/// Image import errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("Image data is empty")]
    Empty,
    #[error("Failed to decode image: {0}")]
    Decode(String),
    #[error("Failed to encode image: {0}")]
    Encode(String),
}

/// A normalized image ready to be placed on a board.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedImage {
    /// Re-encoded image bytes.
    pub data: ImageData,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
    pub format: ImageFormat,
}

/// Turns a user-picked image blob into normalized encoded bytes.
pub trait MediaImporter: Send + Sync {
    fn import(&self, raw: &[u8]) -> Result<ImportedImage, ImportError>;
}

impl<F> MediaImporter for F
where
    F: Fn(&[u8]) -> Result<ImportedImage, ImportError> + Send + Sync,
{
    fn import(&self, raw: &[u8]) -> Result<ImportedImage, ImportError> {
        self(raw)
    }
}

/// Events sent back from import workers.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportEvent {
    /// The image was normalized successfully.
    Ready {
        ticket: ImportTicket,
        image: ImportedImage,
    },
    /// The import failed; nothing will be added.
    Failed {
        ticket: ImportTicket,
        error: ImportError,
    },
    /// The worker is done. Always sent last, on every exit path.
    Finished { ticket: ImportTicket },
}

/// Sends `Finished` when the worker exits, even if the importer panics.
struct FinishGuard {
    ticket: ImportTicket,
    tx: Sender<ImportEvent>,
}

impl Drop for FinishGuard {
    fn drop(&mut self) {
        let _ = self.tx.send(ImportEvent::Finished {
            ticket: self.ticket,
        });
    }
}

/// Runs imports on worker threads and collects their results.
pub struct ImportQueue {
    importer: Arc<dyn MediaImporter>,
    event_tx: Sender<ImportEvent>,
    event_rx: Receiver<ImportEvent>,
    next_ticket: ImportTicket,
    in_flight: usize,
}

impl std::fmt::Debug for ImportQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportQueue")
            .field("next_ticket", &self.next_ticket)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl ImportQueue {
    pub fn new(importer: Arc<dyn MediaImporter>) -> Self {
        let (event_tx, event_rx) = channel();
        Self {
            importer,
            event_tx,
            event_rx,
            next_ticket: 1,
            in_flight: 0,
        }
    }

    /// Start importing `raw` on a worker thread.
    pub fn submit(&mut self, raw: Vec<u8>) -> ImportTicket {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight += 1;

        let importer = Arc::clone(&self.importer);
        let tx = self.event_tx.clone();
        thread::spawn(move || {
            let guard = FinishGuard { ticket, tx };
            log::debug!("Import {ticket}: {} bytes", raw.len());
            let event = match importer.import(&raw) {
                Ok(image) => ImportEvent::Ready { ticket, image },
                Err(error) => ImportEvent::Failed { ticket, error },
            };
            let _ = guard.tx.send(event);
        });
        ticket
    }

    /// Number of imports whose worker has not finished yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight == 0
    }

    /// Poll for pending events (non-blocking).
    pub fn poll_events(&mut self) -> Vec<ImportEvent> {
        let events: Vec<_> = self.event_rx.try_iter().collect();
        self.track(&events);
        events
    }

    /// Block until every submitted import has finished or `timeout` passes.
    pub fn wait_idle(&mut self, timeout: Duration) -> Vec<ImportEvent> {
        let deadline = Instant::now() + timeout;
        let mut events = Vec::new();
        while self.in_flight > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.event_rx.recv_timeout(remaining) {
                Ok(event) => {
                    self.track(std::slice::from_ref(&event));
                    events.push(event);
                }
                Err(RecvTimeoutError::Timeout) => {
                    log::warn!("Timed out waiting for {} import(s)", self.in_flight);
                    break;
                }
                // Unreachable while we hold a sender, but don't spin if it happens.
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        events
    }

    fn track(&mut self, events: &[ImportEvent]) {
        let finished = events
            .iter()
            .filter(|event| matches!(event, ImportEvent::Finished { .. }))
            .count();
        self.in_flight = self.in_flight.saturating_sub(finished);
    }
}
