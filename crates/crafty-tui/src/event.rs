//! Terminal event handling

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};
use std::time::Duration;
use tokio::sync::mpsc;

/// Terminal events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// No input within the tick rate
    Tick,
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Bracketed paste; dropping files onto most terminals arrives this way
    Paste(String),
    Resize(u16, u16),
}

impl Event {
    fn from_crossterm(event: CrosstermEvent) -> Option<Self> {
        match event {
            CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => Some(Event::Key(key)),
            CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
            CrosstermEvent::Paste(text) => Some(Event::Paste(text)),
            CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
            _ => None,
        }
    }
}

/// Reads terminal input on a blocking thread and forwards it over a channel
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let tx_clone = tx.clone();

        tokio::task::spawn_blocking(move || loop {
            let next = if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    Ok(raw) => Event::from_crossterm(raw),
                    Err(e) => {
                        tracing::warn!("Failed to read terminal event: {}", e);
                        None
                    }
                }
            } else {
                Some(Event::Tick)
            };

            if let Some(event) = next {
                if tx_clone.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx, _tx: tx }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}
