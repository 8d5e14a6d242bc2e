//! Start / end / change notifications.
//!
//! Observers subscribe once and drain their receiver whenever convenient,
//! typically once per frame with `try_recv`.

use std::sync::mpsc::{channel, Receiver, Sender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// A gesture began.
    Start,
    /// A gesture finished.
    End,
    /// The camera moved or zoomed.
    Change,
}

#[derive(Debug, Default)]
pub struct EventDispatcher {
    senders: Vec<Sender<ControlEvent>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<ControlEvent> {
        let (tx, rx) = channel();
        self.senders.push(tx);
        rx
    }

    /// Sends to every live receiver and forgets the dropped ones.
    pub fn dispatch(&mut self, event: ControlEvent) {
        self.senders.retain(|tx| tx.send(event).is_ok());
    }
}
