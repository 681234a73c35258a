//! Single-slot handoff between the capture task and the driver loop.
//!
//! The producer overwrites, the consumer reads at most once per published
//! frame. Nothing queues: a frame the driver never got to is simply lost.

use tokio::sync::watch;

use crate::game::GestureFrame;

/// Create a connected writer/reader pair
pub fn classification_slot() -> (SlotWriter, SlotReader) {
    let (tx, rx) = watch::channel(GestureFrame::absent());
    (SlotWriter { tx }, SlotReader { rx })
}

#[derive(Debug)]
pub struct SlotWriter {
    tx: watch::Sender<GestureFrame>,
}

impl SlotWriter {
    /// Replace whatever frame is waiting
    pub fn publish(&self, frame: GestureFrame) {
        self.tx.send_replace(frame);
    }

    /// The reader has gone away
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[derive(Debug)]
pub struct SlotReader {
    rx: watch::Receiver<GestureFrame>,
}

impl SlotReader {
    /// The newest frame if one arrived since the last call, otherwise an
    /// absent frame so a stale label is never counted twice
    pub fn take(&mut self) -> GestureFrame {
        match self.rx.has_changed() {
            Ok(true) => *self.rx.borrow_and_update(),
            Ok(false) | Err(_) => GestureFrame::absent(),
        }
    }
}
