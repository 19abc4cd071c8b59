//! Synthetic event source for tests
//!
//! Events are queued up-front and replayed through the same channel a real
//! hook would use, so listener tests exercise the identical receive path.

use std::sync::mpsc::{self, Receiver, Sender};

use parking_lot::Mutex;

use super::{EventSource, PointerEvent};
use crate::error::CaptureResult;

/// Test [`EventSource`] fed by explicit event injection
#[derive(Debug, Default)]
pub struct MockEventSource {
    queued: Mutex<Vec<PointerEvent>>,
    live_sender: Mutex<Option<Sender<PointerEvent>>>,
    close_after_queued: Mutex<bool>,
}

impl MockEventSource {
    /// Creates an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an event for delivery when the listener starts
    ///
    /// Events queued after `start` are sent immediately instead.
    pub fn queue(&self, event: PointerEvent) {
        if let Some(sender) = self.live_sender.lock().as_ref() {
            let _ = sender.send(event);
            return;
        }
        self.queued.lock().push(event);
    }

    /// Drops the sender after the queued events are delivered
    ///
    /// The listener then observes a disconnect once it has drained them,
    /// which lets tests run the loop to completion without a stop flag.
    pub fn close_after_queued(&self) {
        *self.close_after_queued.lock() = true;
    }
}

impl EventSource for MockEventSource {
    fn start(&self) -> CaptureResult<Receiver<PointerEvent>> {
        let (sender, receiver) = mpsc::channel();
        for event in self.queued.lock().drain(..) {
            let _ = sender.send(event);
        }
        if !*self.close_after_queued.lock() {
            *self.live_sender.lock() = Some(sender);
        }
        Ok(receiver)
    }

    fn stop(&self) {
        *self.live_sender.lock() = None;
        *self.close_after_queued.lock() = true;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::RecvTimeoutError;
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_queued_events_are_delivered_in_order() {
        let source = MockEventSource::new();
        source.queue(PointerEvent::primary_press(1, 1));
        source.queue(PointerEvent::primary_press(2, 2));

        let events = source.start().unwrap();
        assert_eq!(events.recv().unwrap(), PointerEvent::primary_press(1, 1));
        assert_eq!(events.recv().unwrap(), PointerEvent::primary_press(2, 2));
    }

    #[test]
    fn test_events_queued_after_start_arrive_live() {
        let source = MockEventSource::new();
        let events = source.start().unwrap();

        source.queue(PointerEvent::primary_press(7, 7));
        assert_eq!(events.recv().unwrap(), PointerEvent::primary_press(7, 7));
    }

    #[test]
    fn test_stop_disconnects_channel() {
        let source = MockEventSource::new();
        let events = source.start().unwrap();

        source.stop();
        assert_eq!(
            events.recv_timeout(Duration::from_millis(50)),
            Err(RecvTimeoutError::Disconnected)
        );
    }

    #[test]
    fn test_close_after_queued_disconnects_after_drain() {
        let source = MockEventSource::new();
        source.queue(PointerEvent::primary_press(3, 3));
        source.close_after_queued();

        let events = source.start().unwrap();
        assert!(events.recv().is_ok());
        assert!(events.recv().is_err());
    }
}
