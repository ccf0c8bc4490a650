use std::sync::mpsc;

use tracing::debug;

/// Payload sent to a paired viewport when a crop is committed.
///
/// The center is the clamped source-space center of the committed box and is
/// reused verbatim by the receiver, which assumes both images share a pixel grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SyncEvent {
    pub center_x: f64,
    pub center_y: f64,
    pub sequence: u32,
}

/// Receiver side of crop synchronization.
pub trait SyncSink {
    /// Deliver an event. Returns false once the sink can no longer accept
    /// events and should be dropped.
    fn deliver(&mut self, event: SyncEvent) -> bool;
}

impl SyncSink for mpsc::Sender<SyncEvent> {
    fn deliver(&mut self, event: SyncEvent) -> bool {
        self.send(event).is_ok()
    }
}

/// Fan-out of commit events to attached sinks.
#[derive(Default)]
pub struct SyncBroadcaster {
    sinks: Vec<Box<dyn SyncSink>>,
}

impl SyncBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, sink: impl SyncSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    /// Convenience for the common in-process case: attach a channel and hand
    /// back its receiving end.
    pub fn subscribe(&mut self) -> mpsc::Receiver<SyncEvent> {
        let (tx, rx) = mpsc::channel();
        self.attach(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.sinks.len()
    }

    pub fn broadcast(&mut self, event: SyncEvent) {
        self.sinks.retain_mut(|sink| {
            let alive = sink.deliver(event);
            if !alive {
                debug!("Dropping disconnected sync sink");
            }
            alive
        });
    }
}

impl std::fmt::Debug for SyncBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncBroadcaster")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}
