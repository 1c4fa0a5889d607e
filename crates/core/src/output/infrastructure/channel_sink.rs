use crossbeam_channel::Sender;

use crate::output::domain::snapshot::BodyLanguageSnapshot;
use crate::output::domain::snapshot_sink::{SinkError, SnapshotSink};

/// Forwards snapshots to another thread over a crossbeam channel.
///
/// With a bounded channel, `send` blocks while the receiver is behind.
pub struct ChannelSink {
    sender: Sender<BodyLanguageSnapshot>,
}

impl ChannelSink {
    pub fn new(sender: Sender<BodyLanguageSnapshot>) -> Self {
        Self { sender }
    }
}

impl SnapshotSink for ChannelSink {
    fn send(&mut self, snapshot: &BodyLanguageSnapshot) -> Result<(), SinkError> {
        self.sender
            .send(snapshot.clone())
            .map_err(|_| SinkError::Disconnected)
    }
}
