//! Publisher seam for outbound records
//!
//! The engine never talks to a transport directly; it hands each
//! [`SyncRecord`] to a [`SyncPublisher`] and moves on. Publishing is
//! fire-and-forget: no publisher method blocks, observes delivery, or
//! reports failure back into the engine.

use crate::diff::ChangeRecord;
use crate::sync::SyncRecord;
use std::sync::mpsc;
use tracing::warn;

/// Outbound channel for sync records
pub trait SyncPublisher {
    /// Hand one record to the transport
    fn publish(&mut self, record: SyncRecord);
}

/// Publisher that drops every record
///
/// Stands in when a document has no remote peers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPublisher;

impl SyncPublisher for NullPublisher {
    fn publish(&mut self, _record: SyncRecord) {}
}

/// Publisher that collects records in memory
///
/// Useful for batching records before a flush, and for asserting on
/// published output in tests.
#[derive(Debug, Clone, Default)]
pub struct BufferPublisher {
    records: Vec<SyncRecord>,
}

impl BufferPublisher {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Records published so far, in order
    pub fn records(&self) -> &[SyncRecord] {
        &self.records
    }

    /// Drain the buffer
    pub fn take(&mut self) -> Vec<SyncRecord> {
        std::mem::take(&mut self.records)
    }
}

impl SyncPublisher for BufferPublisher {
    fn publish(&mut self, record: SyncRecord) {
        self.records.push(record);
    }
}

/// Publisher that forwards records over an mpsc channel
///
/// The transport side owns the receiver and drains it at its own pace.
#[derive(Debug)]
pub struct ChannelPublisher {
    sender: mpsc::Sender<SyncRecord>,
}

impl ChannelPublisher {
    /// Create a publisher and the receiver that drains it
    pub fn new() -> (Self, mpsc::Receiver<SyncRecord>) {
        let (sender, receiver) = mpsc::channel();
        (Self { sender }, receiver)
    }
}

impl SyncPublisher for ChannelPublisher {
    fn publish(&mut self, record: SyncRecord) {
        // A dropped receiver just means nobody is listening anymore.
        let _ = self.sender.send(record);
    }
}

/// Convert and publish a batch of diff records
///
/// Records that fail to serialize are dropped with a warning; publishing
/// never aborts a state transition.
pub(crate) fn publish_changes(
    publisher: &mut dyn SyncPublisher,
    document_id: &str,
    changes: Vec<ChangeRecord>,
) {
    for change in changes {
        match SyncRecord::from_change(change, document_id) {
            Ok(record) => publisher.publish(record),
            Err(e) => warn!("dropping unserializable sync record: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::ChangeRecord;

    #[test]
    fn test_buffer_publisher_collects_in_order() {
        let mut publisher = BufferPublisher::new();
        publish_changes(
            &mut publisher,
            "doc-1",
            vec![
                ChangeRecord::NodeDeleted("a".to_string()),
                ChangeRecord::EdgeDeleted("e1".to_string()),
            ],
        );

        let ids: Vec<&str> = publisher.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "e1"]);

        assert_eq!(publisher.take().len(), 2);
        assert!(publisher.records().is_empty());
    }

    #[test]
    fn test_channel_publisher_forwards_records() {
        let (mut publisher, receiver) = ChannelPublisher::new();
        publish_changes(
            &mut publisher,
            "doc-1",
            vec![ChangeRecord::NodeDeleted("a".to_string())],
        );

        let received: Vec<SyncRecord> = receiver.try_iter().collect();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].id, "a");
    }

    #[test]
    fn test_channel_publisher_ignores_dropped_receiver() {
        let (mut publisher, receiver) = ChannelPublisher::new();
        drop(receiver);

        // Must not panic.
        publish_changes(
            &mut publisher,
            "doc-1",
            vec![ChangeRecord::NodeDeleted("a".to_string())],
        );
    }
}
