//! Sync boundary: wire records, the publisher seam, and peer-side application
//!
//! The engine's only collaboration duty is turning state transitions into
//! minimal, idempotent [`SyncRecord`]s and handing them to a
//! [`SyncPublisher`]. What transport carries them is not this crate's
//! concern; [`apply_record`] is the matching receive side any peer can run.

mod apply;
mod publish;
mod record;

pub use apply::apply_record;
pub use publish::{BufferPublisher, ChannelPublisher, NullPublisher, SyncPublisher};
pub use record::{RecordAction, RecordKind, SyncRecord};

pub(crate) use publish::publish_changes;
