//! Feeds selected member ids into the load pipeline.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::members::MemberDirectory;
use crate::state::StateWriter;

/// A selection already committed as loading, waiting for its fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Selected {
    pub(crate) token: u64,
    pub(crate) member_id: i64,
}

/// Cloneable handle for pushing member selections.
///
/// Every call emits, including repeats of the current member; the pipeline
/// decides which run wins.
#[derive(Clone)]
pub struct SelectionEmitter {
    directory: Arc<dyn MemberDirectory>,
    writer: Arc<StateWriter>,
    tx: mpsc::UnboundedSender<Selected>,
}

impl SelectionEmitter {
    pub(crate) fn channel(
        directory: Arc<dyn MemberDirectory>,
        writer: Arc<StateWriter>,
    ) -> (Self, mpsc::UnboundedReceiver<Selected>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { directory, writer, tx }, rx)
    }

    /// Emit `member_id` to the pipeline.
    ///
    /// The loading flag, the resolved member, and the cleared to-do list are
    /// committed before this returns; the fetch runs on the pipeline task.
    pub fn select(&self, member_id: i64) {
        if self.tx.is_closed() {
            debug!(member_id, "selection dropped: pipeline stopped");
            return;
        }

        let member = self.directory.lookup(member_id);
        if member.is_none() {
            debug!(member_id, "member not in directory");
        }
        let token = self.writer.begin(member);
        debug!(member_id, token, "selection emitted");

        if self.tx.send(Selected { token, member_id }).is_err() {
            debug!(member_id, token, "selection dropped: pipeline stopped");
        }
    }

    /// `true` once the pipeline has stopped listening.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[cfg(test)]
#[path = "selection_test.rs"]
mod tests;
