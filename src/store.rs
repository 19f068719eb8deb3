//! Public entry point wiring directory, source, and pipeline.
//!
//! DESIGN
//! ======
//! Collaborators are passed in explicitly. The store keeps the selection
//! emitter and a watch receiver; the emitter and the pipeline actor share
//! the only writer. Readers get snapshots or a subscription, never a way to
//! write.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::{ConfigError, TodoConfig};
use crate::members::{Member, MemberDirectory};
use crate::pipeline::{Pipeline, PipelineSettings};
use crate::selection::SelectionEmitter;
use crate::state::{StateWriter, ViewState};
use crate::todos::{HttpTodoSource, ToDoItem, TodoSource};

pub struct TodoStore {
    directory: Arc<dyn MemberDirectory>,
    emitter: SelectionEmitter,
    state: watch::Receiver<ViewState>,
    pipeline: JoinHandle<()>,
}

impl TodoStore {
    /// Start the pipeline actor. Must be called inside a Tokio runtime.
    #[must_use]
    pub fn spawn(
        directory: Arc<dyn MemberDirectory>,
        source: Arc<dyn TodoSource>,
        settings: PipelineSettings,
    ) -> Self {
        let (writer, state) = StateWriter::new();
        let (emitter, selections) = SelectionEmitter::channel(Arc::clone(&directory), Arc::clone(&writer));
        let pipeline = Pipeline::new(source, settings, writer).spawn(selections);
        Self { directory, emitter, state, pipeline }
    }

    /// Start a store backed by [`HttpTodoSource`] for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn from_config(directory: Arc<dyn MemberDirectory>, config: &TodoConfig) -> Result<Self, ConfigError> {
        let source = HttpTodoSource::from_config(config)?;
        Ok(Self::spawn(directory, Arc::new(source), PipelineSettings::from(config)))
    }

    /// Select a member; triggers a fresh load even if already selected.
    ///
    /// The loading flag and member switch are visible as soon as this returns.
    pub fn select(&self, member_id: i64) {
        self.emitter.select(member_id);
    }

    /// A cloneable handle for selecting from elsewhere (UI callbacks, tasks).
    #[must_use]
    pub fn emitter(&self) -> SelectionEmitter {
        self.emitter.clone()
    }

    /// The roster to choose from.
    #[must_use]
    pub fn members(&self) -> Vec<Member> {
        self.directory.members()
    }

    // =========================================================================
    // SELECTORS
    // =========================================================================

    #[must_use]
    pub fn snapshot(&self) -> ViewState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    #[must_use]
    pub fn current_member(&self) -> Option<Member> {
        self.state.borrow().current_member().cloned()
    }

    #[must_use]
    pub fn todos(&self) -> Vec<ToDoItem> {
        self.state.borrow().todos().to_vec()
    }

    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.state.borrow().error_message().map(str::to_string)
    }

    /// Receiver notified on every committed transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        let mut rx = self.state.clone();
        rx.mark_unchanged();
        rx
    }
}

impl Drop for TodoStore {
    fn drop(&mut self) {
        self.pipeline.abort();
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
