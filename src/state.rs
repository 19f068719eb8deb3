//! View state: the single snapshot the presentation layer reads.
//!
//! DESIGN
//! ======
//! `ViewState` is immutable from the outside. Every transition builds a new
//! snapshot from the previous one (`begin_loading`, `select_member`,
//! `commit`) and `StateWriter` publishes it wholesale, so readers never see a
//! half-applied update.
//!
//! `StateWriter` owns the only `watch::Sender` and the latest request token.
//! The emitter calls `begin` synchronously inside `select`, so the loading
//! flag and member switch are visible before `select` returns; the pipeline
//! calls `commit_if_latest` when a fetch settles. Both run under one lock, so
//! a superseded run can never commit between a newer `begin` and its token.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

use crate::members::Member;
use crate::todos::ToDoItem;

/// Snapshot of loader state for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    is_loading: bool,
    current_member: Option<Member>,
    todos: Vec<ToDoItem>,
    error: Option<String>,
}

/// Result of one pipeline run, ready to commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LoadOutcome {
    pub(crate) todos: Vec<ToDoItem>,
    pub(crate) error: Option<String>,
}

impl ViewState {
    // =========================================================================
    // SELECTORS
    // =========================================================================

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn current_member(&self) -> Option<&Member> {
        self.current_member.as_ref()
    }

    #[must_use]
    pub fn todos(&self) -> &[ToDoItem] {
        &self.todos
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // =========================================================================
    // TRANSITIONS
    // =========================================================================

    pub(crate) fn begin_loading(&self) -> Self {
        Self { is_loading: true, ..self.clone() }
    }

    /// Switch to `member` and drop the previous member's to-dos.
    pub(crate) fn select_member(&self, member: Option<Member>) -> Self {
        Self { current_member: member, todos: Vec::new(), ..self.clone() }
    }

    pub(crate) fn commit(&self, outcome: LoadOutcome) -> Self {
        Self {
            is_loading: false,
            current_member: self.current_member.clone(),
            todos: outcome.todos,
            error: outcome.error,
        }
    }
}

// =============================================================================
// WRITER
// =============================================================================

pub(crate) struct StateWriter {
    state: watch::Sender<ViewState>,
    latest: Mutex<u64>,
}

impl StateWriter {
    pub(crate) fn new() -> (Arc<Self>, watch::Receiver<ViewState>) {
        let (state, rx) = watch::channel(ViewState::default());
        (Arc::new(Self { state, latest: Mutex::new(0) }), rx)
    }

    /// Start a run: commit the loading flag, then the member switch with a
    /// cleared list. Returns the run's token.
    pub(crate) fn begin(&self, member: Option<Member>) -> u64 {
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        *latest += 1;

        let loading = self.state.borrow().begin_loading();
        self.state.send_replace(loading);
        let selected = self.state.borrow().select_member(member);
        self.state.send_replace(selected);

        *latest
    }

    /// Commit `outcome` if `token` is still the latest run.
    ///
    /// Returns the latest token as the error when `token` was superseded.
    pub(crate) fn commit_if_latest(&self, token: u64, outcome: LoadOutcome) -> Result<(), u64> {
        let latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        if token != *latest {
            return Err(*latest);
        }

        let committed = self.state.borrow().commit(outcome);
        self.state.send_replace(committed);
        Ok(())
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
