//! Load pipeline — turns member selections into committed view snapshots.
//!
//! DESIGN
//! ======
//! The emitter runs the synchronous half of a selection: it takes the next
//! request token from `StateWriter`, commits the loading flag, and commits
//! the resolved member with a cleared list before `select` returns. This
//! actor runs the rest. It consumes two queues: tokened selections from the
//! emitter, and completions from fetch tasks it spawned. A completion
//! commits only if its token is still the latest, so a superseded run never
//! touches state even though its request is allowed to finish.
//!
//! Per selection:
//! 1. commit `is_loading = true` (emitter)
//! 2. resolve the member and clear the to-do list, in one commit (emitter)
//! 3. fetch and normalize titles (failures become an error message)
//! 4. wait the fixed commit delay
//! 5. commit to-dos, error, and `is_loading = false` together

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::config::TodoConfig;
use crate::selection::Selected;
use crate::state::{LoadOutcome, StateWriter};
use crate::todos::{TodoSource, normalize_titles};

/// Timing and normalization knobs for the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Held after every fetch so the loading indicator stays observable.
    pub commit_delay: Duration,
    pub title_max_chars: usize,
}

impl From<&TodoConfig> for PipelineSettings {
    fn from(config: &TodoConfig) -> Self {
        Self { commit_delay: config.commit_delay, title_max_chars: config.title_max_chars }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from(&TodoConfig::default())
    }
}

struct Completion {
    token: u64,
    member_id: i64,
    outcome: LoadOutcome,
}

pub(crate) struct Pipeline {
    source: Arc<dyn TodoSource>,
    settings: PipelineSettings,
    writer: Arc<StateWriter>,
}

impl Pipeline {
    pub(crate) fn new(source: Arc<dyn TodoSource>, settings: PipelineSettings, writer: Arc<StateWriter>) -> Self {
        Self { source, settings, writer }
    }

    /// Spawn the actor. It stops once every emitter handle is dropped.
    pub(crate) fn spawn(self, selections: mpsc::UnboundedReceiver<Selected>) -> JoinHandle<()> {
        tokio::spawn(self.run(selections))
    }

    async fn run(self, mut selections: mpsc::UnboundedReceiver<Selected>) {
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();

        loop {
            tokio::select! {
                selected = selections.recv() => {
                    let Some(selected) = selected else { break };
                    self.start(selected, done_tx.clone());
                }
                Some(done) = done_rx.recv() => {
                    self.finish(done);
                }
            }
        }

        debug!("load pipeline stopped");
    }

    fn start(&self, selected: Selected, done: mpsc::UnboundedSender<Completion>) {
        let Selected { token, member_id } = selected;
        debug!(member_id, token, "fetching to-dos");

        let source = Arc::clone(&self.source);
        let settings = self.settings;
        tokio::spawn(async move {
            let outcome = load(source.as_ref(), member_id, settings.title_max_chars).await;
            tokio::time::sleep(settings.commit_delay).await;
            // Send fails only after the actor has stopped.
            let _ = done.send(Completion { token, member_id, outcome });
        });
    }

    fn finish(&self, done: Completion) {
        let Completion { token, member_id, outcome } = done;
        let count = outcome.todos.len();
        let failed = outcome.error.is_some();

        match self.writer.commit_if_latest(token, outcome) {
            Ok(()) => debug!(member_id, token, count, failed, "committed to-dos"),
            Err(latest) => debug!(member_id, token, latest, "discarding superseded result"),
        }
    }
}

async fn load(source: &dyn TodoSource, member_id: i64, title_max_chars: usize) -> LoadOutcome {
    match source.fetch_todos(member_id).await {
        Ok(items) => LoadOutcome { todos: normalize_titles(items, title_max_chars), error: None },
        Err(e) => {
            error!(member_id, error = ?e, "to-do fetch failed");
            LoadOutcome { todos: Vec::new(), error: Some(e.to_string()) }
        }
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
