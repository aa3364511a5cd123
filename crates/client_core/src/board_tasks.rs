use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use shared::{
    domain::{BoardId, ColumnId, ItemId},
    protocol::StatusLabelValue,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    error::{Failure, FailureContext},
    gateway::RemoteGateway,
    queries,
    state::{BoardTasksState, ScreenState},
};

/// Drives the board tasks screen: tasks grouped by status plus the board's
/// status options, and status changes.
pub struct BoardTasksOrchestrator {
    gateway: Arc<dyn RemoteGateway>,
    state: ScreenState<BoardTasksState>,
    load_generation: AtomicU64,
}

impl BoardTasksOrchestrator {
    pub fn new(gateway: Arc<dyn RemoteGateway>) -> Self {
        Self {
            gateway,
            state: ScreenState::new(BoardTasksState::default()),
            load_generation: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<BoardTasksState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> BoardTasksState {
        self.state.snapshot()
    }

    /// Loads tasks and status options concurrently; both must succeed.
    ///
    /// When a newer load has started before this one completes, this result
    /// is dropped so it cannot overwrite fresher state. Dropping the latest
    /// load before it settles ends the loading phase and keeps prior data.
    pub async fn load_tasks(&self, board_id: &BoardId) {
        let generation = self.load_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.update(BoardTasksState::begin_loading);
        debug!(board_id = %board_id, generation, "loading board tasks");
        let mut pending = PendingLoad {
            orchestrator: self,
            generation,
            settled: false,
        };

        let gateway = self.gateway.as_ref();
        let result = futures::try_join!(
            queries::fetch_status_options(gateway, board_id),
            queries::fetch_grouped_tasks(gateway, board_id),
        );

        let applied = self.state.update_if(|state| {
            if self.load_generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            match result {
                Ok((statuses, grouped)) => {
                    info!(
                        board_id = %board_id,
                        groups = grouped.len(),
                        statuses = statuses.len(),
                        "board tasks loaded"
                    );
                    state.succeed(grouped, statuses);
                }
                Err(err) => {
                    let failure = Failure::from_gateway(FailureContext::LoadTasks, &err);
                    warn!(
                        board_id = %board_id,
                        error = %err,
                        category = ?failure.category(),
                        "board tasks load failed"
                    );
                    state.fail(failure.into_message());
                }
            }
            true
        });
        pending.settled = true;

        if !applied {
            debug!(board_id = %board_id, generation, "discarded stale board tasks result");
        }
    }

    /// Sets a task's status, then reloads the board from the service.
    pub async fn change_status(
        &self,
        board_id: &BoardId,
        task_id: &ItemId,
        column_id: &ColumnId,
        new_status: &str,
    ) {
        self.state.update(BoardTasksState::clear_error);
        let value = StatusLabelValue::new(new_status).to_json();

        match self
            .gateway
            .set_task_status(board_id, task_id, column_id, &value)
            .await
        {
            Ok(()) => {
                info!(board_id = %board_id, task_id = %task_id, status = new_status, "task status changed");
                self.load_tasks(board_id).await;
            }
            Err(err) => {
                let failure = Failure::from_gateway(FailureContext::UpdateStatus, &err);
                warn!(
                    board_id = %board_id,
                    task_id = %task_id,
                    error = %err,
                    category = ?failure.category(),
                    context = ?failure.context(),
                    "task status change failed"
                );
                self.state
                    .update(|state| state.fail_update(failure.into_message()));
            }
        }
    }
}

struct PendingLoad<'a> {
    orchestrator: &'a BoardTasksOrchestrator,
    generation: u64,
    settled: bool,
}

impl Drop for PendingLoad<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let generation = self.generation;
        let latest = &self.orchestrator.load_generation;
        let cancelled = self.orchestrator.state.update_if(|state| {
            if latest.load(Ordering::SeqCst) != generation || !state.is_loading() {
                return false;
            }
            state.cancel_loading();
            true
        });
        if cancelled {
            debug!(generation, "board tasks load dropped before completion");
        }
    }
}

#[cfg(test)]
#[path = "tests/board_tasks_tests.rs"]
mod tests;
