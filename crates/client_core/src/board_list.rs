use std::sync::Arc;

use futures::future::try_join_all;
use shared::domain::{Board, BoardSummary};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    aggregator,
    error::{Failure, FailureContext},
    gateway::{GatewayResult, RemoteGateway},
    mapper, queries,
    state::{BoardListState, ScreenState},
};

/// Drives the board list screen: every board with its task count per status.
pub struct BoardListOrchestrator {
    gateway: Arc<dyn RemoteGateway>,
    state: ScreenState<BoardListState>,
}

impl BoardListOrchestrator {
    pub fn new(gateway: Arc<dyn RemoteGateway>) -> Self {
        Self {
            gateway,
            state: ScreenState::new(BoardListState::default()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<BoardListState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> BoardListState {
        self.state.snapshot()
    }

    /// Reloads all boards. On failure the previously shown boards are kept.
    pub async fn fetch_boards(&self) {
        self.state.update(BoardListState::begin_loading);
        debug!("fetching boards");

        match self.load_summaries().await {
            Ok(boards) => {
                info!(boards = boards.len(), "board list refreshed");
                self.state.update(|state| state.succeed(boards));
            }
            Err(err) => {
                let failure = Failure::from_gateway(FailureContext::LoadBoards, &err);
                warn!(
                    error = %err,
                    category = ?failure.category(),
                    context = ?failure.context(),
                    "board list refresh failed"
                );
                self.state.update(|state| state.fail(failure.into_message()));
            }
        }
    }

    async fn load_summaries(&self) -> GatewayResult<Vec<BoardSummary>> {
        let boards: Vec<Board> = self
            .gateway
            .list_boards()
            .await?
            .into_iter()
            .map(mapper::board_from_raw)
            .collect();

        // try_join_all yields results in input order, not completion order.
        try_join_all(boards.into_iter().map(|board| self.summarize_board(board))).await
    }

    async fn summarize_board(&self, board: Board) -> GatewayResult<BoardSummary> {
        let grouped = queries::fetch_grouped_tasks(self.gateway.as_ref(), &board.id).await?;
        debug!(board_id = %board.id, tasks = grouped.total_tasks(), "board summarized");
        Ok(BoardSummary {
            id: board.id,
            name: board.name,
            status_counts: aggregator::summarize(&grouped),
        })
    }
}

#[cfg(test)]
#[path = "tests/board_list_tests.rs"]
mod tests;
