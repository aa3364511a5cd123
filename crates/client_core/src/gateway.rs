use async_trait::async_trait;
use shared::{
    domain::{BoardId, ColumnId, ItemId},
    error::GatewayError,
    protocol::{RawBoard, RawBoardColumns, RawBoardWithItems},
};

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Remote data source the orchestrators talk to.
///
/// Implementations must be reentrant: orchestrators share one handle and
/// issue concurrent calls through it.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    async fn list_boards(&self) -> GatewayResult<Vec<RawBoard>>;

    /// Boards with their items. A response carrying an error list is a
    /// failure even when partial data is present.
    async fn list_board_items(&self, board_ids: &[BoardId])
        -> GatewayResult<Vec<RawBoardWithItems>>;

    async fn list_status_column_config(
        &self,
        board_ids: &[BoardId],
    ) -> GatewayResult<Vec<RawBoardColumns>>;

    /// Sets a status column. `value` is the JSON text `{"label": "<status>"}`.
    async fn set_task_status(
        &self,
        board_id: &BoardId,
        item_id: &ItemId,
        column_id: &ColumnId,
        value: &str,
    ) -> GatewayResult<()>;
}
