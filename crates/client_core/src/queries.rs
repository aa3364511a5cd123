//! Gateway calls composed with the mapper and aggregator.

use std::slice;

use shared::domain::{BoardId, StatusOption, Task};

use crate::{
    aggregator::{self, GroupedTasks},
    gateway::{GatewayResult, RemoteGateway},
    mapper,
};

pub async fn fetch_board_tasks(
    gateway: &dyn RemoteGateway,
    board_id: &BoardId,
) -> GatewayResult<Vec<Task>> {
    let boards = gateway
        .list_board_items(slice::from_ref(board_id))
        .await?;
    Ok(boards
        .into_iter()
        .map(mapper::board_with_tasks_from_raw)
        .flat_map(|board| mapper::tasks_for_board(&board))
        .collect())
}

pub async fn fetch_grouped_tasks(
    gateway: &dyn RemoteGateway,
    board_id: &BoardId,
) -> GatewayResult<GroupedTasks> {
    let tasks = fetch_board_tasks(gateway, board_id).await?;
    Ok(aggregator::group_and_order(tasks))
}

pub async fn fetch_status_options(
    gateway: &dyn RemoteGateway,
    board_id: &BoardId,
) -> GatewayResult<Vec<StatusOption>> {
    let boards = gateway
        .list_status_column_config(slice::from_ref(board_id))
        .await?;
    Ok(aggregator::extract_status_options(
        aggregator::status_column(&boards),
    ))
}
