//! Raw wire records to domain values.
//!
//! All functions are total: null list entries are skipped and absent nested
//! collections become empty.

use shared::{
    domain::{
        Board, BoardId, BoardItem, BoardWithTasks, ColumnId, ColumnValue, ItemId, Task,
        STATUS_COLUMN_ID,
    },
    protocol::{RawBoard, RawBoardWithItems, RawColumnValue, RawItem},
};

pub fn board_from_raw(raw: RawBoard) -> Board {
    Board {
        id: BoardId(raw.id),
        name: raw.name,
    }
}

pub fn board_with_tasks_from_raw(raw: RawBoardWithItems) -> BoardWithTasks {
    let items = raw
        .items_page
        .map(|page| page.items)
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .map(item_from_raw)
        .collect();

    BoardWithTasks {
        id: BoardId(raw.id),
        name: raw.name,
        items,
    }
}

pub fn item_from_raw(raw: RawItem) -> BoardItem {
    BoardItem {
        id: ItemId(raw.id),
        name: raw.name,
        column_values: raw
            .column_values
            .into_iter()
            .flatten()
            .map(column_value_from_raw)
            .collect(),
    }
}

fn column_value_from_raw(raw: RawColumnValue) -> ColumnValue {
    ColumnValue {
        id: ColumnId(raw.id),
        text: raw.text,
    }
}

/// Tasks of a board: one per item whose `status` column has a text value.
/// An empty text still counts and groups under `No Status`.
pub fn tasks_for_board(board: &BoardWithTasks) -> Vec<Task> {
    board
        .items
        .iter()
        .filter_map(|item| task_from_item(&board.id, item))
        .collect()
}

pub fn task_from_item(board_id: &BoardId, item: &BoardItem) -> Option<Task> {
    let status_column = item.column(STATUS_COLUMN_ID)?;
    let status = status_column.text.clone()?;
    Some(Task {
        id: item.id.clone(),
        name: item.name.clone(),
        status,
        column_id: status_column.id.clone(),
        board_id: board_id.clone(),
    })
}

#[cfg(test)]
#[path = "tests/mapper_tests.rs"]
mod tests;
