use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use shared::{
    domain::{BoardId, ColumnId, ItemId, STATUS_COLUMN_ID},
    error::GatewayError,
    protocol::{
        RawBoard, RawBoardColumns, RawBoardWithItems, RawColumn, RawColumnValue, RawItem,
        RawItemsPage, StatusLabelValue,
    },
};

use crate::gateway::{GatewayResult, RemoteGateway};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum GatewayCall {
    ListBoards,
    ListBoardItems(Vec<String>),
    ListStatusColumnConfig(Vec<String>),
    SetTaskStatus {
        board_id: String,
        item_id: String,
        column_id: String,
        value: String,
    },
}

#[derive(Default)]
struct FakeData {
    boards: Vec<RawBoard>,
    items: HashMap<String, Vec<RawItem>>,
    columns: HashMap<String, Vec<RawColumn>>,
    items_delay: HashMap<String, Duration>,
    list_boards_error: Option<GatewayError>,
    board_items_errors: HashMap<String, GatewayError>,
    columns_error: Option<GatewayError>,
    set_status_error: Option<GatewayError>,
}

/// In-memory gateway that behaves like the remote service: status changes
/// are applied to its items, so a reload observes them.
#[derive(Default)]
pub(crate) struct FakeGateway {
    data: Mutex<FakeData>,
    calls: Mutex<Vec<GatewayCall>>,
}

pub(crate) fn raw_item(id: &str, name: &str, status: Option<&str>) -> RawItem {
    raw_item_with_columns(
        id,
        name,
        vec![RawColumnValue {
            id: STATUS_COLUMN_ID.to_string(),
            text: status.map(str::to_string),
        }],
    )
}

pub(crate) fn raw_item_with_columns(id: &str, name: &str, columns: Vec<RawColumnValue>) -> RawItem {
    RawItem {
        id: id.to_string(),
        name: name.to_string(),
        column_values: columns.into_iter().map(Some).collect(),
    }
}

pub(crate) fn status_column(settings_str: &str) -> RawColumn {
    RawColumn {
        id: "status".to_string(),
        title: "Status".to_string(),
        column_type: "status".to_string(),
        settings_str: settings_str.to_string(),
    }
}

impl FakeGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub(crate) fn with_board(self, id: &str, name: &str) -> Self {
        self.data.lock().expect("fake data").boards.push(RawBoard {
            id: id.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub(crate) fn with_item(self, board_id: &str, item: RawItem) -> Self {
        self.data
            .lock()
            .expect("fake data")
            .items
            .entry(board_id.to_string())
            .or_default()
            .push(item);
        self
    }

    pub(crate) fn with_task(self, board_id: &str, item_id: &str, status: Option<&str>) -> Self {
        let name = format!("Task {item_id}");
        self.with_item(board_id, raw_item(item_id, &name, status))
    }

    pub(crate) fn with_column(self, board_id: &str, column: RawColumn) -> Self {
        self.data
            .lock()
            .expect("fake data")
            .columns
            .entry(board_id.to_string())
            .or_default()
            .push(column);
        self
    }

    pub(crate) fn with_status_labels(self, board_id: &str, settings_str: &str) -> Self {
        self.with_column(board_id, status_column(settings_str))
    }

    pub(crate) fn with_items_delay(self, board_id: &str, delay: Duration) -> Self {
        self.set_items_delay(board_id, delay);
        self
    }

    pub(crate) fn failing_list_boards(self, err: GatewayError) -> Self {
        self.data.lock().expect("fake data").list_boards_error = Some(err);
        self
    }

    pub(crate) fn failing_board_items(self, board_id: &str, err: GatewayError) -> Self {
        self.set_board_items_error(board_id, Some(err));
        self
    }

    pub(crate) fn failing_status_columns(self, err: GatewayError) -> Self {
        self.data.lock().expect("fake data").columns_error = Some(err);
        self
    }

    pub(crate) fn failing_set_status(self, err: GatewayError) -> Self {
        self.data.lock().expect("fake data").set_status_error = Some(err);
        self
    }

    pub(crate) fn set_items_delay(&self, board_id: &str, delay: Duration) {
        self.data
            .lock()
            .expect("fake data")
            .items_delay
            .insert(board_id.to_string(), delay);
    }

    pub(crate) fn set_board_items_error(&self, board_id: &str, err: Option<GatewayError>) {
        let mut data = self.data.lock().expect("fake data");
        match err {
            Some(err) => {
                data.board_items_errors.insert(board_id.to_string(), err);
            }
            None => {
                data.board_items_errors.remove(board_id);
            }
        }
    }

    pub(crate) fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().expect("fake calls").clone()
    }

    pub(crate) fn count_calls(&self, matches: impl Fn(&GatewayCall) -> bool) -> usize {
        self.calls().iter().filter(|call| matches(call)).count()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().expect("fake calls").push(call);
    }
}

fn ids(board_ids: &[BoardId]) -> Vec<String> {
    board_ids.iter().map(|id| id.0.clone()).collect()
}

#[async_trait]
impl RemoteGateway for FakeGateway {
    async fn list_boards(&self) -> GatewayResult<Vec<RawBoard>> {
        self.record(GatewayCall::ListBoards);
        let data = self.data.lock().expect("fake data");
        if let Some(err) = &data.list_boards_error {
            return Err(err.clone());
        }
        Ok(data.boards.clone())
    }

    async fn list_board_items(
        &self,
        board_ids: &[BoardId],
    ) -> GatewayResult<Vec<RawBoardWithItems>> {
        self.record(GatewayCall::ListBoardItems(ids(board_ids)));

        let delay = {
            let data = self.data.lock().expect("fake data");
            board_ids
                .iter()
                .filter_map(|id| data.items_delay.get(id.as_str()).copied())
                .max()
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let data = self.data.lock().expect("fake data");
        let mut boards = Vec::new();
        for board_id in board_ids {
            if let Some(err) = data.board_items_errors.get(board_id.as_str()) {
                return Err(err.clone());
            }
            let name = data
                .boards
                .iter()
                .find(|board| board.id == board_id.0)
                .map(|board| board.name.clone());
            let items = data.items.get(board_id.as_str());
            if name.is_none() && items.is_none() {
                continue;
            }
            boards.push(RawBoardWithItems {
                id: board_id.0.clone(),
                name: name.unwrap_or_default(),
                items_page: Some(RawItemsPage {
                    items: items.cloned().unwrap_or_default().into_iter().map(Some).collect(),
                }),
            });
        }
        Ok(boards)
    }

    async fn list_status_column_config(
        &self,
        board_ids: &[BoardId],
    ) -> GatewayResult<Vec<RawBoardColumns>> {
        self.record(GatewayCall::ListStatusColumnConfig(ids(board_ids)));
        let data = self.data.lock().expect("fake data");
        if let Some(err) = &data.columns_error {
            return Err(err.clone());
        }
        Ok(board_ids
            .iter()
            .filter_map(|id| data.columns.get(id.as_str()))
            .map(|columns| RawBoardColumns {
                columns: columns.iter().cloned().map(Some).collect(),
            })
            .collect())
    }

    async fn set_task_status(
        &self,
        board_id: &BoardId,
        item_id: &ItemId,
        column_id: &ColumnId,
        value: &str,
    ) -> GatewayResult<()> {
        self.record(GatewayCall::SetTaskStatus {
            board_id: board_id.0.clone(),
            item_id: item_id.0.clone(),
            column_id: column_id.0.clone(),
            value: value.to_string(),
        });

        let mut data = self.data.lock().expect("fake data");
        if let Some(err) = &data.set_status_error {
            return Err(err.clone());
        }
        let label = serde_json::from_str::<StatusLabelValue>(value)
            .map_err(|err| GatewayError::Decode(err.to_string()))?
            .label;
        let item = data
            .items
            .get_mut(board_id.as_str())
            .and_then(|items| items.iter_mut().find(|item| item.id == item_id.0));
        if let Some(item) = item {
            for column in item.column_values.iter_mut().flatten() {
                if column.id == column_id.0 {
                    column.text = Some(label.clone());
                }
            }
        }
        Ok(())
    }
}
