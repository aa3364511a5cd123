//! GraphQL wire records exchanged with the work-management API.
//!
//! Every nested field is optional on the wire: the remote service returns
//! `null` for missing substructures, so these records decode nulls and absent
//! keys to empty values and leave interpretation to the mapper.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{BoardId, ColumnId, ItemId};

pub const GET_BOARDS_QUERY: &str = "query GetBoards { boards { id name } }";

pub const GET_BOARD_ITEMS_QUERY: &str = "query GetBoardItems($boardIds: [ID!]) { \
boards(ids: $boardIds) { id name items_page { items { id name column_values { id text } } } } }";

pub const GET_BOARD_COLUMNS_QUERY: &str = "query GetBoardColumns($boardIds: [ID!]) { \
boards(ids: $boardIds) { columns { id title type settings_str } } }";

pub const CHANGE_TASK_STATUS_MUTATION: &str = "mutation ChangeTaskStatus(\
$boardId: ID!, $itemId: ID!, $columnId: String!, $value: JSON!) { \
change_column_value(board_id: $boardId, item_id: $itemId, column_id: $columnId, value: $value) { id } }";

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NoVariables {}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardIdsVariables {
    pub board_ids: Vec<BoardId>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeTaskStatusVariables {
    pub board_id: BoardId,
    pub item_id: ItemId,
    pub column_id: ColumnId,
    /// JSON text of a [`StatusLabelValue`].
    pub value: String,
}

/// Column value payload accepted by `change_column_value` for status columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLabelValue {
    pub label: String,
}

impl StatusLabelValue {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// JSON text sent as the mutation's `value` variable.
    pub fn to_json(&self) -> String {
        serde_json::json!({ "label": self.label }).to_string()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<GraphQlErrorRecord>,
}

impl<T> GraphQlResponse<T> {
    pub fn first_error_message(&self) -> Option<&str> {
        self.errors.first().map(|error| error.message.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphQlErrorRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardsData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub boards: Vec<Option<RawBoard>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawBoard {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardItemsData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub boards: Vec<Option<RawBoardWithItems>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawBoardWithItems {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub items_page: Option<RawItemsPage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawItemsPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Option<RawItem>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub column_values: Vec<Option<RawColumnValue>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawColumnValue {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardColumnsData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub boards: Vec<Option<RawBoardColumns>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawBoardColumns {
    #[serde(default, deserialize_with = "null_as_default")]
    pub columns: Vec<Option<RawColumn>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawColumn {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub column_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub settings_str: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeColumnValueData {
    #[serde(default)]
    pub change_column_value: Option<ChangedItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangedItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
}
