use std::fmt;

use serde::{Deserialize, Serialize};

/// Column id that marks an item's status value.
pub const STATUS_COLUMN_ID: &str = "status";
/// Column type reported for status columns in a board's column listing.
pub const STATUS_COLUMN_TYPE: &str = "status";
/// Group label used for tasks whose status text is blank.
pub const NO_STATUS_LABEL: &str = "No Status";
/// Label of the group that always sorts last (compared case-insensitively).
pub const DONE_LABEL: &str = "Done";

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

id_newtype!(BoardId);
id_newtype!(ItemId);
id_newtype!(ColumnId);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardWithTasks {
    pub id: BoardId,
    pub name: String,
    pub items: Vec<BoardItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardItem {
    pub id: ItemId,
    pub name: String,
    pub column_values: Vec<ColumnValue>,
}

impl BoardItem {
    /// First column value carrying the given column id.
    pub fn column(&self, column_id: &str) -> Option<&ColumnValue> {
        self.column_values
            .iter()
            .find(|value| value.id.as_str() == column_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnValue {
    pub id: ColumnId,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: ItemId,
    pub name: String,
    /// Raw status text; empty when the status column carries no value.
    pub status: String,
    pub column_id: ColumnId,
    pub board_id: BoardId,
}

impl Task {
    /// Label of the status group this task belongs to.
    pub fn group_label(&self) -> &str {
        if self.status.trim().is_empty() {
            NO_STATUS_LABEL
        } else {
            &self.status
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusOption {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub label: String,
    pub count: usize,
}

/// Board row shown on the list screen: the board plus its task count per status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSummary {
    pub id: BoardId,
    pub name: String,
    pub status_counts: Vec<StatusCount>,
}

impl BoardSummary {
    pub fn count_for(&self, label: &str) -> Option<usize> {
        self.status_counts
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.count)
    }

    pub fn total_tasks(&self) -> usize {
        self.status_counts.iter().map(|entry| entry.count).sum()
    }
}
