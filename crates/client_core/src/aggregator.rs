//! Status grouping, ordering and status-option extraction.

use std::{cmp::Ordering, collections::HashMap};

use serde::Deserialize;
use serde_json::{Map, Value};
use shared::{
    domain::{StatusCount, StatusOption, Task, DONE_LABEL, STATUS_COLUMN_TYPE},
    protocol::{RawBoardColumns, RawColumn},
};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusGroup {
    pub label: String,
    pub tasks: Vec<Task>,
}

/// Tasks grouped by status label, iterated in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedTasks {
    groups: Vec<StatusGroup>,
}

impl GroupedTasks {
    pub fn groups(&self) -> &[StatusGroup] {
        &self.groups
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusGroup> {
        self.groups.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.label.as_str())
    }

    pub fn get(&self, label: &str) -> Option<&[Task]> {
        self.groups
            .iter()
            .find(|group| group.label == label)
            .map(|group| group.tasks.as_slice())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn total_tasks(&self) -> usize {
        self.groups.iter().map(|group| group.tasks.len()).sum()
    }
}

impl IntoIterator for GroupedTasks {
    type Item = StatusGroup;
    type IntoIter = std::vec::IntoIter<StatusGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

fn is_done_label(label: &str) -> bool {
    label.eq_ignore_ascii_case(DONE_LABEL)
}

/// Done sorts last; everything else by case-sensitive label order.
fn compare_labels(left: &str, right: &str) -> Ordering {
    is_done_label(left)
        .cmp(&is_done_label(right))
        .then_with(|| left.cmp(right))
}

pub fn group_and_order(tasks: impl IntoIterator<Item = Task>) -> GroupedTasks {
    let mut index_by_label: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<StatusGroup> = Vec::new();

    for task in tasks {
        let label = task.group_label().to_string();
        match index_by_label.get(&label) {
            Some(&index) => groups[index].tasks.push(task),
            None => {
                index_by_label.insert(label.clone(), groups.len());
                groups.push(StatusGroup {
                    label,
                    tasks: vec![task],
                });
            }
        }
    }

    groups.sort_by(|left, right| compare_labels(&left.label, &right.label));
    GroupedTasks { groups }
}

pub fn summarize(grouped: &GroupedTasks) -> Vec<StatusCount> {
    grouped
        .iter()
        .map(|group| StatusCount {
            label: group.label.clone(),
            count: group.tasks.len(),
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct StatusColumnSettings {
    #[serde(default)]
    labels: Option<Map<String, Value>>,
}

/// First status column of the first board in a column listing.
pub fn status_column(boards: &[RawBoardColumns]) -> Option<&RawColumn> {
    boards
        .first()?
        .columns
        .iter()
        .flatten()
        .find(|column| column.column_type == STATUS_COLUMN_TYPE)
}

/// Status options declared by a status column, in declaration order.
///
/// Anything unexpected (no column, not a status column, unparseable settings,
/// `labels` missing or not an object) yields an empty list.
pub fn extract_status_options(column: Option<&RawColumn>) -> Vec<StatusOption> {
    match column {
        Some(column) if column.column_type == STATUS_COLUMN_TYPE => {
            parse_status_labels(&column.settings_str)
        }
        _ => Vec::new(),
    }
}

pub fn parse_status_labels(settings: &str) -> Vec<StatusOption> {
    let parsed = match serde_json::from_str::<StatusColumnSettings>(settings) {
        Ok(parsed) => parsed,
        Err(err) => {
            debug!(error = %err, "ignoring unparseable status column settings");
            return Vec::new();
        }
    };

    parsed
        .labels
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(_, value)| match value {
            Value::String(label) => Some(label),
            _ => None,
        })
        .map(|label| label.trim().to_string())
        .filter(|label| !label.is_empty())
        .map(|label| StatusOption { label })
        .collect()
}

#[cfg(test)]
#[path = "tests/aggregator_tests.rs"]
mod tests;
