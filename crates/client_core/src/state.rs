//! Presentation state for the board list and board tasks screens.
//!
//! Each screen owns one [`ScreenState`]; the orchestrator is its only writer
//! and the render layer observes it through [`watch::Receiver`]s.

use shared::domain::{BoardSummary, StatusOption};
use tokio::sync::watch;

use crate::aggregator::GroupedTasks;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenPhase {
    Initial,
    Loading,
    Success,
    Error,
}

fn phase_of(is_loading: bool, error: Option<&String>, synced: bool) -> ScreenPhase {
    if is_loading {
        ScreenPhase::Loading
    } else if error.is_some() {
        ScreenPhase::Error
    } else if synced {
        ScreenPhase::Success
    } else {
        ScreenPhase::Initial
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardListState {
    is_loading: bool,
    boards: Vec<BoardSummary>,
    error: Option<String>,
    synced: bool,
}

impl Default for BoardListState {
    fn default() -> Self {
        Self {
            is_loading: true,
            boards: Vec::new(),
            error: None,
            synced: false,
        }
    }
}

impl BoardListState {
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn boards(&self) -> &[BoardSummary] {
        &self.boards
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> ScreenPhase {
        phase_of(self.is_loading, self.error.as_ref(), self.synced)
    }

    /// Previous boards stay visible while a refresh is running.
    pub(crate) fn begin_loading(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    pub(crate) fn succeed(&mut self, boards: Vec<BoardSummary>) {
        self.is_loading = false;
        self.boards = boards;
        self.error = None;
        self.synced = true;
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.is_loading = false;
        self.error = Some(message);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardTasksState {
    is_loading: bool,
    items_grouped_by_status: GroupedTasks,
    available_statuses: Vec<StatusOption>,
    error: Option<String>,
    synced: bool,
}

impl BoardTasksState {
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn items_grouped_by_status(&self) -> &GroupedTasks {
        &self.items_grouped_by_status
    }

    pub fn available_statuses(&self) -> &[StatusOption] {
        &self.available_statuses
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> ScreenPhase {
        phase_of(self.is_loading, self.error.as_ref(), self.synced)
    }

    pub(crate) fn begin_loading(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    pub(crate) fn succeed(&mut self, grouped: GroupedTasks, statuses: Vec<StatusOption>) {
        self.is_loading = false;
        self.items_grouped_by_status = grouped;
        self.available_statuses = statuses;
        self.error = None;
        self.synced = true;
    }

    /// Grouped tasks and statuses keep their previous values.
    pub(crate) fn fail(&mut self, message: String) {
        self.is_loading = false;
        self.error = Some(message);
    }

    /// Ends a load that will not deliver; data stays as it was.
    pub(crate) fn cancel_loading(&mut self) {
        self.is_loading = false;
    }

    pub(crate) fn clear_error(&mut self) {
        self.error = None;
    }

    /// A failed mutation only reports; it does not touch the loading flag.
    pub(crate) fn fail_update(&mut self, message: String) {
        self.error = Some(message);
    }
}

/// Single-writer state container observed by the render layer.
#[derive(Debug)]
pub struct ScreenState<S> {
    tx: watch::Sender<S>,
}

impl<S: Clone> ScreenState<S> {
    pub fn new(initial: S) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> S {
        self.tx.borrow().clone()
    }

    pub(crate) fn update(&self, apply: impl FnOnce(&mut S)) {
        self.tx.send_modify(apply);
    }

    /// Applies `apply` and notifies observers only when it returns `true`.
    pub(crate) fn update_if(&self, apply: impl FnOnce(&mut S) -> bool) -> bool {
        self.tx.send_if_modified(apply)
    }
}

impl<S: Clone + Default> Default for ScreenState<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_list_starts_loading() {
        let state = BoardListState::default();
        assert!(state.is_loading());
        assert!(state.boards().is_empty());
        assert_eq!(state.error(), None);
        assert_eq!(state.phase(), ScreenPhase::Loading);
    }

    #[test]
    fn board_tasks_starts_idle() {
        let state = BoardTasksState::default();
        assert!(!state.is_loading());
        assert!(state.items_grouped_by_status().is_empty());
        assert_eq!(state.phase(), ScreenPhase::Initial);
    }

    #[test]
    fn board_tasks_phases_follow_transitions() {
        let mut state = BoardTasksState::default();
        state.begin_loading();
        assert_eq!(state.phase(), ScreenPhase::Loading);

        state.fail("Connection error".into());
        assert_eq!(state.phase(), ScreenPhase::Error);

        state.begin_loading();
        assert_eq!(state.error(), None);
        state.succeed(GroupedTasks::default(), Vec::new());
        assert_eq!(state.phase(), ScreenPhase::Success);

        state.fail_update("Status update failed: Connection error".into());
        assert_eq!(state.phase(), ScreenPhase::Error);
        state.clear_error();
        assert_eq!(state.phase(), ScreenPhase::Success);
    }

    #[test]
    fn cancelled_load_returns_to_previous_phase() {
        let mut state = BoardTasksState::default();
        state.begin_loading();
        state.cancel_loading();
        assert_eq!(state.phase(), ScreenPhase::Initial);

        state.succeed(GroupedTasks::default(), Vec::new());
        state.begin_loading();
        state.cancel_loading();
        assert_eq!(state.phase(), ScreenPhase::Success);
    }

    #[test]
    fn subscribers_observe_updates() {
        let state = ScreenState::new(BoardListState::default());
        let mut rx = state.subscribe();
        state.update(|s| s.fail("boom".into()));
        assert!(rx.has_changed().expect("sender alive"));
        assert_eq!(rx.borrow_and_update().error(), Some("boom"));
        assert_eq!(state.snapshot().error(), Some("boom"));
    }

    #[test]
    fn rejected_conditional_update_is_not_published() {
        let state = ScreenState::new(BoardTasksState::default());
        let rx = state.subscribe();
        assert!(!state.update_if(|_| false));
        assert!(!rx.has_changed().expect("sender alive"));
    }
}
