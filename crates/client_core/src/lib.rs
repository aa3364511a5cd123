//! Board and task synchronization core.
//!
//! Orchestrators pull boards, items and status columns through a
//! [`RemoteGateway`], map them into domain values, group tasks by status and
//! publish per-screen state that a render layer observes.

pub mod aggregator;
pub mod board_list;
pub mod board_tasks;
pub mod error;
pub mod gateway;
pub mod graphql;
pub mod mapper;
pub mod queries;
pub mod state;

pub use aggregator::{GroupedTasks, StatusGroup};
pub use board_list::BoardListOrchestrator;
pub use board_tasks::BoardTasksOrchestrator;
pub use error::{Failure, FailureCategory, FailureContext};
pub use gateway::{GatewayResult, RemoteGateway};
pub use graphql::{GatewaySettings, GatewaySetupError, GraphQlGateway};
pub use state::{BoardListState, BoardTasksState, ScreenPhase, ScreenState};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
