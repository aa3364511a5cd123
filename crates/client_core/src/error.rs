//! User-facing classification of gateway failures.

use shared::error::GatewayError;

pub const CONNECTION_ERROR_MESSAGE: &str = "Connection error";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";
pub const STATUS_UPDATE_FAILED_PREFIX: &str = "Status update failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    Connection,
    Remote,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureContext {
    LoadBoards,
    LoadTasks,
    UpdateStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    category: FailureCategory,
    context: FailureContext,
    message: String,
}

impl Failure {
    pub fn from_gateway(context: FailureContext, err: &GatewayError) -> Self {
        let (category, detail) = match err {
            GatewayError::Connection(_) => {
                (FailureCategory::Connection, CONNECTION_ERROR_MESSAGE.to_string())
            }
            GatewayError::Remote { operation, message } => {
                let prefix = operation.error_prefix();
                let message = if message.trim().is_empty() {
                    UNKNOWN_ERROR_MESSAGE
                } else {
                    message.as_str()
                };
                (FailureCategory::Remote, format!("{prefix}: {message}"))
            }
            GatewayError::Decode(detail) if detail.trim().is_empty() => {
                (FailureCategory::Unknown, UNKNOWN_ERROR_MESSAGE.to_string())
            }
            GatewayError::Http { .. } | GatewayError::Decode(_) => {
                (FailureCategory::Unknown, err.to_string())
            }
        };

        let message = match context {
            FailureContext::UpdateStatus => format!("{STATUS_UPDATE_FAILED_PREFIX}: {detail}"),
            FailureContext::LoadBoards | FailureContext::LoadTasks => detail,
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> FailureCategory {
        self.category
    }

    pub fn context(&self) -> FailureContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_message(self) -> String {
        self.message
    }
}
