use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    /// Prefix used when reporting a remote error for this kind of operation.
    pub fn error_prefix(&self) -> &'static str {
        match self {
            Self::Query => "GraphQL error",
            Self::Mutation => "Mutation error",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => f.write_str("query"),
            Self::Mutation => f.write_str("mutation"),
        }
    }
}

/// Failure reported by a remote gateway call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The request never produced a response (refused, DNS, timeout, reset).
    #[error("connection failure: {0}")]
    Connection(String),
    /// The service answered with an explicit `errors` payload.
    #[error("{}: {message}", remote_prefix(.operation))]
    Remote {
        operation: OperationKind,
        message: String,
    },
    #[error("unexpected HTTP status {status}")]
    Http { status: u16 },
    /// The response body could not be decoded at all.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn remote(operation: OperationKind, message: impl Into<String>) -> Self {
        Self::Remote {
            operation,
            message: message.into(),
        }
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

fn remote_prefix(operation: &OperationKind) -> &'static str {
    operation.error_prefix()
}
