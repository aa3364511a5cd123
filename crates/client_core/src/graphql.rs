use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use shared::{
    domain::{BoardId, ColumnId, ItemId},
    error::{GatewayError, OperationKind},
    protocol::{
        BoardColumnsData, BoardIdsVariables, BoardItemsData, BoardsData, ChangeColumnValueData,
        ChangeTaskStatusVariables, GraphQlRequest, GraphQlResponse, NoVariables, RawBoard,
        RawBoardColumns, RawBoardWithItems, CHANGE_TASK_STATUS_MUTATION, GET_BOARDS_QUERY,
        GET_BOARD_COLUMNS_QUERY, GET_BOARD_ITEMS_QUERY,
    },
};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::gateway::{GatewayResult, RemoteGateway};

pub const DEFAULT_ENDPOINT: &str = "https://api.monday.com/v2";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const API_VERSION_HEADER: &str = "API-Version";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewaySettings {
    pub endpoint: String,
    pub api_token: String,
    #[serde(default)]
    pub api_version: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            api_token: String::new(),
            api_version: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Error)]
pub enum GatewaySetupError {
    #[error("invalid endpoint url '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        source: url::ParseError,
    },
    #[error("endpoint '{0}' must use http:// or https://")]
    UnsupportedScheme(String),
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

pub fn parse_endpoint(endpoint: &str) -> Result<Url, GatewaySetupError> {
    let url = Url::parse(endpoint.trim()).map_err(|source| GatewaySetupError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(GatewaySetupError::UnsupportedScheme(endpoint.to_string())),
    }
}

/// [`RemoteGateway`] backed by the service's HTTP GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct GraphQlGateway {
    http: Client,
    endpoint: Url,
    api_token: String,
    api_version: Option<String>,
}

impl GraphQlGateway {
    pub fn new(settings: &GatewaySettings) -> Result<Self, GatewaySetupError> {
        let endpoint = parse_endpoint(&settings.endpoint)?;
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs.max(1)))
            .build()?;
        Ok(Self {
            http,
            endpoint,
            api_token: settings.api_token.clone(),
            api_version: settings
                .api_version
                .clone()
                .filter(|version| !version.trim().is_empty()),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn execute<V, T>(
        &self,
        operation: OperationKind,
        operation_name: &'static str,
        query: &str,
        variables: V,
    ) -> GatewayResult<Option<T>>
    where
        V: Serialize + Send,
        T: DeserializeOwned,
    {
        let started = Instant::now();
        let mut request = self
            .http
            .post(self.endpoint.clone())
            .json(&GraphQlRequest { query, variables });
        if !self.api_token.is_empty() {
            request = request.bearer_auth(&self.api_token);
        }
        if let Some(version) = &self.api_version {
            request = request.header(API_VERSION_HEADER, version);
        }

        let response = request.send().await.map_err(|err| {
            let err = transport_error(err);
            if err.is_connection() {
                warn!(operation = operation_name, error = %err, "service unreachable");
            }
            err
        })?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;
        let decoded = serde_json::from_slice::<GraphQlResponse<T>>(&body);

        if let Ok(envelope) = &decoded {
            if let Some(message) = envelope.first_error_message() {
                warn!(
                    operation = operation_name,
                    status = status.as_u16(),
                    error = message,
                    "remote reported an error"
                );
                return Err(GatewayError::remote(operation, message));
            }
        }
        if !status.is_success() {
            warn!(
                operation = operation_name,
                status = status.as_u16(),
                "unexpected http status"
            );
            return Err(GatewayError::Http {
                status: status.as_u16(),
            });
        }

        let envelope = decoded.map_err(|err| GatewayError::Decode(err.to_string()))?;
        debug!(
            operation = operation_name,
            elapsed_ms = started.elapsed().as_millis() as u64,
            has_data = envelope.data.is_some(),
            "graphql call completed"
        );
        Ok(envelope.data)
    }
}

fn transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_decode() {
        GatewayError::Decode(err.to_string())
    } else if let Some(status) = err.status() {
        GatewayError::Http {
            status: status.as_u16(),
        }
    } else if err.is_builder() {
        GatewayError::Decode(format!("invalid request: {err}"))
    } else {
        GatewayError::Connection(err.to_string())
    }
}

#[async_trait]
impl RemoteGateway for GraphQlGateway {
    async fn list_boards(&self) -> GatewayResult<Vec<RawBoard>> {
        let data: Option<BoardsData> = self
            .execute(
                OperationKind::Query,
                "GetBoards",
                GET_BOARDS_QUERY,
                NoVariables::default(),
            )
            .await?;
        Ok(data
            .map(|data| data.boards.into_iter().flatten().collect())
            .unwrap_or_default())
    }

    async fn list_board_items(
        &self,
        board_ids: &[BoardId],
    ) -> GatewayResult<Vec<RawBoardWithItems>> {
        let data: Option<BoardItemsData> = self
            .execute(
                OperationKind::Query,
                "GetBoardItems",
                GET_BOARD_ITEMS_QUERY,
                BoardIdsVariables {
                    board_ids: board_ids.to_vec(),
                },
            )
            .await?;
        Ok(data
            .map(|data| data.boards.into_iter().flatten().collect())
            .unwrap_or_default())
    }

    async fn list_status_column_config(
        &self,
        board_ids: &[BoardId],
    ) -> GatewayResult<Vec<RawBoardColumns>> {
        let data: Option<BoardColumnsData> = self
            .execute(
                OperationKind::Query,
                "GetBoardColumns",
                GET_BOARD_COLUMNS_QUERY,
                BoardIdsVariables {
                    board_ids: board_ids.to_vec(),
                },
            )
            .await?;
        Ok(data
            .map(|data| data.boards.into_iter().flatten().collect())
            .unwrap_or_default())
    }

    async fn set_task_status(
        &self,
        board_id: &BoardId,
        item_id: &ItemId,
        column_id: &ColumnId,
        value: &str,
    ) -> GatewayResult<()> {
        let _: Option<ChangeColumnValueData> = self
            .execute(
                OperationKind::Mutation,
                "ChangeTaskStatus",
                CHANGE_TASK_STATUS_MUTATION,
                ChangeTaskStatusVariables {
                    board_id: board_id.clone(),
                    item_id: item_id.clone(),
                    column_id: column_id.clone(),
                    value: value.to_string(),
                },
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/graphql_tests.rs"]
mod tests;
