//! HTTP implementation of [`CommandGateway`].

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{
    domain::{ContestType, Language, Problem, ProblemSelection, Verdict},
    error::{ApiError, ErrorCode},
    protocol::CommandRequest,
};
use tracing::debug;
use url::Url;

use crate::{
    config::normalize_backend_url,
    gateway::{CommandGateway, GatewayError, GatewayResult},
};

/// Posts every command as JSON to `{backend_url}/invoke`.
pub struct HttpGateway {
    http: Client,
    endpoint: Url,
}

enum Reply {
    Success(Value),
    Refused {
        status: StatusCode,
        error: Option<ApiError>,
        body: String,
    },
}

impl HttpGateway {
    pub fn new(backend_url: &str) -> anyhow::Result<Self> {
        Self::with_timeout(backend_url, None)
    }

    pub fn with_timeout(backend_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let endpoint = normalize_backend_url(backend_url)?
            .join("invoke")
            .context("failed to build invoke endpoint")?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build HTTP client")?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn send(&self, request: &CommandRequest) -> GatewayResult<Reply> {
        let command = request.name();
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|err| GatewayError::transport(command, err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| GatewayError::transport(command, err.to_string()))?;
        debug!(command, %status, "backend replied");

        if status.is_success() {
            if body.trim().is_empty() {
                return Ok(Reply::Success(Value::Null));
            }
            let value = serde_json::from_str(&body).map_err(|err| {
                GatewayError::transport(command, format!("malformed response body: {err}"))
            })?;
            return Ok(Reply::Success(value));
        }

        Ok(Reply::Refused {
            status,
            error: serde_json::from_str::<ApiError>(&body).ok(),
            body,
        })
    }

    fn decode<T: DeserializeOwned>(command: &'static str, value: Value) -> GatewayResult<T> {
        serde_json::from_value(value).map_err(|err| {
            GatewayError::transport(command, format!("unexpected response shape: {err}"))
        })
    }

    /// Unit commands answer with a success flag; an empty body or `null`
    /// also counts as success.
    fn decode_ack(command: &'static str, value: Value) -> GatewayResult<()> {
        match value {
            Value::Null | Value::Bool(true) => Ok(()),
            Value::Bool(false) => Err(GatewayError::rejected(
                command,
                "backend reported failure",
            )),
            other => Err(GatewayError::transport(
                command,
                format!("unexpected response shape: {other}"),
            )),
        }
    }

    /// 4xx is the backend refusing the command; anything else is the
    /// channel failing.
    fn refusal(
        command: &'static str,
        status: StatusCode,
        error: Option<ApiError>,
        body: String,
    ) -> GatewayError {
        let message = match error {
            Some(error) => error.message,
            None if body.trim().is_empty() => status.to_string(),
            None => body,
        };
        if status.is_client_error() {
            GatewayError::rejected(command, message)
        } else {
            GatewayError::transport(command, message)
        }
    }

    async fn invoke<T: DeserializeOwned>(&self, request: CommandRequest) -> GatewayResult<T> {
        let command = request.name();
        match self.send(&request).await? {
            Reply::Success(value) => Self::decode(command, value),
            Reply::Refused {
                status,
                error,
                body,
            } => Err(Self::refusal(command, status, error, body)),
        }
    }

    async fn acknowledge(&self, request: CommandRequest) -> GatewayResult<()> {
        let command = request.name();
        let value = self.invoke::<Value>(request).await?;
        Self::decode_ack(command, value)
    }
}

#[async_trait]
impl CommandGateway for HttpGateway {
    async fn get_directory(&self) -> GatewayResult<String> {
        self.invoke(CommandRequest::GetDirectory).await
    }

    async fn set_directory(&self, directory: &str) -> GatewayResult<()> {
        self.acknowledge(CommandRequest::SetDirectory {
            directory: directory.to_string(),
        })
        .await
    }

    async fn get_editor(&self) -> GatewayResult<String> {
        self.invoke(CommandRequest::GetEditor).await
    }

    async fn set_editor(&self, editor: &str) -> GatewayResult<()> {
        self.acknowledge(CommandRequest::SetEditor {
            editor: editor.to_string(),
        })
        .await
    }

    async fn get_language(&self) -> GatewayResult<Language> {
        self.invoke(CommandRequest::GetLanguage).await
    }

    async fn set_language(&self, language: Language) -> GatewayResult<()> {
        self.acknowledge(CommandRequest::SetLanguage { language }).await
    }

    async fn get_contest_type(&self) -> GatewayResult<ContestType> {
        self.invoke(CommandRequest::GetContestType).await
    }

    async fn set_contest_type(&self, contest_type: ContestType) -> GatewayResult<()> {
        self.acknowledge(CommandRequest::SetContestType { contest_type })
            .await
    }

    async fn get_problem_type(&self) -> GatewayResult<ProblemSelection> {
        self.invoke(CommandRequest::GetProblemType).await
    }

    async fn set_problem_type(&self, selection: &ProblemSelection) -> GatewayResult<()> {
        self.acknowledge(CommandRequest::SetProblemType {
            problem_types: selection.clone(),
        })
        .await
    }

    async fn get_show_solved(&self) -> GatewayResult<bool> {
        self.invoke(CommandRequest::GetShowSolved).await
    }

    async fn set_show_solved(&self, show_solved: bool) -> GatewayResult<()> {
        self.acknowledge(CommandRequest::SetShowSolved { show_solved })
            .await
    }

    async fn next(&self) -> GatewayResult<()> {
        self.acknowledge(CommandRequest::Next).await
    }

    async fn previous(&self) -> GatewayResult<()> {
        self.acknowledge(CommandRequest::Previous).await
    }

    async fn get_problem(&self) -> GatewayResult<Option<Problem>> {
        let request = CommandRequest::GetProblem;
        let command = request.name();
        match self.send(&request).await? {
            Reply::Success(value) => Self::decode(command, value),
            Reply::Refused {
                error:
                    Some(ApiError {
                        code: ErrorCode::NotFound,
                        ..
                    }),
                ..
            } => Ok(None),
            Reply::Refused {
                status,
                error,
                body,
            } => Err(Self::refusal(command, status, error, body)),
        }
    }

    async fn run(&self) -> GatewayResult<Vec<Verdict>> {
        self.invoke(CommandRequest::Run).await
    }

    async fn submit(&self) -> GatewayResult<Vec<Verdict>> {
        self.invoke(CommandRequest::Submit).await
    }

    async fn create_file(&self) -> GatewayResult<()> {
        self.acknowledge(CommandRequest::CreateFile).await
    }

    async fn open_file(&self) -> GatewayResult<()> {
        self.acknowledge(CommandRequest::OpenFile).await
    }

    async fn update_problems_list(&self) -> GatewayResult<()> {
        self.acknowledge(CommandRequest::UpdateProblemsList).await
    }

    async fn save_state(&self) -> GatewayResult<()> {
        self.acknowledge(CommandRequest::SaveState).await
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
