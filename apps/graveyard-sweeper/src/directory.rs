//! REST client for the directory service.
//!
//! Implements [`Directory`] against the service's HTTP API, translating
//! HTTP failures into the engine's transient/permanent error taxonomy.
//! The client does no retrying of its own; that is the engine's job.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::trace;

use graveyard_engine::prelude::*;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const READ_TIMEOUT_SECS: u64 = 30;

/// Directory service client over HTTP.
pub struct RestDirectory {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl RestDirectory {
    /// Build a client for the service at `base_url`, optionally
    /// authenticating with a bearer token.
    pub fn new(base_url: impl Into<String>, api_token: Option<String>) -> EngineResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| EngineError::directory_with_source("failed to build HTTP client", e))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            api_token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, operation: &str) -> EngineResult<T> {
        trace!(path, operation, "Directory GET");
        let response = self
            .authed(self.client.get(self.url(path)))
            .send()
            .await
            .map_err(request_error)?;

        let response = check_status(response, operation)?;
        response
            .json::<T>()
            .await
            .map_err(|e| EngineError::invalid_response(format!("{operation}: {e}")))
    }
}

/// Translate a transport-level reqwest error into the engine taxonomy.
pub(crate) fn request_error(err: reqwest::Error) -> EngineError {
    if err.is_timeout() {
        EngineError::Timeout {
            timeout_secs: READ_TIMEOUT_SECS,
        }
    } else if err.is_decode() {
        EngineError::invalid_response(err.to_string())
    } else {
        EngineError::ConnectionFailed {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// Translate a non-success HTTP status into the engine taxonomy.
///
/// 404 is left to the call sites, which know which resource was missing.
pub(crate) fn status_error(status: StatusCode, operation: &str) -> EngineError {
    match status {
        StatusCode::UNAUTHORIZED => EngineError::AuthenticationFailed,
        StatusCode::FORBIDDEN => EngineError::AuthorizationFailed {
            operation: operation.to_string(),
        },
        StatusCode::TOO_MANY_REQUESTS => {
            EngineError::throttled(format!("{operation}: rate limit exceeded"))
        }
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY | StatusCode::GATEWAY_TIMEOUT => {
            EngineError::unavailable(format!("{operation}: {status}"))
        }
        other => EngineError::directory(format!("{operation}: unexpected status {other}")),
    }
}

fn check_status(response: Response, operation: &str) -> EngineResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(status_error(status, operation))
    }
}

// Wire types

#[derive(Debug, Deserialize)]
struct GroupRef {
    id: GroupId,
}

#[derive(Debug, Deserialize)]
struct GroupsPayload {
    groups: Vec<OrgGroup>,
}

#[derive(Debug, Deserialize)]
struct AccountsPayload {
    accounts: Vec<Account>,
}

#[derive(Debug, Serialize)]
struct MoveRequest<'a> {
    from: &'a GroupId,
    to: &'a GroupId,
}

#[async_trait]
impl Directory for RestDirectory {
    async fn root_group_id(&self) -> EngineResult<GroupId> {
        let root: GroupRef = self.get_json("/v1/root", "resolve organization root").await?;
        Ok(root.id)
    }

    async fn list_groups_under(&self, parent: &GroupId) -> EngineResult<Vec<OrgGroup>> {
        let payload: GroupsPayload = self
            .get_json(&format!("/v1/groups?parent={parent}"), "list groups")
            .await?;
        Ok(payload.groups)
    }

    async fn list_accounts(&self) -> EngineResult<Vec<Account>> {
        let payload: AccountsPayload = self.get_json("/v1/accounts", "list accounts").await?;
        Ok(payload.accounts)
    }

    async fn current_parent(&self, account: &AccountId) -> EngineResult<GroupId> {
        let operation = "resolve account parent";
        let response = self
            .authed(self.client.get(self.url(&format!("/v1/accounts/{account}/parent"))))
            .send()
            .await
            .map_err(request_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(EngineError::ParentNotFound {
                account_id: account.clone(),
            });
        }
        let response = check_status(response, operation)?;
        let parent: GroupRef = response
            .json()
            .await
            .map_err(|e| EngineError::invalid_response(format!("{operation}: {e}")))?;
        Ok(parent.id)
    }

    async fn move_account(
        &self,
        account: &AccountId,
        from: &GroupId,
        to: &GroupId,
    ) -> EngineResult<()> {
        let operation = "move account";
        let response = self
            .authed(self.client.post(self.url(&format!("/v1/accounts/{account}/move"))))
            .json(&MoveRequest { from, to })
            .send()
            .await
            .map_err(request_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(EngineError::AccountNotFound {
                account_id: account.clone(),
            });
        }
        check_status(response, operation)?;
        Ok(())
    }
}
